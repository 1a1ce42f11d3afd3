//! Dimensioned, attributed array containers the engine writes into
//!
//! A [`Dataset`] is the open contents of one file: named dimensions,
//! variables declared over them and attributes on variables or on the
//! file itself. A [`Backend`] turns paths into datasets and back.

use std::path::Path;

use super::attribute::AttributeValue;
use super::error;
use super::types::Mode;

pub mod memory;
#[cfg(feature = "netcdf")]
pub mod nc;
pub(crate) mod staged;

pub use memory::{MemoryBackend, MemoryDataset};
#[cfg(feature = "netcdf")]
pub use nc::{NetcdfBackend, NetcdfDataset};

/// Element type of a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Double,
    /// Fixed-width text, one byte per element
    Char,
}

/// The flattened contents of a variable
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    Int(Vec<i32>),
    Double(Vec<f64>),
    Char(Vec<u8>),
}

impl Values {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Int(_) => ValueKind::Int,
            Self::Double(_) => ValueKind::Double,
            Self::Char(_) => ValueKind::Char,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Int(x) => x.len(),
            Self::Double(x) => x.len(),
            Self::Char(x) => x.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zero initialised values
    pub fn zeros(kind: ValueKind, len: usize) -> Self {
        match kind {
            ValueKind::Int => Self::Int(vec![0; len]),
            ValueKind::Double => Self::Double(vec![0.0; len]),
            ValueKind::Char => Self::Char(vec![0; len]),
        }
    }
}

/// The contents of one open file
///
/// `variable` arguments of the attribute methods select the variable the
/// attribute belongs to, `None` selects the file.
pub trait Dataset {
    fn add_dimension(&mut self, name: &str, len: usize) -> error::Result<()>;
    fn dimension_len(&self, name: &str) -> Option<usize>;

    /// Declares a variable, a variable without dimensions holds one value
    fn add_variable(&mut self, name: &str, kind: ValueKind, dimensions: &[&str])
        -> error::Result<()>;
    /// Names of all variables in declaration order
    fn variable_names(&self) -> Vec<String>;
    fn variable_kind(&self, name: &str) -> Option<ValueKind>;
    /// Names and lengths of the dimensions of a variable
    fn variable_dimensions(&self, name: &str) -> error::Result<Vec<(String, usize)>>;

    /// Replaces the whole contents of a variable
    fn put_values(&mut self, name: &str, values: Values) -> error::Result<()>;
    fn get_values(&self, name: &str) -> error::Result<Values>;

    /// Adds or replaces an attribute
    fn add_attribute(
        &mut self,
        variable: Option<&str>,
        name: &str,
        value: AttributeValue,
    ) -> error::Result<()>;
    fn attribute_value(&self, variable: Option<&str>, name: &str) -> Option<AttributeValue>;
    /// Attribute names in declaration order
    fn attribute_names(&self, variable: Option<&str>) -> error::Result<Vec<String>>;

    fn has_variable(&self, name: &str) -> bool {
        self.variable_kind(name).is_some()
    }
}

/// Opens and closes datasets at paths
pub trait Backend {
    type Dataset: Dataset;

    /// Short description, part of the engine version
    fn name(&self) -> String;

    /// Read needs an existing file, write fails on one and replace
    /// truncates it
    fn open(&self, path: &Path, mode: Mode) -> error::Result<Self::Dataset>;

    /// Flushes a dataset opened with `mode` and releases it
    fn close(&self, path: &Path, dataset: Self::Dataset, mode: Mode) -> error::Result<()>;
}
