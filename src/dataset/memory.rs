//! Datasets kept in process memory
//!
//! Closed datasets are stored in a map keyed by path, so a file written and
//! closed can be opened again for reading through the same backend.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::{Backend, Dataset, ValueKind, Values};
use crate::attribute::AttributeValue;
use crate::error;
use crate::types::Mode;

#[derive(Debug, Clone)]
struct MemoryVariable {
    name: String,
    dimensions: Vec<String>,
    attributes: Vec<(String, AttributeValue)>,
    values: Values,
}

/// The contents of one file
#[derive(Debug, Clone, Default)]
pub struct MemoryDataset {
    dimensions: Vec<(String, usize)>,
    variables: Vec<MemoryVariable>,
    attributes: Vec<(String, AttributeValue)>,
}

impl MemoryDataset {
    pub fn new() -> Self {
        Self::default()
    }

    fn variable(&self, name: &str) -> error::Result<&MemoryVariable> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| error::Error::NotFound(format!("variable {}", name)))
    }

    fn variable_mut(&mut self, name: &str) -> error::Result<&mut MemoryVariable> {
        self.variables
            .iter_mut()
            .find(|v| v.name == name)
            .ok_or_else(|| error::Error::NotFound(format!("variable {}", name)))
    }

    fn attributes(&self, variable: Option<&str>) -> error::Result<&Vec<(String, AttributeValue)>> {
        match variable {
            Some(name) => Ok(&self.variable(name)?.attributes),
            None => Ok(&self.attributes),
        }
    }
}

impl Dataset for MemoryDataset {
    fn add_dimension(&mut self, name: &str, len: usize) -> error::Result<()> {
        if self.dimension_len(name).is_some() {
            return Err(error::Error::AlreadyExists(format!("dimension {}", name)));
        }
        self.dimensions.push((name.to_string(), len));
        Ok(())
    }

    fn dimension_len(&self, name: &str) -> Option<usize> {
        self.dimensions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, len)| *len)
    }

    fn add_variable(
        &mut self,
        name: &str,
        kind: ValueKind,
        dimensions: &[&str],
    ) -> error::Result<()> {
        if self.has_variable(name) {
            return Err(error::Error::AlreadyExists(format!("variable {}", name)));
        }
        let mut len = 1;
        for dim in dimensions {
            len *= self
                .dimension_len(dim)
                .ok_or_else(|| error::Error::NotFound(format!("dimension {}", dim)))?;
        }
        self.variables.push(MemoryVariable {
            name: name.to_string(),
            dimensions: dimensions.iter().map(|d| d.to_string()).collect(),
            attributes: Vec::new(),
            values: Values::zeros(kind, len),
        });
        Ok(())
    }

    fn variable_names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }

    fn variable_kind(&self, name: &str) -> Option<ValueKind> {
        self.variable(name).ok().map(|v| v.values.kind())
    }

    fn variable_dimensions(&self, name: &str) -> error::Result<Vec<(String, usize)>> {
        let variable = self.variable(name)?;
        variable
            .dimensions
            .iter()
            .map(|d| {
                self.dimension_len(d)
                    .map(|len| (d.clone(), len))
                    .ok_or_else(|| error::Error::NotFound(format!("dimension {}", d)))
            })
            .collect()
    }

    fn put_values(&mut self, name: &str, values: Values) -> error::Result<()> {
        let variable = self.variable_mut(name)?;
        if variable.values.kind() != values.kind() {
            return Err(error::Error::TypeMismatch);
        }
        if variable.values.len() != values.len() {
            return Err(error::Error::BufferLen {
                wanted: variable.values.len(),
                actual: values.len(),
            });
        }
        variable.values = values;
        Ok(())
    }

    fn get_values(&self, name: &str) -> error::Result<Values> {
        Ok(self.variable(name)?.values.clone())
    }

    fn add_attribute(
        &mut self,
        variable: Option<&str>,
        name: &str,
        value: AttributeValue,
    ) -> error::Result<()> {
        let attributes = match variable {
            Some(variable) => &mut self.variable_mut(variable)?.attributes,
            None => &mut self.attributes,
        };
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => attributes.push((name.to_string(), value)),
        }
        Ok(())
    }

    fn attribute_value(&self, variable: Option<&str>, name: &str) -> Option<AttributeValue> {
        self.attributes(variable)
            .ok()?
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn attribute_names(&self, variable: Option<&str>) -> error::Result<Vec<String>> {
        Ok(self
            .attributes(variable)?
            .iter()
            .map(|(n, _)| n.clone())
            .collect())
    }
}

/// Keeps closed files in memory
#[derive(Debug)]
pub struct MemoryBackend {
    disk: Mutex<HashMap<PathBuf, MemoryDataset>>,
    writable: AtomicBool,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self {
            disk: Mutex::new(HashMap::new()),
            writable: AtomicBool::new(true),
        }
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a file exists at `path`
    pub fn contains(&self, path: &Path) -> bool {
        self.disk.lock().contains_key(path)
    }

    /// A copy of the file at `path`
    pub fn snapshot(&self, path: &Path) -> Option<MemoryDataset> {
        self.disk.lock().get(path).cloned()
    }

    /// While not writable, closing a written file fails
    pub fn set_writable(&self, writable: bool) {
        self.writable.store(writable, Ordering::SeqCst);
    }
}

impl Backend for MemoryBackend {
    type Dataset = MemoryDataset;

    fn name(&self) -> String {
        "memory".to_string()
    }

    fn open(&self, path: &Path, mode: Mode) -> error::Result<MemoryDataset> {
        let mut disk = self.disk.lock();
        match mode {
            Mode::Read => disk
                .get(path)
                .cloned()
                .ok_or_else(|| error::Error::NotFound(format!("file {}", path.display()))),
            Mode::Write => {
                if disk.contains_key(path) {
                    return Err(error::Error::AlreadyExists(format!(
                        "file {}",
                        path.display()
                    )));
                }
                disk.insert(path.to_path_buf(), MemoryDataset::new());
                Ok(MemoryDataset::new())
            }
            Mode::Replace => {
                disk.insert(path.to_path_buf(), MemoryDataset::new());
                Ok(MemoryDataset::new())
            }
        }
    }

    fn close(&self, path: &Path, dataset: MemoryDataset, mode: Mode) -> error::Result<()> {
        if !mode.is_writable() {
            return Ok(());
        }
        if !self.writable.load(Ordering::SeqCst) {
            return Err(error::Error::Str(format!(
                "could not flush {}, storage is read-only",
                path.display()
            )));
        }
        self.disk.lock().insert(path.to_path_buf(), dataset);
        Ok(())
    }
}
