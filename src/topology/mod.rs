//! Topology entities and their fixed-layout records
//!
//! Every kind of topology comes in three shapes:
//!
//! * the entity (for example [`Mesh2d`]), holding decoded names and owned
//!   arrays, which is what callers build and get back
//! * the dimensions (for example [`Mesh2dDimensions`]), the counts returned by
//!   an inquire and used to size a record
//! * the record (for example [`Mesh2dRecord`]), the flat layout exchanged with
//!   a [`Store`]: names padded to the store's widths, optional arrays as
//!   `Option`, flags and counts as plain integers
//!
//! The [`Topology`] trait ties the three together and dispatches to the
//! store calls of the kind.

use super::error;
use super::file::UGridFile;
use super::store::{FileId, Status, Store};
use super::text::{self, NameWidths};
use super::types::{StoreEnums, TopologyKind};

mod contacts;
mod mesh1d;
mod mesh2d;
mod network1d;

pub use contacts::{Contacts, ContactsDimensions, ContactsRecord};
pub use mesh1d::{Mesh1d, Mesh1dDimensions, Mesh1dRecord};
pub use mesh2d::{Mesh2d, Mesh2dDimensions, Mesh2dRecord};
pub use network1d::{Network1d, Network1dDimensions, Network1dRecord};

/// Session parameters needed to translate between entities and records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoding {
    pub widths: NameWidths,
    pub enums: StoreEnums,
}

/// A kind of topology that can be read from and written to a store
pub trait Topology: Sized {
    const KIND: TopologyKind;

    /// Counts derived from the arrays of an entity
    type Dimensions: Copy + Default + PartialEq + std::fmt::Debug;
    /// Flat layout exchanged with the store
    type Record: std::fmt::Debug;

    fn name(&self) -> &str;

    fn dimensions(&self) -> Self::Dimensions;

    /// Checks lengths and index ranges of the arrays against each other
    fn validate(&self) -> error::Result<()>;

    /// Checks that topologies referenced by name exist in `file`
    fn check_references<S: Store + ?Sized>(&self, _file: &UGridFile<'_, S>) -> error::Result<()> {
        Ok(())
    }

    fn to_record(&self, encoding: Encoding) -> Self::Record;

    /// Storage for a record of the given dimensions, names are blank and
    /// optional arrays allocated
    fn allocate(dimensions: Self::Dimensions, encoding: Encoding) -> Self::Record;

    /// Dimensions a record was allocated for
    fn record_dimensions(record: &Self::Record) -> Self::Dimensions;

    /// Decodes a filled record
    fn from_record(record: &Self::Record, encoding: Encoding) -> error::Result<Self>;

    fn inquire<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        dimensions: &mut Self::Dimensions,
    ) -> Status;
    fn fill<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        record: &mut Self::Record,
    ) -> Status;
    fn define<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        record: &Self::Record,
        topology: &mut usize,
    ) -> Status;
    fn put<S: Store + ?Sized>(
        store: &S,
        file: FileId,
        topology: usize,
        record: &Self::Record,
    ) -> Status;
}

/// Encodes a list of names, an empty list is not sent at all
pub(crate) fn encode_names(names: &[String], width: usize) -> Option<Vec<u8>> {
    if names.is_empty() {
        None
    } else {
        Some(text::encode(names, width))
    }
}

/// Decodes a list of names, a missing or blank list reads as empty
pub(crate) fn decode_names(
    buffer: Option<&Vec<u8>>,
    count: usize,
    width: usize,
) -> error::Result<Vec<String>> {
    let names = match buffer {
        Some(buffer) => text::decode(buffer, count, width)?,
        None => return Ok(Vec::new()),
    };
    if names.iter().all(String::is_empty) {
        Ok(Vec::new())
    } else {
        Ok(names)
    }
}

/// Length check for a list that may be omitted
pub(crate) fn check_optional_len(what: &str, len: usize, wanted: usize) -> error::Result<()> {
    if len == 0 {
        return Ok(());
    }
    error::expect_len(what, len, wanted)
}

/// Every index must address one of `count` entities starting at
/// `start_index`, or be the fill value
pub(crate) fn check_indices(
    what: &str,
    indices: &[i32],
    start_index: i32,
    count: usize,
    fill_value: Option<i32>,
) -> error::Result<()> {
    let end = i64::from(start_index) + count as i64;
    for (position, &index) in indices.iter().enumerate() {
        if Some(index) == fill_value {
            continue;
        }
        if i64::from(index) < i64::from(start_index) || i64::from(index) >= end {
            return Err(error::Error::Consistency(format!(
                "{}[{}] = {} is outside of [{}, {})",
                what, position, index, start_index, end
            )));
        }
    }
    Ok(())
}

pub(crate) fn check_start_index(start_index: i32) -> error::Result<()> {
    match start_index {
        0 | 1 => Ok(()),
        other => Err(error::Error::Consistency(format!(
            "start index must be 0 or 1, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_lists_are_absent() {
        let buffer = text::blank(3, 4);
        assert!(decode_names(Some(&buffer), 3, 4).unwrap().is_empty());
        assert!(decode_names(None, 3, 4).unwrap().is_empty());
        assert!(encode_names(&[], 4).is_none());

        let buffer = text::encode(&["a", "", "c"], 4);
        assert_eq!(
            decode_names(Some(&buffer), 3, 4).unwrap(),
            vec!["a", "", "c"]
        );
    }

    #[test]
    fn index_ranges() {
        assert!(check_indices("edge_node", &[1, 2, 2, 3], 1, 3, None).is_ok());
        assert!(check_indices("edge_node", &[0, 1], 1, 3, None).is_err());
        assert!(check_indices("face_node", &[0, -999, 2], 0, 3, Some(-999)).is_ok());
        assert!(check_indices("face_node", &[3], 0, 3, Some(-999)).is_err());
    }
}
