//! The interface between a session and the engine owning the files
//!
//! A store is a flat table of calls. Every call reports a [`Status`];
//! results are written to out-parameters and on failure the message is
//! fetched separately through [`Store::last_error`]. Names travel as
//! space-padded byte fields of the widths reported by
//! [`Store::name_length`] and [`Store::name_long_length`].
//!
//! Records are owned by the caller. `*_get` calls fill the buffers of a
//! record allocated from the dimensions returned by `*_inquire`, and
//! clear optional fields the file does not hold.

use std::path::Path;

use super::topology::{
    ContactsDimensions, ContactsRecord, Mesh1dDimensions, Mesh1dRecord, Mesh2dDimensions,
    Mesh2dRecord, Network1dDimensions, Network1dRecord,
};
use super::types::{Location, Mode, TopologyKind};

/// Handle of an open file inside a store
pub type FileId = i32;

/// Outcome of a store call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Status {
    Success = 0,
    Failure = 1,
}

impl Status {
    pub fn is_success(self) -> bool {
        self == Status::Success
    }
}

#[allow(missing_docs)]
pub trait Store {
    /// Message of the last failed call
    fn last_error(&self) -> String;
    /// Implementation version of the store
    fn version(&self, version: &mut String) -> Status;

    /// Whether the store runs a native build, see [`native_library_name`]
    fn is_native(&self) -> bool {
        false
    }

    fn name_length(&self, length: &mut usize) -> Status;
    fn name_long_length(&self, length: &mut usize) -> Status;

    fn file_mode(&self, mode: Mode, value: &mut i32) -> Status;
    fn topology_enum(&self, kind: TopologyKind, value: &mut i32) -> Status;
    fn location_enum(&self, location: Location, value: &mut i32) -> Status;

    fn open(&self, path: &Path, mode: i32, file: &mut FileId) -> Status;
    /// Flushes and releases the file, the handle is invalid afterwards
    fn close(&self, file: FileId) -> Status;

    fn topology_count(&self, file: FileId, kind: i32, count: &mut usize) -> Status;
    /// Name of a topology, padded to the short width
    fn topology_name(&self, file: FileId, kind: i32, topology: usize, name: &mut [u8]) -> Status;

    fn network1d_inquire(
        &self,
        file: FileId,
        topology: usize,
        dimensions: &mut Network1dDimensions,
    ) -> Status;
    fn network1d_get(&self, file: FileId, topology: usize, record: &mut Network1dRecord) -> Status;
    fn network1d_define(&self, file: FileId, record: &Network1dRecord, topology: &mut usize)
        -> Status;
    fn network1d_put(&self, file: FileId, topology: usize, record: &Network1dRecord) -> Status;

    fn mesh1d_inquire(
        &self,
        file: FileId,
        topology: usize,
        dimensions: &mut Mesh1dDimensions,
    ) -> Status;
    fn mesh1d_get(&self, file: FileId, topology: usize, record: &mut Mesh1dRecord) -> Status;
    fn mesh1d_define(&self, file: FileId, record: &Mesh1dRecord, topology: &mut usize) -> Status;
    fn mesh1d_put(&self, file: FileId, topology: usize, record: &Mesh1dRecord) -> Status;

    fn mesh2d_inquire(
        &self,
        file: FileId,
        topology: usize,
        dimensions: &mut Mesh2dDimensions,
    ) -> Status;
    fn mesh2d_get(&self, file: FileId, topology: usize, record: &mut Mesh2dRecord) -> Status;
    fn mesh2d_define(&self, file: FileId, record: &Mesh2dRecord, topology: &mut usize) -> Status;
    fn mesh2d_put(&self, file: FileId, topology: usize, record: &Mesh2dRecord) -> Status;

    fn contacts_inquire(
        &self,
        file: FileId,
        topology: usize,
        dimensions: &mut ContactsDimensions,
    ) -> Status;
    fn contacts_get(&self, file: FileId, topology: usize, record: &mut ContactsRecord) -> Status;
    fn contacts_define(&self, file: FileId, record: &ContactsRecord, topology: &mut usize)
        -> Status;
    fn contacts_put(&self, file: FileId, topology: usize, record: &ContactsRecord) -> Status;

    fn topology_count_data_variables(
        &self,
        file: FileId,
        kind: i32,
        topology: usize,
        location: i32,
        count: &mut usize,
    ) -> Status;
    /// Names of the data variables, each padded to the long width
    fn topology_get_data_variables(
        &self,
        file: FileId,
        kind: i32,
        topology: usize,
        location: i32,
        names: &mut [u8],
    ) -> Status;

    fn variable_count_attributes(&self, file: FileId, variable: &[u8], count: &mut usize)
        -> Status;
    fn variable_get_attributes_names(&self, file: FileId, variable: &[u8], names: &mut [u8])
        -> Status;
    /// Values in the same order as the names, stringified and padded to
    /// the long width
    fn variable_get_attributes_values(
        &self,
        file: FileId,
        variable: &[u8],
        values: &mut [u8],
    ) -> Status;
    fn variable_count_dimensions(&self, file: FileId, variable: &[u8], count: &mut usize)
        -> Status;
    fn variable_get_data_dimensions(
        &self,
        file: FileId,
        variable: &[u8],
        dimensions: &mut [usize],
    ) -> Status;
    fn variable_get_data_double(&self, file: FileId, variable: &[u8], data: &mut [f64]) -> Status;
    fn variable_get_data_int(&self, file: FileId, variable: &[u8], data: &mut [i32]) -> Status;

    /// Declares a scalar integer variable
    fn variable_int_define(&self, file: FileId, variable: &[u8]) -> Status;
    fn attribute_int_define(
        &self,
        file: FileId,
        variable: &[u8],
        attribute: &[u8],
        values: &[i32],
    ) -> Status;
    fn attribute_double_define(
        &self,
        file: FileId,
        variable: &[u8],
        attribute: &[u8],
        values: &[f64],
    ) -> Status;
    fn attribute_char_define(
        &self,
        file: FileId,
        variable: &[u8],
        attribute: &[u8],
        value: &[u8],
    ) -> Status;
    fn attribute_global_char_define(&self, file: FileId, attribute: &[u8], value: &[u8])
        -> Status;
}

/// File name of the native store build for the running platform
pub fn native_library_name() -> super::error::Result<&'static str> {
    library_name(std::env::consts::OS)
}

fn library_name(os: &str) -> super::error::Result<&'static str> {
    match os {
        "windows" => Ok("UGridApi.dll"),
        "linux" => Ok("UGridApi.so"),
        "macos" => Ok("UGridApi.dylib"),
        _ => Err(super::error::Error::UnsupportedPlatform(os.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn library_name_has_platform_suffix() {
        assert_eq!(library_name("linux").unwrap(), "UGridApi.so");
        assert_eq!(library_name("windows").unwrap(), "UGridApi.dll");
        assert_eq!(library_name("macos").unwrap(), "UGridApi.dylib");
        let err = library_name("plan9").unwrap_err();
        assert_eq!(err, Error::UnsupportedPlatform("plan9".into()));
        assert_eq!(err.to_string(), "unsupported platform: plan9");
    }
}
