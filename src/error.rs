//! Errors that can occur when talking to a store

use super::store::{Status, Store};

#[derive(Debug, PartialEq)]
pub enum Error {
    /// The running platform has no native store build
    UnsupportedPlatform(String),
    /// File mode outside of read, write and replace
    InvalidMode(String),
    /// A store call failed, holds the last error message of the store
    Store(String),
    /// Could not find topology/variable/attribute/etc
    NotFound(String),
    /// Lengths or dimensions of a record do not agree with each other
    Consistency(String),
    /// A referenced network or mesh is missing from the file
    Schema(String),
    /// Supplied the wrong length of the buffer
    BufferLen { wanted: usize, actual: usize },
    /// Supplied the wrong type of value
    TypeMismatch,
    /// Variable/dimension/topology already exists
    AlreadyExists(String),
    /// Errors from the netcdf container
    Netcdf(String),
    /// Misc errors
    Str(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Error {
        Error::Str(s.into())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Error {
        Error::Str(s)
    }
}

#[cfg(feature = "netcdf")]
impl From<netcdf::Error> for Error {
    fn from(e: netcdf::Error) -> Error {
        Error::Netcdf(e.to_string())
    }
}

use std::fmt;
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedPlatform(x) => write!(f, "unsupported platform: {}", x),
            Error::InvalidMode(x) => write!(f, "unsupported file mode {:?}", x),
            Error::Store(x) => write!(f, "store error: {}", x),
            Error::NotFound(x) => write!(f, "could not find {}", x),
            Error::Consistency(x) => write!(f, "inconsistent record: {}", x),
            Error::Schema(x) => write!(f, "schema error: {}", x),
            Error::BufferLen { wanted, actual } => write!(
                f,
                "buffer size mismatch, has size {}, but needs size {}",
                actual, wanted
            ),
            Error::TypeMismatch => write!(f, "value type does not correspond to what is defined"),
            Error::AlreadyExists(x) => write!(f, "{} already exists", x),
            Error::Netcdf(x) => write!(f, "netcdf error: {}", x),
            Error::Str(x) => write!(f, "{}", x),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Turns a store status into a `Result`, fetching the
/// store's last message on failure
pub(crate) fn checked<S: Store + ?Sized>(store: &S, status: Status) -> Result<()> {
    match status {
        Status::Success => Ok(()),
        Status::Failure => Err(Error::Store(store.last_error())),
    }
}

/// Fails with `Error::Consistency` unless `actual == wanted`
pub(crate) fn expect_len(what: &str, actual: usize, wanted: usize) -> Result<()> {
    if actual != wanted {
        return Err(Error::Consistency(format!(
            "{} has {} values, expected {}",
            what, actual, wanted
        )));
    }
    Ok(())
}
