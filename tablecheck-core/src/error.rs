//! Error types for Tablecheck core.
//!
//! The parsing pipeline never fails; only loading reports and severity
//! tables can.

use std::{error::Error, fmt, io};

/// Error type for Tablecheck core operations.
#[derive(Debug)]
pub enum TablecheckError {
    /// An underlying I/O error.
    Io(io::Error),
    /// A severity table could not be decoded.
    Config(serde_json::Error),
}

impl fmt::Display for TablecheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Config(err) => write!(f, "invalid severity table: {err}"),
        }
    }
}

impl Error for TablecheckError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<io::Error> for TablecheckError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for TablecheckError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value)
    }
}

/// Convenience result type for Tablecheck core.
pub type Result<T> = std::result::Result<T, TablecheckError>;
