//! Centralized error types for emlview.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the emlview library.
///
/// Decode problems inside a message (bad base64, malformed quoted-printable,
/// unknown charsets) are recovered locally by the parser and never surface
/// here; these variants cover the structural failures that abort an
/// operation outright.
#[derive(Error, Debug)]
pub enum EmlError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("EML file not found: {0}")]
    FileNotFound(PathBuf),

    /// Stored attachment content could not be decoded back to bytes.
    #[error("Attachment decode error: {0}")]
    Decode(String),
}

/// Convenience alias for `Result<T, EmlError>`.
pub type Result<T> = std::result::Result<T, EmlError>;

impl EmlError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` inside functions returning `EmlError`
/// when no path context is available (rare — prefer `EmlError::io`).
impl From<std::io::Error> for EmlError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
