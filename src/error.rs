//! Error types for recstore

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for recstore operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for recstore
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Document Path Errors
    // -------------------------------------------------------------------------
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Path must contain at least one segment")]
    EmptyPath,

    #[error("Value at '{path}' is not a mapping")]
    NotAMapping { path: String },

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("{namespace} with id '{id}' not found")]
    RecordNotFound { namespace: String, id: String },

    #[error("Invalid {namespace} record: {reason}")]
    InvalidRecord { namespace: String, reason: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::PathNotFound(_) | Error::RecordNotFound { .. })
    }

    /// Check if this error came from the filesystem
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            Error::FileRead { .. } | Error::FileWrite { .. } | Error::DirectoryCreate { .. }
        )
    }
}

/// Render a document path the way error messages and logs show it
pub(crate) fn display_path<S: AsRef<str>>(path: &[S]) -> String {
    let segments: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
    format!("[{}]", segments.join(", "))
}
