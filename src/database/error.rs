use std::path::PathBuf;
use thiserror::Error;

/// Errors from the flat-file course store and user directory
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Course {0} not found")]
    NotFound(u32),

    #[error("Course store is empty")]
    EmptyStore,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage fault on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt document {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    /// Storage faults are not recoverable by the caller; everything else is an expected outcome.
    pub fn is_fault(&self) -> bool {
        matches!(self, StoreError::Io { .. } | StoreError::Corrupt { .. } | StoreError::Encode(_))
    }
}
