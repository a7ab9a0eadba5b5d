//! Store error types.

use thiserror::Error;

/// Errors that can occur while saving the user table.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error (permissions, missing mount, ...).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The table could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
