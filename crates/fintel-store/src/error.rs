//! Error types for store operations

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur against the document store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Read failed
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// Write failed
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Document content could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
