//! Error types for data-source operations

use thiserror::Error;

/// Result type for data-source operations
pub type Result<T> = std::result::Result<T, McpError>;

/// Errors that can occur while fetching from the financial data source
#[derive(Error, Debug)]
pub enum McpError {
    /// Request exceeded the timeout budget
    #[error("request timed out")]
    Timeout,

    /// Server answered with a non-success status
    #[error("server returned {0}")]
    Status(u16),

    /// Network-level failure
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body was not valid JSON
    #[error("invalid response body: {0}")]
    InvalidBody(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
