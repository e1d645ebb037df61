//! Error types for model-backend operations

use thiserror::Error;

/// Result type for model-backend operations
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur while talking to a model backend
#[derive(Error, Debug)]
pub enum LlmError {
    /// API request failed
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Invalid API key or authentication failed
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Unexpected response format
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Tool execution error
    #[error("Tool error: {0}")]
    ToolError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
