//! Error taxonomy for agent operations
//!
//! Only `Authentication` is allowed to reach the caller of an agent
//! operation; every other category is recovered inline with a degraded
//! value (error marker, fallback summary, cached or static response).

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Errors raised inside the aggregation and agent layer
#[derive(Error, Debug)]
pub enum AgentError {
    /// Invalid or missing credential; aborts the whole request
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Per-kind fetch failure; recovered as an inline error marker
    #[error("data source error: {0}")]
    DataSource(String),

    /// Summary failed to round-trip through JSON; recovered with a fallback object
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Document store read/write failure; logged and swallowed
    #[error("cache persistence error: {0}")]
    CachePersistence(String),

    /// Model output was not valid structured JSON; recovered via fallback chain
    #[error("model output parse error: {0}")]
    ModelOutputParse(String),

    /// Model backend call failed outright
    #[error("model backend error: {0}")]
    ModelBackend(String),
}

impl From<fintel_store::StoreError> for AgentError {
    fn from(err: fintel_store::StoreError) -> Self {
        AgentError::CachePersistence(err.to_string())
    }
}

impl From<fintel_llm::LlmError> for AgentError {
    fn from(err: fintel_llm::LlmError) -> Self {
        AgentError::ModelBackend(err.to_string())
    }
}
