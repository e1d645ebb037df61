//! Authentication boundary
//!
//! The identity provider is an external collaborator; this module only
//! defines the seam. A bearer credential resolves to a stable user id or
//! the whole request fails with `AgentError::Authentication`.

use crate::error::{AgentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Resolves bearer credentials to stable user ids
#[async_trait]
pub trait AuthVerifier: Send + Sync {
    /// Verify a bearer credential and return the user id it belongs to
    async fn verify(&self, bearer_token: &str) -> Result<String>;
}

/// Verifier over a fixed token-to-user map
///
/// Suitable for local wiring and tests; production deployments substitute
/// an implementation backed by the real identity provider.
#[derive(Debug, Default)]
pub struct StaticAuthVerifier {
    tokens: HashMap<String, String>,
}

impl StaticAuthVerifier {
    /// Create an empty verifier
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a token for a user id
    pub fn with_token(mut self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), user_id.into());
        self
    }
}

#[async_trait]
impl AuthVerifier for StaticAuthVerifier {
    async fn verify(&self, bearer_token: &str) -> Result<String> {
        self.tokens
            .get(bearer_token)
            .cloned()
            .ok_or_else(|| AgentError::Authentication("unknown bearer token".to_string()))
    }
}
