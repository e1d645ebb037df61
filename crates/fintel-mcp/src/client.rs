//! HTTP client for the financial data source
//!
//! The provider exposes one endpoint: `POST {base}/mcp/stream` with a
//! session identifier header and a body naming the requested data kind.
//! A `200` answer carries the raw JSON payload for that kind; anything
//! else is a failure.

use crate::{DataKind, McpError, Result};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the external financial data source
///
/// One instance is shared across requests; the session identifier is
/// supplied per call since it is bound per user.
#[derive(Debug, Clone)]
pub struct McpClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl McpClient {
    /// Create a new client with the default 30s timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new client with a custom per-request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| McpError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Base URL of the data source
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL the user visits to complete the account-linking flow
    pub fn link_url(&self, session_token: &str) -> String {
        format!("{}/mockWebPage?sessionId={session_token}", self.base_url)
    }

    /// Fetch the raw payload for one data kind
    ///
    /// # Arguments
    ///
    /// * `session_token` - Session identifier bound to the user at link time
    /// * `kind` - The data kind to fetch
    ///
    /// # Errors
    ///
    /// `McpError::Timeout` when the timeout budget is exceeded,
    /// `McpError::Status` on a non-200 answer, `McpError::Transport` on any
    /// other network failure.
    pub async fn fetch(&self, session_token: &str, kind: DataKind) -> Result<Value> {
        let url = format!("{}/mcp/stream", self.base_url);
        debug!(kind = %kind, "Fetching data kind from provider");

        let response = self
            .http_client
            .post(&url)
            .header("X-Session-ID", session_token)
            .json(&json!({ "tool_name": kind.as_str() }))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    McpError::Timeout
                } else {
                    McpError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(McpError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| McpError::InvalidBody(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = McpClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_link_url() {
        let client = McpClient::new("http://localhost:8080").unwrap();
        assert_eq!(
            client.link_url("abc-123"),
            "http://localhost:8080/mockWebPage?sessionId=abc-123"
        );
    }
}
