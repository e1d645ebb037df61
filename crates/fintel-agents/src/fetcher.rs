//! Data Fetcher — per-kind fetches that never fail
//!
//! Each fetch resolves to either the raw provider payload or an inline
//! `{"error": ...}` marker; exceptions never escape. A refresh fans out all
//! requested kinds concurrently and joins them, so one slow or failing kind
//! cannot block or fail the others.

use fintel_mcp::{DataKind, McpClient, McpError};
use fintel_store::DocumentStore;
use futures::future::join_all;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Document field holding the user's data-source session token
pub const SESSION_TOKEN_FIELD: &str = "session_token";

/// Per-request mapping from data kind to raw payload or error marker
pub type FinancialBundle = BTreeMap<DataKind, Value>;

/// Check whether a fetched value is an inline error marker
pub fn is_error_marker(value: &Value) -> bool {
    value.get("error").is_some()
}

/// Fetches raw financial data for a user, one data kind at a time
pub struct DataFetcher {
    client: McpClient,
    store: Arc<dyn DocumentStore>,
}

impl DataFetcher {
    /// Create a new fetcher over a data-source client and a store handle
    pub fn new(client: McpClient, store: Arc<dyn DocumentStore>) -> Self {
        Self { client, store }
    }

    /// Underlying data-source client
    pub fn client(&self) -> &McpClient {
        &self.client
    }

    /// Look up the user's bound session token, `None` if absent or unreadable
    async fn session_token(&self, user_id: &str) -> Option<String> {
        match self.store.get(user_id).await {
            Ok(Some(document)) => document
                .get(SESSION_TOKEN_FIELD)
                .and_then(Value::as_str)
                .map(str::to_string),
            Ok(None) => None,
            Err(e) => {
                warn!(user_id, error = %e, "Failed to read user document for session token");
                None
            }
        }
    }

    /// Fetch one data kind for a user
    ///
    /// Never fails: a missing session short-circuits without a network call,
    /// and every transport outcome maps to an inline error marker.
    pub async fn fetch(&self, user_id: &str, kind: DataKind) -> Value {
        let Some(token) = self.session_token(user_id).await else {
            debug!(user_id, kind = %kind, "No session token bound; skipping fetch");
            return json!({ "error": format!("could not fetch {kind}") });
        };

        match self.client.fetch(&token, kind).await {
            Ok(payload) => payload,
            Err(McpError::Timeout) => {
                warn!(user_id, kind = %kind, "Fetch timed out");
                json!({ "error": format!("Timeout fetching {kind}") })
            }
            Err(McpError::Status(code)) => {
                warn!(user_id, kind = %kind, status = code, "Fetch rejected by provider");
                json!({ "error": format!("Server returned {code}") })
            }
            Err(e) => {
                warn!(user_id, kind = %kind, error = %e, "Fetch failed");
                json!({ "error": format!("Could not fetch {kind}") })
            }
        }
    }

    /// Fetch several kinds concurrently with per-branch error isolation
    pub async fn fetch_all(&self, user_id: &str, kinds: &[DataKind]) -> FinancialBundle {
        let fetches = kinds
            .iter()
            .map(|&kind| async move { (kind, self.fetch(user_id, kind).await) });

        join_all(fetches).await.into_iter().collect()
    }
}
