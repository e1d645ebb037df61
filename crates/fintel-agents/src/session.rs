//! Data-source session binding
//!
//! A user links their accounts by visiting the provider's login page with
//! a fresh session token; the same token is stored in the user's document
//! and rides every subsequent fetch as the session header.

use crate::error::Result;
use crate::fetcher::SESSION_TOKEN_FIELD;
use fintel_mcp::McpClient;
use fintel_store::DocumentStore;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Mint a session token for the user and return the provider login link
///
/// The token is persisted before the link goes out; a store failure here
/// is fatal because the link would dangle without it.
pub async fn init_session(
    store: &Arc<dyn DocumentStore>,
    client: &McpClient,
    user_id: &str,
) -> Result<Value> {
    let token = Uuid::new_v4().to_string();

    store
        .merge(user_id, json!({ SESSION_TOKEN_FIELD: token }))
        .await?;
    info!(user_id, "Bound new data-source session");

    Ok(json!({
        "session_token": token,
        "login_url": client.link_url(&token),
    }))
}
