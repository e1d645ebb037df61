//! Resilient structured-output handling for the list-producing agents
//!
//! Guardian, Catalyst and Strategist must always hand back a well-formed
//! payload with at least two items in its list. The recovery ladder for a
//! model reply is: parse it (markdown fences stripped), refill a missing
//! or empty list from the static default, fall back to the last good
//! payload cached in the user's document, and finally to the static
//! default itself. Only a reply that is not a JSON object falls off the
//! first rung.

use fintel_store::DocumentStore;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::Result;

/// Per-agent contract for structured output recovery
pub(crate) struct StructuredContract {
    /// Document field holding the last good payload for this agent
    pub cache_field: &'static str,
    /// List field the payload must carry
    pub list_field: &'static str,
    /// Static payload with two list items, the floor of the ladder
    pub fallback: fn() -> Value,
}

/// Strip a surrounding markdown code fence, if any
///
/// Models often wrap JSON in ` ```json ... ``` ` despite instructions.
pub(crate) fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") up to the first newline
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

fn parse_payload(text: &str, contract: &StructuredContract) -> Option<Value> {
    let mut payload: Value = serde_json::from_str(strip_code_fences(text)).ok()?;
    payload.as_object()?;

    let has_items = payload
        .get(contract.list_field)
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty());
    if !has_items {
        debug!(
            field = contract.list_field,
            "Model payload lacks list items; refilling from the static default"
        );
        let default_items = (contract.fallback)()[contract.list_field].clone();
        payload[contract.list_field] = default_items;
    }
    Some(payload)
}

async fn last_good(
    store: &Arc<dyn DocumentStore>,
    user_id: &str,
    contract: &StructuredContract,
) -> Option<Value> {
    let document = store.get(user_id).await.ok()??;
    let cached = document.get(contract.cache_field)?;
    let non_empty = cached
        .get(contract.list_field)
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty());
    non_empty.then(|| cached.clone())
}

/// Resolve a model reply into a guaranteed well-formed payload
///
/// Never fails; every rung of the ladder degrades to the next. A parsed
/// payload is cached in the user's document best-effort for later rungs.
pub(crate) async fn resolve(
    store: &Arc<dyn DocumentStore>,
    user_id: &str,
    model_result: Result<String>,
    contract: &StructuredContract,
) -> Value {
    match model_result {
        Ok(text) => {
            if let Some(payload) = parse_payload(&text, contract) {
                if let Err(e) = store
                    .merge(user_id, json!({ contract.cache_field: payload.clone() }))
                    .await
                {
                    warn!(user_id, error = %e, "Failed to cache structured payload");
                }
                return payload;
            }
            warn!(
                user_id,
                field = contract.list_field,
                "Model reply was not parsable structured output"
            );
        }
        Err(e) => {
            warn!(user_id, error = %e, "Model call failed; recovering");
        }
    }

    if let Some(cached) = last_good(store, user_id, contract).await {
        debug!(user_id, field = contract.cache_field, "Serving last good payload");
        return cached;
    }
    (contract.fallback)()
}
