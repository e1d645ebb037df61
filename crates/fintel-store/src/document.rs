//! Document store trait and the in-memory implementation

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Per-user JSON document store
///
/// Each user owns one JSON document. The store offers last-write-wins
/// semantics per document; `merge` is read-then-write, not compare-and-swap,
/// so concurrent writers for the same user can race and the last write wins.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the user's document, `None` if it does not exist
    async fn get(&self, user_id: &str) -> Result<Option<Value>>;

    /// Replace the user's document wholesale
    async fn set(&self, user_id: &str, document: Value) -> Result<()>;

    /// Merge a patch into the user's document
    ///
    /// Objects merge recursively; any other value (including arrays)
    /// replaces the existing one. Missing documents start from an empty
    /// object.
    async fn merge(&self, user_id: &str, patch: Value) -> Result<()> {
        let mut document = self.get(user_id).await?.unwrap_or_else(|| Value::Object(Default::default()));
        deep_merge(&mut document, patch);
        self.set(user_id, document).await
    }
}

/// Recursively merge `patch` into `target`
///
/// Object fields merge key by key; everything else replaces.
pub fn deep_merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target_map), Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                match target_map.get_mut(&key) {
                    Some(existing) => deep_merge(existing, patch_value),
                    None => {
                        target_map.insert(key, patch_value);
                    }
                }
            }
        }
        (target_slot, patch_value) => *target_slot = patch_value,
    }
}

/// Thread-safe in-memory document store
///
/// Used for local runs and tests; production deployments substitute an
/// implementation backed by the external document store.
#[derive(Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of user documents held
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Check whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, user_id: &str) -> Result<Option<Value>> {
        let documents = self.documents.read().await;
        Ok(documents.get(user_id).cloned())
    }

    async fn set(&self, user_id: &str, document: Value) -> Result<()> {
        let mut documents = self.documents.write().await;
        documents.insert(user_id.to_string(), document);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = MemoryStore::new();
        store
            .set("user-1", json!({"session_token": "abc"}))
            .await
            .unwrap();

        let doc = store.get("user-1").await.unwrap().unwrap();
        assert_eq!(doc["session_token"], "abc");
        assert!(store.get("user-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_merge_creates_missing_document() {
        let store = MemoryStore::new();
        store.merge("user-1", json!({"a": 1})).await.unwrap();

        let doc = store.get("user-1").await.unwrap().unwrap();
        assert_eq!(doc, json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_merge_preserves_sibling_fields() {
        let store = MemoryStore::new();
        store
            .set(
                "user-1",
                json!({"session_token": "abc", "financial_cache": {"net_worth": {"x": 1}}}),
            )
            .await
            .unwrap();

        store
            .merge(
                "user-1",
                json!({"financial_cache": {"bank_transactions": {"y": 2}}}),
            )
            .await
            .unwrap();

        let doc = store.get("user-1").await.unwrap().unwrap();
        assert_eq!(doc["session_token"], "abc");
        assert_eq!(doc["financial_cache"]["net_worth"]["x"], 1);
        assert_eq!(doc["financial_cache"]["bank_transactions"]["y"], 2);
    }

    #[test]
    fn test_deep_merge_replaces_non_objects() {
        let mut target = json!({"list": [1, 2], "nested": {"keep": true, "swap": 1}});
        deep_merge(&mut target, json!({"list": [3], "nested": {"swap": 2}}));

        assert_eq!(target["list"], json!([3]));
        assert_eq!(target["nested"]["keep"], true);
        assert_eq!(target["nested"]["swap"], 2);
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.set("user-1", json!({})).await.unwrap();
        assert_eq!(store.len().await, 1);
    }
}
