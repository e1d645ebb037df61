//! The four agent personas and their shared plumbing
//!
//! Every agent runs the same pipeline: gather the data kinds it cares
//! about (cache-first), render a persona prompt, call the model backend,
//! and shape the reply into the agent's response envelope. Agents never
//! fail outward for data or model trouble — degradation is built into
//! each stage.

pub mod catalyst;
pub mod guardian;
pub mod oracle;
pub mod strategist;

pub(crate) mod structured;

use crate::config::FintelConfig;
use crate::error::{AgentError, Result};
use crate::fetcher::{DataFetcher, is_error_marker};
use crate::summary::summarize_bundle;
use fintel_llm::{Content, GenerateRequest, ModelBackend};
use fintel_mcp::{DataKind, McpClient};
use fintel_store::{DocumentStore, SummaryCache};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Marker substituted for any kind that could not be summarized
pub const UNAVAILABLE: &str = "unavailable";

/// Shared handles every agent call runs against
pub struct AgentDeps {
    store: Arc<dyn DocumentStore>,
    cache: SummaryCache,
    fetcher: DataFetcher,
    backend: Arc<dyn ModelBackend>,
    config: FintelConfig,
}

impl AgentDeps {
    /// Wire up the aggregation pipeline over a store and a model backend
    pub fn new(
        store: Arc<dyn DocumentStore>,
        backend: Arc<dyn ModelBackend>,
        config: FintelConfig,
    ) -> Result<Self> {
        config.validate()?;
        let client = McpClient::with_timeout(&config.mcp_base_url, config.fetch_timeout)
            .map_err(|e| AgentError::DataSource(e.to_string()))?;
        let fetcher = DataFetcher::new(client.clone(), Arc::clone(&store));
        let cache = SummaryCache::new(Arc::clone(&store), config.cache_ttl);
        Ok(Self {
            store,
            cache,
            fetcher,
            backend,
            config,
        })
    }

    /// Document store handle
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Model backend handle
    pub fn backend(&self) -> &Arc<dyn ModelBackend> {
        &self.backend
    }

    /// Active configuration
    pub fn config(&self) -> &FintelConfig {
        &self.config
    }

    /// Data-source client, for session binding
    pub(crate) fn client(&self) -> &McpClient {
        self.fetcher.client()
    }

    /// Raw data fetcher, for the analytics pipeline
    pub(crate) fn fetcher(&self) -> &DataFetcher {
        &self.fetcher
    }

    /// Refresh the given kinds from the data source and cache the summaries
    ///
    /// The write merges into the cached document, so refreshing a subset
    /// leaves the other kinds' summaries intact. The cache write is
    /// best-effort: a failing store degrades to a warning, not an error, so
    /// the fresh summaries still reach the caller.
    pub async fn refresh(&self, user_id: &str, kinds: &[DataKind]) -> Value {
        let bundle = self.fetcher.fetch_all(user_id, kinds).await;
        let summaries = summarize_bundle(&bundle);

        if let Err(e) = self.cache.write(user_id, summaries.clone()).await {
            warn!(user_id, error = %e, "Failed to persist refreshed summaries");
        } else {
            info!(user_id, "Cached refreshed financial summaries");
        }
        summaries
    }

    /// Gather the requested kinds cache-first and normalize for prompting
    ///
    /// A cache miss (or `force_refresh`) refreshes only the requested kinds.
    /// Each requested kind missing from the summaries, null, or carrying an
    /// error marker is flattened to the string `"unavailable"`.
    pub async fn gather(&self, user_id: &str, kinds: &[DataKind], force_refresh: bool) -> Value {
        let summaries = if force_refresh {
            self.refresh(user_id, kinds).await
        } else {
            match self.cache.read(user_id).await {
                Ok(Some(cached)) => {
                    debug!(user_id, "Serving summaries from cache");
                    cached
                }
                Ok(None) => self.refresh(user_id, kinds).await,
                Err(e) => {
                    warn!(user_id, error = %e, "Cache read failed; refreshing");
                    self.refresh(user_id, kinds).await
                }
            }
        };

        let mut data = Map::new();
        for kind in kinds {
            let slice = summaries.get(kind.as_str());
            let value = match slice {
                Some(v) if !v.is_null() && !is_error_marker(v) => v.clone(),
                _ => Value::String(UNAVAILABLE.to_string()),
            };
            data.insert(kind.as_str().to_string(), value);
        }
        Value::Object(data)
    }

    /// One backend call with the shared generation settings
    pub(crate) async fn generate(&self, system: &str, prompt: String) -> Result<String> {
        let request = self.request(system, prompt);
        let response = self.backend.generate(request).await?;
        Ok(response.text())
    }

    /// Build a generation request with the shared settings
    pub(crate) fn request(&self, system: &str, prompt: String) -> GenerateRequest {
        GenerateRequest::builder(&self.config.model)
            .system_instruction(system)
            .add_content(Content::user(prompt))
            .max_output_tokens(self.config.max_output_tokens)
            .temperature(self.config.temperature)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{BrokenStore, ScriptedBackend};
    use fintel_store::MemoryStore;
    use serde_json::json;
    use std::time::Duration;

    fn deps_over(store: Arc<dyn DocumentStore>, backend: ScriptedBackend) -> AgentDeps {
        let config = FintelConfig::builder()
            // Port 9 is discard; no fetch should ever reach the network in
            // these tests because no session token is bound.
            .mcp_base_url("http://127.0.0.1:9")
            .build()
            .unwrap();
        AgentDeps::new(store, Arc::new(backend), config).unwrap()
    }

    #[tokio::test]
    async fn test_gather_flattens_missing_kinds_to_unavailable() {
        let deps = deps_over(Arc::new(MemoryStore::new()), ScriptedBackend::failing());

        let data = deps.gather("user-1", &DataKind::ALL, false).await;
        for kind in DataKind::ALL {
            assert_eq!(data[kind.as_str()], "unavailable", "kind {kind}");
        }
    }

    #[tokio::test]
    async fn test_gather_serves_fresh_cache_without_refetch() {
        let store = MemoryStore::new();
        let deps = deps_over(Arc::new(store.clone()), ScriptedBackend::failing());

        let cache = SummaryCache::new(Arc::new(store), Duration::from_secs(300));
        cache
            .write("user-1", json!({"net_worth": {"net_worth": 12_000.0}}))
            .await
            .unwrap();

        let data = deps
            .gather("user-1", &[DataKind::NetWorth, DataKind::EpfDetails], false)
            .await;
        assert_eq!(data["net_worth"]["net_worth"], 12_000.0);
        // Cached map has no EPF slice
        assert_eq!(data["epf_details"], "unavailable");
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_fresh_cache() {
        let store = MemoryStore::new();
        let deps = deps_over(Arc::new(store.clone()), ScriptedBackend::failing());

        let cache = SummaryCache::new(Arc::new(store), Duration::from_secs(300));
        cache
            .write("user-1", json!({"net_worth": {"net_worth": 12_000.0}}))
            .await
            .unwrap();

        // No session token, so the forced refresh yields markers, which
        // normalize to "unavailable" despite the fresh cached slice.
        let data = deps.gather("user-1", &[DataKind::NetWorth], true).await;
        assert_eq!(data["net_worth"], "unavailable");
    }

    #[tokio::test]
    async fn test_cache_miss_refreshes_only_requested_kinds() {
        let store = MemoryStore::new();
        let deps = deps_over(Arc::new(store.clone()), ScriptedBackend::failing());

        deps.gather("user-1", &[DataKind::NetWorth], false).await;

        let cache = SummaryCache::new(Arc::new(store), Duration::from_secs(300));
        let cached = cache.read("user-1").await.unwrap().unwrap();
        let fields = cached.as_object().unwrap();
        assert!(fields.contains_key("net_worth"));
        assert!(!fields.contains_key("bank_transactions"));
        assert!(!fields.contains_key("credit_report"));
    }

    #[tokio::test]
    async fn test_broken_store_still_yields_normalized_data() {
        let deps = deps_over(Arc::new(BrokenStore), ScriptedBackend::failing());

        let data = deps.gather("user-1", &DataKind::ALL, false).await;
        assert_eq!(data.as_object().unwrap().len(), 6);
        for kind in DataKind::ALL {
            assert_eq!(data[kind.as_str()], "unavailable");
        }
    }
}
