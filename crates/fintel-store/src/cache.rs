//! TTL summary cache over the document store
//!
//! Cached financial summaries live inside the user's document under
//! `financial_cache`, stamped with `cached_at`. An entry is valid only while
//! `now - cached_at < ttl`; absent, unparsable, and expired entries all read
//! as a miss. Writes merge partial kind maps instead of replacing the whole
//! entry, so an agent refreshing three of six kinds keeps the other three.

use crate::{DocumentStore, Result};
use chrono::{NaiveDateTime, Utc};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Document field holding the kind-keyed summary map
pub const CACHE_FIELD: &str = "financial_cache";

/// Document field holding the entry timestamp
pub const CACHED_AT_FIELD: &str = "cached_at";

/// Timestamp format used for cache stamps and summary generation stamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Current UTC time in the fixed stamp format
pub fn now_stamp() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Read-through/write-through cache for storage-safe summaries
pub struct SummaryCache {
    store: Arc<dyn DocumentStore>,
    ttl: Duration,
}

impl SummaryCache {
    /// Create a cache with the given TTL over a store handle
    pub fn new(store: Arc<dyn DocumentStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Configured TTL
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Read the user's cached summary map
    ///
    /// Returns `None` on a miss — absent document, absent entry, unparsable
    /// timestamp, or expired entry all look the same to the caller.
    pub async fn read(&self, user_id: &str) -> Result<Option<Value>> {
        let Some(document) = self.store.get(user_id).await? else {
            debug!(user_id, "Cache miss: no document");
            return Ok(None);
        };

        let Some(stamp) = document.get(CACHED_AT_FIELD).and_then(Value::as_str) else {
            debug!(user_id, "Cache miss: no timestamp");
            return Ok(None);
        };

        let Ok(cached_at) = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT) else {
            debug!(user_id, stamp, "Cache miss: unparsable timestamp");
            return Ok(None);
        };

        let age = Utc::now()
            .naive_utc()
            .signed_duration_since(cached_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        if age >= self.ttl {
            debug!(user_id, age_secs = age.as_secs(), "Cache miss: expired");
            return Ok(None);
        }

        match document.get(CACHE_FIELD) {
            Some(entry) if entry.is_object() => {
                debug!(user_id, "Cache hit");
                Ok(Some(entry.clone()))
            }
            _ => Ok(None),
        }
    }

    /// Merge a partial kind-keyed summary map into the cache and restamp
    ///
    /// Kinds not present in `partial` keep their previous slices.
    pub async fn write(&self, user_id: &str, partial: Value) -> Result<()> {
        self.store
            .merge(
                user_id,
                json!({
                    CACHE_FIELD: partial,
                    CACHED_AT_FIELD: now_stamp(),
                }),
            )
            .await
    }
}
