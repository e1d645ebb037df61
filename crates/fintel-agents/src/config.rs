//! Configuration for the aggregation and agent layer

use crate::error::{AgentError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for fintel operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FintelConfig {
    /// Base URL of the external financial data source
    pub mcp_base_url: String,

    /// Per-kind fetch timeout
    pub fetch_timeout: Duration,

    /// Validity window for cached summaries
    pub cache_ttl: Duration,

    /// Model identifier for agent calls
    pub model: String,

    /// Max tokens per model call
    pub max_output_tokens: usize,

    /// Sampling temperature for agent calls
    pub temperature: f32,
}

impl Default for FintelConfig {
    fn default() -> Self {
        Self {
            mcp_base_url: "http://localhost:8080".to_string(),
            fetch_timeout: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(300), // 5 minutes
            model: "gemini-2.0-flash".to_string(),
            max_output_tokens: 4096,
            temperature: 0.4,
        }
    }
}

impl FintelConfig {
    /// Create a new configuration builder
    pub fn builder() -> FintelConfigBuilder {
        FintelConfigBuilder::default()
    }

    /// Override the data-source URL from `FINTEL_MCP_URL` if set
    pub fn with_env_mcp_url(mut self) -> Self {
        if let Ok(url) = std::env::var("FINTEL_MCP_URL") {
            self.mcp_base_url = url;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.mcp_base_url.is_empty() {
            return Err(AgentError::DataSource(
                "mcp_base_url must not be empty".to_string(),
            ));
        }
        if self.cache_ttl.is_zero() {
            return Err(AgentError::CachePersistence(
                "cache_ttl must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for FintelConfig
#[derive(Debug, Default)]
pub struct FintelConfigBuilder {
    mcp_base_url: Option<String>,
    fetch_timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
    model: Option<String>,
    max_output_tokens: Option<usize>,
    temperature: Option<f32>,
}

impl FintelConfigBuilder {
    /// Set the data-source base URL
    pub fn mcp_base_url(mut self, url: impl Into<String>) -> Self {
        self.mcp_base_url = Some(url.into());
        self
    }

    /// Set the per-kind fetch timeout
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Set the cache TTL
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max output tokens
    pub fn max_output_tokens(mut self, max: usize) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<FintelConfig> {
        let defaults = FintelConfig::default();

        let config = FintelConfig {
            mcp_base_url: self.mcp_base_url.unwrap_or(defaults.mcp_base_url),
            fetch_timeout: self.fetch_timeout.unwrap_or(defaults.fetch_timeout),
            cache_ttl: self.cache_ttl.unwrap_or(defaults.cache_ttl),
            model: self.model.unwrap_or(defaults.model),
            max_output_tokens: self.max_output_tokens.unwrap_or(defaults.max_output_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
        };

        config.validate()?;
        Ok(config)
    }
}
