//! Cache-first financial data aggregation and the four fintel agents
//!
//! This crate is the application layer of fintel. It aggregates a user's
//! financial records from the external data source, shapes them into
//! bounded storage-safe summaries, caches them with a TTL over the document
//! store, and serves four agent flows on top:
//!
//! - **Oracle** — general Q&A over all six data kinds, free-text answers
//! - **Guardian** — risk scanning, structured alert list
//! - **Catalyst** — growth opportunities, structured opportunity list
//! - **Strategist** — investment strategy with a market-performance tool
//!
//! Every agent degrades deterministically: unavailable data becomes an
//! inline marker, unparsable model output falls back to the last good
//! structured response and then to a static two-item default.

pub mod agents;
pub mod analytics;
pub mod auth;
pub mod bridge;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod prompts;
pub mod service;
pub mod session;
pub mod summary;
pub mod tools;

#[cfg(test)]
pub(crate) mod testutil;

pub use agents::AgentDeps;
pub use auth::AuthVerifier;
pub use config::FintelConfig;
pub use error::{AgentError, Result};
pub use fetcher::{DataFetcher, FinancialBundle};
pub use service::FintelService;
