//! Financial-data-source client for fintel
//!
//! This crate speaks the external provider's contract: a single
//! `POST /mcp/stream` endpoint that, given a session identifier and a named
//! data kind, returns the raw JSON payload for that kind. It includes:
//!
//! - The `DataKind` enum for the six financial record categories
//! - `McpClient` with a bounded per-request timeout
//! - A transport error type that distinguishes timeout, non-200, and
//!   other failures, so callers can degrade precisely

pub mod client;
pub mod error;
pub mod kind;

pub use client::McpClient;
pub use error::{McpError, Result};
pub use kind::DataKind;
