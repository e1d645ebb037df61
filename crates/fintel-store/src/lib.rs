//! Per-user document store boundary for fintel
//!
//! The persistent store is a key/value-per-user JSON document store used as
//! a cache and durable side-channel. This crate provides:
//!
//! - The `DocumentStore` trait (get / set / merge per user document)
//! - `MemoryStore`, a thread-safe in-memory implementation
//! - `SummaryCache`, the TTL read-through/write-through cache over the store

pub mod cache;
pub mod document;
pub mod error;

pub use cache::SummaryCache;
pub use document::{DocumentStore, MemoryStore, deep_merge};
pub use error::{Result, StoreError};
