//! Model-backend abstraction layer for fintel
//!
//! This crate provides backend-agnostic abstractions for the language-model
//! side of the system. It includes:
//!
//! - Content/part types for model conversations (text and function calling)
//! - Generate request/response types
//! - Function declarations for tool use
//! - The `ModelBackend` trait implemented by concrete providers
//! - A Gemini `generateContent` REST provider

pub mod content;
pub mod error;
pub mod generate;
pub mod provider;
pub mod providers;
pub mod tools;

// Re-export main types
pub use content::{Content, Part, Role};
pub use error::{LlmError, Result};
pub use generate::{FinishReason, GenerateRequest, GenerateResponse};
pub use provider::ModelBackend;
pub use tools::{CallableTool, FunctionDeclaration};
