//! Concrete model-backend implementations

pub mod gemini;

pub use gemini::{GeminiBackend, GeminiConfig};
