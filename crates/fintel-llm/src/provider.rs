//! Model backend trait definition

use crate::{GenerateRequest, GenerateResponse, Result};
use async_trait::async_trait;

/// Trait for model backends
///
/// Implementations of this trait provide access to a concrete
/// language-model service (e.g. Gemini via Vertex or AI Studio).
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Generate content from the model
    ///
    /// # Arguments
    ///
    /// * `request` - The generate request with contents, tools, and parameters
    ///
    /// # Returns
    ///
    /// The generated content together with the finish reason
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Get the backend name (e.g. "gemini")
    fn name(&self) -> &str;
}
