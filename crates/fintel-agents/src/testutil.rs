//! Shared stubs for agent-layer tests

use async_trait::async_trait;
use fintel_llm::{
    Content, FinishReason, GenerateRequest, GenerateResponse, LlmError, ModelBackend,
};
use fintel_store::DocumentStore;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Model backend that replays a fixed script of responses
///
/// Clones share state, so tests can keep a handle to inspect the requests
/// the code under test actually sent.
#[derive(Clone)]
pub struct ScriptedBackend {
    responses: Arc<Mutex<VecDeque<GenerateResponse>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl ScriptedBackend {
    /// Replay the given responses in order; further calls fail
    pub fn new(responses: Vec<GenerateResponse>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Replay plain-text model turns
    pub fn with_texts(texts: &[&str]) -> Self {
        Self::new(
            texts
                .iter()
                .map(|t| GenerateResponse {
                    content: Content::model(*t),
                    finish_reason: FinishReason::Stop,
                })
                .collect(),
        )
    }

    /// Backend whose every call fails
    pub fn failing() -> Self {
        Self::new(Vec::new())
    }

    /// Requests served so far
    pub fn recorded(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn generate(&self, request: GenerateRequest) -> fintel_llm::Result<GenerateResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::RequestFailed("script exhausted".to_string()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Store whose every operation fails, for cache-unavailable paths
pub struct BrokenStore;

#[async_trait]
impl DocumentStore for BrokenStore {
    async fn get(&self, _user_id: &str) -> fintel_store::Result<Option<Value>> {
        Err(fintel_store::StoreError::ReadFailed(
            "store offline".to_string(),
        ))
    }

    async fn set(&self, _user_id: &str, _document: Value) -> fintel_store::Result<()> {
        Err(fintel_store::StoreError::WriteFailed(
            "store offline".to_string(),
        ))
    }
}
