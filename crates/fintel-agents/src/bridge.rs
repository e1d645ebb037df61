//! Tool-Invocation Bridge
//!
//! Lets the model backend request execution of a callable capability
//! mid-generation. The bridge supports exactly one tool round-trip: the
//! first function call of a reply is executed locally and its result is
//! supplied back as a function-response turn; any further calls — extra
//! calls in the same reply, or a second hop after resumption — are ignored.

use fintel_llm::{CallableTool, Content, GenerateRequest, ModelBackend, Result};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

/// Bridges a model backend to one locally-executable tool
pub struct ToolBridge {
    backend: Arc<dyn ModelBackend>,
    tool: Arc<dyn CallableTool>,
}

impl ToolBridge {
    /// Create a bridge over a backend and the single capability
    pub fn new(backend: Arc<dyn ModelBackend>, tool: Arc<dyn CallableTool>) -> Self {
        Self { backend, tool }
    }

    /// Generate text, honoring at most one tool round-trip
    ///
    /// The tool's declaration is attached to the request; if the model
    /// replies with plain text, that text passes through directly.
    pub async fn generate(&self, mut request: GenerateRequest) -> Result<String> {
        request.tools = Some(vec![self.tool.declaration()]);

        let response = self.backend.generate(request.clone()).await?;

        let calls = response.content.function_calls();
        let Some((name, args)) = calls.first().map(|(n, a)| ((*n).to_string(), (*a).clone()))
        else {
            return Ok(response.text());
        };
        if calls.len() > 1 {
            warn!(
                extra = calls.len() - 1,
                "Model requested multiple function calls; honoring the first only"
            );
        }

        debug!(function = %name, "Executing model-requested function");
        let result = if name == self.tool.name() {
            self.tool
                .call(args)
                .await
                .unwrap_or_else(|e| json!({ "error": e.to_string() }))
        } else {
            warn!(function = %name, "Model requested an unknown function");
            json!({ "error": format!("unknown function: {name}") })
        };

        let mut follow_up = request;
        follow_up.contents.push(response.content.clone());
        follow_up
            .contents
            .push(Content::function_response(&name, result));

        let final_response = self.backend.generate(follow_up).await?;
        if final_response.content.has_function_call() {
            warn!("Model requested a second tool hop; returning text without executing it");
        }
        Ok(final_response.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ScriptedBackend;
    use crate::tools::MarketPerformanceTool;
    use fintel_llm::{FinishReason, GenerateResponse, Part, Role};
    use serde_json::json;

    fn bridge(backend: &ScriptedBackend) -> ToolBridge {
        ToolBridge::new(
            Arc::new(backend.clone()),
            Arc::new(MarketPerformanceTool::new()),
        )
    }

    fn request() -> GenerateRequest {
        GenerateRequest::builder("test-model")
            .add_content(Content::user("plan my investments"))
            .build()
    }

    #[tokio::test]
    async fn test_plain_text_passes_through() {
        let backend = ScriptedBackend::with_texts(&["{\"recommendations\": []}"]);
        let text = bridge(&backend).generate(request()).await.unwrap();
        assert_eq!(text, "{\"recommendations\": []}");

        // The declaration must have been attached even for the no-call path
        let recorded = backend.recorded();
        assert_eq!(recorded[0].tools.as_ref().unwrap()[0].name, "get_market_performance");
    }

    #[tokio::test]
    async fn test_single_round_trip_resumes_with_result() {
        let backend = ScriptedBackend::new(vec![
            GenerateResponse {
                content: Content::function_call(
                    "get_market_performance",
                    json!({"stock_symbols": ["INFY"]}),
                ),
                finish_reason: FinishReason::FunctionCall,
            },
            GenerateResponse {
                content: Content::model("final strategy"),
                finish_reason: FinishReason::Stop,
            },
        ]);
        let text = bridge(&backend).generate(request()).await.unwrap();
        assert_eq!(text, "final strategy");

        // The resumed conversation must carry the function result turn
        let recorded = backend.recorded();
        let last = recorded[1].contents.last().unwrap();
        assert_eq!(last.role, Role::User);
        match &last.parts[0] {
            Part::FunctionResponse { name, response } => {
                assert_eq!(name, "get_market_performance");
                assert_eq!(response["INFY"], 13.0);
                assert_eq!(response["NIFTY 50"], 12.0);
            }
            other => panic!("expected function response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_function_resumes_with_error_payload() {
        let backend = ScriptedBackend::new(vec![
            GenerateResponse {
                content: Content::function_call("drop_tables", json!({})),
                finish_reason: FinishReason::FunctionCall,
            },
            GenerateResponse {
                content: Content::model("ok"),
                finish_reason: FinishReason::Stop,
            },
        ]);
        assert_eq!(bridge(&backend).generate(request()).await.unwrap(), "ok");

        let recorded = backend.recorded();
        match &recorded[1].contents.last().unwrap().parts[0] {
            Part::FunctionResponse { response, .. } => {
                assert!(response["error"].as_str().unwrap().contains("unknown function"));
            }
            other => panic!("expected function response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_second_hop_is_not_executed() {
        let backend = ScriptedBackend::new(vec![
            GenerateResponse {
                content: Content::function_call(
                    "get_market_performance",
                    json!({"stock_symbols": []}),
                ),
                finish_reason: FinishReason::FunctionCall,
            },
            GenerateResponse {
                content: Content::function_call(
                    "get_market_performance",
                    json!({"stock_symbols": ["TCS"]}),
                ),
                finish_reason: FinishReason::FunctionCall,
            },
        ]);
        // Second reply has no text part, so the capped bridge returns empty
        assert_eq!(bridge(&backend).generate(request()).await.unwrap(), "");

        // Exactly two backend calls: no third generation for the second hop
        assert_eq!(backend.recorded().len(), 2);
    }
}
