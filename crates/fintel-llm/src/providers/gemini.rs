//! Gemini provider implementation
//!
//! This module implements the `ModelBackend` trait for the Gemini
//! `generateContent` REST API.
//! See: https://ai.google.dev/api/generate-content
//!
//! # Examples
//!
//! ```no_run
//! use fintel_llm::{Content, GenerateRequest, ModelBackend};
//! use fintel_llm::providers::GeminiBackend;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create backend from GEMINI_API_KEY environment variable
//!     let backend = GeminiBackend::from_env()?;
//!
//!     let request = GenerateRequest::builder("gemini-2.0-flash")
//!         .add_content(Content::user("Summarize my finances"))
//!         .build();
//!
//!     let response = backend.generate(request).await?;
//!     println!("{}", response.text());
//!
//!     Ok(())
//! }
//! ```

use crate::{
    Content, FinishReason, FunctionDeclaration, GenerateRequest, GenerateResponse, LlmError,
    ModelBackend, Part, Result, Role,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the Gemini backend
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the API (default: the public AI Studio endpoint)
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl GeminiConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment
    ///
    /// Reads the API key from `GEMINI_API_KEY`, and optionally the base URL
    /// from `GEMINI_API_BASE`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            LlmError::ConfigurationError("GEMINI_API_KEY environment variable not set".to_string())
        })?;

        let api_base =
            std::env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Set a custom API base URL (e.g. a proxy or regional endpoint)
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Gemini model backend
///
/// Talks to the `generateContent` REST endpoint with optional function
/// declarations for tool use.
pub struct GeminiBackend {
    client: Client,
    config: GeminiConfig,
}

impl GeminiBackend {
    /// Create a new Gemini backend with custom configuration
    pub fn with_config(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new Gemini backend with an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(GeminiConfig::new(api_key))
    }

    /// Create a backend from the `GEMINI_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        Self::with_config(GeminiConfig::from_env()?)
    }

    /// Get the current configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl ModelBackend for GeminiBackend {
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        debug!("Sending request to Gemini API at {}", self.config.api_base);

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base, request.model
        );

        let wire_request = build_wire_request(&request);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthenticationFailed,
                400 => LlmError::InvalidRequest(body),
                _ => LlmError::RequestFailed(format!("HTTP {status}: {body}")),
            });
        }

        let wire_response: WireResponse = response.json().await?;
        parse_wire_response(wire_response)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

// Wire types for the generateContent API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireSystemInstruction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTools>>,
    generation_config: WireGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<WireFunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_response: Option<WireFunctionResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Serialize)]
struct WireSystemInstruction {
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTools {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    max_output_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    content: Option<WireContent>,
    finish_reason: Option<String>,
}

fn convert_part(part: &Part) -> WirePart {
    match part {
        Part::Text { text } => WirePart {
            text: Some(text.clone()),
            function_call: None,
            function_response: None,
        },
        Part::FunctionCall { name, args } => WirePart {
            text: None,
            function_call: Some(WireFunctionCall {
                name: name.clone(),
                args: args.clone(),
            }),
            function_response: None,
        },
        Part::FunctionResponse { name, response } => WirePart {
            text: None,
            function_call: None,
            function_response: Some(WireFunctionResponse {
                name: name.clone(),
                response: response.clone(),
            }),
        },
    }
}

fn build_wire_request(request: &GenerateRequest) -> WireRequest {
    let contents = request
        .contents
        .iter()
        .map(|c| WireContent {
            role: Some(
                match c.role {
                    Role::User => "user",
                    Role::Model => "model",
                }
                .to_string(),
            ),
            parts: c.parts.iter().map(convert_part).collect(),
        })
        .collect();

    let system_instruction = request
        .system_instruction
        .as_ref()
        .map(|text| WireSystemInstruction {
            parts: vec![WirePart {
                text: Some(text.clone()),
                function_call: None,
                function_response: None,
            }],
        });

    let tools = request.tools.as_ref().map(|decls| {
        vec![WireTools {
            function_declarations: decls.clone(),
        }]
    });

    WireRequest {
        contents,
        system_instruction,
        tools,
        generation_config: WireGenerationConfig {
            max_output_tokens: request.max_output_tokens,
            temperature: request.temperature,
        },
    }
}

fn parse_wire_response(wire: WireResponse) -> Result<GenerateResponse> {
    let candidate = wire
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::UnexpectedResponse("no candidates in response".to_string()))?;

    let parts = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| {
            if let Some(call) = p.function_call {
                Some(Part::FunctionCall {
                    name: call.name,
                    args: call.args,
                })
            } else if let Some(resp) = p.function_response {
                Some(Part::FunctionResponse {
                    name: resp.name,
                    response: resp.response,
                })
            } else {
                p.text.map(|text| Part::Text { text })
            }
        })
        .collect::<Vec<_>>();

    let content = Content {
        role: Role::Model,
        parts,
    };

    let finish_reason = if content.has_function_call() {
        FinishReason::FunctionCall
    } else {
        match candidate.finish_reason.as_deref() {
            Some("STOP") | None => FinishReason::Stop,
            Some("MAX_TOKENS") => FinishReason::MaxTokens,
            Some(_) => FinishReason::Other,
        }
    };

    Ok(GenerateResponse {
        content,
        finish_reason,
    })
}
