//! Generate request and response types

use crate::{Content, FunctionDeclaration};
use serde::{Deserialize, Serialize};

/// Request for a model generation with full conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (backend-specific)
    pub model: String,

    /// Conversation history (alternating user/model turns)
    pub contents: Vec<Content>,

    /// Optional system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,

    /// Maximum tokens to generate
    pub max_output_tokens: usize,

    /// Sampling temperature (0.0-1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Functions the model may call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<FunctionDeclaration>>,
}

/// Response from a model generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated content from the model
    pub content: Content,

    /// Why generation stopped
    pub finish_reason: FinishReason,
}

/// Reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural completion
    Stop,

    /// Hit the output token limit
    MaxTokens,

    /// The model requested a function call
    FunctionCall,

    /// Backend-specific stop (safety filter, recitation, ...)
    Other,
}

impl GenerateResponse {
    /// Text of the generated content, empty string if none
    pub fn text(&self) -> String {
        self.content.joined_text()
    }

    /// First function call in the generated content, if any
    pub fn first_function_call(&self) -> Option<(&str, &serde_json::Value)> {
        self.content.function_calls().into_iter().next()
    }
}

impl GenerateRequest {
    /// Create a builder for generate requests
    pub fn builder(model: impl Into<String>) -> GenerateRequestBuilder {
        GenerateRequestBuilder::new(model)
    }
}

/// Builder for GenerateRequest
pub struct GenerateRequestBuilder {
    model: String,
    contents: Vec<Content>,
    system_instruction: Option<String>,
    max_output_tokens: usize,
    temperature: Option<f32>,
    tools: Option<Vec<FunctionDeclaration>>,
}

impl GenerateRequestBuilder {
    /// Create a new builder
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            contents: Vec::new(),
            system_instruction: None,
            max_output_tokens: 2048,
            temperature: None,
            tools: None,
        }
    }

    /// Set the conversation contents
    pub fn contents(mut self, contents: Vec<Content>) -> Self {
        self.contents = contents;
        self
    }

    /// Add a single content turn
    pub fn add_content(mut self, content: Content) -> Self {
        self.contents.push(content);
        self
    }

    /// Set the system instruction
    pub fn system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Set the maximum output tokens
    pub fn max_output_tokens(mut self, max_output_tokens: usize) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the callable functions
    pub fn tools(mut self, tools: Vec<FunctionDeclaration>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Build the generate request
    pub fn build(self) -> GenerateRequest {
        GenerateRequest {
            model: self.model,
            contents: self.contents,
            system_instruction: self.system_instruction,
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
            tools: self.tools,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let request = GenerateRequest::builder("gemini-2.0-flash")
            .add_content(Content::user("Hello"))
            .system_instruction("You are a financial assistant")
            .max_output_tokens(4096)
            .temperature(0.4)
            .build();

        assert_eq!(request.model, "gemini-2.0-flash");
        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.max_output_tokens, 4096);
        assert_eq!(request.temperature, Some(0.4));
        assert!(request.tools.is_none());
    }

    #[test]
    fn test_response_helpers() {
        let response = GenerateResponse {
            content: Content::model("plain answer"),
            finish_reason: FinishReason::Stop,
        };
        assert_eq!(response.text(), "plain answer");
        assert!(response.first_function_call().is_none());

        let response = GenerateResponse {
            content: Content::function_call("lookup", serde_json::json!({})),
            finish_reason: FinishReason::FunctionCall,
        };
        assert_eq!(response.first_function_call().unwrap().0, "lookup");
    }
}
