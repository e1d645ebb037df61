//! Content types for model conversations
//!
//! This module defines the conversation types exchanged with the model
//! backend, following the Gemini content/part design with support for
//! function calling.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a content entry in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Caller-supplied content
    User,
    /// Model-generated content
    Model,
}

/// A single part of a content entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    /// Plain text
    Text {
        /// Text content
        text: String,
    },

    /// Function call requested by the model
    FunctionCall {
        /// Name of the declared function
        name: String,
        /// Structured arguments (JSON object)
        args: Value,
    },

    /// Function result supplied back to the model
    FunctionResponse {
        /// Name of the function that was executed
        name: String,
        /// Result payload (JSON object)
        response: Value,
    },
}

/// One turn of a model conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Who produced this turn
    pub role: Role,

    /// Parts of this turn (text and/or function traffic)
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a user turn with plain text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    /// Create a model turn with plain text
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    /// Create a model turn requesting a function call
    pub fn function_call(name: impl Into<String>, args: Value) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part::FunctionCall {
                name: name.into(),
                args,
            }],
        }
    }

    /// Create a user turn carrying a function result
    pub fn function_response(name: impl Into<String>, response: Value) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::FunctionResponse {
                name: name.into(),
                response,
            }],
        }
    }

    /// Extract the first text part, if any
    pub fn text(&self) -> Option<&str> {
        self.parts.iter().find_map(|p| match p {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Concatenate all text parts into one string
    pub fn joined_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract all function-call parts
    pub fn function_calls(&self) -> Vec<(&str, &Value)> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::FunctionCall { name, args } => Some((name.as_str(), args)),
                _ => None,
            })
            .collect()
    }

    /// Check whether this turn contains a function call
    pub fn has_function_call(&self) -> bool {
        !self.function_calls().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_content() {
        let content = Content::user("What is my net worth?");
        assert_eq!(content.role, Role::User);
        assert_eq!(content.text(), Some("What is my net worth?"));
        assert!(!content.has_function_call());
    }

    #[test]
    fn test_function_call_content() {
        let content =
            Content::function_call("get_market_performance", json!({"stock_symbols": ["INFY"]}));
        assert_eq!(content.role, Role::Model);
        assert!(content.has_function_call());

        let calls = content.function_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "get_market_performance");
    }

    #[test]
    fn test_function_response_content() {
        let content = Content::function_response("get_market_performance", json!({"INFY": 13.0}));
        assert_eq!(content.role, Role::User);
        assert!(content.text().is_none());
        assert!(!content.has_function_call());
    }

    #[test]
    fn test_joined_text() {
        let content = Content {
            role: Role::Model,
            parts: vec![
                Part::Text {
                    text: "part one ".to_string(),
                },
                Part::Text {
                    text: "part two".to_string(),
                },
            ],
        };
        assert_eq!(content.joined_text(), "part one part two");
    }

    #[test]
    fn test_content_serialization() {
        let content = Content::user("Test");
        let json = serde_json::to_string(&content).unwrap();
        let deserialized: Content = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.text(), Some("Test"));
    }
}
