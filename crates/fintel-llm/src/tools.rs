//! Function-calling types for model tool use

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declaration of a function the model may call
///
/// This describes a callable capability to the model backend, including its
/// name, description, and parameter schema in JSON Schema format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    /// Function name (must match the executing tool)
    pub name: String,

    /// Description of what the function does
    pub description: String,

    /// JSON schema for the function's parameters
    pub parameters: Value,
}

impl FunctionDeclaration {
    /// Create a new function declaration
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Trait for locally-executable tools the model may invoke
///
/// A tool pairs a declaration (sent to the model) with an executor
/// (run when the model requests the call).
#[async_trait]
pub trait CallableTool: Send + Sync {
    /// Execute the tool with the model-supplied arguments
    async fn call(&self, args: Value) -> Result<Value>;

    /// Get the declaration advertised to the model
    fn declaration(&self) -> FunctionDeclaration;

    /// Get the tool's name
    fn name(&self) -> &str;
}

/// Helper module to build JSON schemas for function parameters
pub mod schema {
    use serde_json::{Value, json};

    /// Create a JSON schema for an object with properties
    pub fn object(properties: Value, required: Vec<&str>) -> Value {
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// String property schema
    pub fn string(description: &str) -> Value {
        json!({
            "type": "string",
            "description": description,
        })
    }

    /// Number property schema
    pub fn number(description: &str) -> Value {
        json!({
            "type": "number",
            "description": description,
        })
    }

    /// Array property schema
    pub fn array(description: &str, items: Value) -> Value {
        json!({
            "type": "array",
            "description": description,
            "items": items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_function_declaration_creation() {
        let params = schema::object(
            json!({
                "stock_symbols": schema::array("Ticker symbols", schema::string("A symbol")),
            }),
            vec!["stock_symbols"],
        );

        let decl =
            FunctionDeclaration::new("get_market_performance", "Look up returns", params.clone());
        assert_eq!(decl.name, "get_market_performance");
        assert_eq!(decl.description, "Look up returns");
        assert_eq!(decl.parameters, params);
    }

    #[test]
    fn test_schema_builders() {
        let str_schema = schema::string("test");
        assert_eq!(str_schema["type"], "string");

        let num_schema = schema::number("amount");
        assert_eq!(num_schema["type"], "number");

        let arr_schema = schema::array("symbols", schema::string("one"));
        assert_eq!(arr_schema["type"], "array");
        assert_eq!(arr_schema["items"]["type"], "string");
    }
}
