//! Tool schemas and calls
//!
//! Each specialist agent exposes exactly one tool to the model. The schema
//! describes it to the provider; a [`ToolCall`] is the model's request to
//! invoke it.

use serde::{Deserialize, Serialize};

/// Declaration of a tool offered to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Canonical tool name (e.g. "get_sql_data_tool").
    pub name: String,
    /// Description shown to the model.
    pub description: String,
    /// JSON Schema of the tool's parameters.
    pub parameters: serde_json::Value,
}

impl ToolSchema {
    /// A tool taking a single required string parameter named `query`.
    pub fn single_query(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string" }
                },
                "required": ["query"]
            }),
        }
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned id, echoed back with the tool result.
    pub id: String,
    /// Name of the requested tool.
    pub name: String,
    /// Structured arguments.
    pub arguments: serde_json::Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Fetch a string argument by key.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// The `query` argument both retrieval tools take.
    pub fn query_argument(&self) -> Option<&str> {
        self.get_string("query")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_query_schema() {
        let schema = ToolSchema::single_query("get_sql_data_tool", "Run a SQL query");
        assert_eq!(schema.name, "get_sql_data_tool");
        assert_eq!(schema.parameters["required"][0], "query");
    }

    #[test]
    fn test_query_argument_extraction() {
        let call = ToolCall::new(
            "call_1",
            "get_chunks_tool",
            serde_json::json!({"query": "escalation policy"}),
        );
        assert_eq!(call.query_argument(), Some("escalation policy"));
    }

    #[test]
    fn test_missing_argument() {
        let call = ToolCall::new("call_1", "get_chunks_tool", serde_json::json!({}));
        assert_eq!(call.query_argument(), None);
    }
}
