//! Structured chat responses.
//!
//! Tool-calling chat APIs return responses mixing text and tool-call
//! requests. [`ChatResponse`] models that structure so the agent loop can
//! decide whether to execute a tool or treat the text as final.

use super::tool::ToolCall;
use serde::{Deserialize, Serialize};

/// A single block of content within a chat response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text content block from the model.
    Text(String),
    /// A tool invocation requested by the model.
    ToolUse(ToolCall),
}

impl ContentBlock {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tool_use(&self) -> Option<&ToolCall> {
        match self {
            ContentBlock::ToolUse(call) => Some(call),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
///
/// When `stop_reason` is `ToolUse`, the caller must execute the requested
/// tool and send its result back before the model will produce an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response.
    EndTurn,
    /// The model wants to call a tool.
    ToolUse,
    /// Hit the token limit; response may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

/// A structured response from the chat model.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Content blocks in the response (text and/or tool use).
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating.
    pub stop_reason: Option<StopReason>,
}

impl ChatResponse {
    /// Create a text-only response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            stop_reason: Some(StopReason::EndTurn),
        }
    }

    /// Concatenate all text blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// All tool calls requested by this response.
    pub fn tool_calls(&self) -> Vec<&ToolCall> {
        self.content.iter().filter_map(|b| b.as_tool_use()).collect()
    }

    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let response = ChatResponse::from_text("Done.");
        assert_eq!(response.text_content(), "Done.");
        assert!(!response.has_tool_calls());
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
    }

    #[test]
    fn test_tool_call_extraction() {
        let response = ChatResponse {
            content: vec![
                ContentBlock::Text("Checking the database.".to_string()),
                ContentBlock::ToolUse(ToolCall::new(
                    "call_1",
                    "get_sql_data_tool",
                    serde_json::json!({"query": "SELECT * FROM incidents"}),
                )),
            ],
            stop_reason: Some(StopReason::ToolUse),
        };

        assert!(response.has_tool_calls());
        assert_eq!(response.text_content(), "Checking the database.");
        let calls = response.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "get_sql_data_tool");
    }

    #[test]
    fn test_empty_response() {
        let response = ChatResponse {
            content: vec![],
            stop_reason: None,
        };
        assert_eq!(response.text_content(), "");
        assert!(response.tool_calls().is_empty());
    }
}
