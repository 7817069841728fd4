//! Chat Gateway port
//!
//! Defines the interface for the text-generation collaborator: a session
//! is created per specialist invocation with that agent's system prompt,
//! offered a set of permitted tools, and driven until it stops calling
//! them.

use async_trait::async_trait;
use opsdesk_domain::chat::{response::ChatResponse, tool::ToolSchema};
use thiserror::Error;

/// Errors that can occur during chat gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// Result of one tool execution, sent back to the model.
#[derive(Debug, Clone)]
pub struct ToolResultMessage {
    /// Provider-assigned id of the tool call this answers.
    pub tool_call_id: String,
    /// Name of the executed tool.
    pub tool_name: String,
    /// Rendered tool output (success or error text — never a fault).
    pub output: String,
}

/// Gateway for chat-model communication
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Create a new session seeded with a system prompt.
    async fn create_session(&self, system_prompt: &str)
        -> Result<Box<dyn ChatSession>, GatewayError>;
}

/// An active chat session
///
/// Implementations keep the running message history so tool results can
/// be appended mid-exchange.
#[async_trait]
pub trait ChatSession: Send + Sync {
    /// Send a user message, offering the given tools.
    async fn send_with_tools(
        &self,
        content: &str,
        tools: &[ToolSchema],
    ) -> Result<ChatResponse, GatewayError>;

    /// Send tool results back and get the model's next response.
    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> Result<ChatResponse, GatewayError>;
}
