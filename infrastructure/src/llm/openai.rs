//! OpenAI-compatible chat-completions gateway.
//!
//! Implements [`ChatGateway`] over the `/chat/completions` wire format
//! with function tools. Each session keeps its running message history so
//! tool results can be appended mid-exchange; the adapter maps the wire
//! response onto the domain [`ChatResponse`] blocks.

use async_trait::async_trait;
use opsdesk_application::ports::chat_gateway::{
    ChatGateway, ChatSession, GatewayError, ToolResultMessage,
};
use opsdesk_domain::chat::response::{ChatResponse, ContentBlock, StopReason};
use opsdesk_domain::chat::tool::{ToolCall, ToolSchema};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

/// OpenAI-compatible implementation of [`ChatGateway`].
pub struct OpenAiChatGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiChatGateway {
    /// Create a gateway for `model` at `endpoint` (e.g.
    /// "https://api.openai.com/v1").
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: None,
            model: model.into(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[async_trait]
impl ChatGateway for OpenAiChatGateway {
    async fn create_session(
        &self,
        system_prompt: &str,
    ) -> Result<Box<dyn ChatSession>, GatewayError> {
        Ok(Box::new(OpenAiChatSession {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            state: Mutex::new(SessionState {
                messages: vec![WireMessage::text("system", system_prompt)],
                tools: Vec::new(),
            }),
        }))
    }
}

struct SessionState {
    messages: Vec<WireMessage>,
    tools: Vec<serde_json::Value>,
}

/// An active chat-completions exchange.
struct OpenAiChatSession {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    state: Mutex<SessionState>,
}

#[async_trait]
impl ChatSession for OpenAiChatSession {
    async fn send_with_tools(
        &self,
        content: &str,
        tools: &[ToolSchema],
    ) -> Result<ChatResponse, GatewayError> {
        {
            let mut state = self.state.lock().await;
            state.tools = tools.iter().map(schema_to_wire).collect();
            state.messages.push(WireMessage::text("user", content));
        }
        self.request().await
    }

    async fn send_tool_results(
        &self,
        results: &[ToolResultMessage],
    ) -> Result<ChatResponse, GatewayError> {
        {
            let mut state = self.state.lock().await;
            for result in results {
                state.messages.push(WireMessage {
                    role: "tool",
                    content: Some(result.output.clone()),
                    tool_calls: None,
                    tool_call_id: Some(result.tool_call_id.clone()),
                });
            }
        }
        self.request().await
    }
}

impl OpenAiChatSession {
    async fn request(&self) -> Result<ChatResponse, GatewayError> {
        let body = {
            let state = self.state.lock().await;
            let mut body = serde_json::json!({
                "model": self.model,
                "messages": state.messages,
            });
            if !state.tools.is_empty() {
                body["tools"] = serde_json::Value::Array(state.tools.clone());
            }
            body
        };

        let url = format!("{}/chat/completions", self.endpoint);
        let mut builder = self.client.post(&url).json(&body);
        if let Some(api_key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "chat API error {status}: {body}"
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::MalformedResponse("no choices".to_string()))?;

        debug!(finish_reason = ?choice.finish_reason, "chat completion received");

        // Keep the assistant turn in the history so tool results attach
        // to their calls on the next request
        {
            let mut state = self.state.lock().await;
            state.messages.push(WireMessage {
                role: "assistant",
                content: choice.message.content.clone(),
                tool_calls: choice.message.tool_calls.clone(),
                tool_call_id: None,
            });
        }

        Ok(to_chat_response(choice))
    }
}

// --- Wire types ---

#[derive(Debug, Clone, Serialize)]
struct WireMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl WireMessage {
    fn text(role: &'static str, content: &str) -> Self {
        Self {
            role,
            content: Some(content.to_string()),
            tool_calls: None,
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    function: WireFunctionCall,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    /// JSON-encoded argument object.
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

fn schema_to_wire(schema: &ToolSchema) -> serde_json::Value {
    serde_json::json!({
        "type": "function",
        "function": {
            "name": schema.name,
            "description": schema.description,
            "parameters": schema.parameters,
        }
    })
}

fn to_chat_response(choice: Choice) -> ChatResponse {
    let mut content = Vec::new();

    if let Some(text) = choice.message.content {
        if !text.is_empty() {
            content.push(ContentBlock::Text(text));
        }
    }

    for call in choice.message.tool_calls.unwrap_or_default() {
        // Malformed argument JSON degrades to an empty object; the tool
        // then reports the missing argument back to the model
        let arguments = serde_json::from_str(&call.function.arguments)
            .unwrap_or_else(|_| serde_json::json!({}));
        content.push(ContentBlock::ToolUse(ToolCall::new(
            call.id,
            call.function.name,
            arguments,
        )));
    }

    let stop_reason = choice.finish_reason.map(|reason| match reason.as_str() {
        "stop" => StopReason::EndTurn,
        "tool_calls" => StopReason::ToolUse,
        "length" => StopReason::MaxTokens,
        _ => StopReason::Other(reason),
    });

    ChatResponse {
        content,
        stop_reason,
    }
}
