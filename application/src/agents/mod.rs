//! Specialist agents
//!
//! Each agent wraps exactly one retrieval tool with a fixed instruction
//! specification and drives a chat session until the model stops calling
//! the tool. Constraints on answer content are behavioral contracts on the
//! text-generation collaborator; what this layer enforces is the
//! single-tool capability set and the bounded loop.

pub mod data_agent;
pub mod sop_agent;
pub mod specs;

use async_trait::async_trait;
use opsdesk_domain::chat::tool::{ToolCall, ToolSchema};
use opsdesk_domain::query::entities::UserQuery;
use opsdesk_domain::trace::{Actor, TraceRecorder};
use thiserror::Error;
use tracing::warn;

use crate::ports::chat_gateway::{ChatSession, GatewayError, ToolResultMessage};
use crate::tools::RetrievalTool;

/// Default bound on tool-call turns per delegation.
pub const DEFAULT_MAX_TOOL_TURNS: usize = 4;

/// Errors that can occur during a specialist delegation.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Specialist produced no answer")]
    EmptyAnswer,
}

/// A bounded text-generation role permitted to use exactly one tool.
#[async_trait]
pub trait SpecialistAgent: Send + Sync {
    /// The actor this agent records trace steps as.
    fn actor(&self) -> Actor;

    /// Answer the query, recording steps into `trace`.
    async fn answer(
        &self,
        query: &UserQuery,
        trace: &mut TraceRecorder,
    ) -> Result<String, AgentError>;
}

/// Drive one chat session through the single-tool loop.
///
/// Sends the query with the agent's one permitted tool, executes requested
/// calls sequentially, and feeds results back until the model answers in
/// text or the turn bound is hit. The last non-empty text wins;
/// intermediate commentary is discarded.
pub(crate) async fn drive_tool_session(
    session: &dyn ChatSession,
    query_text: &str,
    schema: &ToolSchema,
    tool: &dyn RetrievalTool,
    actor: Actor,
    max_turns: usize,
    trace: &mut TraceRecorder,
) -> Result<String, AgentError> {
    let tools = [schema.clone()];
    let mut response = session.send_with_tools(query_text, &tools).await?;
    let mut answer = response.text_content();

    let mut turn = 0;
    loop {
        let calls: Vec<ToolCall> = response.tool_calls().into_iter().cloned().collect();
        if calls.is_empty() {
            break;
        }

        turn += 1;
        if turn > max_turns {
            warn!(max_turns, "tool loop exceeded turn bound");
            break;
        }

        let mut results = Vec::with_capacity(calls.len());
        for call in &calls {
            let output = if call.name != tool.name() {
                // Single-tool capability set: anything else is rejected
                format!("Unknown tool: {}", call.name)
            } else {
                match call.query_argument() {
                    Some(query) => {
                        trace.record(
                            actor,
                            format!("Invoking {}", tool.name()),
                            tool.invoke_description(query),
                        );
                        tool.run(query, trace).await
                    }
                    None => "Missing required argument: query".to_string(),
                }
            };
            results.push(ToolResultMessage {
                tool_call_id: call.id.clone(),
                tool_name: call.name.clone(),
                output,
            });
        }

        response = session.send_tool_results(&results).await?;
        let text = response.text_content();
        if !text.is_empty() {
            answer = text;
        }
    }

    if answer.is_empty() {
        return Err(AgentError::EmptyAnswer);
    }
    Ok(answer)
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Shared mocks for agent and use-case tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use opsdesk_domain::chat::response::ChatResponse;
    use opsdesk_domain::chat::tool::ToolSchema;

    use crate::ports::chat_gateway::{ChatGateway, ChatSession, GatewayError, ToolResultMessage};

    pub struct MockSession {
        responses: Mutex<VecDeque<ChatResponse>>,
    }

    impl MockSession {
        pub fn new(responses: Vec<ChatResponse>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
            }
        }

        fn next(&self) -> Result<ChatResponse, GatewayError> {
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| GatewayError::Other("No more responses".to_string()))
        }
    }

    #[async_trait]
    impl ChatSession for MockSession {
        async fn send_with_tools(
            &self,
            _content: &str,
            _tools: &[ToolSchema],
        ) -> Result<ChatResponse, GatewayError> {
            self.next()
        }

        async fn send_tool_results(
            &self,
            _results: &[ToolResultMessage],
        ) -> Result<ChatResponse, GatewayError> {
            self.next()
        }
    }

    pub struct MockGateway {
        session: Mutex<Option<Box<dyn ChatSession>>>,
    }

    impl MockGateway {
        pub fn new(session: impl ChatSession + 'static) -> Self {
            Self {
                session: Mutex::new(Some(Box::new(session))),
            }
        }
    }

    #[async_trait]
    impl ChatGateway for MockGateway {
        async fn create_session(
            &self,
            _system_prompt: &str,
        ) -> Result<Box<dyn ChatSession>, GatewayError> {
            self.session
                .lock()
                .unwrap()
                .take()
                .ok_or_else(|| GatewayError::Other("Session already taken".to_string()))
        }
    }
}
