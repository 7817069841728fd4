//! SOP documentation specialist.

use std::sync::Arc;

use async_trait::async_trait;
use opsdesk_domain::query::entities::UserQuery;
use opsdesk_domain::trace::{Actor, TraceRecorder};
use tracing::info;

use super::{drive_tool_session, specs, AgentError, SpecialistAgent, DEFAULT_MAX_TOOL_TURNS};
use crate::ports::chat_gateway::ChatGateway;
use crate::tools::chunk_search::ChunkSearchTool;

/// Specialist answering procedure and documentation questions from the
/// SOP chunk index. Permitted to invoke only the semantic retrieval tool.
pub struct IncidentSopAgent {
    gateway: Arc<dyn ChatGateway>,
    tool: ChunkSearchTool,
    max_tool_turns: usize,
}

impl IncidentSopAgent {
    pub fn new(gateway: Arc<dyn ChatGateway>, tool: ChunkSearchTool) -> Self {
        Self {
            gateway,
            tool,
            max_tool_turns: DEFAULT_MAX_TOOL_TURNS,
        }
    }

    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }
}

#[async_trait]
impl SpecialistAgent for IncidentSopAgent {
    fn actor(&self) -> Actor {
        Actor::SopAgent
    }

    async fn answer(
        &self,
        query: &UserQuery,
        trace: &mut TraceRecorder,
    ) -> Result<String, AgentError> {
        info!("sop agent handling query");
        let session = self.gateway.create_session(&specs::sop_agent_prompt()).await?;
        drive_tool_session(
            session.as_ref(),
            &query.full_text(),
            &specs::chunks_tool_schema(),
            &self.tool,
            Actor::SopAgent,
            self.max_tool_turns,
            trace,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::test_support::{MockGateway, MockSession};
    use crate::ports::embedding::{EmbeddingError, EmbeddingPort};
    use crate::ports::vector_search::{ChunkHit, SearchError, VectorSearchPort};
    use opsdesk_domain::chat::response::{ChatResponse, ContentBlock, StopReason};
    use opsdesk_domain::chat::tool::ToolCall;

    struct FixedEmbedder;

    #[async_trait]
    impl EmbeddingPort for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            Ok(vec![0.0; 384])
        }

        fn dimensions(&self) -> usize {
            384
        }
    }

    struct EmptyIndex;

    #[async_trait]
    impl VectorSearchPort for EmptyIndex {
        async fn knn(
            &self,
            _vector: &[f32],
            _k: usize,
            _num_candidates: usize,
        ) -> Result<Vec<ChunkHit>, SearchError> {
            Ok(vec![])
        }
    }

    fn tool_call_response() -> ChatResponse {
        ChatResponse {
            content: vec![ContentBlock::ToolUse(ToolCall::new(
                "call_1",
                "get_chunks_tool",
                serde_json::json!({"query": "escalation procedure"}),
            ))],
            stop_reason: Some(StopReason::ToolUse),
        }
    }

    fn agent(responses: Vec<ChatResponse>) -> IncidentSopAgent {
        let gateway = Arc::new(MockGateway::new(MockSession::new(responses)));
        let tool = ChunkSearchTool::new(Arc::new(FixedEmbedder), Arc::new(EmptyIndex));
        IncidentSopAgent::new(gateway, tool)
    }

    #[tokio::test]
    async fn test_refusal_on_empty_index() {
        // Zero hits: the tool returns its literal and the model, bound by
        // its instructions, emits the fixed refusal sentence.
        let agent = agent(vec![
            tool_call_response(),
            ChatResponse::from_text(specs::SOP_REFUSAL),
        ]);
        let mut trace = TraceRecorder::new();

        let answer = agent
            .answer(&UserQuery::new("What is the escalation procedure?"), &mut trace)
            .await
            .unwrap();

        assert_eq!(answer, specs::SOP_REFUSAL);
        assert!(trace
            .steps()
            .iter()
            .any(|s| s.action == "Invoking get_chunks_tool" && s.actor == Actor::SopAgent));
    }

    #[tokio::test]
    async fn test_tool_loop_respects_turn_bound() {
        // The model keeps requesting the tool; the loop stops at the bound
        // and keeps the last text seen.
        let mut responses = vec![tool_call_response()];
        for _ in 0..5 {
            responses.push(ChatResponse {
                content: vec![
                    ContentBlock::Text("Still searching.".to_string()),
                    ContentBlock::ToolUse(ToolCall::new(
                        "call_n",
                        "get_chunks_tool",
                        serde_json::json!({"query": "escalation"}),
                    )),
                ],
                stop_reason: Some(StopReason::ToolUse),
            });
        }
        let agent = agent(responses).with_max_tool_turns(2);
        let mut trace = TraceRecorder::new();

        let answer = agent
            .answer(&UserQuery::new("escalation?"), &mut trace)
            .await
            .unwrap();

        assert_eq!(answer, "Still searching.");
    }
}
