//! Structured-data specialist.

use std::sync::Arc;

use async_trait::async_trait;
use opsdesk_domain::query::entities::UserQuery;
use opsdesk_domain::trace::{Actor, TraceRecorder};
use tracing::info;

use super::{drive_tool_session, specs, AgentError, SpecialistAgent, DEFAULT_MAX_TOOL_TURNS};
use crate::ports::chat_gateway::ChatGateway;
use crate::tools::sql_data::SqlDataTool;

/// Specialist answering live-incident questions via the incident records
/// store. Permitted to invoke only the structured-data retrieval tool.
pub struct IncidentDataAgent {
    gateway: Arc<dyn ChatGateway>,
    tool: SqlDataTool,
    max_tool_turns: usize,
}

impl IncidentDataAgent {
    pub fn new(gateway: Arc<dyn ChatGateway>, tool: SqlDataTool) -> Self {
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
impl SpecialistAgent for IncidentDataAgent {
    fn actor(&self) -> Actor {
        Actor::DataAgent
    }

    async fn answer(
        &self,
        query: &UserQuery,
        trace: &mut TraceRecorder,
    ) -> Result<String, AgentError> {
        info!("data agent handling query");
        let session = self.gateway.create_session(&specs::data_agent_prompt()).await?;
        drive_tool_session(
            session.as_ref(),
            &query.full_text(),
            &specs::sql_tool_schema(),
            &self.tool,
            Actor::DataAgent,
            self.max_tool_turns,
            trace,
        )
        .await
    }
}
