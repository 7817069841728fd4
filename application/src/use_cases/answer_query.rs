//! Answer Query use case — the routing manager.
//!
//! Classifies the incoming question, delegates it to exactly one
//! specialist agent, and composes the final answer from the specialist's
//! text. The whole exchange is recorded into a per-request
//! [`TraceRecorder`] returned to the caller as the process flow.

use std::sync::Arc;

use opsdesk_domain::query::answer::strip_markup;
use opsdesk_domain::query::entities::{ContextBlock, HistoryTurn, UserQuery, DEFAULT_CONTEXT_TURNS};
use opsdesk_domain::routing::{classify_intent, QueryIntent};
use opsdesk_domain::trace::{Actor, TraceRecorder, TraceStep};
use thiserror::Error;
use tracing::info;

use crate::agents::{AgentError, SpecialistAgent};

/// Errors that can occur answering a query.
///
/// A specialist failure is fatal for the request: there is no retry and
/// no failover to the other specialist.
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("Delegation to {agent} failed: {source}")]
    Delegation {
        agent: &'static str,
        #[source]
        source: AgentError,
    },
}

/// Input for the [`AnswerQueryUseCase`].
#[derive(Debug, Clone)]
pub struct AnswerQueryInput {
    /// The user's question.
    pub question: String,
    /// Chronologically ordered recent history of the conversation.
    pub history: Vec<HistoryTurn>,
}

impl AnswerQueryInput {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            history: Vec::new(),
        }
    }

    pub fn with_history(mut self, history: Vec<HistoryTurn>) -> Self {
        self.history = history;
        self
    }
}

/// The answer plus the ordered record of how it was produced.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub response: String,
    pub process_flow: Vec<TraceStep>,
}

/// Use case routing one query through classification, single delegation,
/// and answer composition.
pub struct AnswerQueryUseCase {
    data_agent: Arc<dyn SpecialistAgent>,
    sop_agent: Arc<dyn SpecialistAgent>,
    context_turns: usize,
}

impl AnswerQueryUseCase {
    pub fn new(data_agent: Arc<dyn SpecialistAgent>, sop_agent: Arc<dyn SpecialistAgent>) -> Self {
        Self {
            data_agent,
            sop_agent,
            context_turns: DEFAULT_CONTEXT_TURNS,
        }
    }

    /// Override the number of history turns carried into the query.
    pub fn with_context_turns(mut self, turns: usize) -> Self {
        self.context_turns = turns;
        self
    }

    /// Answer one query.
    pub async fn execute(&self, input: AnswerQueryInput) -> Result<AnswerOutcome, ManagerError> {
        let mut trace = TraceRecorder::new();

        let mut query = UserQuery::new(&input.question);
        if let Some(context) = ContextBlock::from_history(&input.history, self.context_turns) {
            query = query.with_context(&context);
        }

        trace.record(
            Actor::Manager,
            "Analyzing user question",
            format!("Analyzing query: {}", input.question),
        );

        // Classification inspects the raw question, not the context block
        let intent = classify_intent(&input.question);
        let agent = match intent {
            QueryIntent::IncidentData => &self.data_agent,
            QueryIntent::Procedure => &self.sop_agent,
        };
        info!(intent = %intent, agent = %agent.actor(), "delegating query");

        trace.record(
            Actor::Manager,
            format!("Delegating to {}", agent.actor()),
            format!("Routing query to {}", agent.actor()),
        );

        let raw = agent
            .answer(&query, &mut trace)
            .await
            .map_err(|source| ManagerError::Delegation {
                agent: agent.actor().as_str(),
                source,
            })?;

        Ok(AnswerOutcome {
            response: strip_markup(&raw),
            process_flow: trace.into_steps(),
        })
    }
}
