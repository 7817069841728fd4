//! Trace domain entities
//!
//! A [`TraceRecorder`] is created per request and threaded through the
//! manager, the delegated agent, and its tool. Steps are appended, never
//! mutated or removed; the accumulated sequence is the "process flow"
//! returned to the caller alongside the answer.

use serde::{Deserialize, Serialize};

/// Who performed a traced step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    /// The routing manager.
    Manager,
    /// The structured-data specialist.
    DataAgent,
    /// The SOP documentation specialist.
    SopAgent,
}

impl Actor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Actor::Manager => "Manager Agent",
            Actor::DataAgent => "Incident Data Agent",
            Actor::SopAgent => "Incident SOP Agent",
        }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single entry in the process flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    /// 1-based position, reflecting insertion order.
    pub step_number: usize,
    /// Who performed the step.
    pub actor: Actor,
    /// Short label (e.g. "Delegating to Incident Data Agent").
    pub action: String,
    /// Free-text detail.
    pub description: String,
}

/// Append-only recorder for the process flow of one request.
///
/// `step_number` is always derived from the recorder's current length, so
/// numbering reflects insertion order regardless of which actor appends.
/// Recording never fails; it is safe to call from failure handlers.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    steps: Vec<TraceStep>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a step and return a reference to it.
    pub fn record(
        &mut self,
        actor: Actor,
        action: impl Into<String>,
        description: impl Into<String>,
    ) -> &TraceStep {
        let idx = self.steps.len();
        self.steps.push(TraceStep {
            step_number: idx + 1,
            actor,
            action: action.into(),
            description: description.into(),
        });
        &self.steps[idx]
    }

    /// The ordered sequence recorded so far.
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Consume the recorder, yielding the full process flow.
    pub fn into_steps(self) -> Vec<TraceStep> {
        self.steps
    }
}
