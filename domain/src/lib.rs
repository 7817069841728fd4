//! Domain layer for opsdesk
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Routing
//!
//! Every incoming question is classified into exactly one [`QueryIntent`]
//! by a deterministic, regex-signal scorer — never by the language model.
//! The manager then delegates to the single specialist agent owning that
//! intent.
//!
//! ## Process Flow
//!
//! Each request carries its own [`TraceRecorder`]: an append-only, ordered
//! log of every decision and tool invocation made while answering. The
//! full sequence is returned to the caller for observability.

pub mod chat;
pub mod query;
pub mod routing;
pub mod trace;

// Re-export commonly used types
pub use chat::{
    response::{ChatResponse, ContentBlock, StopReason},
    tool::{ToolCall, ToolSchema},
};
pub use query::{
    answer::strip_markup,
    entities::{ContextBlock, HistoryTurn, UserQuery},
};
pub use routing::{classify_intent, QueryIntent};
pub use trace::{Actor, TraceRecorder, TraceStep};
