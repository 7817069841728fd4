//! Chat domain
//!
//! Provider-neutral types for a tool-calling chat exchange: messages,
//! structured responses, and tool schemas. Adapters map these onto a
//! concrete wire format.

pub mod response;
pub mod tool;

pub use response::{ChatResponse, ContentBlock, StopReason};
pub use tool::{ToolCall, ToolSchema};
