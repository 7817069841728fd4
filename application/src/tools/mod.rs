//! Retrieval tools
//!
//! The two deterministic bridges from a model-derived query to a backend
//! call. Each returns rendered text on every path: success payloads,
//! defined empty-result literals, and captured failures all come back as
//! strings so the calling agent can react instead of aborting.

pub mod chunk_search;
pub mod sql_data;

use async_trait::async_trait;
use opsdesk_domain::trace::TraceRecorder;

/// Canonical name of the structured-data retrieval tool.
pub const SQL_DATA_TOOL: &str = "get_sql_data_tool";

/// Canonical name of the semantic retrieval tool.
pub const CHUNKS_TOOL: &str = "get_chunks_tool";

/// The deterministic bridge from model intent to a backend call.
///
/// Exactly two implementations exist: [`sql_data::SqlDataTool`] and
/// [`chunk_search::ChunkSearchTool`]. Both take free text in and return
/// rendered text out, converting every backend failure into a descriptive
/// result instead of raising it.
#[async_trait]
pub trait RetrievalTool: Send + Sync {
    /// Canonical tool name offered to the model.
    fn name(&self) -> &'static str;

    /// Trace description for an invocation with `query`.
    fn invoke_description(&self, query: &str) -> String;

    /// Execute the tool; never fails past this boundary.
    async fn run(&self, query: &str, trace: &mut TraceRecorder) -> String;
}
