//! Semantic retrieval tool.
//!
//! Encodes a free-text query, runs a kNN search against the document-chunk
//! index, and renders the hits as numbered blocks in ranked order.

use std::sync::Arc;

use async_trait::async_trait;
use opsdesk_domain::trace::{Actor, TraceRecorder};
use tracing::{debug, warn};

use super::{RetrievalTool, CHUNKS_TOOL};
use crate::ports::embedding::EmbeddingPort;
use crate::ports::vector_search::{ChunkHit, VectorSearchPort};

/// Ranked hits requested per search.
const TOP_K: usize = 5;

/// Candidate pool size for the kNN search.
const NUM_CANDIDATES: usize = 100;

/// Returned when the index yields zero hits.
const NO_CHUNKS: &str = "No relevant chunks found for the query.";

/// Tool bridging the SOP agent to the document-chunk index.
pub struct ChunkSearchTool {
    embedder: Arc<dyn EmbeddingPort>,
    search: Arc<dyn VectorSearchPort>,
}

impl ChunkSearchTool {
    pub fn new(embedder: Arc<dyn EmbeddingPort>, search: Arc<dyn VectorSearchPort>) -> Self {
        Self { embedder, search }
    }
}

#[async_trait]
impl RetrievalTool for ChunkSearchTool {
    fn name(&self) -> &'static str {
        CHUNKS_TOOL
    }

    fn invoke_description(&self, query: &str) -> String {
        format!("Searching SOP documentation for: {query}")
    }

    /// Embed `query`, search the index, and render the hits.
    ///
    /// Embedding and search failures are captured here: the error becomes
    /// a trace step and a descriptive text result, never a fault to the
    /// caller.
    async fn run(&self, query: &str, trace: &mut TraceRecorder) -> String {
        debug!(query, "searching document chunks");

        let vector = match self.embedder.embed(query).await {
            Ok(vector) => vector,
            Err(err) => {
                warn!(%err, "query embedding failed");
                trace.record(
                    Actor::SopAgent,
                    format!("Error in {CHUNKS_TOOL}"),
                    format!("Backend error: {err}"),
                );
                return format!("Error retrieving chunks from the document index: {err}");
            }
        };

        let hits = match self.search.knn(&vector, TOP_K, NUM_CANDIDATES).await {
            Ok(hits) => hits,
            Err(err) => {
                warn!(%err, "chunk search failed");
                trace.record(
                    Actor::SopAgent,
                    format!("Error in {CHUNKS_TOOL}"),
                    format!("Backend error: {err}"),
                );
                return format!("Error retrieving chunks from the document index: {err}");
            }
        };

        trace.record(
            Actor::SopAgent,
            "Processing search results",
            format!("Retrieved {} relevant document chunks", hits.len()),
        );

        if hits.is_empty() {
            return NO_CHUNKS.to_string();
        }

        trace.record(
            Actor::SopAgent,
            "Formatting final response",
            "Structuring retrieved chunks for presentation",
        );

        render_chunks(&hits)
    }
}

fn render_chunks(hits: &[ChunkHit]) -> String {
    let mut out = format!("Retrieved Document Chunks:\n{}\n\n", "=".repeat(80));
    let divider = "-".repeat(80);

    for (idx, hit) in hits.iter().enumerate() {
        out.push_str(&format!("Chunk {}:\n", idx + 1));
        out.push_str(&format!("Content:\n{}\n", hit.content));
        out.push_str(&divider);
        out.push_str("\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::embedding::EmbeddingError;
    use crate::ports::vector_search::SearchError;
    use async_trait::async_trait;

    struct StaticEmbedder {
        fail: bool,
    }

    #[async_trait]
    impl EmbeddingPort for StaticEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
            if self.fail {
                Err(EmbeddingError::RequestFailed("model offline".to_string()))
            } else {
                Ok(vec![0.1; 384])
            }
        }

        fn dimensions(&self) -> usize {
            384
        }
    }

    struct StaticSearch {
        result: Result<Vec<ChunkHit>, String>,
    }

    #[async_trait]
    impl VectorSearchPort for StaticSearch {
        async fn knn(
            &self,
            vector: &[f32],
            k: usize,
            num_candidates: usize,
        ) -> Result<Vec<ChunkHit>, SearchError> {
            assert_eq!(vector.len(), 384);
            assert_eq!(k, 5);
            assert_eq!(num_candidates, 100);
            match &self.result {
                Ok(hits) => Ok(hits.clone()),
                Err(message) => Err(SearchError::Connection(message.clone())),
            }
        }
    }

    fn hit(n: usize) -> ChunkHit {
        ChunkHit {
            content: format!("Escalation step {n}"),
            chunk_id: format!("chunk-{n}"),
            source: "sop.pdf".to_string(),
        }
    }

    fn tool(embed_fail: bool, search: Result<Vec<ChunkHit>, String>) -> ChunkSearchTool {
        ChunkSearchTool::new(
            Arc::new(StaticEmbedder { fail: embed_fail }),
            Arc::new(StaticSearch { result: search }),
        )
    }

    #[tokio::test]
    async fn test_hits_render_in_ranked_order() {
        let tool = tool(false, Ok(vec![hit(1), hit(2), hit(3)]));
        let mut trace = TraceRecorder::new();

        let output = tool.run("escalation procedure", &mut trace).await;

        assert!(output.starts_with("Retrieved Document Chunks:"));
        let first = output.find("Escalation step 1").unwrap();
        let second = output.find("Escalation step 2").unwrap();
        let third = output.find("Escalation step 3").unwrap();
        assert!(first < second && second < third);
        assert_eq!(output.matches("Chunk ").count(), 3);
    }

    #[tokio::test]
    async fn test_zero_hits_returns_defined_literal() {
        let tool = tool(false, Ok(vec![]));
        let mut trace = TraceRecorder::new();

        let output = tool.run("unknown topic", &mut trace).await;

        assert_eq!(output, "No relevant chunks found for the query.");
    }

    #[tokio::test]
    async fn test_embedding_failure_becomes_text_and_trace_step() {
        let tool = tool(true, Ok(vec![]));
        let mut trace = TraceRecorder::new();

        let output = tool.run("escalation", &mut trace).await;

        assert!(output.starts_with("Error retrieving chunks from the document index:"));
        assert!(trace
            .steps()
            .iter()
            .any(|s| s.action == "Error in get_chunks_tool" && s.actor == Actor::SopAgent));
    }

    #[tokio::test]
    async fn test_search_failure_becomes_text_and_trace_step() {
        let tool = tool(false, Err("index unavailable".to_string()));
        let mut trace = TraceRecorder::new();

        let output = tool.run("escalation", &mut trace).await;

        assert!(output.contains("index unavailable"));
        assert!(trace
            .steps()
            .iter()
            .any(|s| s.action == "Error in get_chunks_tool"));
    }
}
