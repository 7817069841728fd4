//! Vector Search port
//!
//! k-nearest-neighbor search against the indexed document-chunk store.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a similarity search
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),
}

/// One ranked hit from the chunk index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkHit {
    pub content: String,
    pub chunk_id: String,
    pub source: String,
}

/// Port for the vector search collaborator
///
/// The adapter is scoped to one named index; hits come back in the
/// search's own ranked order and are not re-ranked here.
#[async_trait]
pub trait VectorSearchPort: Send + Sync {
    /// Run a kNN search, returning up to `k` ranked hits drawn from a
    /// candidate pool of `num_candidates`.
    async fn knn(
        &self,
        vector: &[f32],
        k: usize,
        num_candidates: usize,
    ) -> Result<Vec<ChunkHit>, SearchError>;
}
