//! Embedding port
//!
//! Converts free text to a fixed-dimensionality vector.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur generating embeddings
#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Embedding request failed: {0}")]
    RequestFailed(String),

    #[error("Empty response from embedding service")]
    EmptyResponse,
}

/// Port for the embedding service
#[async_trait]
pub trait EmbeddingPort: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Dimensionality of the vectors produced.
    fn dimensions(&self) -> usize;
}
