//! Infrastructure layer for opsdesk
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer, plus configuration file loading.

pub mod config;
pub mod db;
pub mod embeddings;
pub mod llm;
pub mod search;

// Re-export commonly used types
pub use config::{
    ChatConfig, ConfigLoader, DatabaseConfig, ElasticsearchConfig, EmbeddingsConfig, LlmConfig,
    OpsdeskConfig,
};
pub use db::{executor::PgQueryExecutor, history::PgHistoryStore};
pub use embeddings::HttpEmbeddingProvider;
pub use llm::OpenAiChatGateway;
pub use search::ElasticVectorSearch;
