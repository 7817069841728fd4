//! Application layer for opsdesk
//!
//! This crate contains use cases, the specialist agents and their retrieval
//! tools, and port definitions. It depends only on the domain layer.

pub mod agents;
pub mod ports;
pub mod tools;
pub mod use_cases;

// Re-export commonly used types
pub use agents::{
    data_agent::IncidentDataAgent, sop_agent::IncidentSopAgent, AgentError, SpecialistAgent,
};
pub use ports::{
    chat_gateway::{ChatGateway, ChatSession, GatewayError, ToolResultMessage},
    embedding::{EmbeddingError, EmbeddingPort},
    history_store::{HistoryError, HistoryStorePort},
    query_executor::{ExecutorError, QueryExecutorPort, RecordSet},
    vector_search::{ChunkHit, SearchError, VectorSearchPort},
};
pub use tools::{chunk_search::ChunkSearchTool, sql_data::SqlDataTool, RetrievalTool};
pub use use_cases::answer_query::{
    AnswerOutcome, AnswerQueryInput, AnswerQueryUseCase, ManagerError,
};
