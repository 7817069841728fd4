//! History Store port
//!
//! Persistent chat history. The answer pipeline itself never touches
//! storage; the caller fetches recent turns before a request and appends
//! the finished Q/A pair after it.

use async_trait::async_trait;
use opsdesk_domain::query::entities::HistoryTurn;
use thiserror::Error;

/// Errors that can occur reading or writing chat history
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Port for the chat-history store
#[async_trait]
pub trait HistoryStorePort: Send + Sync {
    /// Fetch the most recent `limit` turns of a conversation, oldest
    /// first.
    async fn recent_turns(
        &self,
        chat_id: &str,
        limit: usize,
    ) -> Result<Vec<HistoryTurn>, HistoryError>;

    /// Append a finished question/answer pair to a conversation.
    async fn append(
        &self,
        chat_id: &str,
        question: &str,
        answer: &str,
    ) -> Result<(), HistoryError>;
}
