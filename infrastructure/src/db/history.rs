//! Postgres chat-history store.
//!
//! Table: `chat_history (chat_id, question, response, created_at)`.
//! Fetches return the most recent window in chronological order; appends
//! stamp the insertion time.

use async_trait::async_trait;
use chrono::Utc;
use opsdesk_application::ports::history_store::{HistoryError, HistoryStorePort};
use opsdesk_domain::query::entities::HistoryTurn;
use sqlx::postgres::PgPool;
use sqlx::Row;
use tracing::debug;

/// Postgres-backed implementation of [`HistoryStorePort`].
pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStorePort for PgHistoryStore {
    async fn recent_turns(
        &self,
        chat_id: &str,
        limit: usize,
    ) -> Result<Vec<HistoryTurn>, HistoryError> {
        debug!(chat_id, limit, "fetching recent chat history");

        let rows = sqlx::query(
            "SELECT question, response FROM chat_history \
             WHERE chat_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(chat_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_error)?;

        // DESC gives the newest window; reverse back to chronological
        let mut turns: Vec<HistoryTurn> = rows
            .iter()
            .map(|row| {
                Ok(HistoryTurn::new(
                    row.try_get::<String, _>("question").map_err(map_error)?,
                    row.try_get::<String, _>("response").map_err(map_error)?,
                ))
            })
            .collect::<Result<_, HistoryError>>()?;
        turns.reverse();
        Ok(turns)
    }

    async fn append(
        &self,
        chat_id: &str,
        question: &str,
        answer: &str,
    ) -> Result<(), HistoryError> {
        sqlx::query(
            "INSERT INTO chat_history (chat_id, question, response, created_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(chat_id)
        .bind(question)
        .bind(answer)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(map_error)?;

        debug!(chat_id, "chat turn saved");
        Ok(())
    }
}

fn map_error(err: sqlx::Error) -> HistoryError {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            HistoryError::Connection(err.to_string())
        }
        other => HistoryError::Storage(other.to_string()),
    }
}
