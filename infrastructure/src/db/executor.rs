//! Postgres query executor.
//!
//! Runs the agent-derived query string as-is and stringifies every column
//! for the tool's `column: value` rendering. The pool hands a connection
//! out per call and reclaims it on drop, success or failure.

use async_trait::async_trait;
use opsdesk_application::ports::query_executor::{ExecutorError, QueryExecutorPort, RecordSet};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::{Column, Row, TypeInfo};
use tracing::debug;

/// Postgres-backed implementation of [`QueryExecutorPort`].
pub struct PgQueryExecutor {
    pool: PgPool,
}

impl PgQueryExecutor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueryExecutorPort for PgQueryExecutor {
    async fn fetch(&self, query: &str) -> Result<RecordSet, ExecutorError> {
        debug!(query, "running incident query");

        let rows = sqlx::query(query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_error)?;

        let columns = match rows.first() {
            Some(row) => row
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
            None => Vec::new(),
        };

        let rendered = rows.iter().map(render_row).collect();
        Ok(RecordSet::new(columns, rendered))
    }
}

fn map_error(err: sqlx::Error) -> ExecutorError {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            ExecutorError::Connection(err.to_string())
        }
        other => ExecutorError::QueryFailed(other.to_string()),
    }
}

fn render_row(row: &PgRow) -> Vec<String> {
    (0..row.columns().len())
        .map(|idx| column_to_string(row, idx))
        .collect()
}

/// Stringify one column by its Postgres type name.
///
/// Unknown types render as a placeholder rather than failing the whole
/// result set.
fn column_to_string(row: &PgRow, idx: usize) -> String {
    let type_name = row.columns()[idx].type_info().name();
    match type_name {
        "TEXT" | "VARCHAR" | "CHAR" | "BPCHAR" | "NAME" => decode::<String>(row, idx),
        "INT2" => decode::<i16>(row, idx),
        "INT4" => decode::<i32>(row, idx),
        "INT8" => decode::<i64>(row, idx),
        "FLOAT4" => decode::<f32>(row, idx),
        "FLOAT8" => decode::<f64>(row, idx),
        "BOOL" => decode::<bool>(row, idx),
        "DATE" => decode::<chrono::NaiveDate>(row, idx),
        "TIME" => decode::<chrono::NaiveTime>(row, idx),
        "TIMESTAMP" => decode::<chrono::NaiveDateTime>(row, idx),
        "TIMESTAMPTZ" => decode::<chrono::DateTime<chrono::Utc>>(row, idx),
        other => format!("<{other}>"),
    }
}

fn decode<'r, T>(row: &'r PgRow, idx: usize) -> String
where
    T: std::fmt::Display + sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    match row.try_get::<Option<T>, _>(idx) {
        Ok(Some(value)) => value.to_string(),
        Ok(None) => "NULL".to_string(),
        Err(_) => "<unreadable>".to_string(),
    }
}
