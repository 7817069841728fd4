//! Query Executor port
//!
//! Defines the interface to the incident records store. The query string
//! is opaque to this layer: the data agent derives it from the user's
//! question and the executor runs it as-is.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur executing a backend query
#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Other error: {0}")]
    Other(String),
}

/// An ordered result set: column names plus stringified row values.
///
/// Rows are rendered as `column: value` lines downstream, so the adapter
/// converts every column to its display string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Port for executing queries against the incident records store
#[async_trait]
pub trait QueryExecutorPort: Send + Sync {
    /// Execute an opaque backend query and fetch all matching rows.
    async fn fetch(&self, query: &str) -> Result<RecordSet, ExecutorError>;
}
