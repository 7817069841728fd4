//! Structured-data retrieval tool.
//!
//! Executes a model-derived SQL query against the incident records store
//! and renders the rows as labeled record blocks. Display is capped at 20
//! records after a full fetch; the header then carries the true total.

use std::sync::Arc;

use async_trait::async_trait;
use opsdesk_domain::trace::{Actor, TraceRecorder};
use tracing::{debug, warn};

use super::{RetrievalTool, SQL_DATA_TOOL};
use crate::ports::query_executor::{QueryExecutorPort, RecordSet};

/// Maximum number of record blocks rendered per invocation.
const DISPLAY_CAP: usize = 20;

/// Returned when the backend yields zero rows.
const NO_RECORDS: &str = "No records found matching the query.";

/// Tool bridging the data agent to the incident records store.
pub struct SqlDataTool {
    executor: Arc<dyn QueryExecutorPort>,
}

impl SqlDataTool {
    pub fn new(executor: Arc<dyn QueryExecutorPort>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl RetrievalTool for SqlDataTool {
    fn name(&self) -> &'static str {
        SQL_DATA_TOOL
    }

    fn invoke_description(&self, _query: &str) -> String {
        "Executing SQL query".to_string()
    }

    /// Execute `query` and render the result.
    ///
    /// Backend failures are captured here: the error becomes a trace step
    /// and a descriptive text result, never a fault to the caller.
    async fn run(&self, query: &str, trace: &mut TraceRecorder) -> String {
        debug!(query, "executing structured-data query");

        let records = match self.executor.fetch(query).await {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "structured-data query failed");
                trace.record(
                    Actor::DataAgent,
                    format!("Error in {SQL_DATA_TOOL}"),
                    format!("Backend error: {err}"),
                );
                return format!("Error executing SQL query: {err}");
            }
        };

        trace.record(
            Actor::DataAgent,
            "Fetching query results",
            format!("Retrieved {} records from database", records.len()),
        );

        if records.is_empty() {
            trace.record(
                Actor::DataAgent,
                "Formatting final response",
                "No records found for the query",
            );
            return NO_RECORDS.to_string();
        }

        trace.record(
            Actor::DataAgent,
            "Processing and formatting results",
            format!("Formatting {} records for display", records.len()),
        );

        render_records(&records)
    }
}

fn render_records(records: &RecordSet) -> String {
    let divider = "=".repeat(100);
    let total = records.len();

    let mut out = format!("Query Results:\n{divider}\n");
    if total > DISPLAY_CAP {
        out.push_str(&format!(
            "\nNOTE: Total records found: {total}. Displaying first {DISPLAY_CAP} records only.\n"
        ));
        out.push_str(&divider);
        out.push_str("\n\n");
    } else {
        out.push('\n');
    }

    let row_divider = "-".repeat(100);
    for (idx, row) in records.rows.iter().take(DISPLAY_CAP).enumerate() {
        out.push_str(&format!("Record {}:\n", idx + 1));
        for (column, value) in records.columns.iter().zip(row) {
            out.push_str(&format!("  {column}: {value}\n"));
        }
        out.push_str(&row_divider);
        out.push_str("\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::query_executor::ExecutorError;
    use async_trait::async_trait;

    struct StaticExecutor {
        result: Result<RecordSet, String>,
    }

    impl StaticExecutor {
        fn rows(records: RecordSet) -> Self {
            Self {
                result: Ok(records),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                result: Err(message.to_string()),
            }
        }
    }

    #[async_trait]
    impl QueryExecutorPort for StaticExecutor {
        async fn fetch(&self, _query: &str) -> Result<RecordSet, ExecutorError> {
            match &self.result {
                Ok(records) => Ok(records.clone()),
                Err(message) => Err(ExecutorError::Connection(message.clone())),
            }
        }
    }

    fn incident_row() -> RecordSet {
        RecordSet::new(
            vec![
                "incident_id".to_string(),
                "status".to_string(),
                "on_call_engineer".to_string(),
                "severity".to_string(),
            ],
            vec![vec![
                "INC000229".to_string(),
                "Open".to_string(),
                "A. Smith".to_string(),
                "P2".to_string(),
            ]],
        )
    }

    fn open_incidents(count: usize) -> RecordSet {
        let columns = vec!["incident_id".to_string(), "status".to_string()];
        let rows = (0..count)
            .map(|i| vec![format!("INC{:06}", i), "Open".to_string()])
            .collect();
        RecordSet::new(columns, rows)
    }

    #[tokio::test]
    async fn test_single_record_renders_all_fields() {
        let tool = SqlDataTool::new(Arc::new(StaticExecutor::rows(incident_row())));
        let mut trace = TraceRecorder::new();

        let output = tool
            .run(
                "SELECT incident_id, status, on_call_engineer, severity FROM incidents WHERE incident_id = 'INC000229'",
                &mut trace,
            )
            .await;

        assert!(output.contains("Record 1:"));
        assert!(output.contains("incident_id: INC000229"));
        assert!(output.contains("status: Open"));
        assert!(output.contains("on_call_engineer: A. Smith"));
        assert!(output.contains("severity: P2"));
        assert_eq!(output.matches("Record ").count(), 1);
    }

    #[tokio::test]
    async fn test_zero_rows_returns_defined_literal() {
        let tool = SqlDataTool::new(Arc::new(StaticExecutor::rows(RecordSet::default())));
        let mut trace = TraceRecorder::new();

        let output = tool.run("SELECT * FROM incidents WHERE 1=0", &mut trace).await;

        assert_eq!(output, "No records found matching the query.");
    }

    #[tokio::test]
    async fn test_truncation_at_twenty_with_true_total() {
        let tool = SqlDataTool::new(Arc::new(StaticExecutor::rows(open_incidents(35))));
        let mut trace = TraceRecorder::new();

        let output = tool
            .run("SELECT * FROM incidents WHERE status = 'Open'", &mut trace)
            .await;

        assert!(output.contains("Total records found: 35"));
        assert!(output.contains("Displaying first 20 records only"));
        assert_eq!(output.matches("Record ").count(), 20);
        assert!(output.contains("Record 20:"));
        assert!(!output.contains("Record 21:"));
    }

    #[tokio::test]
    async fn test_no_truncation_note_at_or_below_cap() {
        let tool = SqlDataTool::new(Arc::new(StaticExecutor::rows(open_incidents(20))));
        let mut trace = TraceRecorder::new();

        let output = tool.run("SELECT * FROM incidents", &mut trace).await;

        assert!(!output.contains("Displaying first"));
        assert_eq!(output.matches("Record ").count(), 20);
    }

    #[tokio::test]
    async fn test_backend_error_becomes_text_and_trace_step() {
        let tool = SqlDataTool::new(Arc::new(StaticExecutor::failing("connection refused")));
        let mut trace = TraceRecorder::new();

        let output = tool.run("SELECT * FROM incidents", &mut trace).await;

        assert!(output.starts_with("Error executing SQL query:"));
        assert!(output.contains("connection refused"));
        let error_step = trace
            .steps()
            .iter()
            .find(|s| s.action == "Error in get_sql_data_tool")
            .expect("error step recorded");
        assert_eq!(error_step.actor, Actor::DataAgent);
    }

    #[tokio::test]
    async fn test_idempotent_over_unchanged_data() {
        let tool = SqlDataTool::new(Arc::new(StaticExecutor::rows(open_incidents(35))));

        let mut first_trace = TraceRecorder::new();
        let first = tool.run("SELECT * FROM incidents", &mut first_trace).await;
        let mut second_trace = TraceRecorder::new();
        let second = tool.run("SELECT * FROM incidents", &mut second_trace).await;

        assert_eq!(first, second);
    }
}
