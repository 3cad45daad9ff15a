//! Statement execution.
//!
//! The submitted SQL runs unmodified over the text protocol on an
//! already-acquired connection. The text protocol is deliberate: unlike the
//! prepared-statement path it accepts every statement kind the server does,
//! DDL included. There is no transaction wrapping, no row limit, and no
//! timeout; a long-running statement holds its connection until the database
//! answers.

use crate::db::types::RowToJson;
use crate::error::{ServerError, ServerResult};
use crate::models::QueryResult;
use sqlx::Executor;
use sqlx::mysql::{MySqlConnection, MySqlRow};
use std::time::Instant;
use tracing::debug;

/// Execute one SQL statement and collect whatever rows it produces.
pub async fn run_statement(conn: &mut MySqlConnection, sql: &str) -> ServerResult<QueryResult> {
    let start = Instant::now();
    debug!(sql = %sql, "Executing statement");

    let rows: Vec<MySqlRow> = conn.fetch_all(sql).await.map_err(ServerError::from)?;

    let execution_time_ms = start.elapsed().as_millis() as u64;
    debug!(
        rows = rows.len(),
        execution_time_ms, "Statement completed"
    );

    Ok(build_result(rows, execution_time_ms))
}

fn build_result(rows: Vec<MySqlRow>, execution_time_ms: u64) -> QueryResult {
    let columns = rows
        .first()
        .map(|row| row.column_names())
        .unwrap_or_default();
    let json_rows: Vec<_> = rows.iter().map(|row| row.to_json_map()).collect();
    let row_count = json_rows.len();

    QueryResult {
        columns,
        rows: json_rows,
        row_count,
        execution_time_ms,
    }
}
