//! SQL execution tool.
//!
//! The single `query` tool runs client-supplied SQL verbatim. The declared
//! intent is read-only but nothing enforces it; whatever the configured
//! credentials allow, the database will execute.

use crate::db::{executor, ConnectionPool};
use crate::error::ServerResult;
use crate::models::QueryResult;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

/// Name the tool is declared and dispatched under.
pub const TOOL_NAME: &str = "query";

const TOOL_DESCRIPTION: &str = "Run a read-only SQL query";

/// Input for the query tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueryInput {
    /// SQL statement to execute against the connected database
    pub sql: String,
}

/// Handler for the `query` tool.
pub struct QueryToolHandler {
    pool: Arc<ConnectionPool>,
}

impl QueryToolHandler {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// The static tool declaration served by `tools/list`.
    pub fn declaration() -> Tool {
        Tool::new(TOOL_NAME, TOOL_DESCRIPTION, Arc::new(input_schema()))
    }

    /// Execute the submitted SQL on one pooled connection.
    ///
    /// The connection goes back to the pool before the outcome propagates,
    /// on the failure path as much as the success path.
    pub async fn invoke(&self, input: QueryInput) -> ServerResult<QueryResult> {
        let mut conn = self.pool.acquire().await?;
        let result = executor::run_statement(&mut conn, &input.sql).await;
        drop(conn);
        result
    }
}

fn input_schema() -> JsonObject {
    serde_json::to_value(schemars::schema_for!(QueryInput))
        .ok()
        .and_then(|value| value.as_object().cloned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_name() {
        let tool = QueryToolHandler::declaration();
        assert_eq!(tool.name, TOOL_NAME);
    }

    #[test]
    fn test_input_schema_requires_sql() {
        let schema = input_schema();
        let value = serde_json::Value::Object(schema);
        assert_eq!(value["type"], "object");
        assert!(value["properties"]["sql"].is_object());
        assert!(
            value["required"]
                .as_array()
                .is_some_and(|required| required.iter().any(|v| v == "sql"))
        );
    }

    #[test]
    fn test_input_deserializes_from_arguments() {
        let input: QueryInput = serde_json::from_value(serde_json::json!({
            "sql": "SELECT 1 AS x"
        }))
        .unwrap();
        assert_eq!(input.sql, "SELECT 1 AS x");
    }

    #[test]
    fn test_input_rejects_missing_sql() {
        let result = serde_json::from_value::<QueryInput>(serde_json::json!({}));
        assert!(result.is_err());
    }
}
