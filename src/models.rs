//! Data models for the MySQL MCP Server.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Result of executing a SQL statement.
///
/// Rows are ordered maps from column name to a dynamically typed value; the
/// shape is entirely determined by what the statement produced. Statements
/// that return no rows (DDL, most DML) yield an empty `rows` array.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// Column names in result order. Empty when the statement produced no rows.
    pub columns: Vec<String>,
    /// Result rows as key-value maps.
    pub rows: Vec<serde_json::Map<String, JsonValue>>,
    /// Number of rows returned.
    pub row_count: usize,
    /// Statement execution time in milliseconds.
    pub execution_time_ms: u64,
}

/// One column of a table's schema, as reported by the metadata view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub column_name: String,
    pub data_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_schema_json_keys() {
        let column = ColumnSchema {
            column_name: "id".to_string(),
            data_type: "int".to_string(),
        };
        let value = serde_json::to_value(&column).unwrap();
        assert_eq!(value, json!({"column_name": "id", "data_type": "int"}));
    }

    #[test]
    fn test_query_result_serialization() {
        let mut row = serde_json::Map::new();
        row.insert("x".to_string(), json!(1));
        let result = QueryResult {
            columns: vec!["x".to_string()],
            rows: vec![row],
            row_count: 1,
            execution_time_ms: 3,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["rows"][0]["x"], json!(1));
        assert_eq!(value["row_count"], json!(1));
    }
}
