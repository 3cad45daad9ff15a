//! Schema introspection via information_schema.
//!
//! Both queries are scoped to the database named in the connection string
//! (`TABLE_SCHEMA = DATABASE()`). The CONVERT(... USING utf8) wrapping works
//! around metadata columns arriving as binary strings on some server
//! versions.

use crate::error::ServerResult;
use crate::models::ColumnSchema;
use sqlx::Row;
use sqlx::mysql::MySqlConnection;

mod sql {
    /// Table names visible in the connected database. Ordering is whatever
    /// the metadata view yields.
    pub const LIST_TABLES: &str = r#"
        SELECT CONVERT(TABLE_NAME USING utf8) AS table_name
        FROM information_schema.TABLES
        WHERE TABLE_SCHEMA = DATABASE()
    "#;

    /// Column name and declared type for one table. Yields zero rows for a
    /// table that does not exist.
    pub const TABLE_COLUMNS: &str = r#"
        SELECT
            CONVERT(COLUMN_NAME USING utf8) AS column_name,
            CONVERT(DATA_TYPE USING utf8) AS data_type
        FROM information_schema.COLUMNS
        WHERE TABLE_NAME = ? AND TABLE_SCHEMA = DATABASE()
        ORDER BY ORDINAL_POSITION
    "#;
}

/// List all table names in the current database.
pub async fn list_tables(conn: &mut MySqlConnection) -> ServerResult<Vec<String>> {
    let tables = sqlx::query_scalar::<_, String>(sql::LIST_TABLES)
        .fetch_all(&mut *conn)
        .await?;
    Ok(tables)
}

/// Fetch the column schema of one table. A nonexistent table yields an
/// empty list; "no such table" and "table with no columns" are not
/// distinguished.
pub async fn table_columns(
    conn: &mut MySqlConnection,
    table: &str,
) -> ServerResult<Vec<ColumnSchema>> {
    let rows = sqlx::query(sql::TABLE_COLUMNS)
        .bind(table)
        .fetch_all(&mut *conn)
        .await?;

    rows.iter()
        .map(|row| {
            Ok(ColumnSchema {
                column_name: row.try_get("column_name")?,
                data_type: row.try_get("data_type")?,
            })
        })
        .collect()
}
