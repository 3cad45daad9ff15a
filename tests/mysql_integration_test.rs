//! Integration tests against a live MySQL database.
//!
//! Set the TEST_MYSQL_URL environment variable (for example
//! `mysql://root:pw@localhost:3306/mcp_test`) to run these tests; they skip
//! otherwise. The named database is used as scratch space.

use mysql_mcp_server::config::PoolSettings;
use mysql_mcp_server::db::ConnectionPool;
use mysql_mcp_server::mcp::MySqlService;
use mysql_mcp_server::models::ColumnSchema;
use mysql_mcp_server::resources::{ResourceCatalog, SchemaResource, resource_base};
use mysql_mcp_server::tools::query::{QueryInput, QueryToolHandler};
use serde_json::json;
use std::sync::Arc;
use url::Url;

async fn connect() -> Option<(Arc<ConnectionPool>, Url)> {
    let mysql_url = match std::env::var("TEST_MYSQL_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: TEST_MYSQL_URL not set");
            return None;
        }
    };

    let url = Url::parse(&mysql_url).expect("TEST_MYSQL_URL must be a valid URL");
    let settings = PoolSettings::parse(&mysql_url).expect("TEST_MYSQL_URL must be a MySQL URL");
    let pool = ConnectionPool::connect(&settings)
        .await
        .expect("failed to connect to TEST_MYSQL_URL");
    Some((Arc::new(pool), url))
}

async fn run_sql(pool: &Arc<ConnectionPool>, sql: &str) {
    let handler = QueryToolHandler::new(pool.clone());
    handler
        .invoke(QueryInput {
            sql: sql.to_string(),
        })
        .await
        .unwrap_or_else(|e| panic!("statement failed: {sql}: {e}"));
}

#[tokio::test]
async fn test_schema_resources_scenario() {
    let Some((pool, url)) = connect().await else {
        return;
    };

    run_sql(&pool, "DROP TABLE IF EXISTS users").await;
    run_sql(&pool, "DROP TABLE IF EXISTS orders").await;
    run_sql(&pool, "CREATE TABLE users (id INT, name VARCHAR(100))").await;
    run_sql(&pool, "CREATE TABLE orders (id INT, total DECIMAL(10,2))").await;

    let catalog = ResourceCatalog::new(pool.clone(), resource_base(&url));

    // Exactly one identifier per table, no duplicates, no order assumed
    let resources = catalog.list().await.unwrap();
    for table in ["users", "orders"] {
        let matching = resources.iter().filter(|r| r.table == table).count();
        assert_eq!(matching, 1, "expected exactly one resource for {table}");
    }

    // Round-trip: the listed identifier parses back to the same table
    let orders = resources.iter().find(|r| r.table == "orders").unwrap();
    let orders_uri = orders.uri(catalog.base());
    assert!(orders_uri.ends_with("/orders/schema"));
    assert_eq!(SchemaResource::parse(&orders_uri).unwrap().table, "orders");

    // Reading a listed identifier returns one descriptor per column,
    // set-equal against the declared schema
    let users_uri = resources
        .iter()
        .find(|r| r.table == "users")
        .unwrap()
        .uri(catalog.base());
    let mut columns = catalog.read(&users_uri).await.unwrap();
    columns.sort_by(|a, b| a.column_name.cmp(&b.column_name));
    assert_eq!(
        columns,
        vec![
            ColumnSchema {
                column_name: "id".to_string(),
                data_type: "int".to_string(),
            },
            ColumnSchema {
                column_name: "name".to_string(),
                data_type: "varchar".to_string(),
            },
        ]
    );

    run_sql(&pool, "DROP TABLE users").await;
    run_sql(&pool, "DROP TABLE orders").await;
}

#[tokio::test]
async fn test_read_nonexistent_table_returns_empty() {
    let Some((pool, url)) = connect().await else {
        return;
    };

    let catalog = ResourceCatalog::new(pool.clone(), resource_base(&url));
    let uri = SchemaResource::new("table_that_does_not_exist_xyz").uri(catalog.base());

    let columns = catalog.read(&uri).await.unwrap();
    assert!(columns.is_empty());
}

#[tokio::test]
async fn test_query_tool_select() {
    let Some((pool, url)) = connect().await else {
        return;
    };

    let service = MySqlService::new(pool, &url);
    let result = service
        .run_tool("query", Some(object(json!({"sql": "SELECT 1 AS x"}))))
        .await
        .unwrap();

    // Assert on the wire shape: one text content block, no error flag
    let value = serde_json::to_value(&result).unwrap();
    assert_ne!(value["isError"], json!(true));
    let text = value["content"][0]["text"].as_str().unwrap();
    let payload: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(payload["rows"][0]["x"], json!(1));
    assert_eq!(payload["row_count"], json!(1));
}

#[tokio::test]
async fn test_failing_statement_does_not_leak_connections() {
    let Some((pool, url)) = connect().await else {
        return;
    };

    let service = MySqlService::new(pool, &url);

    // More failures than the pool has slots; a leaked connection per
    // failure would exhaust the pool before the loop ends
    for _ in 0..12 {
        let result = service
            .run_tool(
                "query",
                Some(object(json!({"sql": "DROP TABLE nonexistent_table_xyz"}))),
            )
            .await
            .unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["isError"], json!(true));
        let text = value["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("nonexistent_table_xyz"));
    }

    // The pool still serves an unrelated query
    let result = service
        .run_tool("query", Some(object(json!({"sql": "SELECT 2 AS y"}))))
        .await
        .unwrap();
    let value = serde_json::to_value(&result).unwrap();
    let text = value["content"][0]["text"].as_str().unwrap();
    let payload: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(payload["rows"][0]["y"], json!(2));
}

#[tokio::test]
async fn test_unknown_tool_is_rejected() {
    let Some((pool, url)) = connect().await else {
        return;
    };

    let service = MySqlService::new(pool, &url);
    let err = service
        .run_tool("drop_everything", Some(object(json!({"sql": "SELECT 1"}))))
        .await
        .unwrap_err();
    assert!(err.message.contains("Unknown tool"));
}

fn object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    value.as_object().cloned().expect("expected a JSON object")
}
