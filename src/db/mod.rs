//! Database access layer.
//!
//! This module provides:
//! - Connection pool management
//! - Statement execution
//! - Schema introspection via information_schema
//! - Dynamic row-to-JSON type mappings

pub mod executor;
pub mod pool;
pub mod schema;
pub mod types;

pub use pool::ConnectionPool;
pub use types::RowToJson;
