//! MCP tool implementations.
//!
//! This server exposes exactly one tool:
//! - `query`: execute a SQL statement against the connected database

pub mod query;

pub use query::{QueryInput, QueryToolHandler, TOOL_NAME};
