//! MySQL MCP Server Library
//!
//! This library exposes a MySQL database over the MCP (Model Context
//! Protocol): one resource per table carrying its column schema, and a
//! `query` tool for executing SQL against the connected database.

pub mod config;
pub mod db;
pub mod error;
pub mod mcp;
pub mod models;
pub mod resources;
pub mod tools;
pub mod transport;

pub use config::Config;
pub use error::ServerError;
pub use mcp::MySqlService;
