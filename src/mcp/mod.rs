//! MCP server integration module.
//!
//! Binds the protocol's resource and tool operations to the catalog and the
//! query tool via the rmcp framework.

pub mod service;

pub use service::MySqlService;
