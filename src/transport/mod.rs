//! Transport layer for the MCP server.
//!
//! The server speaks the MCP protocol over standard input/output, the
//! standard mode for CLI-based MCP integrations.

pub mod stdio;

pub use stdio::StdioTransport;
