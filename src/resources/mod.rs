//! Schema resources exposed to MCP clients.
//!
//! Each table in the connected database is one addressable resource whose
//! content is the table's column schema.

pub mod catalog;
pub mod uri;

pub use catalog::ResourceCatalog;
pub use uri::{SCHEMA_MIME_TYPE, SCHEMA_SUFFIX, SchemaResource, resource_base};
