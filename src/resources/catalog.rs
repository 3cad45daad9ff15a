//! Resource catalog.
//!
//! Enumerates one schema resource per table in the connected database and
//! renders a table's column metadata on read. Each operation checks out one
//! pooled connection and returns it before its result propagates.

use crate::db::{ConnectionPool, schema};
use crate::error::ServerResult;
use crate::models::ColumnSchema;
use crate::resources::uri::SchemaResource;
use std::sync::Arc;
use tracing::debug;
use url::Url;

pub struct ResourceCatalog {
    pool: Arc<ConnectionPool>,
    base: Url,
}

impl ResourceCatalog {
    /// Create a catalog over the shared pool.
    ///
    /// `base` must already be password-stripped (see
    /// [`crate::resources::uri::resource_base`]).
    pub fn new(pool: Arc<ConnectionPool>, base: Url) -> Self {
        Self { pool, base }
    }

    /// Base URL identifiers are composed under.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// One schema resource per table visible in the current database.
    pub async fn list(&self) -> ServerResult<Vec<SchemaResource>> {
        let mut conn = self.pool.acquire().await?;
        let tables = schema::list_tables(&mut conn).await;
        drop(conn);

        let tables = tables?;
        debug!(count = tables.len(), "Listed schema resources");
        Ok(tables.into_iter().map(SchemaResource::new).collect())
    }

    /// Read the column schema the given identifier points at.
    ///
    /// The identifier is parsed before any connection is acquired, so a
    /// malformed URI costs no database round trip. A well-formed identifier
    /// naming a table that does not exist yields an empty column list.
    pub async fn read(&self, uri: &str) -> ServerResult<Vec<ColumnSchema>> {
        let resource = SchemaResource::parse(uri)?;

        let mut conn = self.pool.acquire().await?;
        let columns = schema::table_columns(&mut conn, &resource.table).await;
        drop(conn);

        columns
    }
}
