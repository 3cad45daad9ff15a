//! MCP service implementation using rmcp.
//!
//! `MySqlService` is the protocol router: it binds the four operations this
//! server supports (list resources, read resource, list tools, call tool)
//! to the resource catalog and the query tool. Each request is handled
//! independently; the shared connection pool is the only state that outlives
//! a request.

use crate::db::ConnectionPool;
use crate::error::ServerError;
use crate::resources::{ResourceCatalog, SCHEMA_MIME_TYPE, resource_base};
use crate::tools::query::{QueryInput, QueryToolHandler, TOOL_NAME};
use rmcp::model::{
    AnnotateAble, CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject,
    ListResourcesResult, ListToolsResult, PaginatedRequestParam, ProtocolVersion, RawResource,
    ReadResourceRequestParam, ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData as McpError, ServerHandler};
use std::sync::Arc;
use url::Url;

pub struct MySqlService {
    /// Resource catalog for schema listing and reads
    catalog: ResourceCatalog,
    /// Handler for the single `query` tool
    query_tool: QueryToolHandler,
}

impl MySqlService {
    /// Create a new service over the shared pool.
    ///
    /// `database_url` is only used to derive the resource base; the
    /// password is stripped before any identifier is composed from it.
    pub fn new(pool: Arc<ConnectionPool>, database_url: &Url) -> Self {
        let base = resource_base(database_url);
        Self {
            catalog: ResourceCatalog::new(pool.clone(), base),
            query_tool: QueryToolHandler::new(pool),
        }
    }

    /// Dispatch a tool call by name.
    ///
    /// Only `query` exists; any other name fails before any database access.
    /// A statement the database rejects comes back as a failed tool result
    /// carrying the database's own message, not as a protocol error, so the
    /// client can see the diagnostic.
    pub async fn run_tool(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        if name != TOOL_NAME {
            return Err(ServerError::unknown_tool(name).into());
        }

        let arguments = arguments.unwrap_or_default();
        let input: QueryInput = serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| {
                McpError::invalid_params(format!("Invalid {} arguments: {}", TOOL_NAME, e), None)
            })?;

        match self.query_tool.invoke(input).await {
            Ok(result) => {
                let text = serde_json::to_string_pretty(&result).map_err(|e| {
                    McpError::internal_error(format!("Failed to serialize result: {}", e), None)
                })?;
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(err @ ServerError::QueryExecution { .. }) => {
                Ok(CallToolResult::error(vec![Content::text(err.to_string())]))
            }
            Err(err) => Err(err.into()),
        }
    }
}

impl ServerHandler for MySqlService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation {
                name: "mysql-mcp-server".to_owned(),
                title: Some("MySQL MCP Server".to_owned()),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "MySQL database access.\n\
                \n\
                ## Resources\n\
                One resource per table in the connected database. Reading a\n\
                resource returns the table's columns as JSON objects with\n\
                `column_name` and `data_type`.\n\
                \n\
                ## Tools\n\
                - `query`: run a SQL statement. Results come back as JSON\n\
                  rows keyed by column name."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = self.catalog.list().await?;
        let base = self.catalog.base();
        let resources = resources
            .iter()
            .map(|resource| {
                let mut raw = RawResource::new(resource.uri(base), resource.display_name());
                raw.mime_type = Some(SCHEMA_MIME_TYPE.to_string());
                raw.no_annotation()
            })
            .collect();
        Ok(ListResourcesResult {
            meta: None,
            resources,
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let columns = self.catalog.read(&request.uri).await?;
        let text = serde_json::to_string_pretty(&columns).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize schema: {}", e), None)
        })?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: request.uri,
                mime_type: Some(SCHEMA_MIME_TYPE.to_string()),
                text,
                meta: None,
            }],
        })
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            meta: None,
            tools: vec![QueryToolHandler::declaration()],
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.run_tool(&request.name, request.arguments).await
    }
}
