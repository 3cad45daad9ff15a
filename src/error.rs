//! Error types for the MySQL MCP Server.
//!
//! All failures surfaced to the protocol client fall into one of four kinds:
//! the pool could not supply a connection, a resource URI did not parse, a
//! tool name was not recognized, or the database rejected the submitted SQL.
//! Driver diagnostics are carried verbatim; nothing is retried internally.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Connection failed: {message}")]
    Connection { message: String },

    #[error("Invalid resource URI: {uri}")]
    InvalidResource { uri: String },

    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Database error: {message}")]
    QueryExecution {
        message: String,
        /// e.g., "42S02" for an unknown table
        sql_state: Option<String>,
    },
}

impl ServerError {
    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create an invalid resource error for the given URI.
    pub fn invalid_resource(uri: impl Into<String>) -> Self {
        Self::InvalidResource { uri: uri.into() }
    }

    /// Create an unknown tool error.
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    /// Create a query execution error with an optional SQLSTATE code.
    pub fn query_execution(message: impl Into<String>, sql_state: Option<String>) -> Self {
        Self::QueryExecution {
            message: message.into(),
            sql_state,
        }
    }
}

/// Convert sqlx errors to ServerError.
///
/// Failures to reach or authenticate with the server become `Connection`;
/// everything the database itself reports about a statement becomes
/// `QueryExecution` with the driver's message untouched.
impl From<sqlx::Error> for ServerError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(msg) => ServerError::connection(msg.to_string()),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().map(|c| c.to_string());
                ServerError::query_execution(db_err.message(), code)
            }
            sqlx::Error::PoolTimedOut => {
                ServerError::connection("Timed out waiting for a pooled connection")
            }
            sqlx::Error::PoolClosed => ServerError::connection("Connection pool is closed"),
            sqlx::Error::Io(io_err) => ServerError::connection(format!("I/O error: {}", io_err)),
            sqlx::Error::Tls(tls_err) => {
                ServerError::connection(format!("TLS error: {}", tls_err))
            }
            sqlx::Error::Protocol(msg) => {
                ServerError::connection(format!("Protocol error: {}", msg))
            }
            other => ServerError::query_execution(other.to_string(), None),
        }
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Convert ServerError to MCP ErrorData for the JSON-RPC boundary.
impl From<ServerError> for rmcp::ErrorData {
    fn from(err: ServerError) -> Self {
        match &err {
            // Malformed request input -> invalid_params
            ServerError::InvalidResource { .. } => {
                rmcp::ErrorData::invalid_params(err.to_string(), None)
            }
            ServerError::UnknownTool { .. } => {
                rmcp::ErrorData::invalid_params(err.to_string(), None)
            }

            // Infrastructure failures -> internal_error
            ServerError::Connection { .. } => {
                rmcp::ErrorData::internal_error(err.to_string(), None)
            }

            // Database diagnostics pass through, with the SQLSTATE when known
            ServerError::QueryExecution { message, sql_state } => {
                let msg = match sql_state {
                    Some(code) => format!("{} (SQLSTATE: {})", message, code),
                    None => message.clone(),
                };
                rmcp::ErrorData::internal_error(msg, None)
            }
        }
    }
}
