//! Stdio transport for the MCP server.
//!
//! Reads JSON-RPC messages from stdin, writes responses to stdout, and keeps
//! the process alive for the length of the session.

use crate::db::ConnectionPool;
use crate::error::{ServerError, ServerResult};
use crate::mcp::MySqlService;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use url::Url;

pub struct StdioTransport {
    pool: Arc<ConnectionPool>,
    database_url: Url,
}

impl StdioTransport {
    pub fn new(pool: Arc<ConnectionPool>, database_url: Url) -> Self {
        Self { pool, database_url }
    }

    /// Serve requests until the client disconnects or a shutdown signal
    /// arrives, then close the pool.
    pub async fn run(&self) -> ServerResult<()> {
        info!("Starting MCP server with stdio transport");

        let service = MySqlService::new(self.pool.clone(), &self.database_url);

        let running_service = service.serve(stdio()).await.map_err(|e| {
            ServerError::connection(format!("Failed to start stdio transport: {}", e))
        })?;

        let shutdown_requested = tokio::select! {
            result = running_service.waiting() => {
                match result {
                    Ok(_quit_reason) => {
                        info!("Stdio transport completed normally");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Stdio transport error");
                        return Err(ServerError::connection(format!(
                            "Stdio transport error: {}",
                            e
                        )));
                    }
                }
                false
            }
            _ = wait_for_signal() => {
                info!("Shutdown signal received (send again to force exit)");
                true
            }
        };

        if shutdown_requested {
            // A second signal forces an immediate exit
            tokio::spawn(async {
                wait_for_signal().await;
                tracing::warn!("Received second signal, forcing immediate exit");
                std::process::exit(1);
            });
        }

        self.pool.close().await;

        if shutdown_requested {
            // tokio::select! cannot interrupt blocking stdin reads, so exit
            // instead of waiting on a read that may never return
            info!("Exiting process");
            std::process::exit(0);
        }

        Ok(())
    }
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn wait_for_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }
}
