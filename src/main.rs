//! MySQL MCP Server - Main entry point.
//!
//! Exposes one MySQL database over MCP: table schemas as resources and a
//! `query` tool for SQL execution.

use clap::Parser;
use mysql_mcp_server::config::Config;
use mysql_mcp_server::db::ConnectionPool;
use mysql_mcp_server::transport::StdioTransport;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use url::Url;

/// Initialize the tracing subscriber for logging.
///
/// Everything goes to stderr; stdout belongs to the protocol.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    init_tracing(&config);

    // Parse the connection string once; everything downstream uses the
    // parsed settings or the password-stripped URL.
    let settings = config.pool_settings()?;
    let database_url = Url::parse(&config.database_url)?;

    info!(
        settings = ?settings,
        "Starting MySQL MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Pool construction is the one fatal failure: without a working pool
    // the server must not start accepting requests.
    let pool = match ConnectionPool::connect(&settings).await {
        Ok(pool) => Arc::new(pool),
        Err(e) => {
            error!(error = %e, "Failed to create connection pool");
            return Err(e.into());
        }
    };

    let transport = StdioTransport::new(pool, database_url);
    if let Err(e) = transport.run().await {
        error!(error = %e, "Server error");
        return Err(e.into());
    }

    info!("Server shutdown complete");
    Ok(())
}
