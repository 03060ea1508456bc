//! Databricks MCP server entry point.
//!
//! Loads configuration, initializes logging, composes the tool set and runs
//! the configured transport. A composition error exits before any transport
//! is opened.

use anyhow::{Context, Result};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use databricks_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config.clone()).context("failed to compose the tool set")?;

    info!("Server initialized");

    TransportService::new(config.transport).run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Logs go to stderr: stdout carries the protocol in STDIO mode.
///
/// `RUST_LOG` wins over `MCP_LOG_LEVEL` when both are set.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.as_str()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
