//! Databricks MCP Server Library
//!
//! A Model Context Protocol server exposing Databricks workspace services
//! (Unity Catalog, SQL, jobs, compute, serving and more) as tool modules
//! that can be selectively loaded.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the composed server and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **client**: The REST boundary to the workspace
//!   - **tools**: Module catalog, filter and tool registry
//!   - **workflows**: Composite tools with three-way status
//!   - **guide**: Module recommendations by task and role
//!   - **resources**: Workspace info and tool guide documents
//!   - **prompts**: Multi-step guidance templates
//!
//! # Example
//!
//! ```rust,no_run
//! use databricks_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
