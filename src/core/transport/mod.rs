//! How MCP clients reach the Databricks tools.
//!
//! `MCP_TRANSPORT` selects one of three transports, each behind a feature:
//!
//! | Transport | Feature | Settings |
//! |---|---|---|
//! | STDIO (default) | `stdio` | none |
//! | TCP, one MCP session per connection | `tcp` | `MCP_TCP_HOST`, `MCP_TCP_PORT` |
//! | JSON-RPC over HTTP POST | `http` | `MCP_HTTP_HOST`, `MCP_HTTP_PORT`, `MCP_HTTP_PATH`, `MCP_HTTP_CORS` |
//!
//! All of them serve the same composed [`McpServer`](crate::core::McpServer).

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
