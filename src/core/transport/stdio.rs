//! STDIO transport implementation.
//!
//! The default mode: one MCP session over stdin/stdout. Logs go to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve a single session until the client closes stdin.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let tools = server.registry().tool_names().len();
        info!("Ready - {} tools available via stdin/stdout", tools);

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::handshake(e))?;

        service
            .waiting()
            .await
            .map_err(|e| TransportError::stopped("STDIO", e))?;

        info!("STDIO session closed");
        Ok(())
    }
}
