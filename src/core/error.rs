//! Error types and handling for the MCP server.
//!
//! Startup failures (configuration, catalog integrity, transport) surface
//! through [`Error`]. Failures inside a single tool invocation never do:
//! they are turned into a failure outcome by the tool registry.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The tool set could not be composed; the server must not start.
    #[error("Tool composition failed: {0}")]
    Composition(#[from] crate::domains::tools::CompositionError),

    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] crate::domains::resources::ResourceError),

    /// Error originating from the prompts domain.
    #[error("Prompt error: {0}")]
    Prompt(#[from] crate::domains::prompts::PromptError),

    /// The transport failed to start or stopped with an error.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::CompositionError;

    #[test]
    fn test_composition_error_names_offending_modules() {
        let err: Error = CompositionError::UnknownModule {
            names: vec!["sqll".to_string()],
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Tool composition failed: Unknown tool module(s): sqll"
        );
    }
}
