//! Tool-specific error types.

use thiserror::Error;

use crate::domains::client::RemoteError;

/// Errors that can occur while invoking a single tool.
///
/// None of these ever escape the tool-call boundary as a process failure:
/// the registry turns them into a `Failure` outcome, except `NotFound` which
/// is reported to the caller as a protocol-level error.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool is not registered in this process.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The remote platform rejected or failed the call.
    #[error("{0}")]
    Remote(#[from] RemoteError),

    /// The tool ran but could not produce a result.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Fatal errors raised while composing the tool set at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    /// Include and exclude lists were both configured.
    #[error(
        "DATABRICKS_MCP_TOOLS_INCLUDE ({}) and DATABRICKS_MCP_TOOLS_EXCLUDE ({}) are mutually exclusive; set only one",
        .include.join(","),
        .exclude.join(",")
    )]
    ConfigConflict {
        include: Vec<String>,
        exclude: Vec<String>,
    },

    /// Configuration or a role preset names modules missing from the catalog.
    #[error("Unknown tool module(s): {}", .names.join(", "))]
    UnknownModule { names: Vec<String> },

    /// Two entries claim the same qualified tool name.
    #[error("Tool name '{name}' registered by both '{first_module}' and '{second_module}'")]
    NameCollision {
        name: String,
        first_module: String,
        second_module: String,
    },

    /// The same module name appears twice in the catalog.
    #[error("Duplicate tool module: {0}")]
    DuplicateModule(String),
}
