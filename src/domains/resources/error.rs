//! Resource-specific error types.

use thiserror::Error;

/// Errors returned when reading a resource.
///
/// Remote failures are not in this list: the workspace info resource
/// reports them inside its content.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource is registered under this URI.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The resource document could not be rendered.
    #[error("Failed to render {uri}: {source}")]
    Render {
        uri: String,
        #[source]
        source: serde_json::Error,
    },

    /// The blocking task producing the content did not complete.
    #[error("Reading {uri} was aborted: {reason}")]
    Aborted { uri: String, reason: String },
}

impl ResourceError {
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    pub fn render(uri: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Render {
            uri: uri.into(),
            source,
        }
    }

    pub fn aborted(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Aborted {
            uri: uri.into(),
            reason: reason.into(),
        }
    }
}
