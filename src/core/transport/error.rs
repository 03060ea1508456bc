//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that stop a transport. A failed tool call is never one of these.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The client went away or misbehaved before the MCP handshake finished.
    #[error("MCP handshake failed: {0}")]
    Handshake(String),

    /// A running session or listener stopped with an error.
    #[error("{transport} transport stopped: {reason}")]
    Stopped {
        transport: &'static str,
        reason: String,
    },
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }

    pub fn handshake(reason: impl ToString) -> Self {
        Self::Handshake(reason.to_string())
    }

    pub fn stopped(transport: &'static str, reason: impl ToString) -> Self {
        Self::Stopped {
            transport,
            reason: reason.to_string(),
        }
    }
}
