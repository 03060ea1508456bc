//! Remote failure types.

use thiserror::Error;

/// Errors reported by the remote platform or by the client itself.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// The API answered with a non-success status.
    #[error("{}", render_api(.status, .error_code, .message))]
    Api {
        status: u16,
        error_code: Option<String>,
        message: String,
    },

    /// The request never produced an API answer (DNS, TLS, timeout...).
    #[error("TransportError: {0}")]
    Transport(String),

    /// The client could not be constructed from the configuration.
    #[error("ConfigError: {0}")]
    Config(String),

    /// The response body was not valid JSON.
    #[error("DecodeError: {0}")]
    Decode(String),
}

fn render_api(status: &u16, error_code: &Option<String>, message: &str) -> String {
    match error_code {
        Some(code) => format!("ApiError: [{}] {}", code, message),
        None => format!("ApiError: [HTTP {}] {}", status, message),
    }
}

impl RemoteError {
    /// Create an API error.
    pub fn api(status: u16, error_code: Option<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            error_code,
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// The Databricks error code, when the API supplied one.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Api { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    /// Whether the remote side reported that the target already exists.
    pub fn is_already_exists(&self) -> bool {
        match self {
            Self::Api {
                error_code,
                message,
                ..
            } => {
                error_code.as_deref() == Some("RESOURCE_ALREADY_EXISTS")
                    || message.to_lowercase().contains("already exists")
            }
            _ => false,
        }
    }
}
