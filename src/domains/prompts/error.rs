//! Prompt-specific error types.

use thiserror::Error;

/// Errors that can occur while rendering a prompt.
#[derive(Debug, Error)]
pub enum PromptError {
    /// No prompt is registered under this name.
    #[error("Prompt not found: {0}")]
    NotFound(String),

    /// A required argument is absent or blank.
    #[error("Prompt '{prompt}' requires argument '{argument}'")]
    MissingArgument { prompt: String, argument: String },

    /// The template itself is malformed.
    #[error("Template error in '{prompt}': {message}")]
    Template { prompt: String, message: String },
}

impl PromptError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn missing_argument(prompt: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            prompt: prompt.into(),
            argument: argument.into(),
        }
    }

    pub fn template(prompt: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Template {
            prompt: prompt.into(),
            message: message.into(),
        }
    }
}
