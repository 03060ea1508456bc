//! Prompt service implementation.
//!
//! The PromptService lists the registered prompts and renders them with
//! the caller's arguments.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::HashMap;
use tracing::{debug, info};

use super::error::PromptError;
use super::registry::get_all_prompts;
use super::templates::PromptTemplate;

/// Service for listing and instantiating prompts.
pub struct PromptService {
    /// Registered prompts in listing order.
    prompts: Vec<PromptTemplate>,
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptService {
    /// Create a new PromptService with every registered prompt.
    pub fn new() -> Self {
        info!("Initializing PromptService");
        let prompts = get_all_prompts();
        for template in &prompts {
            debug!("Registering prompt: {}", template.name);
        }
        Self { prompts }
    }

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .iter()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Get a prompt with arguments substituted.
    ///
    /// A required argument that is absent or blank is an error.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self
            .prompts
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| PromptError::not_found(name))?;

        let arguments = arguments.unwrap_or_default();

        for required in template.required_arguments() {
            if arguments.get(required).is_none_or(|v| v.trim().is_empty()) {
                return Err(PromptError::missing_argument(name, required));
            }
        }

        let content = template.render(&arguments)?;

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}
