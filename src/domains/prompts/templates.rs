//! Prompt templates module.
//!
//! This module contains the PromptTemplate struct and the small rendering
//! engine used by every prompt.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;

const IF_OPEN: &str = "{{#if ";
const ELSE_TAG: &str = "{{else}}";
const ENDIF_TAG: &str = "{{/if}}";

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// The template string with placeholders.
    /// Uses a simple {{variable}} syntax for substitution.
    pub template: String,
}

impl PromptTemplate {
    /// Create a new prompt template.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<PromptArgument>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            arguments,
            template: template.into(),
        }
    }

    /// Names of the arguments marked as required.
    pub fn required_arguments(&self) -> impl Iterator<Item = &str> {
        self.arguments
            .iter()
            .filter(|arg| arg.required.unwrap_or(false))
            .map(|arg| arg.name.as_str())
    }

    /// Render the template with the given arguments.
    ///
    /// - `{{variable}}` is replaced with the value of `variable`
    /// - `{{#if variable}}content{{/if}}` includes content only if variable is set
    /// - `{{#if variable}}content{{else}}alternative{{/if}}` with else support
    ///
    /// An empty value counts as unset. Conditionals do not nest.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let mut result = Self::process_conditionals(&self.template, arguments)
            .map_err(|message| PromptError::template(&self.name, message))?;

        for (key, value) in arguments {
            let placeholder = format!("{{{{{}}}}}", key);
            result = result.replace(&placeholder, value);
        }

        Ok(Self::clean_unmatched_placeholders(&result))
    }

    fn process_conditionals(
        template: &str,
        arguments: &HashMap<String, String>,
    ) -> Result<String, &'static str> {
        let mut result = template.to_string();

        while let Some(if_start) = result.find(IF_OPEN) {
            let var_end = result[if_start..]
                .find("}}")
                .map(|pos| if_start + pos)
                .ok_or("Unclosed {{#if}} tag")?;
            let var_name = result[if_start + IF_OPEN.len()..var_end].trim();

            let endif_pos = result[var_end..]
                .find(ENDIF_TAG)
                .map(|pos| var_end + pos)
                .ok_or("Missing {{/if}} tag")?;

            let block = &result[var_end + 2..endif_pos];
            let (when_set, when_unset) = match block.find(ELSE_TAG) {
                Some(else_pos) => (&block[..else_pos], &block[else_pos + ELSE_TAG.len()..]),
                None => (block, ""),
            };

            let is_set = arguments.get(var_name).is_some_and(|v| !v.is_empty());
            let replacement = if is_set { when_set } else { when_unset };

            result = format!(
                "{}{}{}",
                &result[..if_start],
                replacement,
                &result[endif_pos + ENDIF_TAG.len()..]
            );
        }

        Ok(result)
    }

    /// Remove placeholders of arguments that were not supplied.
    fn clean_unmatched_placeholders(template: &str) -> String {
        let mut result = template.to_string();
        let mut start = 0;

        while let Some(pos) = result[start..].find("{{") {
            let abs_pos = start + pos;
            if let Some(end_pos) = result[abs_pos..].find("}}") {
                let end_abs = abs_pos + end_pos + 2;
                let placeholder = &result[abs_pos..end_abs];

                if !placeholder.contains('#') && !placeholder.contains('/') {
                    result = format!("{}{}", &result[..abs_pos], &result[end_abs..]);
                    continue;
                }
            }
            start = abs_pos + 2;
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_simple_substitution() {
        let template = PromptTemplate::new("test", None, vec![], "Inspect job {{job_id}}.");
        let result = template.render(&args(&[("job_id", "42")])).unwrap();
        assert_eq!(result, "Inspect job 42.");
    }

    #[test]
    fn test_conditional_with_value() {
        let template = PromptTemplate::new(
            "test",
            None,
            vec![],
            "Explore{{#if catalog}} catalog {{catalog}}{{/if}}.",
        );
        let result = template.render(&args(&[("catalog", "main")])).unwrap();
        assert_eq!(result, "Explore catalog main.");
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let template = PromptTemplate::new(
            "test",
            None,
            vec![],
            "Explore{{#if catalog}} catalog {{catalog}}{{/if}}.",
        );
        let result = template.render(&args(&[("catalog", "")])).unwrap();
        assert_eq!(result, "Explore.");
    }

    #[test]
    fn test_conditional_with_else() {
        let template = PromptTemplate::new(
            "test",
            None,
            vec![],
            "Version {{#if version}}{{version}}{{else}}1{{/if}}, again {{#if version}}{{version}}{{else}}1{{/if}}",
        );
        let result = template.render(&HashMap::new()).unwrap();
        assert_eq!(result, "Version 1, again 1");
    }

    #[test]
    fn test_unmatched_placeholder_removed() {
        let template = PromptTemplate::new("test", None, vec![], "a{{missing}}b");
        assert_eq!(template.render(&HashMap::new()).unwrap(), "ab");
    }

    #[test]
    fn test_unclosed_conditional_is_an_error() {
        let template = PromptTemplate::new("test", None, vec![], "{{#if x}}never closed");
        assert!(matches!(
            template.render(&HashMap::new()),
            Err(PromptError::Template { .. })
        ));
    }
}
