//! Prompt Registry - central registration of all prompts.
//!
//! When adding a new prompt:
//! 1. Create the prompt file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_prompts()` and `prompt_names()`

use super::definitions::{
    DebugFailingJobPrompt, DeployModelPrompt, ExploreDataCatalogPrompt, ManagePermissionsPrompt,
    PromptDefinition, QueryDataPrompt, SetupDataPipelinePrompt, SetupMlExperimentPrompt,
    WorkspaceHealthCheckPrompt,
};
use super::templates::PromptTemplate;

/// Build a PromptTemplate from a PromptDefinition.
fn build_template<P: PromptDefinition>() -> PromptTemplate {
    PromptTemplate::new(
        P::NAME,
        Some(P::DESCRIPTION.to_string()),
        P::arguments(),
        P::template(),
    )
}

/// Get all registered prompts as PromptTemplates, in listing order.
pub fn get_all_prompts() -> Vec<PromptTemplate> {
    vec![
        build_template::<ExploreDataCatalogPrompt>(),
        build_template::<DebugFailingJobPrompt>(),
        build_template::<SetupMlExperimentPrompt>(),
        build_template::<DeployModelPrompt>(),
        build_template::<SetupDataPipelinePrompt>(),
        build_template::<WorkspaceHealthCheckPrompt>(),
        build_template::<QueryDataPrompt>(),
        build_template::<ManagePermissionsPrompt>(),
    ]
}

/// Get the list of all prompt names.
pub fn prompt_names() -> Vec<&'static str> {
    vec![
        ExploreDataCatalogPrompt::NAME,
        DebugFailingJobPrompt::NAME,
        SetupMlExperimentPrompt::NAME,
        DeployModelPrompt::NAME,
        SetupDataPipelinePrompt::NAME,
        WorkspaceHealthCheckPrompt::NAME,
        QueryDataPrompt::NAME,
        ManagePermissionsPrompt::NAME,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::guide::GUIDE_TOOL;
    use crate::domains::tools::Catalog;
    use std::collections::BTreeSet;

    fn placeholders(template: &str) -> BTreeSet<String> {
        template
            .split("{{")
            .skip(1)
            .filter_map(|rest| rest.split_once("}}").map(|(inner, _)| inner))
            .filter_map(|inner| match inner.trim() {
                "else" | "/if" => None,
                tag => Some(tag.trim_start_matches("#if ").trim().to_string()),
            })
            .collect()
    }

    #[test]
    fn test_get_all_prompts() {
        let prompts = get_all_prompts();
        let names: Vec<_> = prompts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, prompt_names());
        assert_eq!(names.len(), 8);
    }

    #[test]
    fn test_argument_lists() {
        let required = |name: &str| -> Vec<String> {
            get_all_prompts()
                .into_iter()
                .find(|p| p.name == name)
                .unwrap()
                .required_arguments()
                .map(str::to_string)
                .collect()
        };
        assert_eq!(required("debug_failing_job"), vec!["job_id"]);
        assert_eq!(required("manage_permissions"), vec!["object_type", "object_name"]);
        assert!(required("explore_data_catalog").is_empty());
        assert!(required("workspace_health_check").is_empty());
    }

    #[test]
    fn test_placeholders_are_declared_arguments() {
        for prompt in get_all_prompts() {
            let declared: BTreeSet<String> =
                prompt.arguments.iter().map(|a| a.name.clone()).collect();
            let used = placeholders(&prompt.template);
            assert!(used.is_subset(&declared), "{}: {:?}", prompt.name, used);
        }
    }

    #[test]
    fn test_templates_reference_existing_tools() {
        let catalog = Catalog::standard().unwrap();
        let mut tools: BTreeSet<&str> = catalog
            .modules()
            .iter()
            .flat_map(|m| m.entries())
            .map(|e| e.name())
            .collect();
        tools.insert(GUIDE_TOOL);

        for prompt in get_all_prompts() {
            for word in prompt
                .template
                .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .filter(|w| w.starts_with("databricks_"))
            {
                assert!(tools.contains(word), "{} mentions unknown tool {}", prompt.name, word);
            }
        }
    }
}
