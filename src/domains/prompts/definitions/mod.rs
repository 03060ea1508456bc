//! Prompt definitions module.
//!
//! Each prompt is defined in its own file with its metadata, arguments and
//! template. Templates name real tools so a client can follow them step by
//! step.
//!
//! ## Adding a New Prompt
//!
//! 1. Create a new file (e.g., `my_prompt.rs`)
//! 2. Implement the `PromptDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

mod debug_failing_job;
mod deploy_model;
mod explore_data_catalog;
mod manage_permissions;
mod query_data;
mod setup_data_pipeline;
mod setup_ml_experiment;
mod workspace_health_check;

pub use debug_failing_job::DebugFailingJobPrompt;
pub use deploy_model::DeployModelPrompt;
pub use explore_data_catalog::ExploreDataCatalogPrompt;
pub use manage_permissions::ManagePermissionsPrompt;
pub use query_data::QueryDataPrompt;
pub use setup_data_pipeline::SetupDataPipelinePrompt;
pub use setup_ml_experiment::SetupMlExperimentPrompt;
pub use workspace_health_check::WorkspaceHealthCheckPrompt;

use rmcp::model::PromptArgument;

/// Trait for prompt definitions.
///
/// Each prompt must implement this trait to provide its metadata and template.
pub trait PromptDefinition {
    /// The unique name of the prompt.
    const NAME: &'static str;

    /// A description of what the prompt does.
    const DESCRIPTION: &'static str;

    /// The template string with {{variable}} placeholders.
    fn template() -> &'static str;

    /// The arguments this prompt accepts.
    fn arguments() -> Vec<PromptArgument>;
}

pub(crate) fn required_arg(name: &str, description: &str) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(true),
    }
}

pub(crate) fn optional_arg(name: &str, description: &str) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(false),
    }
}
