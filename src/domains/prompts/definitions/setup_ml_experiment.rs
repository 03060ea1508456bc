//! ML experiment setup prompt definition.

use super::{PromptDefinition, optional_arg, required_arg};
use rmcp::model::PromptArgument;

pub struct SetupMlExperimentPrompt;

impl PromptDefinition for SetupMlExperimentPrompt {
    const NAME: &'static str = "setup_ml_experiment";
    const DESCRIPTION: &'static str = "Set up a new MLflow experiment with best practices";

    fn template() -> &'static str {
        "Set up a new ML experiment called '{{experiment_name}}'{{#if description}} with description '{{description}}'{{/if}}. Please:
1. Call databricks_create_experiment(name='{{experiment_name}}')
2. Confirm the experiment was created and note the experiment_id
3. Explain how to track runs using:
   - databricks_search_runs to find runs of the experiment
   - databricks_log_metric / databricks_log_param to track values
   - databricks_get_experiment_run to review a single run
4. Suggest a good experiment structure (naming conventions, key metrics to track)"
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required_arg("experiment_name", "Experiment path, e.g. /Users/me/churn"),
            optional_arg("description", "What the experiment is for"),
        ]
    }
}
