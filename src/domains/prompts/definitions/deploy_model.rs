//! Model deployment prompt definition.

use super::{PromptDefinition, optional_arg, required_arg};
use rmcp::model::PromptArgument;

pub struct DeployModelPrompt;

impl PromptDefinition for DeployModelPrompt {
    const NAME: &'static str = "deploy_model";
    const DESCRIPTION: &'static str = "Deploy a registered model to a serving endpoint";

    fn template() -> &'static str {
        "Deploy model '{{model_name}}' version {{#if version}}{{version}}{{else}}1{{/if}} to a serving endpoint. Please:
1. Call databricks_get_registered_model(full_name='{{model_name}}') to verify it exists
2. Call databricks_list_model_versions(full_model_name='{{model_name}}') to check available versions
3. Create a serving endpoint with databricks_create_serving_endpoint:
   - name: derive from the model name (lowercase, hyphens)
   - model_name: '{{model_name}}'
   - model_version: '{{#if version}}{{version}}{{else}}1{{/if}}'
   - workload_size: 'Small' (can scale later)
   - scale_to_zero: true
4. Monitor the deployment with databricks_get_serving_endpoint
5. Once ready, show how to query it with databricks_query_serving_endpoint"
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required_arg("model_name", "Full model name, e.g. main.ml.churn"),
            optional_arg("version", "Model version (default 1)"),
        ]
    }
}
