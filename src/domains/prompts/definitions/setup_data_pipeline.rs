//! Data pipeline planning prompt definition.

use super::{PromptDefinition, optional_arg, required_arg};
use rmcp::model::PromptArgument;

pub struct SetupDataPipelinePrompt;

impl PromptDefinition for SetupDataPipelinePrompt {
    const NAME: &'static str = "setup_data_pipeline";
    const DESCRIPTION: &'static str = "Plan and create a data pipeline for a source table";

    fn template() -> &'static str {
        "Set up a data pipeline for source table '{{source_table}}'{{#if target_schema}} writing into schema '{{target_schema}}'{{/if}}. Please:
1. Call databricks_get_table(full_name='{{source_table}}') to understand the source data
2. Check available SQL warehouses with databricks_list_warehouses
3. If no warehouse is running, start one with databricks_start_warehouse
4. Run a sample query with databricks_execute_sql to preview the data:
   SELECT * FROM {{source_table}} LIMIT 10
5. Suggest a transformation pipeline:
   - What cleaning/transformations are needed
   - Target table structure
   - Whether to use a DLT pipeline or a job
6. Offer to create the pipeline or job"
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required_arg("source_table", "Full name of the source table"),
            optional_arg("target_schema", "Schema that should receive the output"),
        ]
    }
}
