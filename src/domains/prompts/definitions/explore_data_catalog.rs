//! Catalog exploration prompt definition.

use super::{PromptDefinition, optional_arg};
use rmcp::model::PromptArgument;

/// Walks the Unity Catalog hierarchy, optionally starting from one catalog.
pub struct ExploreDataCatalogPrompt;

impl PromptDefinition for ExploreDataCatalogPrompt {
    const NAME: &'static str = "explore_data_catalog";
    const DESCRIPTION: &'static str = "Explore the Unity Catalog data assets systematically";

    fn template() -> &'static str {
        "{{#if catalog_name}}I want to explore the data in catalog '{{catalog_name}}'. Please:
1. Call databricks_get_catalog(name='{{catalog_name}}') to see catalog details
2. Call databricks_list_schemas(catalog_name='{{catalog_name}}') to list all schemas
3. For each schema, call databricks_list_tables to see the tables
4. For the most interesting tables, call databricks_get_table to see columns and stats
5. Summarize what data is available, organized by schema{{else}}I want to explore the data catalog. Please:
1. Call databricks_list_catalogs() to see all available catalogs
2. For each catalog, call databricks_list_schemas to see schemas
3. Pick the most relevant schemas and call databricks_list_tables
4. For key tables, call databricks_get_table to see columns and stats
5. Provide a summary of the data landscape{{/if}}"
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![optional_arg("catalog_name", "Catalog to start from; all catalogs when omitted")]
    }
}
