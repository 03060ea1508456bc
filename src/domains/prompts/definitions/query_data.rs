//! Natural language query prompt definition.

use super::{PromptDefinition, required_arg};
use rmcp::model::PromptArgument;

pub struct QueryDataPrompt;

impl PromptDefinition for QueryDataPrompt {
    const NAME: &'static str = "query_data";
    const DESCRIPTION: &'static str = "Answer a natural language question about the data using SQL";

    fn template() -> &'static str {
        "The user wants to know: '{{question}}'

Please answer this by querying the data:
1. First, explore the catalog to find relevant tables:
   - Call databricks_list_catalogs, then databricks_list_schemas and databricks_list_tables
   - Use databricks_get_table to check column names and types
2. Find a running SQL warehouse with databricks_list_warehouses
   - If none are running, start one
3. Write and execute a SQL query with databricks_execute_sql
4. Present the results clearly, answering the original question
5. If the first query doesn't fully answer the question, refine and re-query"
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![required_arg("question", "The question to answer")]
    }
}
