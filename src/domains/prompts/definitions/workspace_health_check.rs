//! Workspace health check prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

pub struct WorkspaceHealthCheckPrompt;

impl PromptDefinition for WorkspaceHealthCheckPrompt {
    const NAME: &'static str = "workspace_health_check";
    const DESCRIPTION: &'static str = "Run a comprehensive health check on the Databricks workspace";

    fn template() -> &'static str {
        "Run a health check on this Databricks workspace. Please check:
1. Call databricks_get_current_user() to confirm authentication
2. Call databricks_list_clusters() and report how many are running vs terminated
3. Call databricks_list_warehouses() and report the status of each warehouse
4. Call databricks_list_jobs() to count total jobs and check for recent failures
5. Call databricks_list_serving_endpoints() and report endpoint health
6. Call databricks_list_catalogs() to verify Unity Catalog access
7. Provide a summary dashboard:
   - Auth: OK/FAIL
   - Clusters: X running, Y terminated
   - Warehouses: X active
   - Jobs: X total, Y with recent failures
   - Endpoints: X serving
   - Catalogs: X accessible
(databricks_workspace_status gathers most of this in a single call.)"
    }

    fn arguments() -> Vec<PromptArgument> {
        Vec::new()
    }
}
