//! Permission review prompt definition.

use super::{PromptDefinition, required_arg};
use rmcp::model::PromptArgument;

pub struct ManagePermissionsPrompt;

impl PromptDefinition for ManagePermissionsPrompt {
    const NAME: &'static str = "manage_permissions";
    const DESCRIPTION: &'static str = "Review and manage permissions on a Databricks object";

    fn template() -> &'static str {
        "Review and manage permissions for {{object_type}} '{{object_name}}'. Please:
1. Get current grants with databricks_get_grants(securable_type='{{object_type}}', full_name='{{object_name}}')
2. Get effective grants with databricks_get_effective_grants(securable_type='{{object_type}}', full_name='{{object_name}}')
3. List all workspace users and groups relevant to this object:
   - databricks_list_users and databricks_list_groups
4. Present a clear permissions matrix showing who has what access
5. Ask if any permissions should be added, changed, or revoked
6. If changes are requested, use databricks_update_grants to apply them"
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![
            required_arg("object_type", "Securable type, e.g. catalog, schema, table"),
            required_arg("object_name", "Full name of the object"),
        ]
    }
}
