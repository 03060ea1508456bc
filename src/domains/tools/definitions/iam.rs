//! Identity tools: users, groups, service principals and permission levels.

use serde_json::json;

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "iam";

const DESCRIPTION: &str = "Manage users, groups and service principals and inspect permission levels";

const USE_CASES: &[&str] = &[
    "add or remove users",
    "manage groups and membership",
    "create a service principal for automation",
    "check who am i",
    "look up permission levels on an object",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            current_user(),
            RestOperation::get("databricks_list_users", "/api/2.0/preview/scim/v2/Users")
                .describe("List users, optionally with a SCIM filter such as userName co \"alice\".")
                .param(Param::string("filter_str", "SCIM filter").optional().api_name("filter"))
                .param(Param::integer("count", "Maximum users").default(json!(100)))
                .list("Resources"),
            RestOperation::get("databricks_get_user", "/api/2.0/preview/scim/v2/Users/{user_id}")
                .describe("Get a user with groups, entitlements and roles.")
                .param(Param::string("user_id", "User id")),
            RestOperation::post("databricks_create_user", "/api/2.0/preview/scim/v2/Users")
                .describe("Add a user to the workspace.")
                .param(Param::string("user_name", "Email address").api_name("userName"))
                .param(Param::string("display_name", "Display name").optional().api_name("displayName")),
            RestOperation::delete("databricks_delete_user", "/api/2.0/preview/scim/v2/Users/{user_id}")
                .describe("Remove a user from the workspace.")
                .param(Param::string("user_id", "User id"))
                .acknowledge("User '{user_id}' deleted."),
            RestOperation::get("databricks_list_groups", "/api/2.0/preview/scim/v2/Groups")
                .describe("List groups, optionally with a SCIM filter.")
                .param(Param::string("filter_str", "SCIM filter").optional().api_name("filter"))
                .param(Param::integer("count", "Maximum groups").default(json!(100)))
                .list("Resources"),
            RestOperation::post("databricks_create_group", "/api/2.0/preview/scim/v2/Groups")
                .describe("Create a group.")
                .param(Param::string("display_name", "Group name").api_name("displayName")),
            RestOperation::delete("databricks_delete_group", "/api/2.0/preview/scim/v2/Groups/{group_id}")
                .describe("Delete a group.")
                .param(Param::string("group_id", "Group id"))
                .acknowledge("Group '{group_id}' deleted."),
            RestOperation::get("databricks_list_service_principals", "/api/2.0/preview/scim/v2/ServicePrincipals")
                .describe("List service principals, optionally with a SCIM filter.")
                .param(Param::string("filter_str", "SCIM filter").optional().api_name("filter"))
                .param(Param::integer("count", "Maximum entries").default(json!(100)))
                .list("Resources"),
            RestOperation::post("databricks_create_service_principal", "/api/2.0/preview/scim/v2/ServicePrincipals")
                .describe("Create a service principal.")
                .param(Param::string("display_name", "Name").api_name("displayName"))
                .param(Param::string("application_id", "Existing application (client) id").optional().api_name("applicationId")),
            RestOperation::get("databricks_get_permission_levels", "/api/2.0/permissions/{object_type}/{object_id}/permissionLevels")
                .describe("List the permission levels available on an object, e.g. object_type clusters, jobs, warehouses, notebooks.")
                .param(Param::string("object_type", "Object type"))
                .param(Param::string("object_id", "Object id")),
        ],
    )
}

/// The identity behind the configured credentials.
pub fn current_user() -> RestOperation {
    RestOperation::get("databricks_get_current_user", "/api/2.0/preview/scim/v2/Me")
        .describe("Get the user or service principal the server authenticates as.")
}
