use serde_json::json;

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "global_init_scripts";

const DESCRIPTION: &str = "Manage init scripts that run on every cluster in the workspace";

const USE_CASES: &[&str] = &[
    "install packages on all clusters",
    "configure cluster startup",
    "audit init scripts",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_global_init_scripts", "/api/2.0/global-init-scripts")
                .describe("List global init scripts (without their content).")
                .list("scripts"),
            RestOperation::get("databricks_get_global_init_script", "/api/2.0/global-init-scripts/{script_id}")
                .describe("Get a global init script including its base64 content.")
                .param(Param::string("script_id", "Script id")),
            RestOperation::post("databricks_create_global_init_script", "/api/2.0/global-init-scripts")
                .describe("Create a global init script.")
                .param(Param::string("name", "Script name"))
                .param(Param::string("script", "Base64-encoded script content"))
                .param(Param::boolean("enabled", "Run on cluster start").default(json!(false)))
                .param(Param::integer("position", "Execution order, 0 runs first").optional()),
            RestOperation::patch("databricks_update_global_init_script", "/api/2.0/global-init-scripts/{script_id}")
                .describe("Update a global init script. Name and script are required by the API.")
                .param(Param::string("script_id", "Script id"))
                .param(Param::string("name", "Script name"))
                .param(Param::string("script", "Base64-encoded script content"))
                .param(Param::boolean("enabled", "Run on cluster start").optional())
                .param(Param::integer("position", "Execution order").optional())
                .acknowledge("Global init script {script_id} updated."),
            RestOperation::delete("databricks_delete_global_init_script", "/api/2.0/global-init-scripts/{script_id}")
                .describe("Delete a global init script.")
                .param(Param::string("script_id", "Script id"))
                .acknowledge("Global init script {script_id} deleted."),
        ],
    )
}
