//! Databricks Apps tools.

use serde_json::json;

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "apps";

const DESCRIPTION: &str = "Create, deploy, start and stop Databricks Apps";

const USE_CASES: &[&str] = &[
    "deploy a web app",
    "build a data application",
    "start or stop an app",
    "check app deployment status",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_apps", "/api/2.0/apps")
                .describe("List apps with their compute and deployment status.")
                .list("apps"),
            RestOperation::get("databricks_get_app", "/api/2.0/apps/{name}")
                .describe("Get an app: URL, status, active deployment and service principal.")
                .param(Param::string("name", "App name")),
            RestOperation::post("databricks_create_app", "/api/2.0/apps")
                .describe("Create an app. Compute is provisioned in the background.")
                .param(Param::string("name", "App name (lowercase letters, digits and -)"))
                .param(Param::string("description", "Description").optional())
                .acknowledge("App '{name}' creation initiated. Use databricks_get_app to check status.")
                .started(),
            RestOperation::post("databricks_deploy_app", "/api/2.0/apps/{name}/deployments")
                .describe("Deploy source code from a workspace path to an app.")
                .param(Param::string("name", "App name"))
                .param(Param::string("source_code_path", "Workspace path of the source code"))
                .param(Param::string("mode", "SNAPSHOT or AUTO_SYNC").default(json!("SNAPSHOT")))
                .acknowledge("Deployment {deployment_id} of app '{name}' initiated. Use databricks_get_app_deployment to follow it.")
                .started(),
            RestOperation::delete("databricks_delete_app", "/api/2.0/apps/{name}")
                .describe("Delete an app.")
                .param(Param::string("name", "App name"))
                .acknowledge("App '{name}' deleted."),
            RestOperation::post("databricks_start_app", "/api/2.0/apps/{name}/start")
                .describe("Start the compute of an app.")
                .param(Param::string("name", "App name"))
                .acknowledge("App '{name}' start initiated.")
                .started(),
            RestOperation::post("databricks_stop_app", "/api/2.0/apps/{name}/stop")
                .describe("Stop the compute of an app.")
                .param(Param::string("name", "App name"))
                .acknowledge("App '{name}' stop initiated.")
                .started(),
            RestOperation::get("databricks_list_app_deployments", "/api/2.0/apps/{name}/deployments")
                .describe("List the deployments of an app.")
                .param(Param::string("name", "App name"))
                .list("app_deployments"),
            RestOperation::get("databricks_get_app_deployment", "/api/2.0/apps/{app_name}/deployments/{deployment_id}")
                .describe("Get one deployment of an app and its status.")
                .param(Param::string("app_name", "App name"))
                .param(Param::string("deployment_id", "Deployment id")),
            RestOperation::get("databricks_get_app_environment", "/api/2.0/apps/{name}/environment")
                .describe("Get the runtime environment of an app: environment variables, secret references and resource bindings.")
                .param(Param::string("name", "App name")),
            RestOperation::get("databricks_get_app_permissions", "/api/2.0/permissions/apps/{name}")
                .describe("Get the access control list of an app.")
                .param(Param::string("name", "App name")),
        ],
    )
}
