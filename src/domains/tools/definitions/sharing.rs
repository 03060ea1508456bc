//! Delta Sharing tools: shares and recipients.

use serde_json::json;

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "sharing";

const DESCRIPTION: &str = "Share data with other organizations through Delta Sharing";

const USE_CASES: &[&str] = &[
    "share tables with a partner",
    "create a delta sharing recipient",
    "manage data shares",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_shares", "/api/2.1/unity-catalog/shares")
                .describe("List shares.")
                .list("shares"),
            RestOperation::get("databricks_get_share", "/api/2.1/unity-catalog/shares/{name}")
                .describe("Get a share and the data objects it contains.")
                .param(Param::string("name", "Share name"))
                .param(Param::boolean("include_shared_data", "Include shared objects").default(json!(true))),
            RestOperation::post("databricks_create_share", "/api/2.1/unity-catalog/shares")
                .describe("Create an empty share.")
                .param(Param::string("name", "Share name"))
                .param(Param::string("comment", "Description").optional()),
            RestOperation::delete("databricks_delete_share", "/api/2.1/unity-catalog/shares/{name}")
                .describe("Delete a share.")
                .param(Param::string("name", "Share name"))
                .acknowledge("Share '{name}' deleted."),
            RestOperation::get("databricks_list_recipients", "/api/2.1/unity-catalog/recipients")
                .describe("List sharing recipients.")
                .list("recipients"),
            RestOperation::post("databricks_create_recipient", "/api/2.1/unity-catalog/recipients")
                .describe("Create a recipient. TOKEN recipients get an activation link; DATABRICKS recipients need sharing_code.")
                .param(Param::string("name", "Recipient name"))
                .param(Param::string("authentication_type", "TOKEN or DATABRICKS").default(json!("TOKEN")))
                .param(Param::string("sharing_code", "Recipient metastore id, for DATABRICKS recipients").optional().api_name("data_recipient_global_metastore_id"))
                .param(Param::string("comment", "Description").optional()),
        ],
    )
}
