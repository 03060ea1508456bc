//! Storage credential and external location tools.

use serde_json::json;

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "storage";

const DESCRIPTION: &str = "Manage storage credentials and external locations for cloud storage access";

const USE_CASES: &[&str] = &[
    "connect cloud storage s3 adls gcs",
    "create an external location",
    "validate storage credentials",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_storage_credentials", "/api/2.1/unity-catalog/storage-credentials")
                .describe("List storage credentials.")
                .list("storage_credentials"),
            RestOperation::get("databricks_get_storage_credential", "/api/2.1/unity-catalog/storage-credentials/{name}")
                .describe("Get a storage credential.")
                .param(Param::string("name", "Credential name")),
            RestOperation::delete("databricks_delete_storage_credential", "/api/2.1/unity-catalog/storage-credentials/{name}")
                .describe("Delete a storage credential.")
                .param(Param::string("name", "Credential name"))
                .param(Param::boolean("force", "Delete even if dependent locations exist").default(json!(false)))
                .acknowledge("Storage credential '{name}' deleted."),
            RestOperation::post("databricks_validate_storage_credential", "/api/2.1/unity-catalog/validate-storage-credentials")
                .describe("Check that a credential can read, write, list and delete at a URL.")
                .param(Param::string("storage_credential_name", "Credential name"))
                .param(Param::string("url", "Cloud storage URL")),
            RestOperation::get("databricks_list_external_locations", "/api/2.1/unity-catalog/external-locations")
                .describe("List external locations.")
                .list("external_locations"),
            RestOperation::get("databricks_get_external_location", "/api/2.1/unity-catalog/external-locations/{name}")
                .describe("Get an external location.")
                .param(Param::string("name", "Location name")),
            RestOperation::post("databricks_create_external_location", "/api/2.1/unity-catalog/external-locations")
                .describe("Create an external location backed by a storage credential.")
                .param(Param::string("name", "Location name"))
                .param(Param::string("url", "Cloud storage URL"))
                .param(Param::string("credential_name", "Storage credential"))
                .param(Param::boolean("read_only", "Read-only location").default(json!(false)))
                .param(Param::string("comment", "Description").optional()),
            RestOperation::delete("databricks_delete_external_location", "/api/2.1/unity-catalog/external-locations/{name}")
                .describe("Delete an external location.")
                .param(Param::string("name", "Location name"))
                .acknowledge("External location '{name}' deleted."),
        ],
    )
}
