//! Metastore tools.

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "metastores";

const DESCRIPTION: &str = "Inspect Unity Catalog metastores and the workspace assignment";

const USE_CASES: &[&str] = &[
    "find the current metastore",
    "check metastore region and owner",
    "list metastores in the account",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_get_current_metastore_assignment", "/api/2.1/unity-catalog/current-metastore-assignment")
                .describe("Get the metastore assigned to this workspace and the default catalog."),
            RestOperation::get("databricks_get_metastore_summary", "/api/2.1/unity-catalog/metastore_summary")
                .describe("Get a summary of the current metastore: cloud, region, owner and storage root."),
            RestOperation::get("databricks_list_metastores", "/api/2.1/unity-catalog/metastores")
                .describe("List metastores (metastore admins only).")
                .list("metastores"),
            RestOperation::get("databricks_get_metastore", "/api/2.1/unity-catalog/metastores/{id}")
                .describe("Get a metastore by id.")
                .param(Param::string("id", "Metastore id")),
        ],
    )
}
