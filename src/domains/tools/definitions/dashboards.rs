//! AI/BI (Lakeview) dashboard tools.

use serde_json::json;

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "dashboards";

const DESCRIPTION: &str = "Create, update, publish and migrate AI/BI dashboards";

const USE_CASES: &[&str] = &[
    "build a dashboard",
    "publish a report",
    "visualize query results",
    "migrate a legacy dashboard",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_dashboards", "/api/2.0/lakeview/dashboards")
                .describe("List dashboards.")
                .list("dashboards"),
            RestOperation::get("databricks_get_dashboard", "/api/2.0/lakeview/dashboards/{dashboard_id}")
                .describe("Get a dashboard draft, including its serialized definition.")
                .param(Param::string("dashboard_id", "Dashboard id")),
            RestOperation::post("databricks_create_dashboard", "/api/2.0/lakeview/dashboards")
                .describe("Create a draft dashboard, optionally from a serialized definition.")
                .param(Param::string("display_name", "Dashboard name"))
                .param(Param::string("warehouse_id", "Warehouse for dashboard queries"))
                .param(Param::string("serialized_dashboard", "Serialized dashboard JSON").optional())
                .param(Param::string("parent_path", "Workspace folder").optional()),
            RestOperation::patch("databricks_update_dashboard", "/api/2.0/lakeview/dashboards/{dashboard_id}")
                .describe("Update the name, definition or warehouse of a draft dashboard.")
                .param(Param::string("dashboard_id", "Dashboard id"))
                .param(Param::string("display_name", "New name").optional())
                .param(Param::string("serialized_dashboard", "New serialized definition").optional())
                .param(Param::string("warehouse_id", "New warehouse").optional()),
            RestOperation::delete("databricks_trash_dashboard", "/api/2.0/lakeview/dashboards/{dashboard_id}")
                .describe("Move a dashboard to the trash.")
                .param(Param::string("dashboard_id", "Dashboard id"))
                .acknowledge("Dashboard '{dashboard_id}' moved to trash."),
            RestOperation::post("databricks_publish_dashboard", "/api/2.0/lakeview/dashboards/{dashboard_id}/published")
                .describe("Publish the current draft of a dashboard.")
                .param(Param::string("dashboard_id", "Dashboard id"))
                .param(Param::string("warehouse_id", "Override warehouse").optional())
                .param(Param::boolean("embed_credentials", "Run viewer queries with the publisher's credentials").default(json!(true))),
            RestOperation::get("databricks_get_published_dashboard", "/api/2.0/lakeview/dashboards/{dashboard_id}/published")
                .describe("Get the published version of a dashboard.")
                .param(Param::string("dashboard_id", "Dashboard id")),
            RestOperation::delete("databricks_unpublish_dashboard", "/api/2.0/lakeview/dashboards/{dashboard_id}/published")
                .describe("Unpublish a dashboard. The draft is kept.")
                .param(Param::string("dashboard_id", "Dashboard id"))
                .acknowledge("Dashboard '{dashboard_id}' unpublished."),
            RestOperation::post("databricks_migrate_dashboard", "/api/2.0/lakeview/dashboards/migrate")
                .describe("Migrate a legacy SQL dashboard to an AI/BI dashboard.")
                .param(Param::string("source_dashboard_id", "Legacy dashboard id"))
                .param(Param::string("display_name", "Name of the new dashboard").optional())
                .param(Param::string("parent_path", "Workspace folder").optional()),
        ],
    )
}
