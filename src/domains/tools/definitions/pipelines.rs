//! Lakeflow Declarative Pipelines (DLT) tools.

use serde_json::{Value, json};

use super::{rest_module, take_str};
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::entry::Arguments;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "pipelines";

const DESCRIPTION: &str = "Create, run and monitor declarative ETL pipelines (Delta Live Tables)";

const USE_CASES: &[&str] = &[
    "build an etl pipeline",
    "ingest streaming data with delta live tables",
    "start a pipeline update or full refresh",
    "inspect pipeline events and failures",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_pipelines", "/api/2.0/pipelines")
                .describe("List pipelines with their state and latest update.")
                .param(Param::integer("max_results", "Page size").default(json!(25)))
                .list("statuses"),
            RestOperation::get("databricks_get_pipeline", "/api/2.0/pipelines/{pipeline_id}")
                .describe("Get a pipeline: specification, state and recent updates.")
                .param(Param::string("pipeline_id", "Pipeline id")),
            RestOperation::post("databricks_create_pipeline", "/api/2.0/pipelines")
                .describe("Create a pipeline from a notebook. For Unity Catalog give catalog and target schema; for Hive metastore give only target.")
                .param(Param::string("name", "Pipeline name"))
                .param(Param::string("target", "Target schema").optional())
                .param(Param::string("catalog", "Unity Catalog catalog").optional())
                .param(Param::string("notebook_path", "Notebook with the pipeline definitions").optional())
                .param(Param::boolean("continuous", "Run continuously instead of triggered").default(json!(false)))
                .body_with(pipeline_body),
            RestOperation::put("databricks_update_pipeline", "/api/2.0/pipelines/{pipeline_id}")
                .describe("Replace a pipeline's settings.")
                .param(Param::string("pipeline_id", "Pipeline id"))
                .param(Param::string("name", "Pipeline name"))
                .param(Param::string("target", "Target schema").optional())
                .param(Param::string("catalog", "Unity Catalog catalog").optional())
                .param(Param::string("notebook_path", "Notebook with the pipeline definitions").optional())
                .param(Param::boolean("continuous", "Run continuously").default(json!(false)))
                .body_with(pipeline_body)
                .acknowledge("Pipeline '{pipeline_id}' updated."),
            RestOperation::delete("databricks_delete_pipeline", "/api/2.0/pipelines/{pipeline_id}")
                .describe("Delete a pipeline. Its tables are kept.")
                .param(Param::string("pipeline_id", "Pipeline id"))
                .acknowledge("Pipeline '{pipeline_id}' deleted."),
            RestOperation::post("databricks_start_pipeline", "/api/2.0/pipelines/{pipeline_id}/updates")
                .describe("Start a pipeline update, optionally as a full refresh.")
                .param(Param::string("pipeline_id", "Pipeline id"))
                .param(Param::boolean("full_refresh", "Recompute all tables").default(json!(false)))
                .acknowledge("Pipeline '{pipeline_id}' update {update_id} started. Use databricks_get_pipeline to follow it.")
                .started(),
            RestOperation::post("databricks_stop_pipeline", "/api/2.0/pipelines/{pipeline_id}/stop")
                .describe("Stop the active update of a pipeline.")
                .param(Param::string("pipeline_id", "Pipeline id"))
                .acknowledge("Stop requested for pipeline '{pipeline_id}'.")
                .started(),
            RestOperation::get("databricks_list_pipeline_events", "/api/2.0/pipelines/{pipeline_id}/events")
                .describe("List pipeline events, including errors and data quality results.")
                .param(Param::string("pipeline_id", "Pipeline id"))
                .param(Param::integer("max_results", "Page size").default(json!(25)))
                .list("events"),
            RestOperation::get("databricks_list_pipeline_updates", "/api/2.0/pipelines/{pipeline_id}/updates")
                .describe("List recent updates of a pipeline.")
                .param(Param::string("pipeline_id", "Pipeline id")),
        ],
    )
}

fn pipeline_body(mut body: Arguments) -> Result<Value, ToolError> {
    if let Some(path) = take_str(&mut body, "notebook_path") {
        body.insert("libraries".into(), json!([{ "notebook": { "path": path } }]));
    }
    Ok(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::call;

    #[test]
    fn test_create_pipeline_with_notebook() {
        let (_, calls) = call(
            module(),
            "databricks_create_pipeline",
            json!({"name": "orders", "catalog": "main", "target": "silver", "notebook_path": "/Repos/etl/orders"}),
        );
        assert_eq!(
            calls[0].body,
            Some(json!({
                "name": "orders",
                "target": "silver",
                "catalog": "main",
                "continuous": false,
                "libraries": [{"notebook": {"path": "/Repos/etl/orders"}}]
            }))
        );
    }

    #[test]
    fn test_update_pipeline_keeps_id_in_path() {
        let (value, calls) = call(
            module(),
            "databricks_update_pipeline",
            json!({"pipeline_id": "p-1", "name": "orders"}),
        );
        assert_eq!(calls[0].path, "/api/2.0/pipelines/p-1");
        assert_eq!(value, json!("Pipeline 'p-1' updated."));
    }
}
