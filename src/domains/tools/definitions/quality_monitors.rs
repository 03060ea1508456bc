//! Lakehouse monitoring tools.

use serde_json::{Value, json};

use super::{rest_module, split_list, take_str};
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::entry::Arguments;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "quality_monitors";

const DESCRIPTION: &str = "Monitor data quality and drift of Unity Catalog tables";

const USE_CASES: &[&str] = &[
    "monitor data quality of a table",
    "detect drift in model inputs",
    "refresh profile metrics",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_get_quality_monitor", "/api/2.1/unity-catalog/tables/{table_name}/monitor")
                .describe("Get the monitor of a table.")
                .param(Param::string("table_name", "Full table name")),
            RestOperation::post("databricks_create_quality_monitor", "/api/2.1/unity-catalog/tables/{table_name}/monitor")
                .describe("Create a snapshot or time series monitor on a table.")
                .param(Param::string("table_name", "Full table name"))
                .param(Param::string("assets_dir", "Workspace directory for dashboards and assets"))
                .param(Param::string("output_schema_name", "catalog.schema for metric tables"))
                .param(Param::string("timestamp_col", "Timestamp column; makes a time series monitor").optional())
                .param(Param::string("granularities", "Comma-separated windows, e.g. '1 day'").default(json!("1 day")))
                .body_with(monitor_body),
            RestOperation::delete("databricks_delete_quality_monitor", "/api/2.1/unity-catalog/tables/{table_name}/monitor")
                .describe("Delete the monitor of a table. Metric tables are kept.")
                .param(Param::string("table_name", "Full table name"))
                .acknowledge("Monitor on '{table_name}' deleted."),
            RestOperation::post("databricks_run_quality_monitor_refresh", "/api/2.1/unity-catalog/tables/{table_name}/monitor/refreshes")
                .describe("Queue a metric refresh for a monitor.")
                .param(Param::string("table_name", "Full table name"))
                .acknowledge("Refresh {refresh_id} queued for '{table_name}'.")
                .started(),
            RestOperation::get("databricks_list_quality_monitor_refreshes", "/api/2.1/unity-catalog/tables/{table_name}/monitor/refreshes")
                .describe("List recent refreshes of a monitor.")
                .param(Param::string("table_name", "Full table name")),
            RestOperation::get("databricks_get_quality_monitor_refresh", "/api/2.1/unity-catalog/tables/{table_name}/monitor/refreshes/{refresh_id}")
                .describe("Get the state of one refresh.")
                .param(Param::string("table_name", "Full table name"))
                .param(Param::string("refresh_id", "Refresh id")),
        ],
    )
}

fn monitor_body(mut body: Arguments) -> Result<Value, ToolError> {
    let granularities = take_str(&mut body, "granularities")
        .map(|s| split_list(&s))
        .unwrap_or_default();
    match take_str(&mut body, "timestamp_col") {
        Some(col) => {
            body.insert(
                "time_series".to_string(),
                json!({ "timestamp_col": col, "granularities": granularities }),
            );
        }
        None => {
            body.insert("snapshot".to_string(), json!({}));
        }
    }
    Ok(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::call;

    #[test]
    fn test_snapshot_monitor_without_timestamp() {
        let (_, calls) = call(
            module(),
            "databricks_create_quality_monitor",
            json!({"table_name": "main.sales.orders", "assets_dir": "/Shared/monitors", "output_schema_name": "main.monitoring"}),
        );
        let body = calls[0].body.clone().unwrap();
        assert_eq!(body["snapshot"], json!({}));
        assert!(body.get("time_series").is_none());
        assert!(body.get("granularities").is_none());
    }

    #[test]
    fn test_time_series_monitor() {
        let (_, calls) = call(
            module(),
            "databricks_create_quality_monitor",
            json!({
                "table_name": "main.sales.orders",
                "assets_dir": "/Shared/monitors",
                "output_schema_name": "main.monitoring",
                "timestamp_col": "ts",
                "granularities": "1 hour, 1 day"
            }),
        );
        let body = calls[0].body.clone().unwrap();
        assert_eq!(
            body["time_series"],
            json!({"timestamp_col": "ts", "granularities": ["1 hour", "1 day"]})
        );
    }
}
