//! SQL warehouse, statement execution, saved query and alert tools.

use serde_json::{Value, json};

use super::{rest_module, take_str};
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::entry::Arguments;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "sql";

const DESCRIPTION: &str =
    "Run SQL statements and manage SQL warehouses, saved queries, alerts and query history";

const USE_CASES: &[&str] = &[
    "run a sql query",
    "execute sql statements on a warehouse",
    "start or stop a sql warehouse",
    "create saved queries and alerts",
    "review query history and performance",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            list_warehouses(),
            RestOperation::get("databricks_get_warehouse", "/api/2.0/sql/warehouses/{id}")
                .describe("Get a SQL warehouse: state, size, scaling and connection details.")
                .param(Param::string("id", "Warehouse id")),
            RestOperation::post("databricks_create_warehouse", "/api/2.0/sql/warehouses")
                .describe("Create a SQL warehouse. It starts automatically after creation.")
                .param(Param::string("name", "Display name"))
                .param(Param::string("cluster_size", "T-shirt size, e.g. 2X-Small, Small, Large").default(json!("2X-Small")))
                .param(Param::integer("max_num_clusters", "Maximum clusters for scaling (1-100)").default(json!(1)))
                .param(Param::integer("auto_stop_mins", "Idle minutes before auto-stop, 0 disables").default(json!(15))),
            start_warehouse(),
            RestOperation::post("databricks_stop_warehouse", "/api/2.0/sql/warehouses/{id}/stop")
                .describe("Stop a running SQL warehouse. Running queries are terminated.")
                .param(Param::string("id", "Warehouse id"))
                .acknowledge("Warehouse '{id}' stop initiated.")
                .started(),
            RestOperation::delete("databricks_delete_warehouse", "/api/2.0/sql/warehouses/{id}")
                .describe("Delete a SQL warehouse.")
                .param(Param::string("id", "Warehouse id"))
                .acknowledge("Warehouse '{id}' deleted."),
            execute_sql(),
            RestOperation::get("databricks_get_statement_status", "/api/2.0/sql/statements/{statement_id}")
                .describe("Get the status and results of a statement. Use it to poll long-running statements.")
                .param(Param::string("statement_id", "Statement id")),
            RestOperation::post("databricks_cancel_statement", "/api/2.0/sql/statements/{statement_id}/cancel")
                .describe("Request cancellation of a running statement.")
                .param(Param::string("statement_id", "Statement id"))
                .acknowledge("Cancellation requested for statement '{statement_id}'."),
            RestOperation::get("databricks_list_queries", "/api/2.0/sql/queries")
                .describe("List saved SQL queries.")
                .list("results"),
            RestOperation::post("databricks_create_query", "/api/2.0/sql/queries")
                .describe("Create a saved SQL query that can be shared, scheduled and used by alerts.")
                .param(Param::string("name", "Display name").api_name("display_name"))
                .param(Param::string("query_text", "SQL text"))
                .param(Param::string("warehouse_id", "Target warehouse"))
                .param(Param::string("description", "Description").optional())
                .body_with(query_body),
            RestOperation::get("databricks_list_alerts", "/api/2.0/sql/alerts")
                .describe("List SQL alerts.")
                .list("results"),
            RestOperation::post("databricks_create_alert", "/api/2.0/sql/alerts")
                .describe("Create an alert that fires when a column of a saved query's result crosses a threshold.")
                .param(Param::string("name", "Display name").api_name("display_name"))
                .param(Param::string("query_id", "Saved query to evaluate"))
                .param(Param::string("column", "Result column to compare"))
                .param(Param::string("operator", "GREATER_THAN, GREATER_THAN_OR_EQUAL, LESS_THAN, LESS_THAN_OR_EQUAL, EQUAL or NOT_EQUAL").default(json!("GREATER_THAN")))
                .param(Param::number("threshold", "Value to compare against"))
                .body_with(alert_body),
            RestOperation::get("databricks_list_query_history", "/api/2.0/sql/history/queries")
                .describe("List recent query executions with status, duration and warehouse.")
                .param(Param::string("warehouse_id", "Only queries run on this warehouse").optional().api_name("filter_by.warehouse_ids"))
                .param(Param::integer("max_results", "Entries to return (max 1000)").default(json!(25))),
        ],
    )
}

pub fn list_warehouses() -> RestOperation {
    RestOperation::get("databricks_list_warehouses", "/api/2.0/sql/warehouses")
        .describe("List SQL warehouses with their state and size.")
        .list("warehouses")
}

pub fn start_warehouse() -> RestOperation {
    RestOperation::post("databricks_start_warehouse", "/api/2.0/sql/warehouses/{id}/start")
        .describe("Start a stopped SQL warehouse. Startup can take several minutes.")
        .param(Param::string("id", "Warehouse id"))
        .acknowledge("Warehouse '{id}' start initiated. It may take a few minutes to become running.")
        .started()
}

/// Synchronous statement execution with inline JSON results (50s wait).
pub fn execute_sql() -> RestOperation {
    RestOperation::post("databricks_execute_sql", "/api/2.0/sql/statements")
        .describe("Execute a SQL statement on a warehouse and return inline results. Waits up to 50 seconds; poll databricks_get_statement_status for longer statements.")
        .param(Param::string("warehouse_id", "Warehouse to run on"))
        .param(Param::string("statement", "SQL statement"))
        .param(Param::string("catalog", "Default catalog").optional())
        .param(Param::string("schema", "Default schema").optional())
        .fixed("wait_timeout", json!("50s"))
        .fixed("disposition", json!("INLINE"))
        .fixed("format", json!("JSON_ARRAY"))
}

fn query_body(body: Arguments) -> Result<Value, ToolError> {
    Ok(json!({ "query": body }))
}

fn alert_body(mut body: Arguments) -> Result<Value, ToolError> {
    let column = take_str(&mut body, "column").unwrap_or_default();
    let operator = take_str(&mut body, "operator").unwrap_or_else(|| "GREATER_THAN".into());
    let threshold = body.remove("threshold").unwrap_or(Value::Null);
    Ok(json!({
        "alert": {
            "display_name": body.get("display_name"),
            "query_id": body.get("query_id"),
            "condition": {
                "op": operator,
                "operand": { "column": { "name": column } },
                "threshold": { "value": { "double_value": threshold } },
            },
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::call;
    use crate::domains::tools::operation::arguments;

    #[test]
    fn test_execute_sql_request() {
        let req = execute_sql()
            .build_request(&arguments(json!({
                "warehouse_id": "w1",
                "statement": "SELECT 1",
                "catalog": "main",
                "schema": ""
            })))
            .unwrap();
        assert_eq!(
            req.body,
            Some(json!({
                "warehouse_id": "w1",
                "statement": "SELECT 1",
                "catalog": "main",
                "wait_timeout": "50s",
                "disposition": "INLINE",
                "format": "JSON_ARRAY"
            }))
        );
    }

    #[test]
    fn test_create_query_wraps_body() {
        let (_, calls) = call(
            module(),
            "databricks_create_query",
            json!({"name": "Daily", "query_text": "SELECT 1", "warehouse_id": "w1"}),
        );
        assert_eq!(
            calls[0].body,
            Some(json!({"query": {"display_name": "Daily", "query_text": "SELECT 1", "warehouse_id": "w1"}}))
        );
    }

    #[test]
    fn test_create_alert_condition() {
        let (_, calls) = call(
            module(),
            "databricks_create_alert",
            json!({"name": "High", "query_id": "q1", "column": "total", "threshold": 100}),
        );
        let body = calls[0].body.clone().unwrap();
        assert_eq!(body["alert"]["condition"]["op"], json!("GREATER_THAN"));
        assert_eq!(body["alert"]["condition"]["operand"]["column"]["name"], json!("total"));
        assert_eq!(body["alert"]["condition"]["threshold"]["value"]["double_value"], json!(100));
    }

    #[test]
    fn test_query_history_filter() {
        let (_, calls) = call(
            module(),
            "databricks_list_query_history",
            json!({"warehouse_id": "w9"}),
        );
        assert_eq!(
            calls[0].query,
            vec![
                ("filter_by.warehouse_ids".to_string(), "w9".to_string()),
                ("max_results".to_string(), "25".to_string())
            ]
        );
    }
}
