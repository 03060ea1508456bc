//! Warehouse-backed workflows: finding a warehouse, previewing tables and
//! rendering query results.

use serde_json::{Value, json};

use super::{call, items, state_of, str_arg};
use crate::domains::tools::definitions::{sql, unity_catalog};
use crate::domains::tools::operation::Param;
use crate::domains::tools::{Arguments, InvocationContext, ToolError};

/// Rows rendered by `databricks_query_as_markdown`.
const MARKDOWN_MAX_ROWS: usize = 100;

pub(super) fn preview_params() -> Vec<Param> {
    vec![
        Param::string("table_name", "Full table name, catalog.schema.table"),
        Param::string("warehouse_id", "Warehouse to use; a running one is found when empty").optional(),
        Param::integer("limit", "Sample rows").default(json!(10)),
    ]
}

pub(super) fn markdown_params() -> Vec<Param> {
    vec![
        Param::string("warehouse_id", "Warehouse to run on"),
        Param::string("sql", "SQL statement"),
        Param::string("catalog", "Default catalog").optional(),
        Param::string("schema", "Default schema").optional(),
    ]
}

pub(super) fn find_and_start(ctx: &InvocationContext, _args: &Arguments) -> Result<Value, ToolError> {
    let page = call(sql::list_warehouses(), ctx, json!({}))?;
    let warehouses = items(&page, "warehouses");
    if warehouses.is_empty() {
        return Err(ToolError::execution_failed(
            "no SQL warehouses found in workspace; create one first",
        ));
    }

    if let Some(wh) = warehouses.iter().find(|w| state_of(w) == "RUNNING") {
        return Ok(json!({
            "warehouse_id": wh["id"],
            "name": wh["name"],
            "state": "RUNNING",
            "message": format!("Warehouse '{}' is already running and ready for queries.", name_of(wh)),
        }));
    }

    let stopped = warehouses
        .iter()
        .find(|w| matches!(state_of(w).as_str(), "STOPPED" | "STOPPING"));
    if let Some(wh) = stopped {
        call(sql::start_warehouse(), ctx, json!({ "id": wh["id"] }))?;
        return Ok(json!({
            "warehouse_id": wh["id"],
            "name": wh["name"],
            "state": "STARTING",
            "message": format!(
                "Starting warehouse '{}'. Check status with databricks_get_warehouse.",
                name_of(wh)
            ),
        }));
    }

    let listed: Vec<Value> = warehouses
        .iter()
        .map(|w| json!({ "id": w["id"], "name": w["name"], "state": w["state"] }))
        .collect();
    Ok(json!({
        "warehouses": listed,
        "message": "No startable warehouses found. All are in transitional states.",
    }))
}

pub(super) fn table_preview(ctx: &InvocationContext, args: &Arguments) -> Result<Value, ToolError> {
    let table = str_arg(args, "table_name").unwrap_or_default();
    check_table_name(table)?;
    let limit = args.get("limit").and_then(Value::as_i64).unwrap_or(10).max(1);

    let mut result = json!({ "table_name": table });
    match call(unity_catalog::get_table(), ctx, json!({ "full_name": table })) {
        Ok(info) => {
            let columns: Vec<Value> = items(&info, "columns")
                .iter()
                .map(|c| {
                    let ty = c.get("type_name").or_else(|| c.get("type_text"));
                    json!({ "name": c["name"], "type": ty.cloned().unwrap_or(json!("unknown")) })
                })
                .collect();
            if !columns.is_empty() {
                result["column_count"] = json!(columns.len());
                result["columns"] = Value::Array(columns);
            }
        }
        Err(e) => {
            result["metadata"] = json!(format!("Could not retrieve table metadata: {}", e));
        }
    }

    let warehouse_id = match str_arg(args, "warehouse_id") {
        Some(id) => Some(id.to_string()),
        None => running_warehouse(ctx)?,
    };
    let Some(warehouse_id) = warehouse_id else {
        result["sample_data"] =
            json!("No running SQL warehouse found. Provide a warehouse_id or start one.");
        return Ok(result);
    };

    let response = execute(
        ctx,
        json!({
            "warehouse_id": warehouse_id,
            "statement": format!("SELECT * FROM {} LIMIT {}", table, limit),
        }),
    )?;
    if let Some(pending) = still_running(&response) {
        result["sample_data"] = json!(pending);
        return Ok(result);
    }
    let rows = data_rows(&response);
    result["sample_data"] = if rows.is_empty() {
        json!("No data returned")
    } else {
        json!({
            "columns": column_names(&response),
            "rows": rows.iter().take(limit as usize).collect::<Vec<_>>(),
            "row_count": rows.len(),
        })
    };
    Ok(result)
}

pub(super) fn query_as_markdown(ctx: &InvocationContext, args: &Arguments) -> Result<Value, ToolError> {
    let response = execute(
        ctx,
        json!({
            "warehouse_id": args.get("warehouse_id"),
            "statement": args.get("sql"),
            "catalog": args.get("catalog"),
            "schema": args.get("schema"),
        }),
    )?;
    if let Some(pending) = still_running(&response) {
        return Ok(json!(pending));
    }

    let rows = data_rows(&response);
    if rows.is_empty() {
        return Ok(json!("Query returned no results."));
    }
    let columns = column_names(&response);
    if columns.is_empty() {
        return Ok(response);
    }
    Ok(Value::String(render_markdown(&columns, rows)))
}

/// Run a statement and turn a FAILED statement state into an error.
fn execute(ctx: &InvocationContext, args: Value) -> Result<Value, ToolError> {
    let response = call(sql::execute_sql(), ctx, args)?;
    if response.pointer("/status/state").and_then(Value::as_str) == Some("FAILED") {
        let message = response
            .pointer("/status/error/message")
            .and_then(Value::as_str)
            .unwrap_or("statement failed");
        return Err(ToolError::execution_failed(message.to_string()));
    }
    Ok(response)
}

/// Message for a statement that outlived the wait timeout.
fn still_running(response: &Value) -> Option<String> {
    let state = response.pointer("/status/state").and_then(Value::as_str)?;
    if !matches!(state, "PENDING" | "RUNNING") {
        return None;
    }
    let id = response
        .get("statement_id")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    Some(format!(
        "Statement {} is still {}. Poll databricks_get_statement_status with statement_id '{}' for the result.",
        id, state, id
    ))
}

fn running_warehouse(ctx: &InvocationContext) -> Result<Option<String>, ToolError> {
    let page = call(sql::list_warehouses(), ctx, json!({}))?;
    Ok(items(&page, "warehouses")
        .iter()
        .find(|w| state_of(w) == "RUNNING")
        .and_then(|w| w.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string))
}

/// Only plain dotted identifiers are interpolated into the preview query.
fn check_table_name(name: &str) -> Result<(), ToolError> {
    let parts: Vec<&str> = name.split('.').collect();
    let valid = (1..=3).contains(&parts.len())
        && parts.iter().all(|p| {
            !p.is_empty() && p.chars().all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '`'))
        });
    if valid {
        Ok(())
    } else {
        Err(ToolError::invalid_arguments(format!(
            "'{}' is not a valid table name",
            name
        )))
    }
}

fn name_of(warehouse: &Value) -> &str {
    warehouse.get("name").and_then(Value::as_str).unwrap_or_default()
}

fn data_rows(response: &Value) -> &[Value] {
    response
        .pointer("/result/data_array")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn column_names(response: &Value) -> Vec<String> {
    response
        .pointer("/manifest/schema/columns")
        .and_then(Value::as_array)
        .map(|cols| {
            cols.iter()
                .filter_map(|c| c.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn render_markdown(columns: &[String], rows: &[Value]) -> String {
    let mut lines = Vec::with_capacity(rows.len().min(MARKDOWN_MAX_ROWS) + 2);
    lines.push(format!("| {} |", columns.join(" | ")));
    lines.push(format!("| {} |", vec!["---"; columns.len()].join(" | ")));
    for row in rows.iter().take(MARKDOWN_MAX_ROWS) {
        let cells: Vec<String> = row
            .as_array()
            .map(|cells| cells.iter().map(cell_text).collect())
            .unwrap_or_default();
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    let mut footer = format!("\n\n*{} rows returned", rows.len());
    if rows.len() > MARKDOWN_MAX_ROWS {
        footer.push_str(&format!(" (showing first {})", MARKDOWN_MAX_ROWS));
    }
    footer.push('*');
    lines.join("\n") + &footer
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.replace('|', "\\|"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{ctx_for, invoke};
    use super::*;
    use crate::domains::client::HttpMethod;
    use crate::domains::client::testing::MockClient;
    use crate::domains::tools::ToolOutcome;

    const WAREHOUSES: &str = "/api/2.0/sql/warehouses";
    const STATEMENTS: &str = "/api/2.0/sql/statements";

    fn statement(columns: &[&str], rows: Value) -> Value {
        let columns: Vec<Value> = columns.iter().map(|c| json!({ "name": c })).collect();
        json!({
            "status": {"state": "SUCCEEDED"},
            "manifest": {"schema": {"columns": columns}},
            "result": {"data_array": rows},
        })
    }

    fn success(outcome: ToolOutcome) -> Value {
        match outcome {
            ToolOutcome::Success(v) => v,
            ToolOutcome::Failure(m) => panic!("unexpected failure: {}", m),
        }
    }

    #[test]
    fn test_prefers_running_warehouse() {
        let mock = MockClient::new().respond(
            HttpMethod::Get,
            WAREHOUSES,
            json!({"warehouses": [
                {"id": "w1", "name": "etl", "state": "STOPPED"},
                {"id": "w2", "name": "bi", "state": "RUNNING"}
            ]}),
        );
        let (client, ctx) = ctx_for(mock);
        let value = success(invoke(&ctx, "databricks_find_and_start_warehouse", json!({})));
        assert_eq!(value["warehouse_id"], json!("w2"));
        assert_eq!(value["state"], json!("RUNNING"));
        assert_eq!(client.calls().len(), 1);
    }

    #[test]
    fn test_starts_first_stopped_warehouse() {
        let mock = MockClient::new().respond(
            HttpMethod::Get,
            WAREHOUSES,
            json!({"warehouses": [
                {"id": "w1", "name": "etl", "state": "STARTING"},
                {"id": "w2", "name": "bi", "state": "STOPPED"}
            ]}),
        );
        let (client, ctx) = ctx_for(mock);
        let value = success(invoke(&ctx, "databricks_find_and_start_warehouse", json!({})));
        assert_eq!(value["state"], json!("STARTING"));
        assert_eq!(client.calls_to("/api/2.0/sql/warehouses/w2/start").len(), 1);
    }

    #[test]
    fn test_transitional_warehouses_are_listed() {
        let mock = MockClient::new().respond(
            HttpMethod::Get,
            WAREHOUSES,
            json!({"warehouses": [{"id": "w1", "name": "etl", "state": "STARTING"}]}),
        );
        let (_, ctx) = ctx_for(mock);
        let value = success(invoke(&ctx, "databricks_find_and_start_warehouse", json!({})));
        assert_eq!(value["warehouses"][0]["state"], json!("STARTING"));
    }

    #[test]
    fn test_preview_survives_metadata_failure() {
        let mock = MockClient::new()
            .fail(
                HttpMethod::Get,
                "/api/2.1/unity-catalog/tables/main.sales.orders",
                crate::domains::client::RemoteError::api(404, Some("TABLE_DOES_NOT_EXIST".into()), "no"),
            )
            .respond(HttpMethod::Get, WAREHOUSES, json!({"warehouses": [{"id": "w9", "state": "RUNNING"}]}))
            .respond(HttpMethod::Post, STATEMENTS, statement(&["id"], json!([["1"], ["2"]])));
        let (client, ctx) = ctx_for(mock);

        let value = success(invoke(
            &ctx,
            "databricks_table_preview",
            json!({"table_name": "main.sales.orders", "limit": 1}),
        ));
        assert!(value["metadata"].as_str().unwrap().contains("TABLE_DOES_NOT_EXIST"));
        assert_eq!(value["sample_data"]["rows"], json!([["1"]]));
        assert_eq!(value["sample_data"]["row_count"], json!(2));

        let body = client.calls_to(STATEMENTS)[0].body.clone().unwrap();
        assert_eq!(body["warehouse_id"], json!("w9"));
        assert_eq!(body["statement"], json!("SELECT * FROM main.sales.orders LIMIT 1"));
    }

    #[test]
    fn test_preview_rejects_injected_table_name() {
        let (client, ctx) = ctx_for(MockClient::new());
        let outcome = invoke(
            &ctx,
            "databricks_table_preview",
            json!({"table_name": "a.b; DROP TABLE x", "warehouse_id": "w1"}),
        );
        assert!(!outcome.is_success());
        assert!(client.calls().is_empty());
    }

    #[test]
    fn test_markdown_table() {
        let mock = MockClient::new().respond(
            HttpMethod::Post,
            STATEMENTS,
            statement(&["city", "trips"], json!([["NYC", "10"], [null, "3"]])),
        );
        let (_, ctx) = ctx_for(mock);
        let value = success(invoke(
            &ctx,
            "databricks_query_as_markdown",
            json!({"warehouse_id": "w1", "sql": "SELECT city, trips FROM t"}),
        ));
        assert_eq!(
            value,
            json!("| city | trips |\n| --- | --- |\n| NYC | 10 |\n| NULL | 3 |\n\n*2 rows returned*")
        );
    }

    #[test]
    fn test_markdown_caps_rows() {
        let rows: Vec<Value> = (0..150).map(|i| json!([i.to_string()])).collect();
        let text = render_markdown(&["n".to_string()], &rows);
        assert_eq!(text.lines().filter(|l| l.starts_with("| ")).count(), 102);
        assert!(text.ends_with("*150 rows returned (showing first 100)*"));
    }

    #[test]
    fn test_markdown_empty_and_failed_statement() {
        let mock = MockClient::new()
            .respond(HttpMethod::Post, STATEMENTS, json!({"status": {"state": "SUCCEEDED"}}))
            .respond(
                HttpMethod::Post,
                STATEMENTS,
                json!({"status": {"state": "FAILED", "error": {"message": "Table not found"}}}),
            );
        let (_, ctx) = ctx_for(mock);
        let args = json!({"warehouse_id": "w1", "sql": "SELECT 1"});

        let empty = success(invoke(&ctx, "databricks_query_as_markdown", args.clone()));
        assert_eq!(empty, json!("Query returned no results."));

        match invoke(&ctx, "databricks_query_as_markdown", args) {
            ToolOutcome::Failure(msg) => assert!(msg.ends_with("Execution failed: Table not found")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_markdown_reports_statement_still_running() {
        let mock = MockClient::new().respond(
            HttpMethod::Post,
            STATEMENTS,
            json!({"statement_id": "01ef-77", "status": {"state": "RUNNING"}}),
        );
        let (_, ctx) = ctx_for(mock);

        let value = success(invoke(
            &ctx,
            "databricks_query_as_markdown",
            json!({"warehouse_id": "w1", "sql": "SELECT count(*) FROM big"}),
        ));
        let text = value.as_str().unwrap();
        assert!(text.contains("01ef-77"));
        assert!(text.contains("still RUNNING"));
        assert!(text.contains("databricks_get_statement_status"));
    }

    #[test]
    fn test_preview_reports_pending_statement() {
        let mock = MockClient::new().respond(
            HttpMethod::Post,
            STATEMENTS,
            json!({"statement_id": "s-1", "status": {"state": "PENDING"}}),
        );
        let (_, ctx) = ctx_for(mock);

        let value = success(invoke(
            &ctx,
            "databricks_table_preview",
            json!({"table_name": "main.sales.orders", "warehouse_id": "w1"}),
        ));
        assert!(value["sample_data"].as_str().unwrap().contains("s-1 is still PENDING"));
    }
}
