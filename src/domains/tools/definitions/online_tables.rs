//! Online table tools.

use serde_json::{Value, json};

use super::{rest_module, split_list, take_str};
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::entry::Arguments;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "online_tables";

const DESCRIPTION: &str = "Serve Delta tables as low-latency online tables for feature lookup";

const USE_CASES: &[&str] = &[
    "serve features for real time inference",
    "sync a delta table to an online store",
    "low latency lookups",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::post("databricks_create_online_table", "/api/2.0/online-tables")
                .describe("Create an online table synced from a Delta source table.")
                .param(Param::string("name", "Full name of the online table"))
                .param(Param::string("source_table_full_name", "Full name of the source Delta table"))
                .param(Param::string("primary_key_columns", "Comma-separated primary key columns"))
                .param(Param::string("timeseries_key", "Column used to deduplicate rows").optional())
                .param(Param::boolean("continuous", "Sync continuously instead of on trigger").default(json!(false)))
                .body_with(online_table_body)
                .started(),
            RestOperation::get("databricks_get_online_table", "/api/2.0/online-tables/{name}")
                .describe("Get an online table and its sync status.")
                .param(Param::string("name", "Full name of the online table")),
            RestOperation::delete("databricks_delete_online_table", "/api/2.0/online-tables/{name}")
                .describe("Delete an online table. The source table is untouched.")
                .param(Param::string("name", "Full name of the online table"))
                .acknowledge("Online table '{name}' deleted."),
        ],
    )
}

fn online_table_body(mut body: Arguments) -> Result<Value, ToolError> {
    let keys = take_str(&mut body, "primary_key_columns")
        .map(|s| split_list(&s))
        .unwrap_or_default();
    if keys.is_empty() {
        return Err(ToolError::invalid_arguments(
            "primary_key_columns must name at least one column",
        ));
    }

    let continuous = matches!(body.remove("continuous"), Some(Value::Bool(true)));
    let mut spec = json!({
        "source_table_full_name": body.remove("source_table_full_name"),
        "primary_key_columns": keys,
    });
    if continuous {
        spec["run_continuously"] = json!({});
    } else {
        spec["run_triggered"] = json!({});
    }
    if let Some(key) = take_str(&mut body, "timeseries_key") {
        spec["timeseries_key"] = json!(key);
    }

    Ok(json!({ "name": body.remove("name"), "spec": spec }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::call;

    #[test]
    fn test_create_online_table_spec() {
        let (_, calls) = call(
            module(),
            "databricks_create_online_table",
            json!({
                "name": "main.features.users_online",
                "source_table_full_name": "main.features.users",
                "primary_key_columns": "user_id"
            }),
        );
        assert_eq!(
            calls[0].body,
            Some(json!({
                "name": "main.features.users_online",
                "spec": {
                    "source_table_full_name": "main.features.users",
                    "primary_key_columns": ["user_id"],
                    "run_triggered": {}
                }
            }))
        );
    }
}
