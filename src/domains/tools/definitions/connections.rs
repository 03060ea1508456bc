//! Unity Catalog connection tools (Lakehouse Federation).

use serde_json::{Value, json};

use super::{parse_json_field, rest_module};
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::entry::Arguments;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "connections";

const DESCRIPTION: &str = "Manage connections to external databases for federated queries";

const USE_CASES: &[&str] = &[
    "connect to an external database",
    "query postgres mysql or snowflake through federation",
    "update connection credentials",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_connections", "/api/2.1/unity-catalog/connections")
                .describe("List connections.")
                .list("connections"),
            RestOperation::get("databricks_get_connection", "/api/2.1/unity-catalog/connections/{name}")
                .describe("Get a connection. Secret options are not returned.")
                .param(Param::string("name", "Connection name")),
            RestOperation::post("databricks_create_connection", "/api/2.1/unity-catalog/connections")
                .describe("Create a connection. host and port are merged into options; options_json adds type-specific options such as user and password.")
                .param(Param::string("name", "Connection name"))
                .param(Param::string("connection_type", "MYSQL, POSTGRESQL, SNOWFLAKE, SQLSERVER, REDSHIFT, ..."))
                .param(Param::string("host", "Database host"))
                .param(Param::integer("port", "Database port").default(json!(443)))
                .param(Param::string("options_json", "JSON object of extra options").optional().api_name("options"))
                .param(Param::string("comment", "Description").optional())
                .body_with(create_body),
            RestOperation::patch("databricks_update_connection", "/api/2.1/unity-catalog/connections/{name}")
                .describe("Update the options or the name of a connection.")
                .param(Param::string("name", "Connection name"))
                .param(Param::string("options_json", "JSON object of options").optional().api_name("options"))
                .param(Param::string("new_name", "New name").optional())
                .body_with(update_body),
            RestOperation::delete("databricks_delete_connection", "/api/2.1/unity-catalog/connections/{name}")
                .describe("Delete a connection.")
                .param(Param::string("name", "Connection name"))
                .acknowledge("Connection '{name}' deleted."),
        ],
    )
}

/// Connection options are a string map on the wire.
fn stringify_options(body: &mut Arguments) -> Result<serde_json::Map<String, Value>, ToolError> {
    parse_json_field(body, "options")?;
    match body.remove("options") {
        None => Ok(serde_json::Map::new()),
        Some(Value::Object(map)) => Ok(map
            .into_iter()
            .map(|(k, v)| {
                let text = match v {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, Value::String(text))
            })
            .collect()),
        Some(_) => Err(ToolError::invalid_arguments(
            "options_json must be a JSON object",
        )),
    }
}

fn create_body(mut body: Arguments) -> Result<Value, ToolError> {
    let mut options = stringify_options(&mut body)?;
    if let Some(host) = body.remove("host") {
        options.insert("host".into(), host);
    }
    if let Some(port) = body.remove("port") {
        options.insert("port".into(), json!(port.to_string()));
    }
    body.insert("options".into(), Value::Object(options));
    Ok(Value::Object(body))
}

fn update_body(mut body: Arguments) -> Result<Value, ToolError> {
    let options = stringify_options(&mut body)?;
    if options.is_empty() && !body.contains_key("new_name") {
        return Err(ToolError::invalid_arguments(
            "provide options_json or new_name",
        ));
    }
    if !options.is_empty() {
        body.insert("options".into(), Value::Object(options));
    }
    Ok(Value::Object(body))
}
