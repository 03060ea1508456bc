//! Lakebase (managed PostgreSQL) tools.

use serde_json::{Value, json};

use super::{list_field, parse_json_field, rest_module};
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::entry::Arguments;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "database";

const DESCRIPTION: &str = "Provision Lakebase PostgreSQL instances, catalogs, tables and credentials";

const USE_CASES: &[&str] = &[
    "create a postgres database",
    "serve low latency transactional data",
    "generate database credentials",
    "register a database catalog in unity catalog",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_database_instances", "/api/2.0/database/instances")
                .describe("List Lakebase database instances.")
                .list("database_instances"),
            RestOperation::get("databricks_get_database_instance", "/api/2.0/database/instances/{name}")
                .describe("Get a database instance: state, capacity and connection endpoint.")
                .param(Param::string("name", "Instance name")),
            RestOperation::post("databricks_create_database_instance", "/api/2.0/database/instances")
                .describe("Provision a database instance. Use databricks_get_database_instance to check when it is available.")
                .param(Param::string("name", "Instance name"))
                .param(Param::integer("capacity", "Capacity units (1, 2, 4 or 8)").default(json!(1)))
                .body_with(instance_body)
                .started(),
            RestOperation::delete("databricks_delete_database_instance", "/api/2.0/database/instances/{name}")
                .describe("Delete a database instance and all of its data.")
                .param(Param::string("name", "Instance name"))
                .param(Param::boolean("force", "Also delete descendant instances").default(json!(false)))
                .param(Param::boolean("purge", "Hard delete").default(json!(true)))
                .acknowledge("Database instance '{name}' deletion initiated.")
                .started(),
            RestOperation::post("databricks_create_database_catalog", "/api/2.0/database/catalogs")
                .describe("Register a Postgres database of an instance as a Unity Catalog catalog.")
                .param(Param::string("name", "Catalog name"))
                .param(Param::string("database_instance_name", "Instance name"))
                .param(Param::string("database_name", "Postgres database").default(json!("databricks_postgres")))
                .param(Param::boolean("create_database_if_not_exists", "Create the database").default(json!(true))),
            RestOperation::get("databricks_list_database_catalogs", "/api/2.0/database/instances/{instance_name}/catalogs")
                .describe("List the catalogs (logical databases) of a database instance.")
                .param(Param::string("instance_name", "Instance name"))
                .list("database_catalogs"),
            RestOperation::get("databricks_get_database_catalog", "/api/2.0/database/catalogs/{name}")
                .describe("Get a database catalog.")
                .param(Param::string("name", "Catalog name")),
            RestOperation::post("databricks_create_database_table", "/api/2.0/database/tables")
                .describe("Create a table in a database catalog. columns_json is a JSON array like [{\"name\": \"id\", \"type\": \"INTEGER\"}].")
                .param(Param::string("name", "Full table name, catalog.schema.table"))
                .param(Param::string("columns_json", "JSON array of column definitions").api_name("columns"))
                .body_with(table_body),
            RestOperation::get("databricks_list_database_tables", "/api/2.0/database/instances/{instance_name}/tables")
                .describe("List the tables of one schema in a database catalog. Defaults to the public schema.")
                .param(Param::string("instance_name", "Instance name"))
                .param(Param::string("catalog_name", "Catalog containing the tables"))
                .param(Param::string("schema_name", "Schema to list").default(json!("public")))
                .list("database_tables"),
            RestOperation::post("databricks_generate_database_credential", "/api/2.0/database/credentials")
                .describe("Generate a short-lived credential for connecting with standard Postgres clients.")
                .param(Param::string("instance_names", "Comma-separated instance names"))
                .body_with(credential_body),
            RestOperation::get("databricks_list_database_roles", "/api/2.0/database/instances/{instance_name}/roles")
                .describe("List the Postgres roles of an instance.")
                .param(Param::string("instance_name", "Instance name"))
                .list("database_instance_roles"),
        ],
    )
}

fn instance_body(mut body: Arguments) -> Result<Value, ToolError> {
    let capacity = body.remove("capacity").and_then(|v| v.as_i64()).unwrap_or(1);
    body.insert("capacity".into(), json!(format!("CU_{}", capacity)));
    Ok(Value::Object(body))
}

fn table_body(mut body: Arguments) -> Result<Value, ToolError> {
    parse_json_field(&mut body, "columns")?;
    if !body.get("columns").map(Value::is_array).unwrap_or(false) {
        return Err(ToolError::invalid_arguments("columns_json must be a JSON array"));
    }
    Ok(Value::Object(body))
}

fn credential_body(mut body: Arguments) -> Result<Value, ToolError> {
    list_field(&mut body, "instance_names");
    body.insert(
        "request_id".into(),
        json!(format!("mcp-{}", chrono::Utc::now().timestamp_millis())),
    );
    Ok(Value::Object(body))
}
