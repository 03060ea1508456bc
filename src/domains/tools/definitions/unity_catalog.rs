//! Unity Catalog tools: catalogs, schemas, tables, volumes, functions and
//! registered models.

use serde_json::json;

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "unity_catalog";

const DESCRIPTION: &str =
    "Browse and manage Unity Catalog catalogs, schemas, tables, volumes, functions and models";

const USE_CASES: &[&str] = &[
    "explore catalogs schemas and tables",
    "inspect table columns and metadata",
    "create or drop a schema",
    "manage volumes for files",
    "list user defined functions",
    "browse registered models",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            list_catalogs(),
            RestOperation::get("databricks_get_catalog", "/api/2.1/unity-catalog/catalogs/{name}")
                .describe("Get a catalog by name, including owner, comment and properties.")
                .param(Param::string("name", "Catalog name")),
            create_catalog(),
            RestOperation::delete("databricks_delete_catalog", "/api/2.1/unity-catalog/catalogs/{name}")
                .describe("Delete a catalog. Set force to delete it even when it is not empty.")
                .param(Param::string("name", "Catalog name"))
                .param(Param::boolean("force", "Delete even if the catalog contains schemas").default(json!(false)))
                .acknowledge("Catalog '{name}' deleted."),
            RestOperation::get("databricks_list_schemas", "/api/2.1/unity-catalog/schemas")
                .describe("List the schemas of a catalog.")
                .param(Param::string("catalog_name", "Parent catalog"))
                .list("schemas"),
            RestOperation::get("databricks_get_schema", "/api/2.1/unity-catalog/schemas/{full_name}")
                .describe("Get a schema by its full name (catalog.schema).")
                .param(Param::string("full_name", "Full schema name, e.g. main.default")),
            create_schema(),
            RestOperation::delete("databricks_delete_schema", "/api/2.1/unity-catalog/schemas/{full_name}")
                .describe("Delete an empty schema.")
                .param(Param::string("full_name", "Full schema name"))
                .acknowledge("Schema '{full_name}' deleted."),
            RestOperation::get("databricks_list_tables", "/api/2.1/unity-catalog/tables")
                .describe("List the tables and views of a schema.")
                .param(Param::string("catalog_name", "Parent catalog"))
                .param(Param::string("schema_name", "Parent schema"))
                .list("tables"),
            get_table(),
            RestOperation::delete("databricks_delete_table", "/api/2.1/unity-catalog/tables/{full_name}")
                .describe("Drop a table or view.")
                .param(Param::string("full_name", "Full table name"))
                .acknowledge("Table '{full_name}' deleted."),
            RestOperation::get("databricks_list_volumes", "/api/2.1/unity-catalog/volumes")
                .describe("List the volumes of a schema.")
                .param(Param::string("catalog_name", "Parent catalog"))
                .param(Param::string("schema_name", "Parent schema"))
                .list("volumes"),
            RestOperation::post("databricks_create_volume", "/api/2.1/unity-catalog/volumes")
                .describe("Create a managed or external volume.")
                .param(Param::string("name", "Volume name"))
                .param(Param::string("catalog_name", "Parent catalog"))
                .param(Param::string("schema_name", "Parent schema"))
                .param(Param::string("volume_type", "MANAGED or EXTERNAL").default(json!("MANAGED")))
                .param(Param::string("storage_location", "Cloud location, required for EXTERNAL volumes").optional())
                .param(Param::string("comment", "Description").optional()),
            RestOperation::delete("databricks_delete_volume", "/api/2.1/unity-catalog/volumes/{full_name}")
                .describe("Delete a volume. Files of managed volumes are removed too.")
                .param(Param::string("full_name", "Full volume name"))
                .acknowledge("Volume '{full_name}' deleted."),
            RestOperation::get("databricks_list_functions", "/api/2.1/unity-catalog/functions")
                .describe("List the functions of a schema.")
                .param(Param::string("catalog_name", "Parent catalog"))
                .param(Param::string("schema_name", "Parent schema"))
                .list("functions"),
            RestOperation::get("databricks_get_function", "/api/2.1/unity-catalog/functions/{full_name}")
                .describe("Get a function, including its signature and body.")
                .param(Param::string("full_name", "Full function name")),
            RestOperation::delete("databricks_delete_function", "/api/2.1/unity-catalog/functions/{full_name}")
                .describe("Drop a function.")
                .param(Param::string("full_name", "Full function name"))
                .acknowledge("Function '{full_name}' deleted."),
            RestOperation::get("databricks_list_registered_models", "/api/2.1/unity-catalog/models")
                .describe("List registered models, optionally restricted to a catalog or schema.")
                .param(Param::string("catalog_name", "Catalog filter").optional())
                .param(Param::string("schema_name", "Schema filter").optional())
                .list("registered_models"),
            RestOperation::get("databricks_get_registered_model", "/api/2.1/unity-catalog/models/{full_name}")
                .describe("Get a registered model and its aliases.")
                .param(Param::string("full_name", "Full model name")),
        ],
    )
}

pub fn list_catalogs() -> RestOperation {
    RestOperation::get("databricks_list_catalogs", "/api/2.1/unity-catalog/catalogs")
        .describe("List the catalogs visible to the current user.")
        .list("catalogs")
}

pub fn create_catalog() -> RestOperation {
    RestOperation::post("databricks_create_catalog", "/api/2.1/unity-catalog/catalogs")
        .describe("Create a catalog.")
        .param(Param::string("name", "Catalog name"))
        .param(Param::string("comment", "Description").optional())
}

pub fn create_schema() -> RestOperation {
    RestOperation::post("databricks_create_schema", "/api/2.1/unity-catalog/schemas")
        .describe("Create a schema inside a catalog.")
        .param(Param::string("name", "Schema name"))
        .param(Param::string("catalog_name", "Parent catalog"))
        .param(Param::string("comment", "Description").optional())
}

pub fn get_table() -> RestOperation {
    RestOperation::get("databricks_get_table", "/api/2.1/unity-catalog/tables/{full_name}")
        .describe("Get table metadata: columns, format, location, owner and properties.")
        .param(Param::string("full_name", "Full table name, e.g. main.default.trips"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::client::HttpMethod;
    use crate::domains::tools::definitions::call;
    use crate::domains::tools::operation::arguments;

    #[test]
    fn test_delete_catalog_sends_force_in_query() {
        let (outcome, calls) = call(
            module(),
            "databricks_delete_catalog",
            json!({"name": "sandbox", "force": true}),
        );
        assert_eq!(outcome, json!("Catalog 'sandbox' deleted."));
        assert_eq!(calls[0].method, HttpMethod::Delete);
        assert_eq!(calls[0].path, "/api/2.1/unity-catalog/catalogs/sandbox");
        assert_eq!(calls[0].query, vec![("force".to_string(), "true".to_string())]);
    }

    #[test]
    fn test_create_schema_body() {
        let req = create_schema()
            .build_request(&arguments(json!({"name": "bronze", "catalog_name": "main", "comment": ""})))
            .unwrap();
        assert_eq!(req.path, "/api/2.1/unity-catalog/schemas");
        assert_eq!(req.body, Some(json!({"name": "bronze", "catalog_name": "main"})));
    }
}
