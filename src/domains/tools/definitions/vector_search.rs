//! Vector Search endpoint and index tools.

use serde_json::{Map, Value, json};

use super::{parse_json_field, rest_module, split_list, take_str};
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::entry::Arguments;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "vector_search";

const DESCRIPTION: &str = "Provision vector search endpoints, build indexes and run similarity queries";

const USE_CASES: &[&str] = &[
    "build a rag retrieval index",
    "similarity search over embeddings",
    "sync a delta table into a vector index",
    "query nearest neighbors",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_vector_search_endpoints", "/api/2.0/vector-search/endpoints")
                .describe("List vector search endpoints.")
                .list("endpoints"),
            RestOperation::post("databricks_create_vector_search_endpoint", "/api/2.0/vector-search/endpoints")
                .describe("Provision a vector search endpoint.")
                .param(Param::string("name", "Endpoint name"))
                .param(Param::string("endpoint_type", "Endpoint type").default(json!("STANDARD")))
                .acknowledge("Vector search endpoint '{name}' creation initiated. Use databricks_get_vector_search_endpoint to check status.")
                .started(),
            RestOperation::get("databricks_get_vector_search_endpoint", "/api/2.0/vector-search/endpoints/{name}")
                .describe("Get a vector search endpoint and its state.")
                .param(Param::string("name", "Endpoint name")),
            RestOperation::delete("databricks_delete_vector_search_endpoint", "/api/2.0/vector-search/endpoints/{name}")
                .describe("Delete a vector search endpoint.")
                .param(Param::string("name", "Endpoint name"))
                .acknowledge("Vector search endpoint '{name}' deleted."),
            RestOperation::get("databricks_list_vector_search_indexes", "/api/2.0/vector-search/indexes")
                .describe("List the indexes hosted on an endpoint.")
                .param(Param::string("endpoint_name", "Endpoint name"))
                .list("vector_indexes"),
            RestOperation::post("databricks_create_vector_search_index", "/api/2.0/vector-search/indexes")
                .describe("Create an index. DELTA_SYNC indexes need source_table_name (and optionally embedding_model_endpoint_name); DIRECT_ACCESS indexes need embedding_dimension.")
                .param(Param::string("name", "Index name, catalog.schema.index"))
                .param(Param::string("endpoint_name", "Hosting endpoint"))
                .param(Param::string("primary_key", "Primary key column"))
                .param(Param::string("index_type", "DELTA_SYNC or DIRECT_ACCESS").default(json!("DELTA_SYNC")))
                .param(Param::string("source_table_name", "Source Delta table").optional())
                .param(Param::integer("embedding_dimension", "Vector dimension").optional())
                .param(Param::string("embedding_model_endpoint_name", "Endpoint computing embeddings").optional())
                .param(Param::string("embedding_source_column", "Text column to embed").optional())
                .body_with(index_body),
            RestOperation::delete("databricks_delete_vector_search_index", "/api/2.0/vector-search/indexes/{name}")
                .describe("Delete an index. The source table is not affected.")
                .param(Param::string("name", "Index name"))
                .acknowledge("Vector search index '{name}' deleted."),
            RestOperation::post("databricks_query_vector_search_index", "/api/2.0/vector-search/indexes/{index_name}/query")
                .describe("Run an approximate nearest neighbor query with query_text or a JSON query_vector.")
                .param(Param::string("index_name", "Index name"))
                .param(Param::string("columns", "Comma-separated columns to return"))
                .param(Param::string("query_text", "Text to embed and search").optional())
                .param(Param::string("query_vector", "JSON array of floats").optional())
                .param(Param::integer("num_results", "Results to return").default(json!(10)))
                .param(Param::string("filters_json", "JSON filter, e.g. {\"year >=\": 2020}").optional())
                .body_with(query_body),
        ],
    )
}

fn index_body(mut body: Arguments) -> Result<Value, ToolError> {
    let index_type = take_str(&mut body, "index_type").unwrap_or_else(|| "DELTA_SYNC".into());
    let source = take_str(&mut body, "source_table_name");
    let dimension = body.remove("embedding_dimension").and_then(|v| v.as_i64());
    let model_endpoint = take_str(&mut body, "embedding_model_endpoint_name");
    let source_column = take_str(&mut body, "embedding_source_column");

    match index_type.as_str() {
        "DELTA_SYNC" => {
            let source = source.ok_or_else(|| {
                ToolError::invalid_arguments("source_table_name is required for DELTA_SYNC indexes")
            })?;
            let mut spec = Map::new();
            spec.insert("source_table".into(), json!(source));
            spec.insert("pipeline_type".into(), json!("TRIGGERED"));
            if let Some(endpoint) = model_endpoint {
                let column = source_column.ok_or_else(|| {
                    ToolError::invalid_arguments(
                        "embedding_source_column is required with embedding_model_endpoint_name",
                    )
                })?;
                spec.insert(
                    "embedding_source_columns".into(),
                    json!([{ "name": column, "embedding_model_endpoint_name": endpoint }]),
                );
            }
            body.insert("delta_sync_index_spec".into(), Value::Object(spec));
        }
        "DIRECT_ACCESS" => {
            let dimension = dimension.filter(|d| *d > 0).ok_or_else(|| {
                ToolError::invalid_arguments(
                    "embedding_dimension must be a positive integer for DIRECT_ACCESS indexes",
                )
            })?;
            body.insert(
                "direct_access_index_spec".into(),
                json!({ "embedding_vector_columns": [{ "name": "embedding", "embedding_dimension": dimension }] }),
            );
        }
        other => {
            return Err(ToolError::invalid_arguments(format!(
                "invalid index_type '{}'; use DELTA_SYNC or DIRECT_ACCESS",
                other
            )));
        }
    }
    body.insert("index_type".into(), json!(index_type));
    Ok(Value::Object(body))
}

fn query_body(mut body: Arguments) -> Result<Value, ToolError> {
    let columns = take_str(&mut body, "columns").map(|c| split_list(&c)).unwrap_or_default();
    if columns.is_empty() {
        return Err(ToolError::invalid_arguments(
            "columns must list at least one column",
        ));
    }
    body.insert("columns".into(), json!(columns));

    if body.contains_key("query_text") {
        body.remove("query_vector");
    } else if body.contains_key("query_vector") {
        parse_json_field(&mut body, "query_vector")?;
    } else {
        return Err(ToolError::invalid_arguments(
            "provide query_text or query_vector",
        ));
    }
    Ok(Value::Object(body))
}
