//! Model serving endpoint tools.

use serde_json::{Value, json};

use super::{parse_json_field, rest_module, take_str};
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::entry::Arguments;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "serving";

const DESCRIPTION: &str = "Deploy, query and monitor model serving endpoints";

const USE_CASES: &[&str] = &[
    "deploy a model to a serving endpoint",
    "query a model for predictions",
    "call an llm endpoint",
    "inspect endpoint build logs",
    "list model versions",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            list_serving_endpoints(),
            RestOperation::get("databricks_get_serving_endpoint", "/api/2.0/serving-endpoints/{name}")
                .describe("Get a serving endpoint: readiness, served entities and traffic config.")
                .param(Param::string("name", "Endpoint name")),
            RestOperation::post("databricks_create_serving_endpoint", "/api/2.0/serving-endpoints")
                .describe("Create an endpoint serving one model version.")
                .param(Param::string("name", "Endpoint name"))
                .param(Param::string("model_name", "Model, e.g. catalog.schema.model"))
                .param(Param::string("model_version", "Model version"))
                .param(Param::string("workload_size", "Small, Medium or Large").default(json!("Small")))
                .param(Param::boolean("scale_to_zero", "Scale to zero when idle").default(json!(true)))
                .body_with(create_body)
                .acknowledge("Serving endpoint '{name}' creation initiated. Use databricks_get_serving_endpoint to check readiness.")
                .started(),
            RestOperation::put("databricks_update_serving_endpoint", "/api/2.0/serving-endpoints/{name}/config")
                .describe("Serve a different model version on an existing endpoint.")
                .param(Param::string("name", "Endpoint name"))
                .param(Param::string("model_name", "Model"))
                .param(Param::string("model_version", "Model version"))
                .param(Param::string("workload_size", "Small, Medium or Large").default(json!("Small")))
                .param(Param::boolean("scale_to_zero", "Scale to zero when idle").default(json!(true)))
                .body_with(config_body)
                .acknowledge("Configuration update of endpoint '{name}' initiated.")
                .started(),
            RestOperation::delete("databricks_delete_serving_endpoint", "/api/2.0/serving-endpoints/{name}")
                .describe("Delete a serving endpoint.")
                .param(Param::string("name", "Endpoint name"))
                .acknowledge("Serving endpoint '{name}' deleted."),
            RestOperation::post("databricks_query_serving_endpoint", "/serving-endpoints/{name}/invocations")
                .describe("Query an endpoint. inputs is a JSON document whose shape depends on the model: records for ML models, {\"prompt\": ...} for completions, {\"input\": [...]} for embeddings.")
                .param(Param::string("name", "Endpoint name"))
                .param(Param::string("inputs", "JSON-encoded model input"))
                .body_with(query_body),
            RestOperation::get(
                "databricks_get_serving_endpoint_logs",
                "/api/2.0/serving-endpoints/{name}/served-models/{served_model_name}/build-logs",
            )
            .describe("Get the container build logs of a served model.")
            .param(Param::string("name", "Endpoint name"))
            .param(Param::string("served_model_name", "Served model name")),
            RestOperation::get(
                "databricks_list_serving_endpoint_permissions",
                "/api/2.0/permissions/serving-endpoints/{endpoint_id}/permissionLevels",
            )
            .describe("List the permission levels that can be granted on an endpoint.")
            .param(Param::string("endpoint_id", "Endpoint id")),
            RestOperation::get(
                "databricks_list_model_versions",
                "/api/2.1/unity-catalog/models/{full_model_name}/versions",
            )
            .describe("List the versions of a Unity Catalog model.")
            .param(Param::string("full_model_name", "Full model name"))
            .list("model_versions"),
        ],
    )
}

pub fn list_serving_endpoints() -> RestOperation {
    RestOperation::get("databricks_list_serving_endpoints", "/api/2.0/serving-endpoints")
        .describe("List serving endpoints with their readiness state.")
        .list("endpoints")
}

fn served_entity(body: &mut Arguments) -> Value {
    json!({
        "entity_name": take_str(body, "model_name"),
        "entity_version": take_str(body, "model_version"),
        "workload_size": take_str(body, "workload_size"),
        "scale_to_zero_enabled": body.remove("scale_to_zero").unwrap_or(json!(true)),
    })
}

fn create_body(mut body: Arguments) -> Result<Value, ToolError> {
    let entity = served_entity(&mut body);
    Ok(json!({
        "name": body.remove("name"),
        "config": { "served_entities": [entity] },
    }))
}

fn config_body(mut body: Arguments) -> Result<Value, ToolError> {
    Ok(json!({ "served_entities": [served_entity(&mut body)] }))
}

fn query_body(mut body: Arguments) -> Result<Value, ToolError> {
    parse_json_field(&mut body, "inputs")?;
    Ok(Value::Object(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::call;
    use crate::domains::tools::operation::arguments;

    #[test]
    fn test_create_endpoint_body() {
        let (value, calls) = call(
            module(),
            "databricks_create_serving_endpoint",
            json!({"name": "churn", "model_name": "main.ml.churn", "model_version": "3"}),
        );
        assert_eq!(
            calls[0].body,
            Some(json!({
                "name": "churn",
                "config": {"served_entities": [{
                    "entity_name": "main.ml.churn",
                    "entity_version": "3",
                    "workload_size": "Small",
                    "scale_to_zero_enabled": true
                }]}
            }))
        );
        assert!(value.as_str().unwrap().contains("creation initiated"));
    }

    #[test]
    fn test_query_rejects_invalid_json() {
        let op = RestOperation::post("q", "/serving-endpoints/{name}/invocations")
            .param(Param::string("name", ""))
            .param(Param::string("inputs", ""))
            .body_with(query_body);
        let err = op
            .build_request(&arguments(json!({"name": "e", "inputs": "{oops"})))
            .unwrap_err();
        assert!(err.to_string().contains("invalid JSON in 'inputs'"));

        let req = op
            .build_request(&arguments(json!({"name": "e", "inputs": "{\"prompt\": \"hi\"}"})))
            .unwrap();
        assert_eq!(req.body, Some(json!({"inputs": {"prompt": "hi"}})));
    }
}
