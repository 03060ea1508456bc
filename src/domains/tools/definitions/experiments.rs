//! MLflow experiment and run tracking tools.

use serde_json::{Value, json};

use super::{list_field, rest_module};
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::entry::Arguments;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "experiments";

const DESCRIPTION: &str = "Track machine learning experiments, runs, metrics and parameters with MLflow";

const USE_CASES: &[&str] = &[
    "track ml experiments",
    "compare training runs",
    "log metrics and parameters",
    "search runs by metric",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_experiments", "/api/2.0/mlflow/experiments/list")
                .describe("List MLflow experiments.")
                .param(Param::integer("max_results", "Page size").default(json!(25)))
                .list("experiments"),
            RestOperation::get("databricks_get_experiment", "/api/2.0/mlflow/experiments/get")
                .describe("Get an experiment by id.")
                .param(Param::string("experiment_id", "Experiment id")),
            RestOperation::post("databricks_create_experiment", "/api/2.0/mlflow/experiments/create")
                .describe("Create an experiment. name is a workspace path such as /Users/me/churn.")
                .param(Param::string("name", "Experiment path"))
                .param(Param::string("artifact_location", "Artifact storage location").optional()),
            RestOperation::post("databricks_delete_experiment", "/api/2.0/mlflow/experiments/delete")
                .describe("Mark an experiment and its runs as deleted.")
                .param(Param::string("experiment_id", "Experiment id"))
                .acknowledge("Experiment '{experiment_id}' deleted."),
            RestOperation::post("databricks_search_runs", "/api/2.0/mlflow/runs/search")
                .describe("Search runs of one or more experiments, e.g. filter \"metrics.rmse < 1\" ordered by \"metrics.rmse ASC\".")
                .param(Param::string("experiment_ids", "Comma-separated experiment ids"))
                .param(Param::string("filter", "MLflow search filter").optional())
                .param(Param::string("order_by", "Comma-separated order clauses").optional())
                .param(Param::integer("max_results", "Page size").default(json!(25)))
                .body_with(search_body)
                .list("runs"),
            RestOperation::get("databricks_get_experiment_run", "/api/2.0/mlflow/runs/get")
                .describe("Get an MLflow run with its metrics, params and tags.")
                .param(Param::string("run_id", "Run id")),
            RestOperation::post("databricks_log_metric", "/api/2.0/mlflow/runs/log-metric")
                .describe("Log a metric value for a run.")
                .param(Param::string("run_id", "Run id"))
                .param(Param::string("key", "Metric name"))
                .param(Param::number("value", "Metric value"))
                .param(Param::integer("step", "Training step").default(json!(0)))
                .body_with(metric_body)
                .acknowledge("Metric '{key}' = {value} logged for run '{run_id}'."),
            RestOperation::post("databricks_log_param", "/api/2.0/mlflow/runs/log-parameter")
                .describe("Log a parameter for a run.")
                .param(Param::string("run_id", "Run id"))
                .param(Param::string("key", "Parameter name"))
                .param(Param::string("value", "Parameter value"))
                .acknowledge("Parameter '{key}' logged for run '{run_id}'."),
        ],
    )
}

fn search_body(mut body: Arguments) -> Result<Value, ToolError> {
    list_field(&mut body, "experiment_ids");
    list_field(&mut body, "order_by");
    Ok(Value::Object(body))
}

fn metric_body(mut body: Arguments) -> Result<Value, ToolError> {
    body.insert(
        "timestamp".into(),
        json!(chrono::Utc::now().timestamp_millis()),
    );
    Ok(Value::Object(body))
}
