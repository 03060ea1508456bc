//! Lakeflow Jobs tools: job definitions and runs.

use serde_json::{Map, Value, json};

use super::{rest_module, take_str};
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::entry::Arguments;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "jobs";

const DESCRIPTION: &str = "Create, trigger and monitor scheduled jobs and their runs";

const USE_CASES: &[&str] = &[
    "schedule a notebook job",
    "trigger a job run",
    "debug a failing job run",
    "get run output and errors",
    "cancel a running job",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            list_jobs(),
            RestOperation::get("databricks_get_job", "/api/2.1/jobs/get")
                .describe("Get a job definition: tasks, schedule, clusters and notifications.")
                .param(Param::integer("job_id", "Job id")),
            RestOperation::post("databricks_create_job", "/api/2.1/jobs/create")
                .describe("Create a job with a single notebook or Python file task. Provide exactly one of notebook_path or python_file.")
                .param(Param::string("name", "Job name"))
                .param(Param::string("task_key", "Unique task key (letters, digits, - and _)"))
                .param(Param::string("notebook_path", "Notebook to run").optional())
                .param(Param::string("python_file", "Python file to run, e.g. dbfs:/scripts/etl.py").optional())
                .param(Param::string("cluster_id", "Existing cluster for the task").optional())
                .body_with(job_body),
            RestOperation::post("databricks_delete_job", "/api/2.1/jobs/delete")
                .describe("Delete a job. Active runs are cancelled.")
                .param(Param::integer("job_id", "Job id"))
                .acknowledge("Job {job_id} has been deleted."),
            RestOperation::post("databricks_run_job", "/api/2.1/jobs/run-now")
                .describe("Trigger a run of a job with its default parameters.")
                .param(Param::integer("job_id", "Job id"))
                .acknowledge("Job {job_id} triggered. Run ID: {run_id}. Use databricks_get_run to check status.")
                .started(),
            RestOperation::get("databricks_list_runs", "/api/2.1/jobs/runs/list")
                .describe("List job runs, most recent first, optionally for one job.")
                .param(Param::integer("job_id", "Only runs of this job").optional())
                .param(Param::integer("limit", "Page size (max 25)").default(json!(25)))
                .list("runs"),
            RestOperation::get("databricks_get_run", "/api/2.1/jobs/runs/get")
                .describe("Get a run: state, result, timings and per-task status.")
                .param(Param::integer("run_id", "Run id")),
            RestOperation::post("databricks_cancel_run", "/api/2.1/jobs/runs/cancel")
                .describe("Cancel a job run.")
                .param(Param::integer("run_id", "Run id"))
                .acknowledge("Cancellation of run {run_id} initiated.")
                .started(),
            RestOperation::get("databricks_get_run_output", "/api/2.1/jobs/runs/get-output")
                .describe("Get the output, error and error trace of a single-task run.")
                .param(Param::integer("run_id", "Task run id")),
            RestOperation::get("databricks_export_run", "/api/2.1/jobs/runs/export")
                .describe("Export the notebook views of a run.")
                .param(Param::integer("run_id", "Task run id")),
        ],
    )
}

pub fn list_jobs() -> RestOperation {
    RestOperation::get("databricks_list_jobs", "/api/2.1/jobs/list")
        .describe("List jobs, optionally filtered by exact name.")
        .param(Param::integer("limit", "Page size (max 100)").default(json!(25)))
        .param(Param::string("name", "Exact job name filter").optional())
        .list("jobs")
}

fn job_body(mut body: Arguments) -> Result<Value, ToolError> {
    let notebook = take_str(&mut body, "notebook_path");
    let python = take_str(&mut body, "python_file");
    let cluster = take_str(&mut body, "cluster_id");

    let mut task = Map::new();
    task.insert("task_key".into(), body.remove("task_key").unwrap_or(Value::Null));
    match (notebook, python) {
        (Some(path), None) => {
            task.insert("notebook_task".into(), json!({ "notebook_path": path }));
        }
        (None, Some(file)) => {
            task.insert("spark_python_task".into(), json!({ "python_file": file }));
        }
        (Some(_), Some(_)) => {
            return Err(ToolError::invalid_arguments(
                "provide either notebook_path or python_file, not both",
            ));
        }
        (None, None) => {
            return Err(ToolError::invalid_arguments(
                "provide either notebook_path or python_file",
            ));
        }
    }
    if let Some(cluster) = cluster {
        task.insert("existing_cluster_id".into(), json!(cluster));
    }

    body.insert("tasks".into(), json!([task]));
    Ok(Value::Object(body))
}
