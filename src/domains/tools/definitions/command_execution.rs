//! Command execution tools (the 1.2 API) for running code on a cluster.

use serde_json::json;

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "command_execution";

const DESCRIPTION: &str = "Run Python, SQL or Scala commands interactively on a running cluster";

const USE_CASES: &[&str] = &[
    "run python code on a cluster",
    "execute a scala snippet",
    "interactive debugging on compute",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::post("databricks_create_execution_context", "/api/1.2/contexts/create")
                .describe("Create an execution context on a running cluster.")
                .param(Param::string("cluster_id", "Cluster id").api_name("clusterId"))
                .param(Param::string("language", "python, sql or scala").default(json!("python"))),
            RestOperation::get("databricks_get_context_status", "/api/1.2/contexts/status")
                .describe("Get the status of an execution context.")
                .param(Param::string("cluster_id", "Cluster id").api_name("clusterId"))
                .param(Param::string("context_id", "Context id").api_name("contextId")),
            RestOperation::post("databricks_destroy_execution_context", "/api/1.2/contexts/destroy")
                .describe("Destroy an execution context.")
                .param(Param::string("cluster_id", "Cluster id").api_name("clusterId"))
                .param(Param::string("context_id", "Context id").api_name("contextId"))
                .acknowledge("Execution context {context_id} destroyed."),
            RestOperation::post("databricks_execute_command", "/api/1.2/commands/execute")
                .describe("Submit a command in an execution context. Returns a command id.")
                .param(Param::string("cluster_id", "Cluster id").api_name("clusterId"))
                .param(Param::string("context_id", "Context id").api_name("contextId"))
                .param(Param::string("command", "Code to run"))
                .param(Param::string("language", "python, sql or scala").default(json!("python")))
                .started(),
            RestOperation::get("databricks_get_command_status", "/api/1.2/commands/status")
                .describe("Get the status and results of a command.")
                .param(Param::string("cluster_id", "Cluster id").api_name("clusterId"))
                .param(Param::string("context_id", "Context id").api_name("contextId"))
                .param(Param::string("command_id", "Command id").api_name("commandId")),
            RestOperation::post("databricks_cancel_command", "/api/1.2/commands/cancel")
                .describe("Cancel a running command.")
                .param(Param::string("cluster_id", "Cluster id").api_name("clusterId"))
                .param(Param::string("context_id", "Context id").api_name("contextId"))
                .param(Param::string("command_id", "Command id").api_name("commandId"))
                .acknowledge("Command {command_id} cancelled."),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::call;

    #[test]
    fn test_wire_names_are_camel_case() {
        let (_, calls) = call(
            module(),
            "databricks_get_command_status",
            json!({"cluster_id": "c-1", "context_id": "x-1", "command_id": "cmd-1"}),
        );
        assert_eq!(
            calls[0].query,
            vec![
                ("clusterId".to_string(), "c-1".to_string()),
                ("contextId".to_string(), "x-1".to_string()),
                ("commandId".to_string(), "cmd-1".to_string()),
            ]
        );
    }
}
