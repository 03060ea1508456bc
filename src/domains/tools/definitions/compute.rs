//! Cluster, instance pool and cluster policy tools.

use serde_json::{Value, json};

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::entry::Arguments;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "compute";

const DESCRIPTION: &str = "Create, start, resize and terminate clusters; inspect pools and policies";

const USE_CASES: &[&str] = &[
    "list running clusters",
    "create a spark cluster",
    "start restart or terminate a cluster",
    "resize cluster workers",
    "inspect instance pools and cluster policies",
    "find spark runtime versions and node types",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            list_clusters(),
            RestOperation::get("databricks_get_cluster", "/api/2.1/clusters/get")
                .describe("Get a cluster: state, configuration and termination reason.")
                .param(Param::string("cluster_id", "Cluster id")),
            RestOperation::post("databricks_create_cluster", "/api/2.1/clusters/create")
                .describe("Create an all-purpose cluster. Autoscaling is used when autoscale_min and autoscale_max are both positive, otherwise num_workers is fixed (0 for single node).")
                .param(Param::string("cluster_name", "Display name"))
                .param(Param::string("spark_version", "Runtime key, e.g. 15.4.x-scala2.12"))
                .param(Param::string("node_type_id", "Instance type, e.g. i3.xlarge"))
                .param(Param::integer("num_workers", "Fixed number of workers").default(json!(0)))
                .param(Param::integer("autoscale_min", "Minimum workers when autoscaling").default(json!(0)))
                .param(Param::integer("autoscale_max", "Maximum workers when autoscaling").default(json!(0)))
                .body_with(cluster_body),
            RestOperation::post("databricks_start_cluster", "/api/2.1/clusters/start")
                .describe("Start a terminated cluster.")
                .param(Param::string("cluster_id", "Cluster id"))
                .acknowledge("Cluster '{cluster_id}' start initiated. Use databricks_get_cluster to check its state.")
                .started(),
            RestOperation::post("databricks_terminate_cluster", "/api/2.1/clusters/delete")
                .describe("Terminate a cluster. Its configuration is kept and it can be started again.")
                .param(Param::string("cluster_id", "Cluster id"))
                .acknowledge("Cluster '{cluster_id}' termination initiated.")
                .started(),
            RestOperation::post("databricks_restart_cluster", "/api/2.1/clusters/restart")
                .describe("Restart a running cluster.")
                .param(Param::string("cluster_id", "Cluster id"))
                .acknowledge("Cluster '{cluster_id}' restart initiated.")
                .started(),
            RestOperation::post("databricks_resize_cluster", "/api/2.1/clusters/resize")
                .describe("Change the number of workers of a running cluster.")
                .param(Param::string("cluster_id", "Cluster id"))
                .param(Param::integer("num_workers", "New worker count"))
                .acknowledge("Cluster '{cluster_id}' resize to {num_workers} workers initiated.")
                .started(),
            RestOperation::get("databricks_list_instance_pools", "/api/2.0/instance-pools/list")
                .describe("List instance pools with idle and used instance counts.")
                .list("instance_pools"),
            RestOperation::get("databricks_get_instance_pool", "/api/2.0/instance-pools/get")
                .describe("Get an instance pool.")
                .param(Param::string("instance_pool_id", "Pool id")),
            RestOperation::get("databricks_list_cluster_policies", "/api/2.0/policies/clusters/list")
                .describe("List cluster policies.")
                .list("policies"),
            RestOperation::get("databricks_list_spark_versions", "/api/2.1/clusters/spark-versions")
                .describe("List available Databricks runtime versions."),
            RestOperation::get("databricks_list_node_types", "/api/2.1/clusters/list-node-types")
                .describe("List available node (instance) types."),
        ],
    )
}

pub fn list_clusters() -> RestOperation {
    RestOperation::get("databricks_list_clusters", "/api/2.1/clusters/list")
        .describe("List clusters with their state, size and runtime.")
        .list("clusters")
}

fn cluster_body(mut body: Arguments) -> Result<Value, ToolError> {
    let min = body.remove("autoscale_min").and_then(|v| v.as_i64()).unwrap_or(0);
    let max = body.remove("autoscale_max").and_then(|v| v.as_i64()).unwrap_or(0);
    if min > 0 && max > 0 {
        if min > max {
            return Err(ToolError::invalid_arguments(
                "autoscale_min must not exceed autoscale_max",
            ));
        }
        body.remove("num_workers");
        body.insert(
            "autoscale".into(),
            json!({ "min_workers": min, "max_workers": max }),
        );
    }
    Ok(Value::Object(body))
}
