//! Composite workflow tools.
//!
//! These tools chain several REST calls in one invocation. They are grouped
//! in the `workflows` module and filtered like any other module; the
//! aggregation rules live in [`composer`].
//!
//! ## Architecture
//!
//! - `composer.rs` - Concurrent step execution and three-way status
//! - `status.rs` - Workspace health overview
//! - `schema.rs` - Catalog and schema setup
//! - `warehouse.rs` - Warehouse discovery, table preview and markdown queries

pub mod composer;
mod schema;
mod status;
mod warehouse;

pub use composer::{CompositeResult, Step, StepOutcome, StepReport, WorkflowStatus, run_all};

use serde_json::Value;
use std::sync::Arc;

use crate::domains::tools::operation::{Param, params_schema, resolve_params};
use crate::domains::tools::{
    Arguments, Completion, InvocationContext, Operation, ToolEntry, ToolError, ToolModule,
};

pub const NAME: &str = "workflows";

const DESCRIPTION: &str =
    "Composite tools that combine several operations: health checks, setup, table previews";

const USE_CASES: &[&str] = &[
    "workspace health check overview",
    "set up a new catalog and schema",
    "find a running warehouse for queries",
    "preview a table with sample rows",
    "show query results as a markdown table",
];

type RunFn = fn(&InvocationContext, &Arguments) -> Result<Value, ToolError>;

/// A workflow tool: its parameters and the function that runs it.
struct Workflow {
    params: Vec<Param>,
    run: RunFn,
}

impl Operation for Workflow {
    fn invoke(&self, ctx: &InvocationContext, args: &Arguments) -> Result<Value, ToolError> {
        let args = resolve_params(&self.params, args)?;
        (self.run)(ctx, &args)
    }
}

fn workflow(
    name: &'static str,
    description: &'static str,
    params: Vec<Param>,
    completion: Completion,
    run: RunFn,
) -> ToolEntry {
    let schema = Arc::new(params_schema(&params));
    ToolEntry::new(
        name,
        NAME,
        description,
        schema,
        completion,
        Arc::new(Workflow { params, run }),
    )
}

/// The `workflows` module.
pub fn module() -> ToolModule {
    ToolModule::new(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            workflow(
                "databricks_workspace_status",
                "Health overview of the workspace in one call: authentication, clusters, SQL warehouses, jobs, serving endpoints and catalogs. Each section is reported independently; the overall status is complete, degraded or failed.",
                Vec::new(),
                Completion::Immediate,
                status::run,
            ),
            workflow(
                "databricks_setup_schema",
                "Create a schema, optionally creating its catalog first (an existing catalog is reported as already_exists).",
                schema::params(),
                Completion::Immediate,
                schema::run,
            ),
            workflow(
                "databricks_find_and_start_warehouse",
                "Find a running SQL warehouse, or start the first stopped one. Returns the warehouse id to use for queries.",
                Vec::new(),
                Completion::Started,
                warehouse::find_and_start,
            ),
            workflow(
                "databricks_table_preview",
                "Preview a table's columns and sample rows in one call. Finds a running warehouse when none is given.",
                warehouse::preview_params(),
                Completion::Immediate,
                warehouse::table_preview,
            ),
            workflow(
                "databricks_query_as_markdown",
                "Execute a SQL statement and return the result as a markdown table (first 100 rows).",
                warehouse::markdown_params(),
                Completion::Immediate,
                warehouse::query_as_markdown,
            ),
        ],
    )
}

/// Read a string argument that `resolve_params` has already validated.
fn str_arg<'a>(args: &'a Arguments, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

/// Run a REST operation with the given arguments.
fn call(
    op: impl Operation,
    ctx: &InvocationContext,
    args: Value,
) -> Result<Value, ToolError> {
    let args = match args {
        Value::Object(map) => map,
        _ => Arguments::new(),
    };
    op.invoke(ctx, &args)
}

/// Items of a list response produced by `collect_pages`.
fn items<'a>(page: &'a Value, key: &str) -> &'a [Value] {
    page.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Upper-cased `state` field of a remote object.
fn state_of(item: &Value) -> String {
    item.get("state")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::client::testing::MockClient;
    use crate::domains::tools::operation::arguments;
    use crate::domains::tools::ToolOutcome;
    use serde_json::json;

    pub(super) fn ctx_for(mock: MockClient) -> (Arc<MockClient>, InvocationContext) {
        let (client, provider) = mock.into_provider();
        (client, InvocationContext::new(provider, 100))
    }

    pub(super) fn invoke(ctx: &InvocationContext, tool: &str, args: Value) -> ToolOutcome {
        let module = module();
        let entry = module
            .entries()
            .iter()
            .find(|e| e.name() == tool)
            .unwrap_or_else(|| panic!("{} missing", tool));
        entry.invoke(ctx, &arguments(args))
    }

    #[test]
    fn test_module_shape() {
        let module = module();
        assert_eq!(module.name(), "workflows");
        let names: Vec<_> = module.entries().iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            vec![
                "databricks_workspace_status",
                "databricks_setup_schema",
                "databricks_find_and_start_warehouse",
                "databricks_table_preview",
                "databricks_query_as_markdown",
            ]
        );
    }

    #[test]
    fn test_missing_argument_is_a_failure() {
        let (_, ctx) = ctx_for(MockClient::new());
        match invoke(&ctx, "databricks_table_preview", json!({})) {
            ToolOutcome::Failure(msg) => {
                assert!(msg.starts_with("Error calling databricks_table_preview:"));
                assert!(msg.contains("table_name"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
