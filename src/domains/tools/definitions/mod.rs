//! Tool definitions, one file per service domain.
//!
//! Each file exposes `module()` returning its [`ToolModule`], plus the
//! individual operations other code reuses (the workflow tools build on
//! `compute::list_clusters`, `sql::execute_sql` and friends).

pub mod apps;
pub mod command_execution;
pub mod compute;
pub mod connections;
pub mod dashboards;
pub mod database;
pub mod experiments;
pub mod files;
pub mod genie;
pub mod git_credentials;
pub mod global_init_scripts;
pub mod grants;
pub mod iam;
pub mod jobs;
pub mod metastores;
pub mod online_tables;
pub mod pipelines;
pub mod quality_monitors;
pub mod secrets;
pub mod serving;
pub mod sharing;
pub mod sql;
pub mod storage;
pub mod tokens;
pub mod unity_catalog;
pub mod vector_search;
pub mod workspace;

use serde_json::Value;

use super::catalog::ToolModule;
use super::entry::Arguments;
use super::error::ToolError;
use super::operation::RestOperation;
use crate::domains::workflows;

/// Every module of the standard catalog, in registration order.
pub fn all_modules() -> Vec<ToolModule> {
    vec![
        unity_catalog::module(),
        sql::module(),
        workspace::module(),
        compute::module(),
        jobs::module(),
        pipelines::module(),
        serving::module(),
        vector_search::module(),
        apps::module(),
        database::module(),
        dashboards::module(),
        genie::module(),
        secrets::module(),
        iam::module(),
        connections::module(),
        experiments::module(),
        sharing::module(),
        files::module(),
        grants::module(),
        storage::module(),
        metastores::module(),
        online_tables::module(),
        global_init_scripts::module(),
        tokens::module(),
        git_credentials::module(),
        quality_monitors::module(),
        command_execution::module(),
        workflows::module(),
    ]
}

/// Assemble a module from its REST operations.
pub(crate) fn rest_module(
    name: &'static str,
    description: &'static str,
    use_cases: &'static [&'static str],
    operations: Vec<RestOperation>,
) -> ToolModule {
    let entries = operations
        .into_iter()
        .map(|op| op.into_entry(name))
        .collect();
    ToolModule::new(name, description, use_cases, entries)
}

/// Split a comma-separated argument into trimmed, non-empty items.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove a string field from a body under construction.
pub(crate) fn take_str(body: &mut Arguments, key: &str) -> Option<String> {
    match body.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Replace a field holding a JSON document in a string with the parsed value.
pub(crate) fn parse_json_field(body: &mut Arguments, key: &str) -> Result<(), ToolError> {
    if let Some(raw) = take_str(body, key) {
        let parsed: Value = serde_json::from_str(&raw).map_err(|e| {
            ToolError::invalid_arguments(format!("invalid JSON in '{}': {}", key, e))
        })?;
        body.insert(key.to_string(), parsed);
    }
    Ok(())
}

/// Replace a comma-separated string field with an array.
pub(crate) fn list_field(body: &mut Arguments, key: &str) {
    if let Some(raw) = take_str(body, key) {
        body.insert(key.to_string(), serde_json::json!(split_list(&raw)));
    }
}

/// Invoke one tool of `module` against an empty mock workspace, returning
/// the success payload and the recorded requests.
#[cfg(test)]
pub(crate) fn call(
    module: ToolModule,
    tool: &str,
    args: Value,
) -> (Value, Vec<crate::domains::client::ApiRequest>) {
    use super::entry::{InvocationContext, ToolOutcome};
    use super::operation::arguments;
    use crate::domains::client::testing::MockClient;

    let (client, provider) = MockClient::new().into_provider();
    let ctx = InvocationContext::new(provider, 100);
    let entry = module
        .entries()
        .iter()
        .find(|e| e.name() == tool)
        .unwrap_or_else(|| panic!("{} not in module {}", tool, module.name()));
    match entry.invoke(&ctx, &arguments(args)) {
        ToolOutcome::Success(value) => (value, client.calls()),
        ToolOutcome::Failure(msg) => panic!("{} failed: {}", tool, msg),
    }
}
