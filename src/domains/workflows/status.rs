use serde_json::{Value, json};

use super::composer::{Step, run_all};
use super::{call, items, state_of};
use crate::domains::tools::definitions::{compute, iam, jobs, serving, sql, unity_catalog};
use crate::domains::tools::{Arguments, InvocationContext, ToolError};

const JOBS_CAP: usize = 100;
const CATALOGS_CAP: usize = 50;

pub(super) fn run(ctx: &InvocationContext, _args: &Arguments) -> Result<Value, ToolError> {
    let jobs_ctx = InvocationContext::new(ctx.clients().clone(), JOBS_CAP);
    let catalogs_ctx = InvocationContext::new(ctx.clients().clone(), CATALOGS_CAP);

    let result = run_all(vec![
        Step::new("auth", || {
            let me = call(iam::current_user(), ctx, json!({}))?;
            Ok(json!({ "user": me.get("userName") }))
        }),
        Step::new("clusters", || {
            let page = call(compute::list_clusters(), ctx, json!({}))?;
            let clusters = items(&page, "clusters");
            let running = clusters.iter().filter(|c| state_of(c) == "RUNNING").count();
            Ok(json!({
                "total": clusters.len(),
                "running": running,
                "terminated": clusters.len() - running,
            }))
        }),
        Step::new("sql_warehouses", || {
            let page = call(sql::list_warehouses(), ctx, json!({}))?;
            let warehouses = items(&page, "warehouses");
            let running = warehouses.iter().filter(|w| state_of(w) == "RUNNING").count();
            Ok(json!({ "total": warehouses.len(), "running": running }))
        }),
        Step::new("jobs", || {
            let page = call(jobs::list_jobs(), &jobs_ctx, json!({}))?;
            Ok(json!({ "total": items(&page, "jobs").len(), "capped": page["truncated"] }))
        }),
        Step::new("serving_endpoints", || {
            let page = call(serving::list_serving_endpoints(), ctx, json!({}))?;
            let endpoints = items(&page, "endpoints");
            let ready = endpoints
                .iter()
                .filter(|e| {
                    e.pointer("/state/ready")
                        .and_then(Value::as_str)
                        .is_some_and(|r| r.eq_ignore_ascii_case("READY"))
                })
                .count();
            Ok(json!({ "total": endpoints.len(), "ready": ready }))
        }),
        Step::new("catalogs", || {
            let page = call(unity_catalog::list_catalogs(), &catalogs_ctx, json!({}))?;
            Ok(json!({ "total": items(&page, "catalogs").len(), "capped": page["truncated"] }))
        }),
    ]);

    Ok(result.to_value())
}
