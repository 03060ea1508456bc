use serde_json::{Value, json};
use tracing::info;

use super::{call, str_arg};
use crate::domains::tools::definitions::unity_catalog;
use crate::domains::tools::operation::Param;
use crate::domains::tools::{Arguments, InvocationContext, ToolError};

pub(super) fn params() -> Vec<Param> {
    vec![
        Param::string("catalog_name", "Parent catalog"),
        Param::string("schema_name", "Schema to create"),
        Param::string("comment", "Schema description").optional(),
        Param::boolean("create_catalog", "Create the catalog first").default(json!(false)),
    ]
}

pub(super) fn run(ctx: &InvocationContext, args: &Arguments) -> Result<Value, ToolError> {
    let catalog = str_arg(args, "catalog_name").unwrap_or_default();
    let schema = str_arg(args, "schema_name").unwrap_or_default();
    let full_name = format!("{}.{}", catalog, schema);
    let mut steps = Vec::new();

    if args.get("create_catalog") == Some(&Value::Bool(true)) {
        let status = match call(unity_catalog::create_catalog(), ctx, json!({ "name": catalog })) {
            Ok(_) => "created",
            Err(ToolError::Remote(e)) if e.is_already_exists() => "already_exists",
            Err(e) => return Err(e),
        };
        info!("Catalog {} {}", catalog, status);
        steps.push(json!({ "action": "create_catalog", "status": status, "name": catalog }));
    }

    call(
        unity_catalog::create_schema(),
        ctx,
        json!({ "name": schema, "catalog_name": catalog, "comment": args.get("comment") }),
    )?;
    steps.push(json!({ "action": "create_schema", "status": "created", "full_name": full_name }));

    Ok(json!({
        "steps": steps,
        "schema": { "catalog": catalog, "schema": schema, "full_name": full_name },
    }))
}

#[cfg(test)]
mod tests {
    use super::super::tests::{ctx_for, invoke};
    use crate::domains::client::testing::MockClient;
    use crate::domains::client::{HttpMethod, RemoteError};
    use crate::domains::tools::ToolOutcome;
    use serde_json::json;

    const CATALOGS: &str = "/api/2.1/unity-catalog/catalogs";
    const SCHEMAS: &str = "/api/2.1/unity-catalog/schemas";

    #[test]
    fn test_existing_catalog_is_not_a_failure() {
        let mock = MockClient::new().fail(
            HttpMethod::Post,
            CATALOGS,
            RemoteError::api(409, Some("CATALOG_ALREADY_EXISTS".into()), "Catalog 'sales' already exists"),
        );
        let (client, ctx) = ctx_for(mock);

        let outcome = invoke(
            &ctx,
            "databricks_setup_schema",
            json!({"catalog_name": "sales", "schema_name": "raw", "create_catalog": true}),
        );
        let ToolOutcome::Success(value) = outcome else {
            panic!("unexpected {:?}", outcome);
        };
        assert_eq!(value["steps"][0]["status"], json!("already_exists"));
        assert_eq!(value["steps"][1]["status"], json!("created"));
        assert_eq!(value["schema"]["full_name"], json!("sales.raw"));
        assert_eq!(
            client.calls_to(SCHEMAS)[0].body,
            Some(json!({"name": "raw", "catalog_name": "sales"}))
        );
    }

    #[test]
    fn test_other_catalog_errors_abort() {
        let mock = MockClient::new().fail(
            HttpMethod::Post,
            CATALOGS,
            RemoteError::api(403, Some("PERMISSION_DENIED".into()), "not a metastore admin"),
        );
        let (client, ctx) = ctx_for(mock);

        let outcome = invoke(
            &ctx,
            "databricks_setup_schema",
            json!({"catalog_name": "sales", "schema_name": "raw", "create_catalog": true}),
        );
        assert!(matches!(outcome, ToolOutcome::Failure(ref m) if m.contains("PERMISSION_DENIED")));
        assert!(client.calls_to(SCHEMAS).is_empty());
    }

    #[test]
    fn test_schema_only_by_default() {
        let (client, ctx) = ctx_for(MockClient::new());
        let outcome = invoke(
            &ctx,
            "databricks_setup_schema",
            json!({"catalog_name": "main", "schema_name": "scratch", "comment": "tmp"}),
        );
        assert!(outcome.is_success());
        assert!(client.calls_to(CATALOGS).is_empty());
        assert_eq!(
            client.calls_to(SCHEMAS)[0].body,
            Some(json!({"name": "scratch", "catalog_name": "main", "comment": "tmp"}))
        );
    }
}
