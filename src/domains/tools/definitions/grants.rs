//! Unity Catalog privilege tools.

use serde_json::{Value, json};

use super::{rest_module, split_list, take_str};
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::entry::Arguments;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "grants";

const DESCRIPTION: &str = "Inspect and change Unity Catalog privileges on securables";

const USE_CASES: &[&str] = &[
    "grant select on a table",
    "revoke access from a group",
    "audit who has permissions",
    "check effective privileges",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_get_grants", "/api/2.1/unity-catalog/permissions/{securable_type}/{full_name}")
                .describe("List privileges granted directly on a securable (catalog, schema, table, volume, function, ...).")
                .param(Param::string("securable_type", "catalog, schema, table, volume, function, external_location, ..."))
                .param(Param::string("full_name", "Full name of the securable"))
                .param(Param::string("principal", "Only this principal").optional()),
            RestOperation::get("databricks_get_effective_grants", "/api/2.1/unity-catalog/effective-permissions/{securable_type}/{full_name}")
                .describe("List effective privileges, including those inherited from parents.")
                .param(Param::string("securable_type", "Securable type"))
                .param(Param::string("full_name", "Full name of the securable"))
                .param(Param::string("principal", "Only this principal").optional()),
            RestOperation::patch("databricks_update_grants", "/api/2.1/unity-catalog/permissions/{securable_type}/{full_name}")
                .describe("Grant and/or revoke privileges (comma-separated, e.g. SELECT,MODIFY) for one principal.")
                .param(Param::string("securable_type", "Securable type"))
                .param(Param::string("full_name", "Full name of the securable"))
                .param(Param::string("principal", "User, group or service principal"))
                .param(Param::string("add", "Privileges to grant").optional())
                .param(Param::string("remove", "Privileges to revoke").optional())
                .body_with(changes_body),
        ],
    )
}

fn changes_body(mut body: Arguments) -> Result<Value, ToolError> {
    let add = take_str(&mut body, "add").map(|s| split_list(&s)).unwrap_or_default();
    let remove = take_str(&mut body, "remove").map(|s| split_list(&s)).unwrap_or_default();
    if add.is_empty() && remove.is_empty() {
        return Err(ToolError::invalid_arguments(
            "provide privileges to add or remove",
        ));
    }
    let principal = body.remove("principal").unwrap_or(Value::Null);
    Ok(json!({
        "changes": [{ "principal": principal, "add": add, "remove": remove }]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::call;

    #[test]
    fn test_update_grants_changes() {
        let (_, calls) = call(
            module(),
            "databricks_update_grants",
            json!({"securable_type": "table", "full_name": "main.sales.orders", "principal": "analysts", "add": "SELECT, MODIFY"}),
        );
        assert_eq!(calls[0].path, "/api/2.1/unity-catalog/permissions/table/main.sales.orders");
        assert_eq!(
            calls[0].body,
            Some(json!({"changes": [{"principal": "analysts", "add": ["SELECT", "MODIFY"], "remove": []}]}))
        );
    }
}
