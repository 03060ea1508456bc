//! Secret scope, secret and secret ACL tools.

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "secrets";

const DESCRIPTION: &str = "Store credentials in secret scopes and control who can read them";

const USE_CASES: &[&str] = &[
    "store an api key or password",
    "manage secret scopes",
    "grant read access to a secret scope",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_secret_scopes", "/api/2.0/secrets/scopes/list")
                .describe("List secret scopes.")
                .list("scopes"),
            RestOperation::post("databricks_create_secret_scope", "/api/2.0/secrets/scopes/create")
                .describe("Create a Databricks-backed secret scope.")
                .param(Param::string("scope", "Scope name"))
                .acknowledge("Secret scope '{scope}' created."),
            RestOperation::post("databricks_delete_secret_scope", "/api/2.0/secrets/scopes/delete")
                .describe("Delete a secret scope and every secret in it.")
                .param(Param::string("scope", "Scope name"))
                .acknowledge("Secret scope '{scope}' deleted."),
            RestOperation::get("databricks_list_secrets", "/api/2.0/secrets/list")
                .describe("List the secret keys of a scope. Values are never returned.")
                .param(Param::string("scope", "Scope name"))
                .list("secrets"),
            RestOperation::post("databricks_put_secret", "/api/2.0/secrets/put")
                .describe("Create or overwrite a string secret.")
                .param(Param::string("scope", "Scope name"))
                .param(Param::string("key", "Secret key"))
                .param(Param::string("string_value", "Secret value"))
                .acknowledge("Secret '{key}' stored in scope '{scope}'."),
            RestOperation::post("databricks_delete_secret", "/api/2.0/secrets/delete")
                .describe("Delete a secret.")
                .param(Param::string("scope", "Scope name"))
                .param(Param::string("key", "Secret key"))
                .acknowledge("Secret '{key}' deleted from scope '{scope}'."),
            RestOperation::get("databricks_list_secret_acls", "/api/2.0/secrets/acls/list")
                .describe("List the access control entries of a scope.")
                .param(Param::string("scope", "Scope name"))
                .list("items"),
            RestOperation::post("databricks_put_secret_acl", "/api/2.0/secrets/acls/put")
                .describe("Grant a principal READ, WRITE or MANAGE on a scope.")
                .param(Param::string("scope", "Scope name"))
                .param(Param::string("principal", "User, group or service principal"))
                .param(Param::string("permission", "READ, WRITE or MANAGE"))
                .acknowledge("{permission} on scope '{scope}' granted to '{principal}'."),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::call;
    use serde_json::json;

    #[test]
    fn test_put_secret_acknowledges_without_value() {
        let (value, calls) = call(
            module(),
            "databricks_put_secret",
            json!({"scope": "etl", "key": "pg_password", "string_value": "hunter2"}),
        );
        assert_eq!(value, json!("Secret 'pg_password' stored in scope 'etl'."));
        assert_eq!(calls[0].body.as_ref().unwrap()["string_value"], json!("hunter2"));
    }
}
