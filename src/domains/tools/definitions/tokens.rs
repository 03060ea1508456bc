//! Personal access token tools.

use serde_json::json;

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "tokens";

const DESCRIPTION: &str = "Create, list and revoke personal access tokens";

const USE_CASES: &[&str] = &[
    "create an api token",
    "revoke a leaked token",
    "audit tokens across users",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_tokens", "/api/2.0/token/list")
                .describe("List the calling user's tokens.")
                .list("token_infos"),
            RestOperation::post("databricks_create_token", "/api/2.0/token/create")
                .describe("Create a token. The secret value is only returned once.")
                .param(Param::string("comment", "Purpose of the token").optional())
                .param(Param::integer("lifetime_seconds", "Lifetime, omit for no expiry").optional()),
            RestOperation::post("databricks_revoke_token", "/api/2.0/token/delete")
                .describe("Revoke one of the calling user's tokens.")
                .param(Param::string("token_id", "Token id"))
                .acknowledge("Token {token_id} revoked."),
            RestOperation::get("databricks_list_all_tokens", "/api/2.0/token-management/tokens")
                .describe("List tokens of all users (admins only).")
                .param(Param::string("created_by_username", "Only tokens of this user").optional())
                .list("token_infos"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::call;

    #[test]
    fn test_revoke_token_body() {
        let (text, calls) = call(module(), "databricks_revoke_token", json!({"token_id": "t-1"}));
        assert_eq!(text, json!("Token t-1 revoked."));
        assert_eq!(calls[0].body, Some(json!({"token_id": "t-1"})));
    }
}
