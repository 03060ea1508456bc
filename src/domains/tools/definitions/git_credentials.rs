use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "git_credentials";

const DESCRIPTION: &str = "Manage Git provider credentials used by Git folders";

const USE_CASES: &[&str] = &[
    "connect github or gitlab",
    "rotate a git token",
    "set up repos integration",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_git_credentials", "/api/2.0/git-credentials")
                .describe("List Git credentials of the calling user.")
                .list("credentials"),
            RestOperation::get("databricks_get_git_credential", "/api/2.0/git-credentials/{credential_id}")
                .describe("Get a Git credential.")
                .param(Param::integer("credential_id", "Credential id")),
            RestOperation::post("databricks_create_git_credential", "/api/2.0/git-credentials")
                .describe("Create a Git credential (one per user).")
                .param(Param::string("git_provider", "gitHub, gitLab, bitbucketCloud, azureDevOpsServices, ..."))
                .param(Param::string("git_username", "Provider username").optional())
                .param(Param::string("personal_access_token", "Provider token").optional()),
            RestOperation::patch("databricks_update_git_credential", "/api/2.0/git-credentials/{credential_id}")
                .describe("Update a Git credential.")
                .param(Param::integer("credential_id", "Credential id"))
                .param(Param::string("git_provider", "Git provider"))
                .param(Param::string("git_username", "Provider username").optional())
                .param(Param::string("personal_access_token", "Provider token").optional())
                .acknowledge("Git credential {credential_id} updated."),
            RestOperation::delete("databricks_delete_git_credential", "/api/2.0/git-credentials/{credential_id}")
                .describe("Delete a Git credential.")
                .param(Param::integer("credential_id", "Credential id"))
                .acknowledge("Git credential {credential_id} deleted."),
        ],
    )
}
