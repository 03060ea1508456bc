//! Workspace object and Git folder (repo) tools.

use serde_json::json;

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "workspace";

const DESCRIPTION: &str = "Browse, import and export notebooks and folders, and manage Git folders";

const USE_CASES: &[&str] = &[
    "list notebooks and folders",
    "import or export a notebook",
    "create workspace directories",
    "clone a git repository into the workspace",
    "switch repo branch",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_workspace", "/api/2.0/workspace/list")
                .describe("List notebooks, files and folders under a workspace path.")
                .param(Param::string("path", "Absolute workspace path").default(json!("/")))
                .list("objects"),
            RestOperation::get("databricks_get_workspace_status", "/api/2.0/workspace/get-status")
                .describe("Get the type, language and modification time of a workspace object.")
                .param(Param::string("path", "Absolute workspace path")),
            RestOperation::post("databricks_import_notebook", "/api/2.0/workspace/import")
                .describe("Import base64-encoded content as a notebook or file (max 10 MB).")
                .param(Param::string("path", "Destination path"))
                .param(Param::string("content", "Base64-encoded content"))
                .param(Param::string("format", "SOURCE, HTML, JUPYTER, DBC, R_MARKDOWN or AUTO").default(json!("SOURCE")))
                .param(Param::string("language", "PYTHON, SQL, SCALA or R").default(json!("PYTHON")))
                .param(Param::boolean("overwrite", "Replace an existing object").default(json!(false)))
                .acknowledge("Notebook imported successfully to '{path}'."),
            RestOperation::get("databricks_export_notebook", "/api/2.0/workspace/export")
                .describe("Export a notebook as base64-encoded source.")
                .param(Param::string("path", "Notebook path"))
                .fixed("format", json!("SOURCE")),
            RestOperation::post("databricks_mkdirs", "/api/2.0/workspace/mkdirs")
                .describe("Create a directory and any missing parents.")
                .param(Param::string("path", "Directory path"))
                .acknowledge("Directory '{path}' created."),
            RestOperation::post("databricks_delete_workspace", "/api/2.0/workspace/delete")
                .describe("Delete a workspace object. Non-empty folders need recursive=true.")
                .param(Param::string("path", "Object path"))
                .param(Param::boolean("recursive", "Delete folder contents").default(json!(false)))
                .acknowledge("Workspace object '{path}' deleted."),
            RestOperation::get("databricks_list_repos", "/api/2.0/repos")
                .describe("List Git folders in the workspace.")
                .list("repos"),
            RestOperation::get("databricks_get_repo", "/api/2.0/repos/{repo_id}")
                .describe("Get a Git folder: URL, provider, branch and head commit.")
                .param(Param::integer("repo_id", "Repo id")),
            RestOperation::post("databricks_create_repo", "/api/2.0/repos")
                .describe("Clone a remote Git repository into the workspace.")
                .param(Param::string("url", "Repository URL"))
                .param(Param::string("provider", "gitHub, gitLab, bitbucketCloud, azureDevOpsServices or awsCodeCommit").default(json!("gitHub")))
                .param(Param::string("path", "Workspace path; defaults to /Repos/<user>/<repo>").optional()),
            RestOperation::patch("databricks_update_repo", "/api/2.0/repos/{repo_id}")
                .describe("Check out a branch in a Git folder.")
                .param(Param::integer("repo_id", "Repo id"))
                .param(Param::string("branch", "Branch to check out")),
        ],
    )
}
