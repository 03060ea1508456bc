//! Files tools: Unity Catalog volume directories and DBFS.

use serde_json::json;

use super::rest_module;
use crate::domains::tools::catalog::ToolModule;
use crate::domains::tools::operation::{Param, RestOperation};

pub const NAME: &str = "files";

const DESCRIPTION: &str = "Browse and manage files in Unity Catalog volumes and DBFS";

const USE_CASES: &[&str] = &[
    "list files in a volume",
    "upload or organize raw data files",
    "read a file from dbfs",
    "delete files and directories",
];

pub fn module() -> ToolModule {
    rest_module(
        NAME,
        DESCRIPTION,
        USE_CASES,
        vec![
            RestOperation::get("databricks_list_volume_directory", "/api/2.0/fs/directories{path}")
                .describe("List a directory of a volume, e.g. /Volumes/main/raw/landing.")
                .param(Param::string("path", "Absolute /Volumes path").keep_slashes())
                .list("contents"),
            RestOperation::put("databricks_create_volume_directory", "/api/2.0/fs/directories{path}")
                .describe("Create a directory (and parents) in a volume.")
                .param(Param::string("path", "Absolute /Volumes path").keep_slashes())
                .acknowledge("Directory '{path}' created."),
            RestOperation::delete("databricks_delete_volume_directory", "/api/2.0/fs/directories{path}")
                .describe("Delete an empty directory of a volume.")
                .param(Param::string("path", "Absolute /Volumes path").keep_slashes())
                .acknowledge("Directory '{path}' deleted."),
            RestOperation::delete("databricks_delete_volume_file", "/api/2.0/fs/files{path}")
                .describe("Delete a file of a volume.")
                .param(Param::string("path", "Absolute /Volumes path").keep_slashes())
                .acknowledge("File '{path}' deleted."),
            RestOperation::get("databricks_dbfs_list", "/api/2.0/dbfs/list")
                .describe("List a DBFS directory.")
                .param(Param::string("path", "DBFS path, e.g. /FileStore"))
                .list("files"),
            RestOperation::get("databricks_dbfs_get_status", "/api/2.0/dbfs/get-status")
                .describe("Get the size and type of a DBFS path.")
                .param(Param::string("path", "DBFS path")),
            RestOperation::get("databricks_dbfs_read", "/api/2.0/dbfs/read")
                .describe("Read up to 1 MB of a DBFS file as base64 data.")
                .param(Param::string("path", "DBFS path"))
                .param(Param::integer("offset", "Byte offset").default(json!(0)))
                .param(Param::integer("length", "Bytes to read (max 1048576)").default(json!(65536))),
            RestOperation::post("databricks_dbfs_mkdirs", "/api/2.0/dbfs/mkdirs")
                .describe("Create a DBFS directory and missing parents.")
                .param(Param::string("path", "DBFS path"))
                .acknowledge("DBFS directory '{path}' created."),
            RestOperation::post("databricks_dbfs_delete", "/api/2.0/dbfs/delete")
                .describe("Delete a DBFS file or directory.")
                .param(Param::string("path", "DBFS path"))
                .param(Param::boolean("recursive", "Delete directory contents").default(json!(false)))
                .acknowledge("DBFS path '{path}' deleted."),
        ],
    )
}
