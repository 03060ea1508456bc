//! Workspace info resource definition.

use serde_json::{Value, json};

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceSource;
use crate::domains::tools::definitions::iam;
use crate::domains::tools::{Arguments, InvocationContext, Operation, ToolError};

/// Host, identity and auth type of the configured workspace.
pub struct WorkspaceInfoResource;

impl ResourceDefinition for WorkspaceInfoResource {
    const URI: &'static str = "databricks://workspace/info";
    const NAME: &'static str = "Workspace Information";
    const DESCRIPTION: &'static str =
        "Current Databricks workspace: host URL, authenticated user and auth type";
    const MIME_TYPE: &'static str = "application/json";

    fn source() -> ResourceSource {
        ResourceSource::WorkspaceInfo
    }
}

impl WorkspaceInfoResource {
    /// Render the resource text. Failures are reported in the text itself
    /// so the resource stays readable without a configured workspace.
    ///
    /// Blocks on the remote call.
    pub fn render(ctx: &InvocationContext) -> String {
        match Self::collect(ctx).and_then(|info| {
            serde_json::to_string_pretty(&info).map_err(|e| ToolError::internal(e.to_string()))
        }) {
            Ok(text) => text,
            Err(e) => format!("Error getting workspace info: {}", e),
        }
    }

    fn collect(ctx: &InvocationContext) -> Result<Value, ToolError> {
        let client = ctx.client()?;
        let me = iam::current_user().invoke(ctx, &Arguments::new())?;

        Ok(json!({
            "host": client.host(),
            "user": {
                "user_name": me.get("userName"),
                "display_name": me.get("displayName"),
                "id": me.get("id"),
            },
            "auth_type": client.auth_type(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::client::HttpMethod;
    use crate::domains::client::testing::{MockClient, UnconfiguredProvider};
    use std::sync::Arc;

    #[test]
    fn test_render_workspace_info() {
        let (_, provider) = MockClient::new()
            .respond(
                HttpMethod::Get,
                "/api/2.0/preview/scim/v2/Me",
                json!({"userName": "ada@example.com", "displayName": "Ada", "id": "42"}),
            )
            .into_provider();
        let ctx = InvocationContext::new(provider, 10);

        let info: Value = serde_json::from_str(&WorkspaceInfoResource::render(&ctx)).unwrap();
        assert_eq!(info["host"], "https://mock.cloud.databricks.com");
        assert_eq!(info["user"]["user_name"], "ada@example.com");
        assert_eq!(info["user"]["display_name"], "Ada");
        assert_eq!(info["user"]["id"], "42");
        assert_eq!(info["auth_type"], "pat");
    }

    #[test]
    fn test_render_reports_errors_as_text() {
        let ctx = InvocationContext::new(Arc::new(UnconfiguredProvider), 10);
        let text = WorkspaceInfoResource::render(&ctx);
        assert!(text.starts_with("Error getting workspace info:"));
        assert!(text.contains("DATABRICKS_HOST"));
    }
}
