//! Resource service implementation.
//!
//! The ResourceService holds the registered resources and resolves their
//! content on read. Remote reads run on the blocking pool.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::definitions::WorkspaceInfoResource;
use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::domains::guide::ToolGuide;
use crate::domains::tools::InvocationContext;

/// Service for listing and reading resources.
pub struct ResourceService {
    ctx: InvocationContext,
    guide: ToolGuide,

    /// Key: resource URI
    resources: BTreeMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// Where the content comes from.
    pub source: ResourceSource,
}

/// Content sources of the registered resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceSource {
    /// Identity and host of the configured workspace (remote call).
    WorkspaceInfo,

    /// The tool guide catalog document.
    ToolGuide,
}

impl ResourceService {
    /// Create a new ResourceService.
    pub fn new(ctx: InvocationContext, guide: ToolGuide) -> Self {
        info!("Initializing ResourceService");

        let resources = get_all_resources()
            .into_iter()
            .map(|entry| (entry.resource.raw.uri.clone(), entry))
            .collect();

        Self {
            ctx,
            guide,
            resources,
        }
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;
        debug!("Reading resource: {}", uri);

        let text = match entry.source {
            ResourceSource::WorkspaceInfo => {
                let ctx = self.ctx.clone();
                tokio::task::spawn_blocking(move || WorkspaceInfoResource::render(&ctx))
                    .await
                    .map_err(|e| ResourceError::aborted(uri, e.to_string()))?
            }
            ResourceSource::ToolGuide => {
                serde_json::to_string_pretty(&self.guide.catalog_document())
                    .map_err(|e| ResourceError::render(uri, e))?
            }
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::client::testing::UnconfiguredProvider;
    use crate::domains::tools::Catalog;
    use serde_json::Value;
    use std::sync::Arc;

    fn service() -> ResourceService {
        let catalog = Arc::new(Catalog::standard().unwrap());
        let ctx = InvocationContext::new(Arc::new(UnconfiguredProvider), 10);
        ResourceService::new(ctx, ToolGuide::new(catalog))
    }

    fn text_of(result: &ReadResourceResult) -> &str {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => text,
            other => panic!("unexpected contents: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lists_both_resources() {
        let uris: Vec<_> = service()
            .list_resources()
            .await
            .into_iter()
            .map(|r| r.raw.uri)
            .collect();
        assert_eq!(uris, vec!["databricks://tools/guide", "databricks://workspace/info"]);
    }

    #[tokio::test]
    async fn test_read_workspace_info_without_workspace() {
        let result = service()
            .read_resource("databricks://workspace/info")
            .await
            .unwrap();
        assert!(text_of(&result).starts_with("Error getting workspace info:"));
    }

    #[tokio::test]
    async fn test_read_tool_guide() {
        let result = service().read_resource("databricks://tools/guide").await.unwrap();
        let doc: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert!(doc["modules"].as_array().is_some_and(|m| !m.is_empty()));
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let result = service().read_resource("databricks://nope").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }
}
