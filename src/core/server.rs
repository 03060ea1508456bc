//! MCP Server implementation and lifecycle management.
//!
//! `McpServer` is the composition root: it builds the module catalog,
//! resolves the active modules, registers their tools plus the tool guide,
//! and wires the resource and prompt services. Composition errors abort
//! startup before any transport is opened.
//!
//! The same server value backs every transport. STDIO and TCP go through the
//! rmcp `ServerHandler`; HTTP calls the helper methods below.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use super::error;
use crate::domains::{
    client::{ClientProvider, LazyClientProvider},
    guide::{GUIDE_TOOL, ToolGuide},
    prompts::PromptService,
    resources::ResourceService,
    tools::{Catalog, InvocationContext, ToolRegistry, build_tool_router},
};

#[cfg(feature = "http")]
use crate::domains::tools::{Arguments, ToolError};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tools registered for this process.
    registry: Arc<ToolRegistry>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Service for handling prompt-related requests.
    prompt_service: Arc<PromptService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server talking to the configured workspace.
    ///
    /// The REST client is built lazily on the first tool call, so a missing
    /// host does not prevent startup.
    pub fn new(config: Config) -> error::Result<Self> {
        let provider: Arc<dyn ClientProvider> =
            Arc::new(LazyClientProvider::new(config.workspace.clone()));
        Self::with_provider(config, provider)
    }

    /// Create a new MCP server using the given client provider.
    pub fn with_provider(config: Config, provider: Arc<dyn ClientProvider>) -> error::Result<Self> {
        let catalog = Arc::new(Catalog::standard()?);
        let ctx = InvocationContext::new(provider, config.tools.max_items);
        let guide = ToolGuide::new(catalog.clone());

        let registry = Arc::new(ToolRegistry::compose(
            &catalog,
            &config.modules,
            vec![guide.tool_entry()],
            ctx.clone(),
        )?);
        info!("Active modules: {}", registry.active_modules().join(", "));

        Ok(Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            resource_service: Arc::new(ResourceService::new(ctx, guide)),
            prompt_service: Arc::new(PromptService::new()),
            config: Arc::new(config),
            registry,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Instructions sent to clients on initialization.
    pub fn instructions(&self) -> String {
        format!(
            "Databricks workspace tools ({} tools from modules: {}). \
             Call {} with a task or role to find the right module, \
             or read databricks://tools/guide for the full catalog. \
             databricks://workspace/info describes the connected workspace.",
            self.registry.tool_names().len(),
            self.registry.active_modules().join(", "),
            GUIDE_TOOL,
        )
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Tool failures come back as an `isError` result; only an unknown tool
    /// or malformed arguments are errors.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<serde_json::Value, ToolError> {
        let args: Arguments = match arguments {
            serde_json::Value::Object(map) => map,
            serde_json::Value::Null => Arguments::new(),
            other => {
                return Err(ToolError::invalid_arguments(format!(
                    "arguments must be an object, got {}",
                    other
                )));
            }
        };

        let outcome = self.registry.call_tool(name, args).await?;
        serde_json::to_value(outcome.into_call_result())
            .map_err(|e| ToolError::internal(e.to_string()))
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> std::result::Result<serde_json::Value, String> {
        match self.resource_service.read_resource(uri).await {
            Ok(result) => Ok(serde_json::json!({
                "contents": result.contents
            })),
            Err(e) => Err(e.to_string()),
        }
    }

    /// List all available prompts (for HTTP transport).
    pub async fn list_prompts(&self) -> Vec<serde_json::Value> {
        let prompts = self.prompt_service.list_prompts().await;

        prompts
            .into_iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "description": p.description,
                    "arguments": p.arguments
                })
            })
            .collect()
    }

    /// Get a prompt by name (for HTTP transport).
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<serde_json::Value>,
    ) -> std::result::Result<serde_json::Value, String> {
        let args = arguments.and_then(|v| {
            v.as_object().map(|obj| {
                obj.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
        });

        match self.prompt_service.get_prompt(name, args).await {
            Ok(result) => Ok(serde_json::json!({
                "description": result.description,
                "messages": result.messages
            })),
            Err(e) => Err(e.to_string()),
        }
    }
}

#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        let prompts = self.prompt_service.list_prompts().await;
        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        let arguments = request.arguments.map(|map| {
            map.into_iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                .collect()
        });
        self.prompt_service
            .get_prompt(&request.name, arguments)
            .await
            .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ModulesConfig;
    use crate::core::error::Error;
    use crate::domains::client::testing::{MockClient, UnconfiguredProvider};
    use crate::domains::tools::CompositionError;

    fn server(modules: ModulesConfig) -> error::Result<McpServer> {
        let config = Config {
            modules,
            ..Config::default()
        };
        McpServer::with_provider(config, Arc::new(UnconfiguredProvider))
    }

    fn names(list: &[&str]) -> Option<std::collections::BTreeSet<String>> {
        Some(list.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_guide_always_registered() {
        let server = server(ModulesConfig {
            include: names(&["sql"]),
            exclude: None,
        })
        .unwrap();
        let tools = server.registry().tool_names();
        assert!(tools.contains(&GUIDE_TOOL));
        assert!(tools.contains(&"databricks_execute_sql"));
        assert!(!tools.contains(&"databricks_list_clusters"));
        assert_eq!(server.list_tools().len(), tools.len());
    }

    #[test]
    fn test_conflicting_lists_fail_startup() {
        let err = server(ModulesConfig {
            include: names(&["sql"]),
            exclude: names(&["jobs"]),
        })
        .err()
        .unwrap();
        assert!(matches!(
            err,
            Error::Composition(CompositionError::ConfigConflict { .. })
        ));
    }

    #[test]
    fn test_unknown_module_fails_startup() {
        let err = server(ModulesConfig {
            include: names(&["sqll"]),
            exclude: None,
        })
        .err()
        .unwrap();
        assert!(err.to_string().contains("sqll"));
    }

    #[test]
    fn test_instructions_name_active_modules() {
        let server = server(ModulesConfig {
            include: names(&["jobs", "compute"]),
            exclude: None,
        })
        .unwrap();
        let text = server.instructions();
        assert!(text.contains("compute, jobs"));
        assert!(text.contains(GUIDE_TOOL));
    }

    #[tokio::test]
    async fn test_resources_and_prompts_registered_with_empty_include() {
        let (_, provider) = MockClient::new().into_provider();
        let config = Config {
            modules: ModulesConfig {
                include: names(&["secrets"]),
                exclude: None,
            },
            ..Config::default()
        };
        let server = McpServer::with_provider(config, provider).unwrap();

        let uris: Vec<_> = server
            .list_resources()
            .await
            .into_iter()
            .map(|r| r["uri"].as_str().unwrap_or_default().to_string())
            .collect();
        assert!(uris.contains(&"databricks://workspace/info".to_string()));
        assert!(uris.contains(&"databricks://tools/guide".to_string()));
        assert_eq!(server.list_prompts().await.len(), 8);
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_http_call_tool() {
        let server = server(ModulesConfig::default()).unwrap();

        let result = server
            .call_tool(GUIDE_TOOL, serde_json::json!({"role": "data_analyst"}))
            .await
            .unwrap();
        assert_eq!(result["isError"], false);

        let failed = server
            .call_tool("databricks_list_clusters", serde_json::json!({}))
            .await
            .unwrap();
        assert_eq!(failed["isError"], true);

        let missing = server.call_tool("nope", serde_json::Value::Null).await;
        assert!(matches!(missing, Err(ToolError::NotFound(_))));
    }
}
