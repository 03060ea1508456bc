//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every registered entry becomes one dynamic route, so the router always
//! lists exactly what the registry holds.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};
use std::sync::Arc;

use super::error::ToolError;
use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .entries()
        .iter()
        .fold(ToolRouter::new(), |router, entry| {
            let registry = registry.clone();
            let name = entry.name();
            router.with_route(ToolRoute::new_dyn(
                entry.to_tool(),
                move |ctx: ToolCallContext<'_, S>| {
                    let args = ctx.arguments.clone().unwrap_or_default();
                    let registry = registry.clone();
                    async move {
                        match registry.call_tool(name, args).await {
                            Ok(outcome) => Ok(outcome.into_call_result()),
                            Err(e @ ToolError::NotFound(_)) => {
                                Err(McpError::invalid_params(e.to_string(), None))
                            }
                            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
                        }
                    }
                    .boxed()
                },
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ModulesConfig;
    use crate::domains::client::testing::MockClient;
    use crate::domains::tools::{Catalog, InvocationContext};

    struct TestServer {}

    fn registry(modules: ModulesConfig) -> Arc<ToolRegistry> {
        let (_, provider) = MockClient::new().into_provider();
        let catalog = Catalog::standard().unwrap();
        Arc::new(
            ToolRegistry::compose(&catalog, &modules, Vec::new(), InvocationContext::new(provider, 100))
                .unwrap(),
        )
    }

    #[test]
    fn test_registry_matches_router() {
        let registry = registry(ModulesConfig::default());
        let router: ToolRouter<TestServer> = build_tool_router(registry.clone());
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry.tool_names().len(), router_names.len());
        for name in registry.tool_names() {
            assert!(router_names.contains(&name));
        }
    }

    #[test]
    fn test_router_respects_filter() {
        let registry = registry(ModulesConfig {
            include: Some(["secrets".to_string()].into()),
            exclude: None,
        });
        let router: ToolRouter<TestServer> = build_tool_router(registry);
        let tools = router.list_all();
        assert!(!tools.is_empty());
        assert!(tools.iter().all(|t| t.name.contains("secret")));
    }
}
