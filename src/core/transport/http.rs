//! HTTP transport implementation.
//!
//! JSON-RPC over POST on a single path, plus `/health` and an info document
//! at `/`. Every request is answered with status 200; protocol errors are
//! carried in the JSON-RPC `error` member.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::domains::tools::ToolError;

const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    pub fn method_not_found(id: Option<Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    pub fn invalid_params(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
    rpc_path: Arc<str>,
    session: Arc<RwLock<Option<SessionState>>>,
}

/// What the last `initialize` negotiated. HTTP is stateless otherwise.
#[derive(Debug, Clone)]
struct SessionState {
    initialized: bool,
    client_name: Option<String>,
}

impl AppState {
    fn new(server: McpServer, rpc_path: &str) -> Self {
        Self {
            server,
            rpc_path: Arc::from(rpc_path),
            session: Arc::new(RwLock::new(None)),
        }
    }
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    fn router(&self, state: AppState) -> Router {
        let app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state);

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app.layer(cors)
        } else {
            app
        }
    }

    /// Serve until the listener fails.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(AppState::new(server, &self.config.rpc_path));

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr,
            if self.config.enable_cors { "enabled" } else { "disabled" }
        );
        info!("  JSON-RPC: POST {}", self.config.rpc_path);
        info!("  Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::stopped("HTTP", e))?;

        Ok(())
    }
}

async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": &*state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "documentation": format!("Send POST requests to {} with JSON-RPC messages", state.rpc_path)
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", &request.method);
    debug!("Received JSON-RPC request: {}", request.method);

    let response = process_request(&state, request).await;

    (StatusCode::OK, Json(response))
}

async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    match request.method.as_str() {
        "initialize" => handle_initialize(state, request).await,
        "ping" => JsonRpcResponse::success(request.id, json!({})),
        "tools/list" => JsonRpcResponse::success(
            request.id,
            json!({ "tools": state.server.list_tools() }),
        ),
        "tools/call" => handle_tools_call(state, request).await,
        "resources/list" => JsonRpcResponse::success(
            request.id,
            json!({ "resources": state.server.list_resources().await }),
        ),
        "resources/templates/list" => {
            JsonRpcResponse::success(request.id, json!({ "resourceTemplates": [] }))
        }
        "resources/read" => handle_resources_read(state, request).await,
        "prompts/list" => JsonRpcResponse::success(
            request.id,
            json!({ "prompts": state.server.list_prompts().await }),
        ),
        "prompts/get" => handle_prompts_get(state, request).await,

        // Stateless HTTP: acknowledge notifications with an empty result
        method if method.starts_with("notifications/") => {
            handle_notification(state, &request).await;
            JsonRpcResponse::success(request.id, Value::Null)
        }

        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    }
}

/// The named string parameter of a request, or the error response to send.
fn string_param(request: &JsonRpcRequest, key: &str) -> Result<String, JsonRpcResponse> {
    let params = request
        .params
        .as_ref()
        .ok_or_else(|| JsonRpcResponse::invalid_params(request.id.clone(), "Missing params"))?;

    params
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            JsonRpcResponse::invalid_params(request.id.clone(), format!("Missing '{}'", key))
        })
}

async fn handle_initialize(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let client_name = request
        .params
        .as_ref()
        .and_then(|p| p.pointer("/clientInfo/name"))
        .and_then(Value::as_str)
        .map(str::to_string);
    info!(
        "Initializing session for {}",
        client_name.as_deref().unwrap_or("unknown client")
    );

    *state.session.write().await = Some(SessionState {
        initialized: false,
        client_name,
    });

    let result = json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "resources": {},
            "prompts": {}
        },
        "serverInfo": {
            "name": state.server.name(),
            "version": state.server.version()
        },
        "instructions": state.server.instructions()
    });

    JsonRpcResponse::success(request.id, result)
}

async fn handle_tools_call(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let name = match string_param(&request, "name") {
        Ok(name) => name,
        Err(response) => return response,
    };
    let arguments = request
        .params
        .as_ref()
        .and_then(|p| p.get("arguments"))
        .cloned()
        .unwrap_or(Value::Null);

    info!("Calling tool: {}", name);
    match state.server.call_tool(&name, arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e @ (ToolError::NotFound(_) | ToolError::InvalidArguments(_))) => {
            JsonRpcResponse::invalid_params(request.id, e.to_string())
        }
        Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
    }
}

async fn handle_resources_read(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let uri = match string_param(&request, "uri") {
        Ok(uri) => uri,
        Err(response) => return response,
    };

    match state.server.read_resource(&uri).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e),
    }
}

async fn handle_prompts_get(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    let name = match string_param(&request, "name") {
        Ok(name) => name,
        Err(response) => return response,
    };
    let arguments = request
        .params
        .as_ref()
        .and_then(|p| p.get("arguments"))
        .cloned();

    match state.server.get_prompt(&name, arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e),
    }
}

async fn handle_notification(state: &AppState, request: &JsonRpcRequest) {
    match request.method.as_str() {
        "notifications/initialized" => {
            if let Some(session) = state.session.write().await.as_mut() {
                session.initialized = true;
                info!(
                    "Session initialized for {}",
                    session.client_name.as_deref().unwrap_or("unknown client")
                );
            }
        }
        _ => debug!("Received notification: {}", request.method),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::domains::client::testing::UnconfiguredProvider;

    fn state() -> AppState {
        let server =
            McpServer::with_provider(Config::default(), Arc::new(UnconfiguredProvider)).unwrap();
        AppState::new(server, "/mcp")
    }

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    #[tokio::test]
    async fn test_initialize_then_initialized() {
        let state = state();
        let response = process_request(
            &state,
            request("initialize", json!({"clientInfo": {"name": "curl"}})),
        )
        .await;
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert!(result["instructions"].as_str().unwrap().contains("databricks_tool_guide"));

        process_request(&state, request("notifications/initialized", json!({}))).await;
        let session = state.session.read().await.clone().unwrap();
        assert!(session.initialized);
        assert_eq!(session.client_name.as_deref(), Some("curl"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let response = process_request(
            &state(),
            request("tools/call", json!({"name": "databricks_nope"})),
        )
        .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.message, "Tool not found: databricks_nope");
    }

    #[tokio::test]
    async fn test_tool_failure_is_a_result() {
        let response = process_request(
            &state(),
            request("tools/call", json!({"name": "databricks_list_clusters", "arguments": {}})),
        )
        .await;
        assert!(response.error.is_none());
        assert_eq!(response.result.unwrap()["isError"], true);
    }

    #[tokio::test]
    async fn test_missing_params_and_bad_version() {
        let state = state();

        let missing = process_request(&state, request("resources/read", json!({}))).await;
        assert_eq!(missing.error.unwrap().code, -32602);

        let mut bad = request("tools/list", json!({}));
        bad.jsonrpc = "1.0".to_string();
        assert_eq!(process_request(&state, bad).await.error.unwrap().code, -32600);

        let unknown = process_request(&state, request("sampling/createMessage", json!({}))).await;
        assert_eq!(unknown.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_lists() {
        let state = state();

        let tools = process_request(&state, request("tools/list", json!({}))).await;
        assert!(!tools.result.unwrap()["tools"].as_array().unwrap().is_empty());

        let prompts = process_request(&state, request("prompts/list", json!({}))).await;
        assert_eq!(prompts.result.unwrap()["prompts"].as_array().unwrap().len(), 8);

        let prompt = process_request(
            &state,
            request("prompts/get", json!({"name": "query_data", "arguments": {"question": "How many trips?"}})),
        )
        .await;
        assert!(prompt.result.is_some());
    }
}
