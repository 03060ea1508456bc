//! Tool registry entries.
//!
//! A [`ToolEntry`] is one named, independently callable operation. The
//! behavior lives behind the [`Operation`] trait so REST descriptors,
//! composite workflows and the tool guide share the same invocation path.

use rmcp::model::{CallToolResult, Content, Tool};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use super::error::ToolError;
use crate::domains::client::{ClientProvider, WorkspaceClient};

/// Tool call arguments as received from the protocol.
pub type Arguments = serde_json::Map<String, Value>;

/// Default cap on items collected by list tools.
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// How an entry relates to the completion of the remote work it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// The payload reflects the finished operation.
    Immediate,
    /// The remote operation was only started; the call returns the
    /// acknowledgment and completion is observed through status tools.
    Started,
}

/// Everything an operation needs at invocation time.
#[derive(Clone)]
pub struct InvocationContext {
    clients: Arc<dyn ClientProvider>,
    max_items: usize,
}

impl InvocationContext {
    pub fn new(clients: Arc<dyn ClientProvider>, max_items: usize) -> Self {
        Self {
            clients,
            max_items: max_items.max(1),
        }
    }

    /// Resolve the workspace client for this invocation.
    pub fn client(&self) -> Result<Arc<dyn WorkspaceClient>, ToolError> {
        self.clients.client().map_err(ToolError::from)
    }

    pub fn clients(&self) -> &Arc<dyn ClientProvider> {
        &self.clients
    }

    /// Cap on items returned by list operations.
    pub fn max_items(&self) -> usize {
        self.max_items
    }
}

/// The behavior behind a tool.
pub trait Operation: Send + Sync {
    fn invoke(&self, ctx: &InvocationContext, args: &Arguments) -> Result<Value, ToolError>;
}

/// Result of one tool invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Success(Value),
    Failure(String),
}

impl ToolOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Render the outcome for the protocol. Strings are passed through,
    /// everything else is pretty-printed JSON.
    pub fn into_call_result(self) -> CallToolResult {
        match self {
            Self::Success(Value::String(text)) => CallToolResult::success(vec![Content::text(text)]),
            Self::Success(value) => {
                let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
                CallToolResult::success(vec![Content::text(text)])
            }
            Self::Failure(message) => CallToolResult::error(vec![Content::text(message)]),
        }
    }
}

/// A registered tool.
#[derive(Clone)]
pub struct ToolEntry {
    name: &'static str,
    module: &'static str,
    description: String,
    input_schema: Arc<rmcp::model::JsonObject>,
    completion: Completion,
    operation: Arc<dyn Operation>,
}

impl fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolEntry")
            .field("name", &self.name)
            .field("module", &self.module)
            .field("completion", &self.completion)
            .finish()
    }
}

impl ToolEntry {
    /// Create an entry. `Started` entries get the polling hint appended to
    /// their description so agents know not to wait for completion.
    pub fn new(
        name: &'static str,
        module: &'static str,
        description: impl Into<String>,
        input_schema: Arc<rmcp::model::JsonObject>,
        completion: Completion,
        operation: Arc<dyn Operation>,
    ) -> Self {
        let mut description = description.into();
        if completion == Completion::Started {
            description.push_str(
                " Returns as soon as the operation is accepted; use the matching get/status tool to follow progress.",
            );
        }
        Self {
            name,
            module,
            description,
            input_schema,
            completion,
            operation,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn module(&self) -> &'static str {
        self.module
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn completion(&self) -> Completion {
        self.completion
    }

    pub fn input_schema(&self) -> &Arc<rmcp::model::JsonObject> {
        &self.input_schema
    }

    /// Run the operation, converting every error into a `Failure` outcome.
    pub fn invoke(&self, ctx: &InvocationContext, args: &Arguments) -> ToolOutcome {
        debug!("Invoking {}", self.name);
        match self.operation.invoke(ctx, args) {
            Ok(value) => ToolOutcome::Success(value),
            Err(e) => {
                warn!("{} failed: {}", self.name, e);
                ToolOutcome::Failure(format!("Error calling {}: {}", self.name, e))
            }
        }
    }

    /// Create a Tool model for this entry (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.clone().into()),
            input_schema: self.input_schema.clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::client::testing::UnconfiguredProvider;
    use rmcp::model::RawContent;
    use serde_json::json;

    struct Echo;

    impl Operation for Echo {
        fn invoke(&self, _ctx: &InvocationContext, args: &Arguments) -> Result<Value, ToolError> {
            Ok(Value::Object(args.clone()))
        }
    }

    struct NeedsClient;

    impl Operation for NeedsClient {
        fn invoke(&self, ctx: &InvocationContext, _args: &Arguments) -> Result<Value, ToolError> {
            ctx.client()?;
            Ok(Value::Null)
        }
    }

    fn ctx() -> InvocationContext {
        InvocationContext::new(Arc::new(UnconfiguredProvider), DEFAULT_MAX_ITEMS)
    }

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(t) => t.text.clone(),
            _ => panic!("expected text content"),
        }
    }

    #[test]
    fn test_started_entries_describe_polling() {
        let entry = ToolEntry::new(
            "databricks_start_x",
            "test",
            "Start x.",
            Arc::new(Default::default()),
            Completion::Started,
            Arc::new(Echo),
        );
        assert!(entry.description().contains("Returns as soon as the operation is accepted"));
    }

    #[test]
    fn test_invoke_success_and_failure() {
        let echo = ToolEntry::new(
            "echo",
            "test",
            "Echo.",
            Arc::new(Default::default()),
            Completion::Immediate,
            Arc::new(Echo),
        );
        let mut args = Arguments::new();
        args.insert("a".into(), json!(1));
        assert_eq!(echo.invoke(&ctx(), &args), ToolOutcome::Success(json!({"a": 1})));

        let failing = ToolEntry::new(
            "needs_client",
            "test",
            "Needs a client.",
            Arc::new(Default::default()),
            Completion::Immediate,
            Arc::new(NeedsClient),
        );
        match failing.invoke(&ctx(), &Arguments::new()) {
            ToolOutcome::Failure(msg) => {
                assert!(msg.starts_with("Error calling needs_client:"));
                assert!(msg.contains("DATABRICKS_HOST"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_outcome_rendering() {
        let ok = ToolOutcome::Success(json!({"id": "abc"})).into_call_result();
        assert_eq!(ok.is_error, Some(false));
        assert!(text_of(&ok).contains("\"id\": \"abc\""));

        let plain = ToolOutcome::Success(json!("started")).into_call_result();
        assert_eq!(text_of(&plain), "started");

        let err = ToolOutcome::Failure("boom".into()).into_call_result();
        assert_eq!(err.is_error, Some(true));
    }
}
