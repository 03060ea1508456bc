//! In-memory client used by unit tests.

use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{ApiRequest, ClientProvider, HttpMethod, RemoteError, StaticClientProvider, WorkspaceClient};

/// Replays canned responses keyed by `"<METHOD> <path>"` and records every call.
#[derive(Default)]
pub(crate) struct MockClient {
    responses: Mutex<HashMap<String, Vec<Result<Value, RemoteError>>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl MockClient {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn key(method: HttpMethod, path: &str) -> String {
        format!("{} {}", method, path)
    }

    /// Queue a response. The last queued response for a key is repeated.
    pub(crate) fn respond(self, method: HttpMethod, path: &str, body: Value) -> Self {
        self.push(method, path, Ok(body))
    }

    /// Queue a failure.
    pub(crate) fn fail(self, method: HttpMethod, path: &str, error: RemoteError) -> Self {
        self.push(method, path, Err(error))
    }

    fn push(self, method: HttpMethod, path: &str, result: Result<Value, RemoteError>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .entry(Self::key(method, path))
            .or_default()
            .push(result);
        self
    }

    pub(crate) fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn calls_to(&self, path: &str) -> Vec<ApiRequest> {
        self.calls()
            .into_iter()
            .filter(|c| c.path == path)
            .collect()
    }

    pub(crate) fn into_provider(self) -> (Arc<MockClient>, Arc<dyn ClientProvider>) {
        let client = Arc::new(self);
        let provider: Arc<dyn ClientProvider> =
            Arc::new(StaticClientProvider::new(client.clone()));
        (client, provider)
    }
}

impl WorkspaceClient for MockClient {
    fn execute(&self, request: &ApiRequest) -> Result<Value, RemoteError> {
        self.calls.lock().unwrap().push(request.clone());

        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(&Self::key(request.method, &request.path)) {
            Some(queue) if queue.len() > 1 => queue.remove(0),
            Some(queue) if queue.len() == 1 => queue[0].clone(),
            _ => Ok(json!({})),
        }
    }

    fn host(&self) -> &str {
        "https://mock.cloud.databricks.com"
    }
}

/// Provider whose client can never be built.
pub(crate) struct UnconfiguredProvider;

impl ClientProvider for UnconfiguredProvider {
    fn client(&self) -> Result<Arc<dyn WorkspaceClient>, RemoteError> {
        Err(RemoteError::config("DATABRICKS_HOST is not set"))
    }
}
