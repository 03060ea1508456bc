//! Client providers.
//!
//! Tools hold an `Arc<dyn ClientProvider>` rather than a client, so the
//! client is only built when a tool is first invoked and tests can swap in a
//! mock without touching global state.

use std::sync::{Arc, Mutex};
use tracing::info;

use super::{RemoteError, RestClient, WorkspaceClient};
use crate::core::config::WorkspaceConfig;

/// Source of the current workspace client.
pub trait ClientProvider: Send + Sync {
    /// Return the client to use for one invocation.
    fn client(&self) -> Result<Arc<dyn WorkspaceClient>, RemoteError>;
}

/// Builds a [`RestClient`] on first use and reuses it afterwards.
///
/// A failed construction is not cached: the next invocation tries again.
pub struct LazyClientProvider {
    config: WorkspaceConfig,
    client: Mutex<Option<Arc<dyn WorkspaceClient>>>,
}

impl LazyClientProvider {
    /// Create a provider for the given workspace configuration.
    pub fn new(config: WorkspaceConfig) -> Self {
        Self {
            config,
            client: Mutex::new(None),
        }
    }
}

impl ClientProvider for LazyClientProvider {
    fn client(&self) -> Result<Arc<dyn WorkspaceClient>, RemoteError> {
        let mut slot = self
            .client
            .lock()
            .map_err(|_| RemoteError::config("client provider lock poisoned"))?;

        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }

        let client: Arc<dyn WorkspaceClient> = Arc::new(RestClient::from_config(&self.config)?);
        info!("Workspace client initialized for {}", client.host());
        *slot = Some(client.clone());
        Ok(client)
    }
}

/// Provider around an already built client.
#[derive(Clone)]
pub struct StaticClientProvider {
    client: Arc<dyn WorkspaceClient>,
}

impl StaticClientProvider {
    pub fn new(client: Arc<dyn WorkspaceClient>) -> Self {
        Self { client }
    }
}

impl ClientProvider for StaticClientProvider {
    fn client(&self) -> Result<Arc<dyn WorkspaceClient>, RemoteError> {
        Ok(self.client.clone())
    }
}
