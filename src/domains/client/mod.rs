//! Databricks client domain module.
//!
//! This module is the boundary to the remote platform. Tools never talk to
//! HTTP directly: they build an [`ApiRequest`] and hand it to a
//! [`WorkspaceClient`] obtained from a [`ClientProvider`].
//!
//! ## Architecture
//!
//! - `request.rs` - Request model (method, path, query, body)
//! - `rest.rs` - `reqwest` implementation of the client
//! - `provider.rs` - Lazy and static client providers
//! - `error.rs` - Remote failure types

mod error;
mod provider;
mod request;
mod rest;

#[cfg(test)]
pub(crate) mod testing;

pub use error::RemoteError;
pub use provider::{ClientProvider, LazyClientProvider, StaticClientProvider};
pub use request::{ApiRequest, HttpMethod};
pub use rest::RestClient;

use serde_json::Value;

/// A handle to one Databricks workspace.
///
/// Each call is synchronous and either returns the decoded JSON payload or a
/// [`RemoteError`]. Implementations never retry and never cache.
pub trait WorkspaceClient: Send + Sync {
    /// Execute a single REST request.
    fn execute(&self, request: &ApiRequest) -> Result<Value, RemoteError>;

    /// The workspace host this client talks to.
    fn host(&self) -> &str;

    /// The authentication mechanism in use (reported by the info resource).
    fn auth_type(&self) -> &str {
        "pat"
    }
}
