//! REST implementation of [`WorkspaceClient`] on top of `reqwest::blocking`.

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::{ApiRequest, HttpMethod, RemoteError, WorkspaceClient};
use crate::core::config::WorkspaceConfig;

const USER_AGENT: &str = concat!("databricks-mcp/", env!("CARGO_PKG_VERSION"));

/// Error body returned by the Databricks REST API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error_code: Option<String>,
    message: Option<String>,
}

/// Blocking REST client bound to one workspace.
pub struct RestClient {
    http: Client,
    host: String,
    token: String,
}

impl RestClient {
    /// Build a client from the workspace configuration.
    pub fn from_config(config: &WorkspaceConfig) -> Result<Self, RemoteError> {
        let host = config
            .host
            .as_deref()
            .map(normalize_host)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| RemoteError::config("DATABRICKS_HOST is not set"))?;
        let token = config
            .token
            .clone()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RemoteError::config("DATABRICKS_TOKEN is not set"))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RemoteError::config(e.to_string()))?;

        Ok(Self { http, host, token })
    }

    fn decode(response: Response) -> Result<Value, RemoteError> {
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| RemoteError::transport(e.to_string()))?;

        if !status.is_success() {
            let (error_code, message) = match serde_json::from_str::<ApiErrorBody>(&text) {
                Ok(body) => (body.error_code, body.message.unwrap_or_else(|| text.clone())),
                Err(_) => (None, text.clone()),
            };
            warn!("API call failed with status {}: {}", status, message);
            return Err(RemoteError::api(status.as_u16(), error_code, message));
        }

        if text.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_str(&text).map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

impl WorkspaceClient for RestClient {
    fn execute(&self, request: &ApiRequest) -> Result<Value, RemoteError> {
        debug!("{} {}{}", request.method, self.host, request.path);

        let url = format!("{}{}", self.host, request.path);
        let builder = match request.method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post => self.http.post(&url),
            HttpMethod::Put => self.http.put(&url),
            HttpMethod::Patch => self.http.patch(&url),
            HttpMethod::Delete => self.http.delete(&url),
        };

        let mut builder = builder.bearer_auth(&self.token).query(&request.query);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .map_err(|e| RemoteError::transport(e.to_string()))?;
        Self::decode(response)
    }

    fn host(&self) -> &str {
        &self.host
    }
}

/// Add a scheme when missing and strip trailing slashes.
pub(crate) fn normalize_host(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() || trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_host() {
        assert_eq!(
            normalize_host("adb-123.azuredatabricks.net/"),
            "https://adb-123.azuredatabricks.net"
        );
        assert_eq!(
            normalize_host("http://localhost:8080"),
            "http://localhost:8080"
        );
        assert_eq!(normalize_host("  "), "");
    }

    #[test]
    fn test_missing_host_is_config_error() {
        let config = WorkspaceConfig {
            host: None,
            token: Some("dapi123".to_string()),
            timeout_secs: 30,
        };
        let err = RestClient::from_config(&config).err().unwrap();
        assert!(matches!(err, RemoteError::Config(_)));
    }

    #[test]
    fn test_missing_token_is_config_error() {
        let config = WorkspaceConfig {
            host: Some("example.cloud.databricks.com".to_string()),
            token: None,
            timeout_secs: 30,
        };
        let err = RestClient::from_config(&config).err().unwrap();
        assert!(err.to_string().contains("DATABRICKS_TOKEN"));
    }
}
