//! Configuration management for the MCP server.
//!
//! Everything is read from the environment (after loading `.env` through
//! `dotenvy`). The include/exclude module lists are kept exactly as
//! configured: rejecting a conflicting pair is the tool registry's job, so
//! that a conflict fails startup with a composition error.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use crate::domains::tools::DEFAULT_MAX_ITEMS;

pub const ENV_TOOLS_INCLUDE: &str = "DATABRICKS_MCP_TOOLS_INCLUDE";
pub const ENV_TOOLS_EXCLUDE: &str = "DATABRICKS_MCP_TOOLS_EXCLUDE";
pub const ENV_MAX_ITEMS: &str = "DATABRICKS_MCP_MAX_ITEMS";
pub const ENV_HOST: &str = "DATABRICKS_HOST";
pub const ENV_TOKEN: &str = "DATABRICKS_TOKEN";
pub const ENV_TIMEOUT: &str = "DATABRICKS_HTTP_TIMEOUT_SECS";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Which tool modules to load.
    pub modules: ModulesConfig,

    /// Invocation limits shared by all tools.
    pub tools: ToolsConfig,

    /// Remote workspace connection.
    pub workspace: WorkspaceConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "databricks-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Module selection. At most one of the two lists may be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulesConfig {
    pub include: Option<BTreeSet<String>>,
    pub exclude: Option<BTreeSet<String>>,
}

impl ModulesConfig {
    /// Parse a comma-separated module list.
    ///
    /// Tokens are trimmed and empty tokens dropped; a list with no tokens
    /// left is the same as no list at all.
    pub fn parse_list(raw: &str) -> Option<BTreeSet<String>> {
        let names: BTreeSet<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        (!names.is_empty()).then_some(names)
    }

    fn from_env() -> Self {
        Self {
            include: env_var(ENV_TOOLS_INCLUDE).and_then(|v| Self::parse_list(&v)),
            exclude: env_var(ENV_TOOLS_EXCLUDE).and_then(|v| Self::parse_list(&v)),
        }
    }
}

/// Limits applied to every invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Cap on items returned by list tools.
    pub max_items: usize,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

/// Connection settings of the REST client.
#[derive(Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub host: Option<String>,
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            host: None,
            token: None,
            timeout_secs: 30,
        }
    }
}

/// Custom Debug implementation to redact the token from logs.
impl fmt::Debug for WorkspaceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkspaceConfig")
            .field("host", &self.host)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(name) = env_var("MCP_SERVER_NAME") {
            config.server.name = name;
        }
        if let Some(level) = env_var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.modules = ModulesConfig::from_env();
        config.tools.max_items = env_parse(ENV_MAX_ITEMS, DEFAULT_MAX_ITEMS).max(1);

        config.workspace = WorkspaceConfig {
            host: env_var(ENV_HOST),
            token: env_var(ENV_TOKEN),
            timeout_secs: env_parse(ENV_TIMEOUT, WorkspaceConfig::default().timeout_secs),
        };
        if config.workspace.host.is_none() {
            warn!("{} not set - tools will fail until it is configured", ENV_HOST);
        }

        config.transport = TransportConfig::from_env();

        config
    }
}

/// A trimmed, non-empty environment variable.
pub(crate) fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an environment variable, falling back to `default` when it is
/// missing or malformed.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + fmt::Display,
{
    match env_var(key) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Invalid value '{}' for {}, using {}", raw, key, default);
            default
        }),
        None => default,
    }
}
