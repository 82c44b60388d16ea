//! Server configuration loading from mcp-config.json.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default config file name, looked up next to the executable.
pub const CONFIG_FILE: &str = "mcp-config.json";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server name to endpoint, in file order.
    #[serde(rename = "mcpServers", default)]
    pub mcp_servers: IndexMap<String, ServerEntry>,
}

/// A single configured MCP server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerEntry {
    pub url: String,
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Files ending in `.toml` are read as TOML, everything else as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if path.extension().is_some_and(|ext| ext == "toml") {
            Self::parse_toml(&content)
        } else {
            Self::parse(&content)
        }
    }

    /// Parse configuration from a JSON string.
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve a server name to its URL.
    pub fn server_url(&self, name: &str) -> Result<&str, ConfigError> {
        self.mcp_servers
            .get(name)
            .map(|entry| entry.url.as_str())
            .ok_or_else(|| ConfigError::UnknownServer(name.to_string()))
    }

    /// Iterate servers in configuration order.
    pub fn servers(&self) -> impl Iterator<Item = (&str, &ServerEntry)> {
        self.mcp_servers.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

/// Directory holding the running executable, or `.` if it can't be determined.
pub fn executable_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `mcp-config.json` next to the executable.
pub fn default_config_path() -> PathBuf {
    executable_dir().join(CONFIG_FILE)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("unknown server '{0}': not present in config")]
    UnknownServer(String),
}
