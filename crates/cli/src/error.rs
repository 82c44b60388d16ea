//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration is missing, unreadable, or doesn't name the server.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The tool arguments given on the command line are not a JSON object.
    #[error("invalid JSON arguments: {0}")]
    Arguments(String),

    /// The requested output format is not compiled into this build.
    #[error("output format '{0}' is not available in this build")]
    FormatUnavailable(&'static str),

    /// Failed to render a parameter block.
    #[error("failed to render parameters: {0}")]
    Render(String),

    /// A server name that can't be used as a file name inside the output directory.
    #[error("invalid server name '{0}': must be a plain file name")]
    InvalidServerName(String),

    /// Failed to write a documentation file.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An error occurred talking to the MCP server.
    #[error(transparent)]
    Mcp(#[from] mcp::Error),

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
