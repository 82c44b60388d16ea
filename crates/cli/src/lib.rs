//! MCP tool skill — command-line access to tools served over HTTP.
//!
//! Two binaries are built on this library:
//!
//! - `mcp-exec <server> <tool> '<json>'` runs one tool call and prints the
//!   server's response.
//! - `refresh-tool-docs` lists the tools of every configured server and writes
//!   one Markdown page per server.
//!
//! Both read server endpoints from `mcp-config.json`:
//!
//! ```json
//! {"mcpServers": {"github": {"url": "http://localhost:3000/github/mcp"}}}
//! ```

pub mod config;
pub mod docs;
mod error;
pub mod invoke;
pub mod logging;
pub mod refresh;
pub mod render;

pub use config::{Config, ConfigError, ServerEntry};
pub use error::{Error, Result};
