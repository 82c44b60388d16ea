//! MCP (Model Context Protocol) client library.
//!
//! This crate provides a session client for MCP servers exposed over HTTP:
//! one `initialize` handshake issues a session id, and every later JSON-RPC
//! call carries it in the `Mcp-Session-Id` header.
//!
//! # Example
//!
//! ```no_run
//! use mcp::Client;
//!
//! # async fn example() -> mcp::Result<()> {
//! let mut client = Client::builder("http://localhost:8080/mcp")
//!     .client_info("docs-bot", "0.1.0")
//!     .build();
//!
//! for tool in client.list_tools().await? {
//!     println!("Tool: {}", tool.name);
//! }
//!
//! let response = client
//!     .call_tool("read_file", serde_json::json!({"path": "./README.md"}))
//!     .await?;
//! println!("{}", serde_json::to_string_pretty(&response)?);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod protocol;

pub use client::{Client, ClientBuilder};
pub use error::{Error, ErrorKind, Result};
pub use protocol::{
    CallToolParams, ClientCapabilities, ClientInfo, InitializeParams, InputSchema, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, Outcome, PROTOCOL_VERSION, RequestId,
    ResponseError, SESSION_HEADER, Tool,
};
