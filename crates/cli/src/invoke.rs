//! Single tool invocation.

use mcp::{Client, JsonRpcResponse};
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};

/// Identity announced to servers by the executor.
pub const CLIENT_NAME: &str = "mcp-executor";

/// A resolved request to run one tool.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub server: String,
    pub tool: String,
    pub arguments: Value,
}

/// Parse the command-line argument blob. It must be a JSON object.
pub fn parse_arguments(raw: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(raw).map_err(|e| Error::Arguments(e.to_string()))?;
    if !value.is_object() {
        return Err(Error::Arguments(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    }
    Ok(value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Run the handshake and the tool call against the configured server.
///
/// The response envelope is returned untouched, including a JSON-RPC error
/// member, so the caller can print whatever the server said.
pub async fn invoke(config: &Config, invocation: Invocation) -> Result<JsonRpcResponse> {
    let url = config.server_url(&invocation.server)?;
    let mut client = Client::builder(url)
        .client_info(CLIENT_NAME, env!("CARGO_PKG_VERSION"))
        .build();

    client.initialize().await?;
    debug!(server = %invocation.server, tool = %invocation.tool, "calling tool");
    let response = client
        .call_tool(invocation.tool, invocation.arguments)
        .await?;
    Ok(response)
}
