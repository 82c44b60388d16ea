//! MCP protocol types (JSON-RPC 2.0 based).

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Protocol revision announced during the initialize handshake.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP header carrying the session identifier issued by `initialize`.
pub const SESSION_HEADER: &str = "Mcp-Session-Id";

/// JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: RequestId,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: impl Into<RequestId>, method: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id: id.into(),
            method: method.into(),
            params: None,
        }
    }

    pub fn with_params(mut self, params: impl Serialize) -> serde_json::Result<Self> {
        self.params = Some(serde_json::to_value(params)?);
        Ok(self)
    }
}

/// JSON-RPC 2.0 response envelope.
///
/// The success/failure split is decided once while decoding: a body with an
/// `error` member is a failure whatever its shape, and whether or not it
/// also has a `result`. The decoded body is kept verbatim and is what the
/// envelope serializes back to.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRpcResponse {
    id: Option<RequestId>,
    outcome: Outcome,
    body: Map<String, Value>,
}

/// What a response says about the call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Some servers omit `result` for void methods; that reads as `null`.
    Success(Value),
    Failure(ResponseError),
}

impl JsonRpcResponse {
    /// Classify a decoded body.
    ///
    /// A body with none of `id`, `result` or `error` is not a response.
    pub fn from_body(body: Map<String, Value>) -> Result<Self, String> {
        if !["id", "result", "error"].iter().any(|k| body.contains_key(*k)) {
            return Err("not a JSON-RPC response: no id, result or error member".to_string());
        }

        let id = body.get("id").and_then(|id| RequestId::deserialize(id).ok());
        let outcome = match body.get("error") {
            Some(error) => Outcome::Failure(ResponseError::from(error.clone())),
            None => Outcome::Success(body.get("result").cloned().unwrap_or(Value::Null)),
        };

        Ok(Self { id, outcome, body })
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Failure(_))
    }

    /// The id echoed by the server, if any.
    pub fn id(&self) -> Option<&RequestId> {
        self.id.as_ref()
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// The body exactly as the server sent it.
    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    /// Returns the result if successful, or the error member.
    pub fn into_result(self) -> Result<Value, ResponseError> {
        match self.outcome {
            Outcome::Success(result) => Ok(result),
            Outcome::Failure(error) => Err(error),
        }
    }
}

impl<'de> Deserialize<'de> for JsonRpcResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let body = Map::deserialize(deserializer)?;
        Self::from_body(body).map_err(D::Error::custom)
    }
}

impl Serialize for JsonRpcResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.body.serialize(serializer)
    }
}

/// JSON-RPC 2.0 error.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl std::fmt::Display for JsonRpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = self.code;
        let message = &self.message;
        write!(f, "[{code}] {message}")
    }
}

impl std::error::Error for JsonRpcError {}

/// The `error` member of a response.
///
/// Servers don't always send the `{code, message}` object the protocol asks
/// for; anything else is kept as sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseError {
    Standard(JsonRpcError),
    Nonstandard(Value),
}

impl ResponseError {
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Standard(error) => Some(error.code),
            Self::Nonstandard(_) => None,
        }
    }
}

impl From<Value> for ResponseError {
    fn from(value: Value) -> Self {
        match JsonRpcError::deserialize(&value) {
            Ok(error) => Self::Standard(error),
            Err(_) => Self::Nonstandard(value),
        }
    }
}

impl std::fmt::Display for ResponseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard(error) => error.fmt(f),
            Self::Nonstandard(Value::String(message)) => f.write_str(message),
            Self::Nonstandard(other) => write!(f, "{other}"),
        }
    }
}

impl std::error::Error for ResponseError {}

/// Request ID (can be string or number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    String(String),
    Number(i64),
}

impl From<i64> for RequestId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

// --- MCP-specific types ---

/// MCP initialize request params.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    pub protocol_version: String,
    pub capabilities: ClientCapabilities,
    pub client_info: ClientInfo,
}

impl InitializeParams {
    pub fn new(protocol_version: impl Into<String>, client_info: ClientInfo) -> Self {
        Self {
            protocol_version: protocol_version.into(),
            capabilities: ClientCapabilities::default(),
            client_info,
        }
    }
}

/// Client capabilities sent during initialization. Always empty.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientCapabilities {}

/// Client identity sent during initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientInfo {
    pub name: String,
    pub version: String,
}

impl ClientInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self::new("mcp", env!("CARGO_PKG_VERSION"))
    }
}

/// Tool definition returned by tools/list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub input_schema: Value,
}

impl Tool {
    /// Typed view of `input_schema`.
    ///
    /// A schema that is missing or not shaped like an object schema yields an
    /// empty [`InputSchema`].
    pub fn schema(&self) -> InputSchema {
        serde_json::from_value(self.input_schema.clone()).unwrap_or_default()
    }
}

/// The parts of a tool's JSON schema used for documentation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InputSchema {
    /// Parameter name to property schema, in declaration order.
    #[serde(default)]
    pub properties: IndexMap<String, Value>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl InputSchema {
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// Result of tools/list.
#[derive(Debug, Clone, Deserialize)]
pub struct ListToolsResult {
    #[serde(default)]
    pub tools: Vec<Tool>,
}

/// Params for tools/call.
#[derive(Debug, Clone, Serialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Value,
}
