//! Session client for MCP servers reachable over HTTP.
//!
//! Every operation is a single JSON-RPC POST. The first operation on a fresh
//! client is preceded by the `initialize` handshake, whose response carries the
//! session id echoed back on every later request.

use eventsource_stream::Eventsource;
use futures::{Stream, StreamExt};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::protocol::{
    CallToolParams, ClientInfo, InitializeParams, JsonRpcRequest, JsonRpcResponse,
    ListToolsResult, PROTOCOL_VERSION, RequestId, SESSION_HEADER, Tool,
};

/// Streamable HTTP servers may answer with either representation.
const ACCEPT_VALUE: &str = "application/json, text/event-stream";

/// Builder for creating a [`Client`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    client_info: ClientInfo,
    protocol_version: String,
}

impl ClientBuilder {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client_info: ClientInfo::default(),
            protocol_version: PROTOCOL_VERSION.to_string(),
        }
    }

    /// Set the identity announced in the handshake.
    pub fn client_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.client_info = ClientInfo::new(name, version);
        self
    }

    pub fn protocol_version(mut self, version: impl Into<String>) -> Self {
        self.protocol_version = version.into();
        self
    }

    pub fn build(self) -> Client {
        Client {
            http: reqwest::Client::new(),
            base_url: self.base_url,
            client_info: self.client_info,
            protocol_version: self.protocol_version,
            session_id: None,
            next_id: 1,
        }
    }
}

/// One logical session against one server endpoint.
///
/// The session id is captured once by [`Client::initialize`] and reused
/// verbatim until the client is dropped.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    client_info: ClientInfo,
    protocol_version: String,
    session_id: Option<String>,
    next_id: i64,
}

impl Client {
    /// Client with the default identity and protocol version.
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientBuilder::new(base_url).build()
    }

    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session id issued by the server, once initialized.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Perform the handshake and store the issued session id.
    ///
    /// Calling this again sends a fresh handshake and replaces the stored id.
    pub async fn initialize(&mut self) -> Result<JsonRpcResponse> {
        let params = InitializeParams::new(&self.protocol_version, self.client_info.clone());
        let (headers, response) = self.send("initialize", params, None).await?;

        let session_id = headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingSessionId)?;

        info!(url = %self.base_url, session_id, "session established");
        self.session_id = Some(session_id.to_string());
        Ok(response)
    }

    /// Send `method` on the current session, initializing first if needed.
    ///
    /// The decoded envelope is returned as-is; a JSON-RPC error member is not
    /// turned into an `Err` here.
    pub async fn call(&mut self, method: &str, params: impl Serialize) -> Result<JsonRpcResponse> {
        if self.session_id.is_none() {
            self.initialize().await?;
        }
        let session_id = self.session_id.clone();
        let (_, response) = self.send(method, params, session_id.as_deref()).await?;
        Ok(response)
    }

    /// Invoke a tool and return the raw response envelope.
    pub async fn call_tool(
        &mut self,
        name: impl Into<String>,
        arguments: Value,
    ) -> Result<JsonRpcResponse> {
        let params = CallToolParams {
            name: name.into(),
            arguments,
        };
        self.call("tools/call", params).await
    }

    /// List the server's tools. A JSON-RPC error member becomes [`Error::JsonRpc`].
    pub async fn list_tools(&mut self) -> Result<Vec<Tool>> {
        let result = self.call("tools/list", json!({})).await?.into_result()?;
        if result.is_null() {
            return Ok(Vec::new());
        }
        let list: ListToolsResult = serde_json::from_value(result)
            .map_err(|e| Error::InvalidResponse(format!("malformed tools/list result: {e}")))?;
        Ok(list.tools)
    }

    // --- Internal methods ---

    fn next_request_id(&mut self) -> RequestId {
        let id = self.next_id;
        self.next_id += 1;
        RequestId::Number(id)
    }

    async fn send(
        &mut self,
        method: &str,
        params: impl Serialize,
        session_id: Option<&str>,
    ) -> Result<(HeaderMap, JsonRpcResponse)> {
        let id = self.next_request_id();
        let request = JsonRpcRequest::new(id.clone(), method).with_params(params)?;

        let mut req = self.http.post(&self.base_url).header(ACCEPT, ACCEPT_VALUE);
        if let Some(session_id) = session_id {
            req = req.header(SESSION_HEADER, session_id);
        }

        debug!(url = %self.base_url, method, ?id, "sending request");
        let response = req.json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let headers = response.headers().clone();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let envelope = if is_event_stream(&content_type) {
            decode_event_stream(response.bytes_stream()).await?
        } else {
            decode_json(&response.text().await?)?
        };

        // Verify response ID matches
        if let Some(got) = envelope.id() {
            if *got != id {
                return Err(Error::InvalidResponse(format!(
                    "response ID mismatch: expected {id:?}, got {got:?}"
                )));
            }
        }

        debug!(method, is_error = envelope.is_error(), "received response");
        Ok((headers, envelope))
    }
}

fn is_event_stream(content_type: &str) -> bool {
    content_type.starts_with("text/event-stream")
}

fn decode_json(body: &str) -> Result<JsonRpcResponse> {
    serde_json::from_str(body).map_err(|e| Error::InvalidResponse(e.to_string()))
}

/// Pick the first server-sent event whose data is a JSON-RPC envelope.
///
/// Events without data (keep-alives, comments) and events carrying anything
/// else are skipped.
async fn decode_event_stream<S, B, E>(stream: S) -> Result<JsonRpcResponse>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let mut events = std::pin::pin!(stream.eventsource());
    while let Some(event) = events.next().await {
        let event = event.map_err(|e| Error::InvalidResponse(format!("event stream: {e}")))?;
        if event.data.is_empty() {
            continue;
        }
        match serde_json::from_str(&event.data) {
            Ok(envelope) => return Ok(envelope),
            Err(e) => debug!(event = %event.event, error = %e, "skipping event"),
        }
    }
    Err(Error::InvalidResponse(
        "no JSON-RPC message in event stream".to_string(),
    ))
}
