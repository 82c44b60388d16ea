//! Session client tests against a stub HTTP endpoint.

use mcp::{Client, Error, ErrorKind, ResponseError, SESSION_HEADER};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, header, header_exists, method};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn initialize_ok(session_id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header(SESSION_HEADER, session_id)
        .set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "protocolVersion": "2024-11-05",
                "capabilities": {"tools": {}},
                "serverInfo": {"name": "stub", "version": "0.0.1"}
            }
        }))
}

async fn mount_initialize(server: &MockServer, session_id: &str, times: u64) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "initialize"})))
        .respond_with(initialize_ok(session_id))
        .expect(times)
        .mount(server)
        .await;
}

fn tools_body(id: i64) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": {
            "tools": [
                {"name": "search", "description": "Search", "inputSchema": {"type": "object"}},
                {"name": "fetch", "inputSchema": {"type": "object", "properties": {"url": {"type": "string"}}}}
            ]
        }
    })
}

fn body_json(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

#[tokio::test]
async fn initialize_captures_session_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "9.9.9"}
            }
        })))
        .respond_with(initialize_ok("sess-abc-123"))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = Client::builder(server.uri())
        .client_info("test-client", "9.9.9")
        .build();
    let response = client.initialize().await.unwrap();

    assert!(!response.is_error());
    assert_eq!(client.session_id(), Some("sess-abc-123"));
}

#[tokio::test]
async fn initialize_without_session_header_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": {}})),
        )
        .mount(&server)
        .await;

    let mut client = Client::new(server.uri());
    let err = client.initialize().await.unwrap_err();

    assert!(matches!(err, Error::MissingSessionId));
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(client.session_id(), None);
}

#[tokio::test]
async fn first_call_initializes_then_reuses_session() {
    let server = MockServer::start().await;
    mount_initialize(&server, "sess-1", 1).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "tools/list", "params": {}})))
        .and(header(SESSION_HEADER, "sess-1"))
        .respond_with(|req: &Request| {
            let id = body_json(req)["id"].as_i64().unwrap();
            ResponseTemplate::new(200).set_body_json(tools_body(id))
        })
        .expect(2)
        .mount(&server)
        .await;

    let mut client = Client::new(server.uri());
    let first = client.list_tools().await.unwrap();
    let second = client.list_tools().await.unwrap();

    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 2);
    assert_eq!(first[0].name, "search");
    assert_eq!(first[1].name, "fetch");
    assert_eq!(client.session_id(), Some("sess-1"));

    let requests = server.received_requests().await.unwrap();
    let ids: Vec<i64> = requests
        .iter()
        .map(|r| body_json(r)["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [1, 2, 3]);
    assert!(!requests[0].headers.contains_key(SESSION_HEADER));
}

#[tokio::test]
async fn call_tool_returns_embedded_error_as_value() {
    let server = MockServer::start().await;
    mount_initialize(&server, "sess-2", 1).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "tools/call",
            "params": {"name": "create_issue", "arguments": {"repo": "owner/repo"}}
        })))
        .and(header_exists(SESSION_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "error": {"code": -32602, "message": "missing title"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = Client::new(server.uri());
    let response = client
        .call_tool("create_issue", json!({"repo": "owner/repo"}))
        .await
        .unwrap();

    assert!(response.is_error());
    let err = response.into_result().unwrap_err();
    assert!(matches!(err, ResponseError::Standard(ref e) if e.message == "missing title"));
}

#[tokio::test]
async fn call_tool_keeps_nonstandard_error_and_extra_members() {
    let server = MockServer::start().await;
    mount_initialize(&server, "sess-6", 1).await;
    let body = json!({
        "jsonrpc": "2.0",
        "id": 2,
        "error": {"message": "denied"},
        "meta": {"retryAfter": 30}
    });
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "tools/call"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .mount(&server)
        .await;

    let mut client = Client::new(server.uri());
    let response = client.call_tool("delete", json!({})).await.unwrap();

    assert!(response.is_error());
    assert_eq!(serde_json::to_value(&response).unwrap(), body);
    assert_eq!(
        response.into_result().unwrap_err(),
        ResponseError::Nonstandard(json!({"message": "denied"}))
    );
}

#[tokio::test]
async fn list_tools_error_member_is_protocol_error() {
    let server = MockServer::start().await;
    mount_initialize(&server, "sess-3", 1).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "tools/list"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "error": {"code": -32603, "message": "backend down"}
        })))
        .mount(&server)
        .await;

    let mut client = Client::new(server.uri());
    let err = client.list_tools().await.unwrap_err();

    assert!(matches!(err, Error::JsonRpc(ref e) if e.code() == Some(-32603)));
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn list_tools_string_error_is_protocol_error() {
    let server = MockServer::start().await;
    mount_initialize(&server, "sess-7", 1).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "tools/list"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "error": "server overloaded"
        })))
        .mount(&server)
        .await;

    let mut client = Client::new(server.uri());
    let err = client.list_tools().await.unwrap_err();

    assert!(matches!(err, Error::JsonRpc(ResponseError::Nonstandard(_))));
    assert_eq!(err.to_string(), "JSON-RPC error: server overloaded");
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn list_tools_null_error_is_not_an_empty_listing() {
    let server = MockServer::start().await;
    mount_initialize(&server, "sess-8", 1).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "tools/list"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "error": null
        })))
        .mount(&server)
        .await;

    let mut client = Client::new(server.uri());
    let err = client.list_tools().await.unwrap_err();

    assert!(matches!(err, Error::JsonRpc(ResponseError::Nonstandard(Value::Null))));
}

#[tokio::test]
async fn http_error_status_is_transport_error() {
    let server = MockServer::start().await;
    mount_initialize(&server, "sess-4", 1).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "tools/list"})))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let mut client = Client::new(server.uri());
    let err = client.list_tools().await.unwrap_err();

    match &err {
        Error::Status { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn event_stream_responses_are_decoded() {
    let server = MockServer::start().await;
    mount_initialize(&server, "sess-5", 1).await;
    let event = format!("event: message\ndata: {}\n\n", tools_body(2));
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "tools/list"})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(event, "text/event-stream"))
        .mount(&server)
        .await;

    let mut client = Client::new(server.uri());
    let tools = client.list_tools().await.unwrap();

    assert_eq!(tools.len(), 2);
    assert_eq!(tools[1].schema().properties.len(), 1);
}

#[tokio::test]
async fn event_stream_skips_notifications_before_the_response() {
    let server = MockServer::start().await;
    mount_initialize(&server, "sess-9", 1).await;
    let events = format!(
        ": keep-alive\n\nevent: message\ndata: {}\n\nevent: message\ndata: {}\n\n",
        json!({"jsonrpc": "2.0", "method": "notifications/progress", "params": {"progress": 1}}),
        tools_body(2)
    );
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "tools/list"})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(events, "text/event-stream"))
        .mount(&server)
        .await;

    let mut client = Client::new(server.uri());
    let tools = client.list_tools().await.unwrap();

    assert_eq!(tools[0].name, "search");
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Bind and drop a listener so nothing accepts on the port.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}/mcp", listener.local_addr().unwrap())
    };

    let mut client = Client::new(uri);
    let err = client.initialize().await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
}
