//! Stdio loop behaviour, driven through in-memory readers and writers.

use std::time::Duration;

use mcp_vm_server::config::{LogFormat, ServerConfig};
use mcp_vm_server::server::{McpServer, MAX_MESSAGE_BYTES};
use serde_json::{json, Value};
use url::Url;

fn test_server() -> McpServer {
    let config = ServerConfig {
        api_url: Url::parse("http://127.0.0.1:1").unwrap(),
        api_key: "test-key".to_string(),
        tenant_id: None,
        tool_timeout: Duration::from_secs(1),
        log_format: LogFormat::Text,
    };
    McpServer::new(config).unwrap()
}

/// Feed `input` through a fresh server and return every response line.
async fn run_session(input: &[u8]) -> Vec<Value> {
    let mut server = test_server();
    let mut output = Vec::new();
    server.serve(input, &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn line(value: Value) -> String {
    format!("{value}\n")
}

fn initialize(id: i64) -> String {
    line(json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "initialize",
        "params": { "protocolVersion": "2024-11-05", "clientInfo": { "name": "t", "version": "0" } }
    }))
}

#[tokio::test]
async fn requests_before_initialize_are_rejected() {
    let input = [
        line(json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" })),
        line(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" })),
        initialize(2),
        line(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" })),
        line(json!({ "jsonrpc": "2.0", "id": 3, "method": "tools/list" })),
    ]
    .concat();

    let responses = run_session(input.as_bytes()).await;
    assert_eq!(responses.len(), 3, "notifications never get a response");

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["error"]["code"], -32600);
    assert_eq!(responses[0]["error"]["message"], "Server not initialized");

    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"]["serverInfo"]["name"], "mcp-vm-server");

    assert_eq!(responses[2]["id"], 3);
    assert_eq!(responses[2]["result"]["tools"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn malformed_lines_yield_parse_errors_and_the_loop_continues() {
    let input = [
        "this is not json\n".to_string(),
        "\n".to_string(),
        initialize(1),
        line(json!({ "jsonrpc": "2.0", "id": "ping-1", "method": "ping" })),
    ]
    .concat();

    let responses = run_session(input.as_bytes()).await;
    assert_eq!(responses.len(), 3, "blank lines are skipped");

    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[2]["id"], "ping-1");
    assert_eq!(responses[2]["result"], json!({}));
}

#[tokio::test]
async fn wrong_protocol_version_is_invalid_request() {
    let input = line(json!({ "jsonrpc": "1.0", "id": 9, "method": "initialize" }));

    let responses = run_session(input.as_bytes()).await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 9);
    assert_eq!(responses[0]["error"]["code"], -32600);
}

#[tokio::test]
async fn oversized_message_is_rejected() {
    let padding = "x".repeat(MAX_MESSAGE_BYTES);
    let input = [
        line(json!({ "jsonrpc": "2.0", "id": 1, "method": "ping", "params": { "pad": padding } })),
        initialize(2),
    ]
    .concat();

    let responses = run_session(input.as_bytes()).await;
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], 2);
    assert!(responses[1]["result"].is_object());
}

#[tokio::test]
async fn last_line_without_newline_is_served() {
    let input = initialize(1).trim_end().to_string();

    let responses = run_session(input.as_bytes()).await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn tool_errors_travel_inside_successful_responses() {
    let input = [
        initialize(1),
        line(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": { "name": "get_vm", "arguments": {} }
        })),
    ]
    .concat();

    let responses = run_session(input.as_bytes()).await;
    let result = &responses[1]["result"];
    assert_eq!(result["isError"], true);

    let text = result["content"][0]["text"].as_str().unwrap();
    let error: Value = serde_json::from_str(text).unwrap();
    assert_eq!(error["error"]["code"], "invalid_arguments");
}

#[tokio::test]
async fn invalid_utf8_is_a_parse_error_and_the_loop_continues() {
    let mut input = b"\xff\xfe\n".to_vec();
    input.extend_from_slice(initialize(1).as_bytes());

    let responses = run_session(&input).await;
    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[1]["id"], 1);
    assert!(responses[1]["result"].is_object());
}

#[tokio::test]
async fn initialize_as_notification_does_not_complete_handshake() {
    let input = [
        line(json!({ "jsonrpc": "2.0", "method": "initialize", "params": {} })),
        line(json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/list" })),
        initialize(2),
        line(json!({ "jsonrpc": "2.0", "id": 3, "method": "tools/list" })),
    ]
    .concat();

    let responses = run_session(input.as_bytes()).await;
    assert_eq!(responses.len(), 3, "the notification gets no response");

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["error"]["message"], "Server not initialized");
    assert_eq!(responses[1]["id"], 2);
    assert!(responses[2]["result"]["tools"].is_array());
}
