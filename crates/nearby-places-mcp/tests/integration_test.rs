//! Integration tests for the MCP server binary over stdio
//!
//! The server is spawned as a child process with a throwaway API key and a
//! base URL nothing listens on, so no test ever reaches Google.

use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::time::{Duration, Instant};

const BIN: &str = env!("CARGO_BIN_EXE_nearby-places-mcp");

fn spawn_server() -> std::io::Result<Child> {
    Command::new(BIN)
        .env("GOOGLE_API_KEY", "test-key")
        .env("GOOGLE_MAPS_API_BASE_URL", "http://127.0.0.1:9")
        .env("NEARBY_PLACES_HTTP_TIMEOUT_SECS", "5")
        .env("RUST_LOG", "info")
        .env_remove("LOG_FORMAT")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .current_dir(env!("CARGO_TARGET_TMPDIR"))
        .spawn()
}

/// Kills the child process on drop so a failing test does not leak it.
struct ProcessGuard {
    child: Child,
    stdout: BufReader<ChildStdout>,
}

impl ProcessGuard {
    fn spawn() -> Self {
        let mut child = spawn_server().expect("Failed to spawn server");
        let stdout = BufReader::new(child.stdout.take().expect("stdout should be piped"));
        Self { child, stdout }
    }

    fn send_line(&mut self, line: &str) {
        let stdin = self.child.stdin.as_mut().expect("stdin should be piped");
        writeln!(stdin, "{}", line).expect("Failed to write request");
        stdin.flush().expect("Failed to flush request");
    }

    fn read_response(&mut self) -> Value {
        let mut line = String::new();
        self.stdout
            .read_line(&mut line)
            .expect("Failed to read response");
        serde_json::from_str(&line)
            .unwrap_or_else(|e| panic!("Failed to parse JSON response {:?}: {}", line, e))
    }

    fn request(&mut self, request: Value) -> Value {
        self.send_line(&request.to_string());
        self.read_response()
    }

    /// Close stdin and wait for the server to exit on EOF.
    fn shutdown(&mut self) -> std::process::ExitStatus {
        drop(self.child.stdin.take());

        let start = Instant::now();
        loop {
            match self.child.try_wait().expect("Failed to check server status") {
                Some(status) => return status,
                None => {
                    if start.elapsed() > Duration::from_secs(5) {
                        panic!("Server did not exit within timeout");
                    }
                    std::thread::sleep(Duration::from_millis(10));
                }
            }
        }
    }

    fn stderr(&mut self) -> String {
        let mut stderr = String::new();
        if let Some(pipe) = self.child.stderr.as_mut() {
            pipe.read_to_string(&mut stderr).ok();
        }
        stderr
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn test_initialize_and_clean_exit() {
    let mut server = ProcessGuard::spawn();

    let response = server.request(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "initialize",
        "params": {
            "protocolVersion": "2024-11-05",
            "capabilities": {},
            "clientInfo": { "name": "integration-test", "version": "0.0.0" }
        }
    }));

    assert_eq!(response["jsonrpc"], "2.0");
    assert_eq!(response["id"], 1);
    assert_eq!(response["result"]["serverInfo"]["name"], "nearby-places");
    assert!(response["result"]["capabilities"]["tools"].is_object());

    let status = server.shutdown();
    assert!(status.success(), "Server exited with error: {:?}", status);

    let stderr = server.stderr();
    assert!(stderr.contains("MCP server initialized"));
    assert!(!response.to_string().contains("MCP server initialized"));
}

#[test]
fn test_tools_list_over_stdio() {
    let mut server = ProcessGuard::spawn();

    let response = server.request(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}));

    let tools = response["result"]["tools"].as_array().expect("tools array");
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "get_nearby_places_by_coordinates");
    let required = tools[0]["inputSchema"]["required"]
        .as_array()
        .expect("required array");
    assert!(required.contains(&json!("lat")));
    assert!(required.contains(&json!("lng")));
}

#[test]
fn test_resources_and_prompts_list() {
    let mut server = ProcessGuard::spawn();

    let response = server.request(json!({"jsonrpc": "2.0", "id": 3, "method": "resources/list"}));
    assert_eq!(response["result"]["resources"].as_array().unwrap().len(), 2);

    let response = server.request(json!({
        "jsonrpc": "2.0", "id": 4, "method": "resources/read",
        "params": {"uri": "nearby-places://server/info"}
    }));
    let text = response["result"]["contents"][0]["text"].as_str().unwrap();
    let info: Value = serde_json::from_str(text).unwrap();
    assert_eq!(info["provider"], "google-maps");
    assert_eq!(info["detail_mode"], "strict");

    let response = server.request(json!({"jsonrpc": "2.0", "id": 5, "method": "prompts/list"}));
    assert!(response["result"]["prompts"].as_array().unwrap().is_empty());
}

#[test]
fn test_protocol_errors_keep_server_running() {
    let mut server = ProcessGuard::spawn();

    server.send_line("{this is not json");
    let response = server.read_response();
    assert_eq!(response["error"]["code"], -32700);
    assert!(response["id"].is_null());

    let response = server.request(json!({"jsonrpc": "1.0", "id": 6, "method": "ping"}));
    assert_eq!(response["error"]["code"], -32600);

    let response = server.request(json!({"jsonrpc": "2.0", "id": 7, "method": "does/not/exist"}));
    assert_eq!(response["error"]["code"], -32601);

    // Notifications produce no output; the next response must belong to the ping.
    server.send_line(r#"{"jsonrpc": "2.0", "method": "notifications/initialized"}"#);
    let response = server.request(json!({"jsonrpc": "2.0", "id": 8, "method": "ping"}));
    assert_eq!(response["id"], 8);
    assert!(response["result"].is_object());
}

#[test]
fn test_tool_errors_are_results() {
    let mut server = ProcessGuard::spawn();

    let response = server.request(json!({
        "jsonrpc": "2.0", "id": 9, "method": "tools/call",
        "params": {
            "name": "get_nearby_places_by_coordinates",
            "arguments": {"lat": "not-a-number", "lng": "2.3376"}
        }
    }));
    assert_eq!(response["result"]["isError"], true);
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Error: "));

    // Nothing listens on the configured base URL, so the first page fails.
    let response = server.request(json!({
        "jsonrpc": "2.0", "id": 10, "method": "tools/call",
        "params": {
            "name": "get_nearby_places_by_coordinates",
            "arguments": {"lat": "48.8606", "lng": "2.3376", "type": "museum"}
        }
    }));
    assert_eq!(response["result"]["isError"], true);
    let text = response["result"]["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Error: "));
    assert!(!text.contains("test-key"));
}

#[test]
fn test_unknown_place_type_is_invalid_params() {
    let mut server = ProcessGuard::spawn();

    let response = server.request(json!({
        "jsonrpc": "2.0", "id": 11, "method": "tools/call",
        "params": {
            "name": "get_nearby_places_by_coordinates",
            "arguments": {"lat": "1", "lng": "2", "type": "spaceport"}
        }
    }));
    assert_eq!(response["error"]["code"], -32602);
}

#[test]
fn test_missing_api_key_fails_startup() {
    AssertCommand::new(BIN)
        .env_remove("GOOGLE_API_KEY")
        .current_dir(env!("CARGO_TARGET_TMPDIR"))
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("GOOGLE_API_KEY"));
}

#[test]
fn test_invalid_detail_mode_flag_fails_startup() {
    AssertCommand::new(BIN)
        .arg("--detail-mode")
        .arg("sometimes")
        .env("GOOGLE_API_KEY", "test-key")
        .current_dir(env!("CARGO_TARGET_TMPDIR"))
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict"));
}
