//! MCP server state and JSON-RPC request dispatching
//!
//! This module contains the server state (the nearby places service and
//! startup metadata) and maps each JSON-RPC method onto the tool and
//! resource handlers.

use chrono::{DateTime, Utc};
use nearby_places_lib::{NearbyPlacesService, PlacesConfig};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::resources;
use crate::tools::{NearbyPlacesTool, TOOL_NAME};
use crate::Error;

pub const SERVER_NAME: &str = "nearby-places";
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const INSTRUCTIONS: &str = "Use get_nearby_places_by_coordinates to list places around a \
latitude/longitude pair. Results include ratings, opening status, reviews and formatted \
addresses. Searches take a few seconds because result pages are fetched sequentially.";

// JSON-RPC 2.0 error codes
pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
    pub data: Option<Value>,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Attach problem details as the error's `data` member
    pub fn with_problem(code: i64, problem: &Error) -> Self {
        Self {
            code,
            message: problem.message.clone(),
            data: serde_json::to_value(problem).ok(),
        }
    }

    fn to_value(&self) -> Value {
        let mut error = json!({ "code": self.code, "message": self.message });
        if let Some(data) = &self.data {
            error["data"] = data.clone();
        }
        error
    }
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

/// Main server state holding all runtime resources
pub struct McpServerState {
    service: NearbyPlacesService,

    /// Server initialization timestamp for metadata
    pub initialized_at: DateTime<Utc>,
}

impl McpServerState {
    /// Create server state backed by the Google Maps provider
    pub fn new(config: PlacesConfig) -> crate::Result<Self> {
        info!(
            detail_mode = %config.detail_mode,
            page_delay_ms = config.pagination.page_delay.as_millis() as u64,
            "Creating MCP server state"
        );
        let service = NearbyPlacesService::from_config(config)?;
        Ok(Self::with_service(service))
    }

    /// Create server state around an existing service
    pub fn with_service(service: NearbyPlacesService) -> Self {
        Self {
            service,
            initialized_at: Utc::now(),
        }
    }

    pub fn service(&self) -> &NearbyPlacesService {
        &self.service
    }

    /// Initialize the server and prepare for tool requests
    pub async fn initialize(&self) -> crate::Result<()> {
        info!(
            provider = self.service.provider_name(),
            tool = TOOL_NAME,
            "MCP server ready"
        );
        Ok(())
    }

    /// Handle one raw JSON-RPC message
    ///
    /// Returns the response to write back, or `None` for notifications.
    pub async fn handle_message(&self, raw: &str) -> Option<Value> {
        let message: Value = match serde_json::from_str(raw.trim()) {
            Ok(v) => v,
            Err(e) => {
                return Some(error_response(
                    Value::Null,
                    RpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ))
            }
        };

        let id = message.get("id").cloned();

        if message.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            return Some(error_response(
                id.unwrap_or(Value::Null),
                RpcError::new(INVALID_REQUEST, "Invalid request: jsonrpc must be \"2.0\""),
            ));
        }

        let Some(method) = message.get("method").and_then(Value::as_str) else {
            // Responses to server-initiated requests carry no method; none are sent.
            return id.map(|id| {
                error_response(id, RpcError::new(INVALID_REQUEST, "Invalid request: missing method"))
            });
        };

        let Some(id) = id else {
            debug!(method, "Received notification");
            return None;
        };

        let params = message.get("params").cloned();
        let response = match self.dispatch(method, params).await {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err(err) => error_response(id, err),
        };
        Some(response)
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, RpcError> {
        debug!(method, "Dispatching request");

        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") },
                "instructions": INSTRUCTIONS,
                "capabilities": { "tools": {}, "resources": {}, "prompts": {} }
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": [NearbyPlacesTool::descriptor()] })),
            "tools/call" => self.call_tool(params).await,
            "resources/list" => Ok(json!({ "resources": resources::list_resources() })),
            "resources/read" => self.read_resource(params),
            "prompts/list" => Ok(json!({ "prompts": [] })),
            other => Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", other),
            )),
        }
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, RpcError> {
        let params: CallToolParams = parse_params(params)?;

        if params.name != TOOL_NAME {
            return Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Unknown tool: {}", params.name),
            ));
        }

        let input = NearbyPlacesTool::parse_arguments(params.arguments)
            .map_err(|e| RpcError::with_problem(INVALID_PARAMS, &e))?;
        let result = NearbyPlacesTool::execute(&self.service, input).await;

        serde_json::to_value(result).map_err(|e| RpcError::new(INTERNAL_ERROR, e.to_string()))
    }

    fn read_resource(&self, params: Option<Value>) -> Result<Value, RpcError> {
        let params: ReadResourceParams = parse_params(params)?;
        let text = resources::read_resource(self, &params.uri).map_err(|e| {
            let code = if e.code == 404 {
                INVALID_PARAMS
            } else {
                INTERNAL_ERROR
            };
            RpcError::with_problem(code, &e)
        })?;

        Ok(json!({
            "contents": [{
                "uri": params.uri,
                "mimeType": "application/json",
                "text": text
            }]
        }))
    }
}

fn parse_params<T: for<'de> Deserialize<'de>>(params: Option<Value>) -> Result<T, RpcError> {
    let params = params.unwrap_or_else(|| json!({}));
    serde_json::from_value(params)
        .map_err(|e| RpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))
}

fn error_response(id: Value, error: RpcError) -> Value {
    json!({ "jsonrpc": "2.0", "id": id, "error": error.to_value() })
}
