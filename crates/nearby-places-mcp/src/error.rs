//! Error types and RFC 9457-style problem details for the MCP server
//!
//! This module defines a unified error type for the MCP server that can be
//! rendered as a tool error result or attached to a JSON-RPC error as data.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Result type for MCP operations
pub type Result<T> = std::result::Result<T, Error>;

/// MCP Server error type implementing RFC 9457 Problem Details
#[derive(Debug, Error, Serialize, Deserialize, Clone)]
#[error("{message}")]
pub struct Error {
    /// HTTP status-like code (e.g., 400, 404, 502)
    pub code: i32,

    /// Human-readable error message
    pub message: String,

    /// Machine-readable problem type URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    /// Additional error context (e.g., parameter name, place id)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl Error {
    /// Create a new error with a code and message
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            r#type: None,
            context: None,
        }
    }

    /// Add a problem type URI
    pub fn with_type(mut self, type_uri: impl Into<String>) -> Self {
        self.r#type = Some(type_uri.into());
        self
    }

    /// Add context information as JSON
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Invalid parameter error
    pub fn invalid_param(param: impl Into<String>, reason: impl Into<String>) -> Self {
        let p = param.into();
        let reason = reason.into();
        Self::new(400, format!("Invalid parameter {}: {}", p, reason))
            .with_type("https://nearby-places.local/errors/invalid-parameter")
            .with_context(json!({
                "parameter": p,
                "reason": reason
            }))
    }

    /// Unknown resource URI
    pub fn resource_not_found(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        Self::new(404, format!("Resource '{}' not found", uri))
            .with_type("https://nearby-places.local/errors/resource-not-found")
            .with_context(json!({ "uri": uri }))
    }

    /// The places provider failed or rejected the request
    pub fn upstream(reason: impl Into<String>) -> Self {
        Self::new(502, reason).with_type("https://nearby-places.local/errors/upstream")
    }

    /// Internal server error
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::new(500, format!("Internal server error: {}", reason.into()))
            .with_type("https://nearby-places.local/errors/internal-error")
    }
}

impl From<nearby_places_lib::Error> for Error {
    fn from(err: nearby_places_lib::Error) -> Self {
        use nearby_places_lib::Error as LibError;

        match &err {
            LibError::InvalidCoordinate { name, reason, .. } => {
                Error::invalid_param(if *name == "latitude" { "lat" } else { "lng" }, reason.clone())
            }
            LibError::InvalidRadius { .. } => Error::invalid_param("radius", err.to_string()),
            LibError::DetailFetch { place_id, .. } => Error::upstream(err.to_string())
                .with_context(json!({ "place_id": place_id })),
            LibError::MissingApiKey | LibError::InvalidConfig { .. } => {
                Error::internal(err.to_string())
            }
            _ => Error::upstream(err.to_string()),
        }
    }
}
