//! Type definitions for MCP tool inputs and outputs
//!
//! This module defines the serializable request and response types for the
//! MCP tool, with JSON Schema generation for argument validation.

use nearby_places_lib::PlaceType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// TOOL INPUTS
// ============================================================================

/// Input for the get_nearby_places_by_coordinates tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NearbyPlacesInput {
    /// Latitude of the location
    pub lat: String,

    /// Longitude of the location
    pub lng: String,

    /// Type of the place
    #[serde(default, rename = "type")]
    pub place_type: Option<PlaceType>,

    /// Radius of the search in meters (default: 2000)
    #[serde(default)]
    pub radius: Option<f64>,
}

// ============================================================================
// TOOL OUTPUTS
// ============================================================================

/// Content block returned from a tool call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Content::Text { text } => text,
        }
    }
}

/// Result of a `tools/call` request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    pub content: Vec<Content>,
    pub is_error: bool,
}

impl CallToolResult {
    pub fn success(content: Vec<Content>) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(message)],
            is_error: true,
        }
    }
}

/// Tool entry for `tools/list`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Resource entry for `resources/list`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_deserialization() {
        let json = r#"{
            "lat": "40.7128",
            "lng": "-74.0060",
            "type": "cafe",
            "radius": 1000
        }"#;

        let input: NearbyPlacesInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.lat, "40.7128");
        assert_eq!(input.place_type, Some(PlaceType::Cafe));
        assert_eq!(input.radius, Some(1000.0));
    }

    #[test]
    fn test_input_minimal() {
        let input: NearbyPlacesInput =
            serde_json::from_str(r#"{"lat": "1", "lng": "2"}"#).unwrap();
        assert!(input.place_type.is_none());
        assert!(input.radius.is_none());
    }

    #[test]
    fn test_input_rejects_unknown_type() {
        let result: Result<NearbyPlacesInput, _> =
            serde_json::from_str(r#"{"lat": "1", "lng": "2", "type": "spaceport"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_call_tool_result_serialization() {
        let result = CallToolResult::error("Error: boom");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isError"], true);
        assert_eq!(json["content"][0]["type"], "text");
        assert_eq!(json["content"][0]["text"], "Error: boom");
    }
}
