//! MCP tool implementation for nearby place search
//!
//! The server exposes a single tool, `get_nearby_places_by_coordinates`,
//! which validates its arguments, runs the paginated search and detail
//! aggregation, and always answers with a tool result: failures are rendered
//! as `isError` results rather than protocol errors.

use nearby_places_lib::{NearbyPlaces, NearbyPlacesService, SearchRequest};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::types::{CallToolResult, Content, NearbyPlacesInput, ToolDescriptor};
use crate::Error;

pub const TOOL_NAME: &str = "get_nearby_places_by_coordinates";
pub const TOOL_DESCRIPTION: &str = "Fetches nearby places based on geographic coordinates. \
Returns up to 60 relevant places as determined by Google's proximity algorithm";

/// Nearby places tool handler
pub struct NearbyPlacesTool;

impl NearbyPlacesTool {
    /// Descriptor advertised through `tools/list`
    pub fn descriptor() -> ToolDescriptor {
        let schema = schemars::schema_for!(NearbyPlacesInput);
        let input_schema =
            serde_json::to_value(&schema).unwrap_or_else(|_| json!({ "type": "object" }));

        ToolDescriptor {
            name: TOOL_NAME,
            description: TOOL_DESCRIPTION,
            input_schema,
        }
    }

    /// Deserialize tool arguments, enforcing the input schema
    pub fn parse_arguments(arguments: Option<Value>) -> crate::Result<NearbyPlacesInput> {
        let arguments = arguments.unwrap_or_else(|| json!({}));
        serde_json::from_value(arguments)
            .map_err(|e| Error::invalid_param("arguments", e.to_string()))
    }

    /// Handle a nearby places request
    ///
    /// # Arguments
    ///
    /// * `service` - Service that performs the paginated search
    /// * `input` - Validated tool arguments
    ///
    /// # Returns
    ///
    /// A tool result carrying either the place list or an error message
    pub async fn execute(service: &NearbyPlacesService, input: NearbyPlacesInput) -> CallToolResult {
        info!(
            "Nearby places: {},{} (type: {:?}, radius: {:?})",
            input.lat, input.lng, input.place_type, input.radius
        );

        match Self::run(service, input).await.and_then(|found| Self::render(&found)) {
            Ok(content) => CallToolResult::success(content),
            Err(err) => {
                warn!(code = err.code, error = %err, "nearby places request failed");
                CallToolResult::error(format!("Error: {}", err))
            }
        }
    }

    async fn run(service: &NearbyPlacesService, input: NearbyPlacesInput) -> crate::Result<NearbyPlaces> {
        let request = Self::build_request(input)?;
        Ok(service.find_nearby_places(&request).await?)
    }

    /// Validate tool arguments into a search request
    pub fn build_request(input: NearbyPlacesInput) -> crate::Result<SearchRequest> {
        let request = SearchRequest::new(&input.lat, &input.lng)?
            .with_radius(input.radius)?
            .with_place_type(input.place_type);
        Ok(request)
    }

    fn render(found: &NearbyPlaces) -> crate::Result<Vec<Content>> {
        let places = serde_json::to_string_pretty(&found.places)
            .map_err(|e| Error::internal(e.to_string()))?;
        let mut content = vec![Content::text(format!("All Places: {}", places))];

        if !found.failed_details.is_empty() {
            let failures = found
                .failed_details
                .iter()
                .map(|f| format!("- {}: {}", f.place_id, f.message))
                .collect::<Vec<_>>()
                .join("\n");
            content.push(Content::text(format!(
                "Details unavailable for {} place(s):\n{}",
                found.failed_details.len(),
                failures
            )));
        }

        Ok(content)
    }
}
