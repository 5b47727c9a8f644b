//! MCP resource implementations
//!
//! Two read-only resources are exposed:
//! - nearby-places://place-types: Accepted values for the tool's `type` argument
//! - nearby-places://server/info: Server version and search settings

use nearby_places_lib::PlaceType;
use serde::Serialize;
use serde_json::json;

use crate::server::McpServerState;
use crate::types::ResourceDescriptor;
use crate::{Error, Result};

pub const PLACE_TYPES_URI: &str = "nearby-places://place-types";
pub const SERVER_INFO_URI: &str = "nearby-places://server/info";

/// All resources advertised through `resources/list`
pub fn list_resources() -> Vec<ResourceDescriptor> {
    vec![
        ResourceDescriptor {
            uri: PLACE_TYPES_URI.to_string(),
            name: "Place Types".to_string(),
            description: "Place categories accepted by the nearby search 'type' argument"
                .to_string(),
            mime_type: "application/json".to_string(),
        },
        ResourceDescriptor {
            uri: SERVER_INFO_URI.to_string(),
            name: "Server Info".to_string(),
            description: "Server version, provider, pagination delay and detail mode".to_string(),
            mime_type: "application/json".to_string(),
        },
    ]
}

/// Read a resource by URI, returning its JSON body
pub fn read_resource(state: &McpServerState, uri: &str) -> Result<String> {
    match uri {
        PLACE_TYPES_URI => PlaceTypesResource::read(),
        SERVER_INFO_URI => ServerInfoResource::read(state),
        other => Err(Error::resource_not_found(other)),
    }
}

/// Place category resource
pub struct PlaceTypesResource;

impl PlaceTypesResource {
    pub fn read() -> Result<String> {
        let names: Vec<&str> = PlaceType::ALL.iter().map(|t| t.as_str()).collect();
        let payload = json!({
            "count": names.len(),
            "place_types": names,
        });
        serde_json::to_string(&payload).map_err(|e| Error::internal(e.to_string()))
    }
}

/// Server information resource
pub struct ServerInfoResource;

impl ServerInfoResource {
    pub fn read(state: &McpServerState) -> Result<String> {
        #[derive(Serialize)]
        struct ServerInfo<'a> {
            name: &'a str,
            version: &'a str,
            provider: &'a str,
            started_at: String,
            page_delay_ms: u64,
            delay_after_last_page: bool,
            detail_mode: &'a str,
            default_radius_m: u32,
        }

        let service = state.service();
        let info = ServerInfo {
            name: crate::server::SERVER_NAME,
            version: env!("CARGO_PKG_VERSION"),
            provider: service.provider_name(),
            started_at: state.initialized_at.to_rfc3339(),
            page_delay_ms: service.pagination().page_delay.as_millis() as u64,
            delay_after_last_page: service.pagination().delay_after_last_page,
            detail_mode: service.detail_mode().as_str(),
            default_radius_m: nearby_places_lib::DEFAULT_RADIUS_METERS,
        };

        serde_json::to_string(&info).map_err(|e| Error::internal(e.to_string()))
    }
}
