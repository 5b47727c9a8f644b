//! Nearby places library entry points.
//!
//! This crate turns the provider's paginated, rate-limited nearby search into
//! one consolidated list of places enriched with per-place details. Consumers
//! (the MCP server) should only depend on the items exported here.
//!
//! The flow for one request is:
//! 1. [`paginate::collect_all_pages`] walks every search page in order.
//! 2. [`details::fetch_all_details`] fetches details for all places at once.
//! 3. [`aggregate::prepare_places`] joins the two by place id.
//!
//! [`NearbyPlacesService`] runs the three steps against a [`PlacesProvider`].

#![deny(warnings)]

pub mod aggregate;
pub mod config;
pub mod details;
pub mod error;
pub mod google;
pub mod models;
pub mod paginate;
pub mod place_type;
pub mod provider;
pub mod service;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use aggregate::prepare_places;
pub use config::{DetailMode, PaginationOptions, PlacesConfig};
pub use details::{fetch_all_details, DetailBatch};
pub use error::{Error, Result};
pub use google::GoogleMapsClient;
pub use models::{
    DetailFailure, LatLng, NearbyPlaces, OpeningHours, PlaceDetail, PlaceSummary, PreparedPlace,
    SearchPage, SearchRequest, DEFAULT_RADIUS_METERS,
};
pub use paginate::collect_all_pages;
pub use place_type::PlaceType;
pub use provider::PlacesProvider;
pub use service::NearbyPlacesService;
