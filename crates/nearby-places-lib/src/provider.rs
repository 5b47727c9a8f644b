//! Provider abstraction for the two upstream endpoints.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{PlaceDetail, SearchPage, SearchRequest};

/// Source of nearby search pages and per-place details.
///
/// [`crate::google::GoogleMapsClient`] is the production implementation.
/// Implementations must be shareable across tasks because detail fetches run
/// concurrently against the same provider.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Fetch one page of nearby search results.
    async fn nearby_search(&self, request: &SearchRequest) -> Result<SearchPage>;

    /// Fetch reviews and the formatted address for one place.
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetail>;

    /// Short provider name for log output.
    fn name(&self) -> &str;
}
