use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::PlacesConfig;
use crate::error::{Error, Result};
use crate::models::{LatLng, OpeningHours, PlaceDetail, PlaceSummary, SearchPage, SearchRequest};
use crate::provider::PlacesProvider;

const NEARBY_SEARCH_PATH: &str = "place/nearbysearch/json";
const PLACE_DETAILS_PATH: &str = "place/details/json";
const DETAIL_FIELDS: &str = "reviews,formatted_address";

const NEARBY_ENDPOINT: &str = "nearbysearch";
const DETAILS_ENDPOINT: &str = "details";

/// Google Maps Places client for the nearby search and place details endpoints.
pub struct GoogleMapsClient {
    config: PlacesConfig,
    http: Client,
}

impl GoogleMapsClient {
    pub fn new(config: PlacesConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent());
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(Error::Http)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &PlacesConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    fn nearby_search_request(&self, request: &SearchRequest) -> RequestBuilder {
        self.http
            .get(self.endpoint(NEARBY_SEARCH_PATH))
            .query(&request.query_pairs())
            .query(&[("key", self.config.api_key())])
    }

    fn place_details_request(&self, place_id: &str) -> RequestBuilder {
        self.http.get(self.endpoint(PLACE_DETAILS_PATH)).query(&[
            ("place_id", place_id),
            ("fields", DETAIL_FIELDS),
            ("key", self.config.api_key()),
        ])
    }
}

#[async_trait]
impl PlacesProvider for GoogleMapsClient {
    async fn nearby_search(&self, request: &SearchRequest) -> Result<SearchPage> {
        debug!(
            location = %request.location(),
            radius = request.radius,
            has_page_token = request.page_token.is_some(),
            "requesting nearby search page"
        );
        let body = send(self.nearby_search_request(request)).await?;
        parse_nearby_response(&body)
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetail> {
        debug!(place_id, "requesting place details");
        let body = send(self.place_details_request(place_id)).await?;
        parse_details_response(place_id, &body)
    }

    fn name(&self) -> &str {
        "google-maps"
    }
}

// Request URLs carry the API key, so it is stripped from transport errors
// before they can reach logs or tool output.
async fn send(request: RequestBuilder) -> Result<String> {
    let response = request
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| Error::Http(e.without_url()))?;
    response
        .text()
        .await
        .map_err(|e| Error::Http(e.without_url()))
}

fn user_agent() -> String {
    format!("nearby-places-lib/{version}", version = env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    #[serde(default)]
    results: Vec<RawPlace>,
    #[serde(default)]
    next_page_token: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    geometry: Geometry,
    #[serde(default)]
    name: String,
    #[serde(default)]
    opening_hours: Option<OpeningHours>,
    place_id: String,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    reference: String,
    #[serde(default)]
    user_ratings_total: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

impl From<RawPlace> for PlaceSummary {
    fn from(raw: RawPlace) -> Self {
        Self {
            place_id: raw.place_id,
            location: raw.geometry.location,
            name: raw.name,
            opening_hours: raw.opening_hours,
            rating: raw.rating,
            reference: raw.reference,
            user_ratings_total: raw.user_ratings_total,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PlaceDetailsResponse {
    #[serde(default)]
    result: Option<RawDetail>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDetail {
    #[serde(default)]
    reviews: Option<Vec<Value>>,
    #[serde(default)]
    formatted_address: Option<String>,
}

fn check_status(
    endpoint: &'static str,
    status: Option<String>,
    message: Option<String>,
) -> Result<()> {
    match status.as_deref() {
        None | Some("OK") | Some("ZERO_RESULTS") => Ok(()),
        Some(other) => Err(Error::ProviderStatus {
            endpoint,
            status: other.to_string(),
            message,
        }),
    }
}

/// Parse a nearby search response body into a page.
pub fn parse_nearby_response(body: &str) -> Result<SearchPage> {
    let response: NearbySearchResponse =
        serde_json::from_str(body).map_err(|source| Error::Decode {
            endpoint: NEARBY_ENDPOINT,
            source,
        })?;
    check_status(NEARBY_ENDPOINT, response.status, response.error_message)?;

    let results = response.results.into_iter().map(PlaceSummary::from).collect();
    Ok(SearchPage::new(results, response.next_page_token))
}

/// Parse a place details response body for `place_id`.
pub fn parse_details_response(place_id: &str, body: &str) -> Result<PlaceDetail> {
    let response: PlaceDetailsResponse =
        serde_json::from_str(body).map_err(|source| Error::Decode {
            endpoint: DETAILS_ENDPOINT,
            source,
        })?;
    check_status(DETAILS_ENDPOINT, response.status, response.error_message)?;

    let detail = response.result.ok_or_else(|| Error::MissingDetailResult {
        place_id: place_id.to_string(),
    })?;

    Ok(PlaceDetail {
        place_id: place_id.to_string(),
        reviews: detail.reviews,
        formatted_address: detail.formatted_address,
    })
}
