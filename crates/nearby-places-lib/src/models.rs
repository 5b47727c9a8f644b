//! Records flowing through a single nearby search invocation.
//!
//! Everything here lives for the duration of one tool call: the validated
//! [`SearchRequest`], the per-page [`SearchPage`]s and the summaries they carry,
//! the per-place [`PlaceDetail`]s, and the merged [`PreparedPlace`] output.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::place_type::PlaceType;

/// Radius used when the caller does not supply one (or supplies zero).
pub const DEFAULT_RADIUS_METERS: u32 = 2000;

/// Parameters for one nearby search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in meters, always greater than zero.
    pub radius: u32,
    pub place_type: Option<PlaceType>,
    /// Opaque continuation token returned by the previous page.
    pub page_token: Option<String>,
}

impl SearchRequest {
    /// Build a request from decimal coordinate strings.
    ///
    /// The radius defaults to [`DEFAULT_RADIUS_METERS`]; use [`Self::with_radius`]
    /// to override it.
    pub fn new(latitude: &str, longitude: &str) -> Result<Self> {
        Ok(Self {
            latitude: parse_coordinate("latitude", latitude, 90.0)?,
            longitude: parse_coordinate("longitude", longitude, 180.0)?,
            radius: DEFAULT_RADIUS_METERS,
            place_type: None,
            page_token: None,
        })
    }

    /// Apply a caller-supplied radius.
    ///
    /// `None` and `0` fall back to the default radius. Fractional meters are
    /// rounded up.
    pub fn with_radius(mut self, radius: Option<f64>) -> Result<Self> {
        self.radius = resolve_radius(radius)?;
        Ok(self)
    }

    pub fn with_place_type(mut self, place_type: Option<PlaceType>) -> Self {
        self.place_type = place_type;
        self
    }

    /// Copy of this request continuing from `token`.
    pub fn for_page(&self, token: Option<String>) -> Self {
        Self {
            page_token: token,
            ..self.clone()
        }
    }

    /// The `location` query value, `lat,lng`.
    pub fn location(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Query pairs for the nearby search endpoint, excluding the API key.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("location", self.location()),
            ("radius", self.radius.to_string()),
        ];
        if let Some(place_type) = self.place_type {
            pairs.push(("type", place_type.as_str().to_string()));
        }
        if let Some(token) = &self.page_token {
            pairs.push(("pagetoken", token.clone()));
        }
        pairs
    }
}

impl fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} within {}m", self.location(), self.radius)?;
        if let Some(place_type) = self.place_type {
            write!(f, " ({})", place_type)?;
        }
        Ok(())
    }
}

fn parse_coordinate(name: &'static str, raw: &str, limit: f64) -> Result<f64> {
    let invalid = |reason: String| Error::InvalidCoordinate {
        name,
        value: raw.to_string(),
        reason,
    };

    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid("not a decimal number".to_string()))?;

    if !value.is_finite() {
        return Err(invalid("must be finite".to_string()));
    }
    if value.abs() > limit {
        return Err(invalid(format!("must be between -{limit} and {limit}")));
    }
    Ok(value)
}

fn resolve_radius(radius: Option<f64>) -> Result<u32> {
    match radius {
        None => Ok(DEFAULT_RADIUS_METERS),
        Some(r) if r == 0.0 => Ok(DEFAULT_RADIUS_METERS),
        Some(r) if !r.is_finite() || r < 0.0 || r > u32::MAX as f64 => {
            Err(Error::InvalidRadius { value: r })
        }
        Some(r) => Ok(r.ceil() as u32),
    }
}

/// Geographic point as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: bool,
}

/// One place as listed by a nearby search page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSummary {
    pub place_id: String,
    pub location: LatLng,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_ratings_total: Option<u64>,
}

/// One page of nearby search results.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchPage {
    pub results: Vec<PlaceSummary>,
    /// Token for the following page; never an empty string.
    pub next_page_token: Option<String>,
}

impl SearchPage {
    pub fn new(results: Vec<PlaceSummary>, next_page_token: Option<String>) -> Self {
        Self {
            results,
            next_page_token: next_page_token.filter(|t| !t.is_empty()),
        }
    }
}

/// Supplementary information fetched per place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetail {
    pub place_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}

/// A summary merged with its matching detail, if one was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedPlace {
    #[serde(flatten)]
    pub summary: PlaceSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}

impl From<PlaceSummary> for PreparedPlace {
    fn from(summary: PlaceSummary) -> Self {
        Self {
            summary,
            reviews: None,
            formatted_address: None,
        }
    }
}

/// Identifier whose detail fetch failed while running in lenient mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailFailure {
    pub place_id: String,
    pub message: String,
}

/// Result of a complete nearby places invocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct NearbyPlaces {
    pub places: Vec<PreparedPlace>,
    pub failed_details: Vec<DetailFailure>,
}
