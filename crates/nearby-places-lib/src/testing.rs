//! In-memory provider and fixtures for tests.
//!
//! Enabled for this crate's own tests and, for downstream crates, through the
//! `test-support` feature.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use tokio::time::Instant;

use crate::error::{Error, Result};
use crate::models::{LatLng, OpeningHours, PlaceDetail, PlaceSummary, SearchPage, SearchRequest};
use crate::provider::PlacesProvider;

/// Provider that replays scripted pages and details and records every call.
#[derive(Default)]
pub struct ScriptedProvider {
    pages: Mutex<VecDeque<Result<SearchPage>>>,
    details: HashMap<String, PlaceDetail>,
    search_log: Mutex<Vec<(Instant, SearchRequest)>>,
    detail_log: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next nearby search page.
    pub fn with_page(self, results: Vec<PlaceSummary>, next_page_token: Option<&str>) -> Self {
        self.pages
            .lock()
            .unwrap()
            .push_back(Ok(SearchPage::new(results, next_page_token.map(str::to_string))));
        self
    }

    /// Queue a failing nearby search page.
    pub fn with_page_error(self, error: Error) -> Self {
        self.pages.lock().unwrap().push_back(Err(error));
        self
    }

    /// Register the detail returned for its `place_id`. Identifiers without a
    /// registered detail fail with a `NOT_FOUND` provider status.
    pub fn with_detail(mut self, detail: PlaceDetail) -> Self {
        self.details.insert(detail.place_id.clone(), detail);
        self
    }

    /// Every nearby search request received, in order.
    pub fn search_requests(&self) -> Vec<SearchRequest> {
        self.search_log
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Time at which each nearby search request arrived.
    pub fn search_times(&self) -> Vec<Instant> {
        self.search_log
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _)| *t)
            .collect()
    }

    /// Every place id whose details were requested, in arrival order.
    pub fn detail_requests(&self) -> Vec<String> {
        self.detail_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlacesProvider for ScriptedProvider {
    async fn nearby_search(&self, request: &SearchRequest) -> Result<SearchPage> {
        self.search_log
            .lock()
            .unwrap()
            .push((Instant::now(), request.clone()));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(Error::ProviderStatus {
                    endpoint: "nearbysearch",
                    status: "UNSCRIPTED".to_string(),
                    message: Some("no scripted page left".to_string()),
                })
            })
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetail> {
        self.detail_log.lock().unwrap().push(place_id.to_string());
        self.details
            .get(place_id)
            .cloned()
            .ok_or_else(|| Error::ProviderStatus {
                endpoint: "details",
                status: "NOT_FOUND".to_string(),
                message: None,
            })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// `count` summaries with ids `{prefix}-0`, `{prefix}-1`, ...
pub fn summaries(prefix: &str, count: usize) -> Vec<PlaceSummary> {
    (0..count)
        .map(|i| PlaceSummary {
            place_id: format!("{prefix}-{i}"),
            location: LatLng {
                lat: 40.0 + i as f64 / 1000.0,
                lng: -74.0,
            },
            name: format!("{prefix} place {i}"),
            opening_hours: Some(OpeningHours { open_now: i % 2 == 0 }),
            rating: Some(4.0),
            reference: format!("ref-{prefix}-{i}"),
            user_ratings_total: Some(10 + i as u64),
        })
        .collect()
}

/// Detail with address `{place_id} Example Street` and a single review.
pub fn detail_for(place_id: &str) -> PlaceDetail {
    PlaceDetail {
        place_id: place_id.to_string(),
        reviews: Some(vec![json!({
            "author_name": "Reviewer",
            "rating": 5,
            "text": format!("Lovely visit to {place_id}"),
        })]),
        formatted_address: Some(format!("{place_id} Example Street")),
    }
}
