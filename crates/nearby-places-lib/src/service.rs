use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument};

use crate::aggregate::prepare_places;
use crate::config::{DetailMode, PaginationOptions, PlacesConfig};
use crate::details::fetch_all_details;
use crate::error::Result;
use crate::google::GoogleMapsClient;
use crate::models::{NearbyPlaces, SearchRequest};
use crate::paginate::collect_all_pages;
use crate::provider::PlacesProvider;

/// Orchestrates pagination, detail fan-out and the final join.
#[derive(Clone)]
pub struct NearbyPlacesService {
    provider: Arc<dyn PlacesProvider>,
    pagination: PaginationOptions,
    detail_mode: DetailMode,
}

impl NearbyPlacesService {
    pub fn new(
        provider: Arc<dyn PlacesProvider>,
        pagination: PaginationOptions,
        detail_mode: DetailMode,
    ) -> Self {
        Self {
            provider,
            pagination,
            detail_mode,
        }
    }

    /// Service backed by the Google Maps client built from `config`.
    pub fn from_config(config: PlacesConfig) -> Result<Self> {
        let pagination = config.pagination;
        let detail_mode = config.detail_mode;
        let client = GoogleMapsClient::new(config)?;
        Ok(Self::new(Arc::new(client), pagination, detail_mode))
    }

    pub fn pagination(&self) -> &PaginationOptions {
        &self.pagination
    }

    pub fn detail_mode(&self) -> DetailMode {
        self.detail_mode
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Collect every nearby place for `request` enriched with its details.
    ///
    /// Pages are fetched sequentially, then the details for all collected
    /// places are fetched concurrently and joined onto the summaries.
    #[instrument(skip_all, fields(request = %request))]
    pub async fn find_nearby_places(&self, request: &SearchRequest) -> Result<NearbyPlaces> {
        let started = Instant::now();
        let provider = self.provider.as_ref();

        let summaries = collect_all_pages(provider, request, &self.pagination).await?;
        let place_ids: Vec<String> = summaries.iter().map(|s| s.place_id.clone()).collect();
        let batch = fetch_all_details(provider, &place_ids, self.detail_mode).await?;
        let places = prepare_places(&summaries, &batch.details);

        info!(
            places = places.len(),
            failed_details = batch.failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "nearby places prepared"
        );

        Ok(NearbyPlaces {
            places,
            failed_details: batch.failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{detail_for, summaries, ScriptedProvider};
    use crate::{Error, PlaceType};

    fn service(provider: Arc<ScriptedProvider>, mode: DetailMode) -> NearbyPlacesService {
        NearbyPlacesService::new(provider, PaginationOptions::default(), mode)
    }

    fn with_all_details(
        mut provider: ScriptedProvider,
        places: &[crate::PlaceSummary],
    ) -> ScriptedProvider {
        for place in places {
            provider = provider.with_detail(detail_for(&place.place_id));
        }
        provider
    }

    #[tokio::test(start_paused = true)]
    async fn single_page_cafe_search() {
        let page = summaries("cafe", 3);
        let provider = Arc::new(with_all_details(
            ScriptedProvider::new().with_page(page.clone(), None),
            &page,
        ));
        let request = SearchRequest::new("40.7128", "-74.0060")
            .unwrap()
            .with_radius(Some(1000.0))
            .unwrap()
            .with_place_type(Some(PlaceType::Cafe));

        let result = service(provider.clone(), DetailMode::Strict)
            .find_nearby_places(&request)
            .await
            .unwrap();

        assert_eq!(provider.search_requests().len(), 1);
        assert_eq!(provider.detail_requests().len(), 3);
        assert_eq!(result.places.len(), 3);
        assert!(result.failed_details.is_empty());
        for (place, summary) in result.places.iter().zip(&page) {
            assert_eq!(&place.summary, summary);
            assert!(place.formatted_address.is_some());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn missing_radius_defaults_in_outbound_request() {
        let provider = Arc::new(ScriptedProvider::new().with_page(vec![], None));
        let request = SearchRequest::new("1", "2")
            .unwrap()
            .with_radius(None)
            .unwrap();

        service(provider.clone(), DetailMode::Strict)
            .find_nearby_places(&request)
            .await
            .unwrap();

        let sent = provider.search_requests();
        assert_eq!(sent[0].radius, 2000);
        assert!(sent[0]
            .query_pairs()
            .contains(&("radius", "2000".to_string())));
    }

    #[tokio::test(start_paused = true)]
    async fn one_failed_detail_fails_strict_invocation() {
        let page = summaries("p", 3);
        let provider = Arc::new(
            ScriptedProvider::new()
                .with_page(page, None)
                .with_detail(detail_for("p-0"))
                .with_detail(detail_for("p-2")),
        );
        let request = SearchRequest::new("1", "2").unwrap();

        let err = service(provider, DetailMode::Strict)
            .find_nearby_places(&request)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DetailFetch { ref place_id, .. } if place_id == "p-1"));
    }

    #[tokio::test(start_paused = true)]
    async fn lenient_invocation_keeps_partial_results() {
        let page = summaries("p", 3);
        let provider = Arc::new(
            ScriptedProvider::new()
                .with_page(page, None)
                .with_detail(detail_for("p-0"))
                .with_detail(detail_for("p-2")),
        );
        let request = SearchRequest::new("1", "2").unwrap();

        let result = service(provider, DetailMode::Lenient)
            .find_nearby_places(&request)
            .await
            .unwrap();

        assert_eq!(result.places.len(), 3);
        assert!(result.places[1].formatted_address.is_none());
        assert_eq!(result.failed_details.len(), 1);
        assert_eq!(result.failed_details[0].place_id, "p-1");
    }

    #[tokio::test(start_paused = true)]
    async fn pagination_error_skips_detail_stage() {
        let provider = Arc::new(ScriptedProvider::new().with_page_error(Error::ProviderStatus {
            endpoint: "nearbysearch",
            status: "OVER_QUERY_LIMIT".to_string(),
            message: None,
        }));
        let request = SearchRequest::new("1", "2").unwrap();

        let result = service(provider.clone(), DetailMode::Strict)
            .find_nearby_places(&request)
            .await;

        assert!(result.is_err());
        assert!(provider.detail_requests().is_empty());
    }
}
