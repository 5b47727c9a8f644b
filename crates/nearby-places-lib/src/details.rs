//! Concurrent fan-out of place detail requests.

use futures::future::{join_all, try_join_all};
use tracing::{debug, warn};

use crate::config::DetailMode;
use crate::error::{Error, Result};
use crate::models::{DetailFailure, PlaceDetail};
use crate::provider::PlacesProvider;

/// Outcome of a detail batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetailBatch {
    pub details: Vec<PlaceDetail>,
    /// Always empty in [`DetailMode::Strict`].
    pub failures: Vec<DetailFailure>,
}

/// Fetch details for every identifier with all requests in flight at once.
///
/// In [`DetailMode::Strict`] the first failure fails the batch, wrapped in
/// [`Error::DetailFetch`]. In [`DetailMode::Lenient`] each failure is recorded
/// and the remaining details are still returned.
pub async fn fetch_all_details(
    provider: &dyn PlacesProvider,
    place_ids: &[String],
    mode: DetailMode,
) -> Result<DetailBatch> {
    debug!(count = place_ids.len(), mode = %mode, "fetching place details");

    match mode {
        DetailMode::Strict => {
            let details = try_join_all(place_ids.iter().map(|id| fetch_one(provider, id))).await?;
            Ok(DetailBatch {
                details,
                failures: Vec::new(),
            })
        }
        DetailMode::Lenient => {
            let outcomes = join_all(place_ids.iter().map(|id| fetch_one(provider, id))).await;

            let mut batch = DetailBatch::default();
            for (place_id, outcome) in place_ids.iter().zip(outcomes) {
                match outcome {
                    Ok(detail) => batch.details.push(detail),
                    Err(err) => {
                        warn!(place_id = %place_id, error = %err, "place details unavailable");
                        batch.failures.push(DetailFailure {
                            place_id: place_id.clone(),
                            message: err.to_string(),
                        });
                    }
                }
            }
            Ok(batch)
        }
    }
}

async fn fetch_one(provider: &dyn PlacesProvider, place_id: &str) -> Result<PlaceDetail> {
    let mut detail = provider
        .place_details(place_id)
        .await
        .map_err(|source| Error::DetailFetch {
            place_id: place_id.to_string(),
            source: Box::new(source),
        })?;
    detail.place_id = place_id.to_string();
    Ok(detail)
}
