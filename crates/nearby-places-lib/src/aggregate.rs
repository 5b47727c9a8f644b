use std::collections::HashMap;

use crate::models::{PlaceDetail, PlaceSummary, PreparedPlace};

/// Left-join summaries with details on `place_id`.
///
/// Produces one [`PreparedPlace`] per summary, in summary order. When several
/// details share an identifier the first one wins. A summary without a
/// matching detail is returned with its own fields only.
pub fn prepare_places(summaries: &[PlaceSummary], details: &[PlaceDetail]) -> Vec<PreparedPlace> {
    let mut by_id: HashMap<&str, &PlaceDetail> = HashMap::with_capacity(details.len());
    for detail in details {
        by_id.entry(detail.place_id.as_str()).or_insert(detail);
    }

    summaries
        .iter()
        .map(|summary| match by_id.get(summary.place_id.as_str()) {
            Some(detail) => PreparedPlace {
                summary: summary.clone(),
                reviews: detail.reviews.clone(),
                formatted_address: detail.formatted_address.clone(),
            },
            None => PreparedPlace::from(summary.clone()),
        })
        .collect()
}
