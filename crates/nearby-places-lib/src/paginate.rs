//! Sequential pagination over the nearby search endpoint.

use tokio::time::sleep;
use tracing::{debug, info};

use crate::config::PaginationOptions;
use crate::error::Result;
use crate::models::{PlaceSummary, SearchRequest};
use crate::provider::PlacesProvider;

/// Fetch every page for `request`, in order, and return the concatenated
/// summaries.
///
/// The first page is requested without a token; each following page uses the
/// token returned by its predecessor. The loop ends with the first page that
/// carries no token. After each fetch the paginator waits
/// `options.page_delay`, because the provider rejects tokens that are used too
/// soon. The wait after the final page is kept unless
/// `options.delay_after_last_page` is `false`.
///
/// Any page failure aborts the whole run; no partial list is returned.
pub async fn collect_all_pages(
    provider: &dyn PlacesProvider,
    request: &SearchRequest,
    options: &PaginationOptions,
) -> Result<Vec<PlaceSummary>> {
    let mut places = Vec::new();
    let mut next_page_token: Option<String> = None;
    let mut page_index = 0usize;

    loop {
        let page_request = request.for_page(next_page_token.take());
        let page = provider.nearby_search(&page_request).await?;

        debug!(
            page = page_index,
            results = page.results.len(),
            has_next = page.next_page_token.is_some(),
            "fetched nearby search page"
        );

        places.extend(page.results);
        next_page_token = page.next_page_token;
        page_index += 1;

        let is_last = next_page_token.is_none();
        if !is_last || options.delay_after_last_page {
            sleep(options.page_delay).await;
        }
        if is_last {
            break;
        }
    }

    info!(
        pages = page_index,
        places = places.len(),
        provider = provider.name(),
        "nearby search pagination complete"
    );

    Ok(places)
}
