//! Collection, date filtering and deduplication in one pass.

use tracing::{info, instrument};

use crate::collector::{CollectRequest, collect};
use crate::dates::Clock;
use crate::filter::{DateRange, dedupe};
use crate::models::CollectionReport;
use crate::scrapers::ListingSource;

/// Collect `request`, keep records inside `range`, then drop repeated titles.
///
/// Page warnings from collection are passed through untouched.
#[instrument(level = "info", skip_all, fields(keyword = %request.keyword, since = %range.since, until = %range.until))]
pub async fn search<S, C>(
    source: &S,
    clock: &C,
    request: &CollectRequest,
    range: &DateRange,
) -> CollectionReport
where
    S: ListingSource,
    C: Clock,
{
    let CollectionReport { records, warnings } = collect(source, clock, request).await;
    let collected = records.len();

    let in_range = range.apply(records);
    let dated = in_range.len();
    let records = dedupe(in_range);

    info!(
        collected,
        in_range = dated,
        unique = records.len(),
        skipped_pages = warnings.len(),
        "Search complete"
    );
    CollectionReport { records, warnings }
}
