//! Multi-page listing collection.
//!
//! Pages are requested one at a time, in increasing page order, with a short
//! pause between requests. A page that fails to download is reported as a
//! [`PageWarning`] and skipped; it never aborts the run.
//!
//! Relative date tokens on each page are resolved against the clock reading
//! taken when that page is processed, so a slow multi-page run may anchor
//! different pages to slightly different instants.

use chrono::NaiveDateTime;
use rand::{Rng, rng};
use scraper::Html;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::dates::{Clock, resolve};
use crate::models::{ArticleRecord, CollectionReport, PageWarning};
use crate::scrapers::ListingSource;
use crate::scrapers::daum::{ExtractedItem, extract, listing_items, search_url};

/// Upper bound of the random jitter added to the inter-request pause.
const MAX_JITTER_MS: u64 = 250;

/// What to collect and how politely.
#[derive(Debug, Clone)]
pub struct CollectRequest {
    pub keyword: String,
    /// Number of result pages, starting at page 1.
    pub pages: u32,
    /// Search endpoint, e.g. [`crate::scrapers::daum::SEARCH_BASE_URL`].
    pub base_url: String,
    /// Pause between consecutive page requests. Zero disables pausing.
    pub delay: Duration,
}

impl ExtractedItem {
    /// Attach a resolved timestamp, producing the immutable record.
    pub fn into_record(self, now: NaiveDateTime) -> ArticleRecord {
        let resolved_timestamp = resolve(&self.raw_date_token, now);
        ArticleRecord {
            title: self.title,
            press: self.press,
            summary: self.summary,
            link: self.link,
            raw_date_token: self.raw_date_token,
            resolved_timestamp,
        }
    }
}

/// Collect candidate records from pages `1..=request.pages`.
///
/// Records come back in page order, then document order. Nothing is sorted,
/// filtered or deduplicated here.
#[instrument(level = "info", skip_all, fields(keyword = %request.keyword, pages = request.pages))]
pub async fn collect<S, C>(source: &S, clock: &C, request: &CollectRequest) -> CollectionReport
where
    S: ListingSource,
    C: Clock,
{
    let mut report = CollectionReport::default();

    for page in 1..=request.pages {
        let url = search_url(&request.base_url, &request.keyword, page);

        match source.fetch(&url).await {
            Ok(html) => {
                let records = parse_page(&html, &url, clock.now());
                info!(page, count = records.len(), "Collected listing page");
                report.records.extend(records);
            }
            Err(e) => {
                warn!(page, %url, error = %e, "Listing page failed; skipping");
                report.warnings.push(PageWarning {
                    page,
                    url,
                    message: e.to_string(),
                });
            }
        }

        if page < request.pages {
            pause(request.delay).await;
        }
    }

    info!(
        records = report.records.len(),
        failed_pages = report.warnings.len(),
        "Collection complete"
    );
    report
}

/// Parse one results page into records anchored at `now`.
pub fn parse_page(html: &str, page_url: &str, now: NaiveDateTime) -> Vec<ArticleRecord> {
    let base = Url::parse(page_url)
        .inspect_err(|e| warn!(%page_url, error = %e, "Unparseable page URL; links stay relative"))
        .ok();

    let document = Html::parse_document(html);
    let items = listing_items(&document);
    debug!(items = items.len(), "Found listing items");

    items
        .into_iter()
        .filter_map(|item| extract(item, base.as_ref()))
        .map(|item| item.into_record(now))
        .collect()
}

async fn pause(delay: Duration) {
    if delay.is_zero() {
        return;
    }
    let jitter = Duration::from_millis(rng().random_range(0..=MAX_JITTER_MS));
    sleep(delay + jitter).await;
}
