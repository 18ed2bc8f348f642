//! Data models for scraped listing records and the digest handed to outputs.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleRecord`]: One article as extracted from a search listing page
//! - [`PageWarning`]: A non-fatal failure while collecting a single page
//! - [`CollectionReport`]: Everything a collection pass produced
//! - [`Digest`]: The filtered, deduplicated result plus on-demand artifacts
//!
//! Records are immutable once built. Filtering and deduplication only select or
//! reject them.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Placeholder used when no press name can be extracted.
pub const UNKNOWN_PRESS: &str = "언론사";
/// Placeholder used when no summary can be extracted.
pub const NO_SUMMARY: &str = "요약 없음";
/// Placeholder used when no date token can be extracted. Always resolves to no timestamp.
pub const UNKNOWN_DATE: &str = "날짜불명";

/// A single article as it appeared on a listing page.
///
/// `resolved_timestamp` is computed once, at extraction time, from `raw_date_token`
/// and the clock reading for the page being processed. It is `None` whenever the
/// token could not be understood; it is never guessed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// Headline text. Never empty.
    pub title: String,
    /// Publisher name, or [`UNKNOWN_PRESS`].
    pub press: String,
    /// Short listing blurb, or [`NO_SUMMARY`].
    pub summary: String,
    /// Absolute article URL. Empty when the title anchor had no `href`.
    pub link: String,
    /// The date text exactly as scraped, or [`UNKNOWN_DATE`].
    pub raw_date_token: String,
    /// Absolute publication instant, when the token could be resolved.
    pub resolved_timestamp: Option<NaiveDateTime>,
}

impl ArticleRecord {
    /// Whether the record points anywhere a body could be fetched from.
    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }
}

/// A page that could not be fetched or parsed. Collection continued without it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageWarning {
    /// 1-based page index.
    pub page: u32,
    /// The URL that was requested.
    pub url: String,
    /// Human-readable failure description.
    pub message: String,
}

/// The raw output of one collection pass, in page order then document order.
#[derive(Debug, Default)]
pub struct CollectionReport {
    pub records: Vec<ArticleRecord>,
    pub warnings: Vec<PageWarning>,
}

/// One record in the final digest, with whatever artifacts were requested.
#[derive(Debug, Deserialize, Serialize)]
pub struct DigestEntry {
    #[serde(flatten)]
    pub record: ArticleRecord,
    /// Full article text, or a displayable error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// LLM narration, or a displayable error message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narration: Option<String>,
}

/// The final result of a search run, ready to be written out.
#[derive(Debug, Deserialize, Serialize)]
pub struct Digest {
    /// The keyword that was searched.
    pub keyword: String,
    /// Local wall-clock time the run finished collecting.
    pub collected_at: NaiveDateTime,
    /// Inclusive first day of the date range.
    pub since: NaiveDate,
    /// Inclusive last day of the date range.
    pub until: NaiveDate,
    /// Surviving records in collection order.
    pub articles: Vec<DigestEntry>,
    /// Pages that were skipped.
    pub warnings: Vec<PageWarning>,
}
