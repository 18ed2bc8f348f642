//! Date-range filtering, title deduplication, and up-front query validation.
//!
//! Both [`filter_by_date`] and [`dedupe`] only select records; they never
//! modify one. The recommended order is filter, then dedupe, so that an
//! out-of-range first occurrence of a title cannot hide an in-range later one.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use itertools::Itertools;
use thiserror::Error;

use crate::models::ArticleRecord;

/// Caller-input problems detected before any collection work starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("a search keyword is required")]
    EmptyKeyword,
    #[error("a date range is required (both --since and --until)")]
    MissingRange,
    #[error("incomplete date range: {missing} is missing")]
    IncompleteRange { missing: &'static str },
    #[error("date range starts after it ends ({since} > {until})")]
    InvertedRange { since: NaiveDate, until: NaiveDate },
}

/// A validated inclusive calendar-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl DateRange {
    /// Validate user-supplied bounds.
    pub fn from_bounds(
        since: Option<NaiveDate>,
        until: Option<NaiveDate>,
    ) -> Result<Self, QueryError> {
        match (since, until) {
            (None, None) => Err(QueryError::MissingRange),
            (Some(_), None) => Err(QueryError::IncompleteRange { missing: "--until" }),
            (None, Some(_)) => Err(QueryError::IncompleteRange { missing: "--since" }),
            (Some(since), Some(until)) if since > until => {
                Err(QueryError::InvertedRange { since, until })
            }
            (Some(since), Some(until)) => Ok(Self { since, until }),
        }
    }

    /// Apply [`filter_by_date`] with this range.
    pub fn apply(&self, records: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
        filter_by_date(records, self.since, self.until)
    }
}

/// Reject blank keywords.
pub fn validate_keyword(keyword: &str) -> Result<&str, QueryError> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        Err(QueryError::EmptyKeyword)
    } else {
        Ok(keyword)
    }
}

/// Keep records whose timestamp falls on a day in `[since, until]`.
///
/// Records without a resolved timestamp never pass. No swap is performed when
/// `since > until`; such a range simply matches nothing.
pub fn filter_by_date(
    records: Vec<ArticleRecord>,
    since: NaiveDate,
    until: NaiveDate,
) -> Vec<ArticleRecord> {
    let lower = since.and_time(NaiveTime::MIN);
    // Exclusive upper bound: the first instant after `until`. None means no day follows.
    let upper = until.succ_opt().map(|d| d.and_time(NaiveTime::MIN));

    records
        .into_iter()
        .filter(|r| r.resolved_timestamp.is_some_and(|ts| in_range(ts, lower, upper)))
        .collect()
}

fn in_range(ts: NaiveDateTime, lower: NaiveDateTime, upper: Option<NaiveDateTime>) -> bool {
    ts >= lower && upper.is_none_or(|upper| ts < upper)
}

/// Drop every record whose exact title was already seen. First occurrence wins.
pub fn dedupe(records: Vec<ArticleRecord>) -> Vec<ArticleRecord> {
    records
        .into_iter()
        .unique_by(|r| r.title.clone())
        .collect()
}
