//! Resolution of listing-page date tokens into absolute instants.
//!
//! Listing pages print publication times either as an absolute date
//! (`2024.01.10.` or `2024.01.10. 14:03`) or relative to the moment the page
//! was rendered (`3분전`, `2시간 전`, `어제`, `5 minutes ago`, ...). Relative
//! tokens are anchored to a caller-supplied "now", read from a [`Clock`].
//!
//! Anything outside the recognized vocabulary resolves to `None`.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::models::UNKNOWN_DATE;

const MINUTE_MARKERS: &[&str] = &["분전", "분 전", "minutes ago", "minute ago", "mins ago", "min ago"];
const HOUR_MARKERS: &[&str] = &["시간전", "시간 전", "hours ago", "hour ago"];
const YESTERDAY_MARKERS: &[&str] = &["어제", "yesterday"];

static ABSOLUTE_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}\.[0-9]{2}\.[0-9]{2}").unwrap());
static QUANTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").unwrap());

/// Source of the reference instant for relative tokens.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Resolve a scraped date token against `now`.
///
/// # Rules
///
/// Checked in order, first match wins:
/// 1. The unknown-date placeholder is always `None`
/// 2. `YYYY.MM.DD...` is that calendar day at midnight (trailing text ignored)
/// 3. A minutes marker gives `now - N minutes`
/// 4. An hours marker gives `now - N hours`
/// 5. A yesterday marker gives `now - 1 day`, time of day kept
///
/// `N` is the first integer in the token. A token with a marker but no usable
/// integer, or one whose arithmetic would overflow, resolves to `None`.
pub fn resolve(token: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let token = token.trim();
    if token == UNKNOWN_DATE {
        return None;
    }

    let resolved = if ABSOLUTE_DATE.is_match(token) {
        absolute_date(token)
    } else if contains_any(token, MINUTE_MARKERS) {
        quantity(token)
            .and_then(TimeDelta::try_minutes)
            .and_then(|delta| now.checked_sub_signed(delta))
    } else if contains_any(token, HOUR_MARKERS) {
        quantity(token)
            .and_then(TimeDelta::try_hours)
            .and_then(|delta| now.checked_sub_signed(delta))
    } else if contains_any(token, YESTERDAY_MARKERS) {
        now.checked_sub_signed(TimeDelta::days(1))
    } else {
        None
    };

    trace!(%token, ?resolved, "Resolved date token");
    resolved
}

fn absolute_date(token: &str) -> Option<NaiveDateTime> {
    // The regex guarantees the first 10 bytes are ASCII.
    let date = NaiveDate::parse_from_str(&token[..10], "%Y.%m.%d").ok()?;
    Some(date.and_time(NaiveTime::MIN))
}

fn quantity(token: &str) -> Option<i64> {
    QUANTITY.find(token)?.as_str().parse().ok()
}

fn contains_any(token: &str, markers: &[&str]) -> bool {
    let lowered = token.to_lowercase();
    markers.iter().any(|m| lowered.contains(m))
}
