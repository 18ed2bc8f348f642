//! Per-record artifacts produced on demand after a collection run.
//!
//! Full article bodies and narrations are lazily fetched for individual
//! records. The store keys them by the record's position in the final result
//! and is emptied whenever a new run begins, so artifacts from a previous
//! search can never be attached to the wrong article.

use std::collections::BTreeMap;
use tracing::{debug, instrument, warn};

use crate::api::{AskAsync, narrate};
use crate::models::ArticleRecord;
use crate::scrapers::ListingSource;
use crate::scrapers::article::fetch_body;

/// Stored in place of a body when the article page has no readable text.
pub const BODY_NOT_FOUND: &str = "no article text found on the page";

/// Whatever has been produced for one record so far.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// Article text, or the displayable reason it is unavailable. Only an
    /// `Ok` body is ever narrated.
    pub body: Option<Result<String, String>>,
    /// Narration text, or a displayable error message.
    pub narration: Option<String>,
}

impl Artifacts {
    /// The body or its failure message, whichever is present.
    pub fn body_display(&self) -> Option<&str> {
        self.body.as_ref().map(|b| match b {
            Ok(text) | Err(text) => text.as_str(),
        })
    }
}

/// Caller-held mapping from record position to its artifacts.
#[derive(Debug, Default)]
pub struct ArtifactStore {
    entries: BTreeMap<usize, Artifacts>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything from the previous run.
    pub fn begin_run(&mut self) {
        debug!(dropped = self.entries.len(), "Clearing artifacts for new run");
        self.entries.clear();
    }

    pub fn get(&self, position: usize) -> Option<&Artifacts> {
        self.entries.get(&position)
    }

    /// Fetch the body for `record` unless it is already present.
    ///
    /// A failed fetch stores a displayable error message in place of the body.
    #[instrument(level = "info", skip(self, source, record), fields(link = %record.link))]
    pub async fn ensure_body<S: ListingSource>(
        &mut self,
        source: &S,
        position: usize,
        record: &ArticleRecord,
    ) -> &str {
        let entry = self.entries.entry(position).or_default();
        if entry.body.is_none() {
            let body = match fetch_body(source, &record.link).await {
                Ok(body) if body.is_empty() => Err(BODY_NOT_FOUND.to_string()),
                Ok(body) => Ok(body),
                Err(e) => {
                    warn!(error = %e, "Body fetch failed");
                    Err(format!("body fetch failed: {e}"))
                }
            };
            entry.body = Some(body);
        }
        entry.body_display().unwrap_or_default()
    }

    /// Narrate the already-fetched body at `position` unless a narration exists.
    ///
    /// Without a successfully fetched body there is nothing to narrate and the
    /// model is not called.
    #[instrument(level = "info", skip(self, asker))]
    pub async fn ensure_narration<A>(&mut self, asker: &A, position: usize) -> &str
    where
        A: AskAsync<Response = String>,
    {
        let entry = self.entries.entry(position).or_default();
        if entry.narration.is_none() {
            let body = match &entry.body {
                Some(Ok(text)) => text.clone(),
                _ => String::new(),
            };
            entry.narration = Some(narrate(asker, &body).await);
        }
        entry.narration.as_deref().unwrap_or_default()
    }
}
