//! # Awful News Search
//!
//! Searches a news listing by keyword, keeps the articles published inside a
//! date range, and optionally fetches and narrates each one through an LLM.
//!
//! ## Usage
//!
//! ```sh
//! awful_news_search 삼성라이온즈 -p 3 --since 2024-05-30 --until 2024-06-01 -j ./json -m ./markdown
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Validation**: Keyword and date range are checked before any request
//! 2. **Collection**: Listing pages are fetched one at a time, most recent first
//! 3. **Selection**: Records outside the range are dropped, then repeated titles
//! 4. **Artifacts**: Article bodies and narrations are produced on demand
//! 5. **Output**: A JSON digest and an optional Markdown digest are written

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod artifacts;
mod cli;
mod collector;
mod config;
mod dates;
mod filter;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use api::{AskFnWrapper, load_narrator};
use artifacts::{ArtifactStore, Artifacts};
use cli::Cli;
use collector::CollectRequest;
use config::Settings;
use dates::SystemClock;
use filter::{DateRange, validate_keyword};
use models::{Digest, DigestEntry};
use outputs::{json, markdown};
use scrapers::HttpSource;
use utils::{ensure_writable_dir, truncate_for_log};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_search starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Validate caller input before any network work ----
    let keyword = match validate_keyword(&args.keyword) {
        Ok(keyword) => keyword.to_string(),
        Err(e) => {
            error!(error = %e, "Invalid search input");
            return Err(e.into());
        }
    };
    let range = match DateRange::from_bounds(args.since, args.until) {
        Ok(range) => range,
        Err(e) => {
            error!(error = %e, "Invalid search input");
            return Err(e.into());
        }
    };

    if let Err(e) = ensure_writable_dir(&args.json_output_dir).await {
        error!(
            path = %args.json_output_dir,
            error = %e,
            "JSON output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let settings = Settings::load(args.config.as_deref()).await?;
    let source = HttpSource::new(&settings.user_agent, settings.timeout())?;

    // ---- Collect, filter, dedupe ----
    let request = CollectRequest {
        keyword: keyword.clone(),
        pages: args.pages,
        base_url: settings.search_base_url.clone(),
        delay: settings.request_delay(),
    };
    let report = pipeline::search(&source, &SystemClock, &request, &range).await;
    for warning in &report.warnings {
        warn!(page = warning.page, url = %warning.url, message = %warning.message, "Page skipped");
    }
    let collected_at = Local::now().naive_local();

    // ---- On-demand artifacts ----
    let mut store = ArtifactStore::new();
    store.begin_run();

    if args.fetch_content || args.narrate {
        for (position, record) in report.records.iter().enumerate() {
            let body = store.ensure_body(&source, position, record).await;
            debug!(position, body = %truncate_for_log(body, 120), "Body ready");
        }
    }

    if args.narrate {
        let (llm_config, template) = load_narrator(args.llm_config.as_deref()).await?;
        let asker = AskFnWrapper { config: &llm_config, template: &template };
        for position in 0..report.records.len() {
            let narration = store.ensure_narration(&asker, position).await;
            debug!(position, narration = %truncate_for_log(narration, 120), "Narration ready");
        }
    }

    let articles: Vec<DigestEntry> = report
        .records
        .into_iter()
        .enumerate()
        .map(|(position, record)| {
            let artifacts = store.get(position);
            DigestEntry {
                body: artifacts.and_then(Artifacts::body_display).map(str::to_string),
                narration: artifacts.and_then(|a| a.narration.clone()),
                record,
            }
        })
        .collect();

    let digest = Digest {
        keyword,
        collected_at,
        since: range.since,
        until: range.until,
        articles,
        warnings: report.warnings,
    };
    info!(articles = digest.articles.len(), skipped_pages = digest.warnings.len(), "Digest ready");

    // ---- Output ----
    if let Err(e) = json::write_digest(&digest, &args.json_output_dir).await {
        error!(error = %e, "Failed to write JSON digest");
    }

    if let Some(markdown_output_dir) = &args.markdown_output_dir {
        let md = markdown::digest_to_markdown(&digest);
        let path = format!(
            "{}/{}",
            markdown_output_dir.trim_end_matches('/'),
            markdown::markdown_filename(&digest)
        );

        info!(%path, "Writing Markdown");
        match ensure_writable_dir(markdown_output_dir).await {
            Ok(()) => {
                if let Err(e) = tokio::fs::write(&path, md).await {
                    error!(%path, error = %e, "Failed writing Markdown");
                } else {
                    info!(%path, "Wrote Markdown digest");
                }
            }
            Err(e) => error!(path = %markdown_output_dir, error = %e, "Markdown output directory is not writable"),
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
