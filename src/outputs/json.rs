//! JSON output of a finished search run.
//!
//! Files are organized by collection date, one file per keyword:
//! ```text
//! json_output_dir/
//! └── 2024-06-01/
//!     └── 삼성라이온즈.json
//! ```
//!
//! Running the same keyword twice on one day overwrites the earlier file.

use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

use crate::models::Digest;
use crate::utils::slugify;

/// Path a digest will be written to under `json_output_dir`.
pub fn digest_path(digest: &Digest, json_output_dir: &str) -> String {
    format!(
        "{}/{}/{}.json",
        json_output_dir.trim_end_matches('/'),
        digest.collected_at.date(),
        file_stem(&digest.keyword)
    )
}

/// Serialize `digest` and write it to [`digest_path`].
///
/// Returns the path written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_digest(digest: &Digest, json_output_dir: &str) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(digest)?;
    let path = digest_path(digest, json_output_dir);

    let full_json_dir = format!(
        "{}/{}",
        json_output_dir.trim_end_matches('/'),
        digest.collected_at.date()
    );
    info!(%full_json_dir, "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(%full_json_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    fs::write(&path, json).await?;
    info!(%path, articles = digest.articles.len(), "Wrote JSON digest");
    Ok(path)
}

/// Slug of the keyword, or `"search"` when nothing printable is left.
pub(crate) fn file_stem(keyword: &str) -> String {
    let slug = slugify(keyword);
    if slug.is_empty() { "search".to_string() } else { slug }
}
