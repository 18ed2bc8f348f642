//! Command-line interface definitions for Awful News Search.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Output directories and config paths can also come from environment variables.

use chrono::NaiveDate;
use clap::Parser;

/// Command-line arguments for the Awful News Search application.
///
/// # Examples
///
/// ```sh
/// # Three pages of results from the first week of June
/// awful_news_search 삼성라이온즈 -p 3 --since 2024-06-01 --until 2024-06-07 -j ./json
///
/// # Also fetch each article and narrate it
/// awful_news_search 삼성라이온즈 --since 2024-06-01 --until 2024-06-07 -j ./json --narrate
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Search keyword
    pub keyword: String,

    /// Number of result pages to collect
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..=20))]
    pub pages: u32,

    /// First day of the date range (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub since: Option<NaiveDate>,

    /// Last day of the date range (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub until: Option<NaiveDate>,

    /// Fetch the full body of every surviving article
    #[arg(long)]
    pub fetch_content: bool,

    /// Narrate every surviving article with the LLM (implies --fetch-content)
    #[arg(long)]
    pub narrate: bool,

    /// Output directory for the JSON digest
    #[arg(short, long, env = "NEWS_JSON_OUTPUT_DIR")]
    pub json_output_dir: String,

    /// Output directory for the Markdown digest
    #[arg(short, long, env = "NEWS_MARKDOWN_OUTPUT_DIR")]
    pub markdown_output_dir: Option<String>,

    /// Optional path to a scraper settings YAML file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Optional path to the awful_aj config.yaml used for narration
    #[arg(long, env = "AWFUL_AJ_CONFIG")]
    pub llm_config: Option<String>,
}
