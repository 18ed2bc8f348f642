//! LLM narration of fetched article bodies.
//!
//! This module provides a thin interface to an OpenAI-compatible LLM API via
//! `awful_aj`. The provider endpoint, model and credential all live in the
//! `awful_aj` configuration file; the prompt lives in the `news_narrator`
//! chat template.
//!
//! # Architecture
//!
//! - [`AskAsync`]: Core trait defining async LLM interaction
//! - [`AskFnWrapper`]: Wraps the `awful_aj` library's `ask` function
//! - [`narrate`]: Turns a body into narration text or a displayable error
//!
//! Each narration is a single independent call. Nothing is retried, batched
//! or cached here.

use awful_aj::api::ask;
use awful_aj::{config, config_dir, template};
use awful_aj::{config::AwfulJadeConfig, template::ChatTemplate};
use std::error::Error;
use std::time::Instant;
use tracing::{info, instrument, warn};

/// Name of the chat template used for narration.
pub const NARRATOR_TEMPLATE: &str = "news_narrator";

/// Returned instead of calling the model when there is no body to narrate.
pub const NOTHING_TO_NARRATE: &str = "no article body to narrate";

/// Trait for async LLM interaction.
///
/// Implementors of this trait can send text to an LLM and receive a response.
pub trait AskAsync {
    /// The type of response returned by the LLM.
    type Response;

    /// Send text to the LLM and receive a response.
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>>;
}

/// Wrapper around `awful_aj::api::ask` that implements [`AskAsync`].
#[derive(Debug)]
pub struct AskFnWrapper<'a> {
    /// Reference to the LLM configuration (API keys, endpoints, model settings).
    pub config: &'a AwfulJadeConfig,
    /// Reference to the chat template defining the conversation structure.
    pub template: &'a ChatTemplate,
}

impl<'a> AskAsync for AskFnWrapper<'a> {
    type Response = String;

    #[instrument(level = "info", skip_all)]
    async fn ask(&self, text: &str) -> Result<Self::Response, Box<dyn Error>> {
        let t0 = Instant::now();
        let res = ask(self.config, text.to_string(), self.template, None, None).await;
        let dt = t0.elapsed();

        match &res {
            Ok(_) => info!(elapsed_ms = dt.as_millis() as u128, "API call succeeded"),
            Err(e) => warn!(elapsed_ms = dt.as_millis() as u128, error = %e, "API call failed"),
        }
        res
    }
}

/// Load the `awful_aj` configuration and the narrator template.
///
/// `config_path` overrides the default `config.yaml` in the `awful_aj`
/// configuration directory.
#[instrument(level = "info")]
pub async fn load_narrator(
    config_path: Option<&str>,
) -> Result<(AwfulJadeConfig, ChatTemplate), Box<dyn Error>> {
    let path = match config_path {
        Some(path) => path.to_string(),
        None => config_dir()?.join("config.yaml").to_string_lossy().into_owned(),
    };
    let config = config::load_config(&path)?;
    info!(config_path = %path, "Loaded LLM configuration");

    let template = template::load_template(NARRATOR_TEMPLATE).await?;
    info!(template = NARRATOR_TEMPLATE, "Loaded narrator template");
    Ok((config, template))
}

/// Produce a short spoken-style narration of `body`.
///
/// Never fails: a failed call yields a displayable error message instead, and
/// a blank body yields [`NOTHING_TO_NARRATE`] without calling the model.
#[instrument(level = "info", skip_all, fields(body_chars = body.chars().count()))]
pub async fn narrate<A>(asker: &A, body: &str) -> String
where
    A: AskAsync<Response = String>,
{
    if body.trim().is_empty() {
        return NOTHING_TO_NARRATE.to_string();
    }

    match asker.ask(body).await {
        Ok(text) => text.trim().to_string(),
        Err(e) => format!("narration failed: {e}"),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeAsker;
    use super::*;

    #[tokio::test]
    async fn test_narrate_returns_trimmed_reply() {
        let asker = FakeAsker::replying("  오늘의 소식입니다.\n");
        assert_eq!(narrate(&asker, "기사 본문").await, "오늘의 소식입니다.");
        assert_eq!(asker.prompts(), vec!["기사 본문".to_string()]);
    }

    #[tokio::test]
    async fn test_narrate_failure_becomes_message() {
        let asker = FakeAsker::failing("429 quota exceeded");
        assert_eq!(
            narrate(&asker, "기사 본문").await,
            "narration failed: 429 quota exceeded"
        );
    }

    #[tokio::test]
    async fn test_narrate_blank_body_skips_model() {
        let asker = FakeAsker::replying("unused");
        assert_eq!(narrate(&asker, "  \n").await, NOTHING_TO_NARRATE);
        assert!(asker.prompts().is_empty());
    }
}
