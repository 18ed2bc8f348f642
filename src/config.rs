//! Scraper settings loaded from an optional YAML file.
//!
//! Every key is optional; anything left out keeps its default.
//!
//! ```yaml
//! search_base_url: https://search.daum.net/search
//! user_agent: "Mozilla/5.0 ..."
//! timeout_secs: 5
//! request_delay_ms: 500
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{info, instrument};

use crate::scrapers::DEFAULT_USER_AGENT;
use crate::scrapers::daum::SEARCH_BASE_URL;

/// Transport and politeness settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Search endpoint receiving `w`, `q`, `p` and `sort` parameters.
    pub search_base_url: String,
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Pause between listing page requests.
    pub request_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            search_base_url: SEARCH_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 5,
            request_delay_ms: 500,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Parse settings from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load settings from `path`, or defaults when no path is given or the file
    /// does not exist.
    #[instrument(level = "info")]
    pub async fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !Path::new(path).exists() {
            info!(%path, "Settings file not found; using defaults");
            return Ok(Self::default());
        }

        let yaml = fs::read_to_string(path).await?;
        let settings = Self::from_yaml(&yaml)?;
        info!(%path, ?settings, "Loaded settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.search_base_url, "https://search.daum.net/search");
        assert_eq!(settings.timeout(), Duration::from_secs(5));
        assert_eq!(settings.request_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml("timeout_secs: 10\nrequest_delay_ms: 0\n").unwrap();
        assert_eq!(settings.timeout_secs, 10);
        assert_eq!(settings.request_delay(), Duration::ZERO);
        assert_eq!(settings.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_bad_yaml_is_an_error() {
        assert!(Settings::from_yaml("timeout_secs: soon").is_err());
    }

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let settings = Settings::load(Some("/nonexistent/awful_news_search.yaml")).await.unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(Settings::load(None).await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join("awful_news_search_settings_test.yaml");
        tokio::fs::write(&path, "search_base_url: http://localhost:8080/search\n")
            .await
            .unwrap();

        let settings = Settings::load(path.to_str()).await.unwrap();
        assert_eq!(settings.search_base_url, "http://localhost:8080/search");
        let _ = tokio::fs::remove_file(&path).await;
    }
}
