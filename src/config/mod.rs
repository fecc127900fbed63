use std::time::Duration;

use serde::Deserialize;

use crate::fetch::{SUMMARIES_ENDPOINT, TRANSLATIONS_ENDPOINT};

pub mod loader;
pub mod validator;

pub use loader::{expand_env_vars, expand_placeholders, load_config, parse_config};
pub use validator::validate_config;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const SUMMARY_REFRESH_SECS: u64 = 60;
pub const SUMMARY_PAGE_SIZE: u32 = 1;
pub const ARTICLE_REFRESH_SECS: u64 = 300;
pub const ARTICLE_PAGE_SIZE: u32 = 10;
/// Distance from the content bottom, in px-equivalent units, that triggers the next page.
pub const NEAR_BOTTOM_THRESHOLD: u32 = 100;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SummaryFeedConfig {
    pub endpoint: String,
    pub refresh_secs: u64,
    pub page_size: u32,
}

impl Default for SummaryFeedConfig {
    fn default() -> Self {
        Self {
            endpoint: SUMMARIES_ENDPOINT.to_string(),
            refresh_secs: SUMMARY_REFRESH_SECS,
            page_size: SUMMARY_PAGE_SIZE,
        }
    }
}

impl SummaryFeedConfig {
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArticleFeedConfig {
    pub endpoint: String,
    pub refresh_secs: u64,
    pub page_size: u32,
    pub near_bottom_threshold: u32,
}

impl Default for ArticleFeedConfig {
    fn default() -> Self {
        Self {
            endpoint: TRANSLATIONS_ENDPOINT.to_string(),
            refresh_secs: ARTICLE_REFRESH_SECS,
            page_size: ARTICLE_PAGE_SIZE,
            near_bottom_threshold: NEAR_BOTTOM_THRESHOLD,
        }
    }
}

impl ArticleFeedConfig {
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

/// Dashboard settings. Every section falls back to the builtin defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub summary: SummaryFeedConfig,
    pub articles: ArticleFeedConfig,
}

impl Config {
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api.base_url = base_url.into();
        self
    }
}
