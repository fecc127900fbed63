use std::path::Path;
use std::sync::Arc;

use log::{info, warn};
use ratatui::text::Line;

use crate::config::{expand_env_vars, load_config, validate_config, Config};
use crate::error::{AppError, Result};
use crate::feed::{
    user_message, ArticleView, SummaryView, ARTICLES_ERROR_MESSAGE, SUMMARY_ERROR_MESSAGE,
};
use crate::fetch::{FetchError, HttpPageSource, PageRequest, PagedFetcher};
use crate::records::{ArticleRecord, SummaryRecord};
use crate::ui::components::{article_lines, summary_lines};

const PRINT_WIDTH: u16 = 100;

/// Load the config file and apply a command-line base URL override.
pub fn load_dashboard_config(path: &Path, base_url: Option<&str>) -> Result<Config> {
    let config = load_config(path)?;
    let Some(base_url) = base_url else {
        return Ok(config);
    };

    let config = config.with_base_url(expand_env_vars(base_url)?);
    validate_config(&config)?;
    info!("using API base URL {}", config.api.base_url);
    Ok(config)
}

pub fn build_fetcher(config: &Config) -> Result<PagedFetcher> {
    let source = HttpPageSource::from_config(&config.api)?;
    Ok(PagedFetcher::new(Arc::new(source)))
}

pub async fn run_dashboard(config: &Config) -> Result<()> {
    let fetcher = build_fetcher(config)?;
    crate::ui::run_dashboard(config, fetcher).await
}

/// One-shot read of the summary feed's page 0.
pub async fn print_latest_summary(config: &Config) -> Result<()> {
    let fetcher = build_fetcher(config)?;
    let request = PageRequest::first(config.summary.page_size);
    let page = fetcher
        .fetch_page::<SummaryRecord>(&config.summary.endpoint, request)
        .await
        .map_err(|err| fetch_failure("summary", &err, SUMMARY_ERROR_MESSAGE))?;

    let view = SummaryView {
        record: page.items.first(),
        is_loading: false,
        error_message: None,
    };
    print_lines(&summary_lines(&view, PRINT_WIDTH));
    Ok(())
}

/// One-shot read of a single article page, with the end marker when it is short.
pub async fn print_article_page(config: &Config, page: u32, size: Option<u32>) -> Result<()> {
    let fetcher = build_fetcher(config)?;
    let request = PageRequest::new(page, size.unwrap_or(config.articles.page_size));
    let result = fetcher
        .fetch_page::<ArticleRecord>(&config.articles.endpoint, request)
        .await
        .map_err(|err| fetch_failure("article", &err, ARTICLES_ERROR_MESSAGE))?;

    let view = ArticleView {
        items: &result.items,
        is_initial_loading: false,
        is_incremental_loading: false,
        error_message: None,
        has_more: !result.is_last_page(),
    };
    println!(
        "Page {} ({} of {} items)",
        result.requested_page,
        result.items.len(),
        result.page_size
    );
    print_lines(&article_lines(&view, PRINT_WIDTH));
    Ok(())
}

/// Log the detailed cause and surface only the feed's user-facing message.
fn fetch_failure(feed: &str, err: &FetchError, transport_message: &str) -> AppError {
    warn!("{feed} fetch failed: {err}");
    AppError::message(user_message(err, transport_message))
}

fn print_lines(lines: &[Line<'_>]) {
    for line in lines {
        println!("{}", plain_text(line));
    }
}

fn plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn bundled_config() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/dashboard.json")
    }

    #[test]
    fn base_url_override_is_applied() {
        let config =
            load_dashboard_config(&bundled_config(), Some("https://news.example.com")).unwrap();
        assert_eq!(config.api.base_url, "https://news.example.com");
        assert_eq!(config.articles.page_size, 10);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let err = load_dashboard_config(&bundled_config(), Some("ftp://news")).unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn fetch_failures_become_user_messages() {
        let err = fetch_failure(
            "article",
            &FetchError::transport("connection refused"),
            ARTICLES_ERROR_MESSAGE,
        );
        assert!(matches!(err, AppError::Message(_)));
        assert_eq!(err.to_string(), "Failed to fetch news.");

        let err = fetch_failure(
            "summary",
            &FetchError::shape("content is a string"),
            SUMMARY_ERROR_MESSAGE,
        );
        assert_eq!(err.to_string(), "Unexpected response format from server.");
    }

    #[test]
    fn plain_text_joins_spans() {
        let line = Line::from(vec!["Bitcoin ".into(), "Price".into()]);
        assert_eq!(plain_text(&line), "Bitcoin Price");
    }
}
