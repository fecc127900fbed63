use crate::error::{AppError, Result};

use super::Config;

/// Collect every problem with the config and report them together.
pub fn validate_config(config: &Config) -> Result<()> {
    let mut issues = Vec::new();

    validate_base_url(&config.api.base_url, &mut issues);
    if config.api.timeout_secs == 0 {
        issues.push("api.timeout_secs must be greater than zero".to_string());
    }

    validate_feed(
        "summary",
        &config.summary.endpoint,
        config.summary.refresh_secs,
        config.summary.page_size,
        &mut issues,
    );
    validate_feed(
        "articles",
        &config.articles.endpoint,
        config.articles.refresh_secs,
        config.articles.page_size,
        &mut issues,
    );

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "Invalid dashboard config: {}",
            issues.join("; ")
        )))
    }
}

fn validate_base_url(base_url: &str, issues: &mut Vec<String>) {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        issues.push("api.base_url must not be empty".to_string());
        return;
    }

    match reqwest::Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => issues.push(format!(
            "api.base_url must use http or https, got `{}`",
            url.scheme()
        )),
        Err(err) => issues.push(format!("api.base_url is not a valid URL: {err}")),
    }
}

fn validate_feed(
    section: &str,
    endpoint: &str,
    refresh_secs: u64,
    page_size: u32,
    issues: &mut Vec<String>,
) {
    if !endpoint.starts_with('/') {
        issues.push(format!("{section}.endpoint must start with `/`"));
    }
    if refresh_secs == 0 {
        issues.push(format!("{section}.refresh_secs must be greater than zero"));
    }
    if page_size == 0 {
        issues.push(format!("{section}.page_size must be greater than zero"));
    }
}
