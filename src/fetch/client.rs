use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{Context, Result};

use super::{FetchError, FetchResult, PageRequest, PageSource};

/// reqwest-backed transport for the news API.
pub struct HttpPageSource {
    client: Client,
    base_url: String,
}

impl HttpPageSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to construct news API HTTP client")?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        Self::new(api.base_url.clone(), Duration::from_secs(api.timeout_secs))
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    async fn get_json(&self, endpoint: &str, request: PageRequest) -> FetchResult<Value> {
        let url = self.endpoint_url(endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[("page", request.page), ("size", request.size)])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| FetchError::transport(format!("request to {url} failed: {err}")))?
            .error_for_status()
            .map_err(|err| FetchError::transport(format!("{url} returned error status: {err}")))?;

        let body = response
            .text()
            .await
            .map_err(|err| FetchError::transport(format!("failed to read body of {url}: {err}")))?;

        // A body that is not JSON matches neither page layout.
        serde_json::from_str(&body)
            .map_err(|err| FetchError::shape(format!("{url} did not return JSON: {err}")))
    }
}

impl PageSource for HttpPageSource {
    fn fetch_json<'a>(
        &'a self,
        endpoint: &'a str,
        request: PageRequest,
    ) -> BoxFuture<'a, FetchResult<Value>> {
        Box::pin(self.get_json(endpoint, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_endpoint_without_double_slash() {
        let source = HttpPageSource::new("http://localhost:8080/", Duration::from_secs(1))
            .expect("client builds");
        assert_eq!(
            source.endpoint_url("/api/news/summaries"),
            "http://localhost:8080/api/news/summaries"
        );
    }
}
