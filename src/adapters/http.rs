use crate::config::settings::Settings;
use crate::domain::ports::Fetcher;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Plain HTTP GET fetcher. Non-2xx responses are errors.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .user_agent(settings.user_agent.as_str())
            .build()
            .map_err(|e| EtlError::Config {
                message: format!("cannot build HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let fetch_error = |source: reqwest::Error| EtlError::Fetch {
            url: url.to_string(),
            source,
        };

        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(fetch_error)?;
        tracing::debug!("Response status: {}", response.status());

        let response = response.error_for_status().map_err(fetch_error)?;
        response.text().await.map_err(fetch_error)
    }
}
