use crate::config::Config;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use turf_zones::{MetadataFetcher, ZoneQuery, ZoneRecord};

/// Bulk zone lookup against the Turf API (`POST /v4/zones`)
pub struct HttpFetcher {
    client: Client,
    endpoint: String,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!("turf-map/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.api_url.clone(),
        })
    }
}

#[async_trait]
impl MetadataFetcher for HttpFetcher {
    async fn fetch(&self, request: &[ZoneQuery]) -> Result<Vec<ZoneRecord>> {
        let body = serde_json::to_vec(request).context("Failed to encode zone request")?;
        let url = &self.endpoint;

        let response = self
            .client
            .post(url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .with_context(|| format!("Zone request failed: POST {url}"))?
            .error_for_status()
            .with_context(|| format!("Zone request failed: POST {url}"))?;

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed while reading HTTP body from {url}"))?;

        let records: Vec<ZoneRecord> =
            serde_json::from_slice(&bytes).with_context(|| format!("Invalid zone response from {url}"))?;
        log::debug!("Zone API returned {} records", records.len());
        Ok(records)
    }
}
