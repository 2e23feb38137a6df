use crate::error::{RecapError, Result};
use crate::source::{AllTime, WakaStats};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_WAKATIME_URL: &str = "https://wakatime.com/api/v1";
pub const DEFAULT_TIME_RANGE: &str = "last_7_days";

/// WakaTime API client
pub struct WakaTimeClient {
    api_key: String,
    client: Client,
    base_url: String,
    time_range: String,
}

impl WakaTimeClient {
    /// Create a new WakaTime API client
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            api_key,
            client,
            base_url: DEFAULT_WAKATIME_URL.to_string(),
            time_range: DEFAULT_TIME_RANGE.to_string(),
        })
    }

    /// Point at another WakaTime-compatible server
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set the stats range (`last_7_days`, `last_30_days`, ...)
    pub fn with_time_range(mut self, time_range: String) -> Self {
        self.time_range = time_range;
        self
    }

    fn stats_url(&self) -> String {
        format!("{}/users/current/stats/{}", self.base_url, self.time_range)
    }

    fn all_time_url(&self) -> String {
        format!("{}/users/current/all_time_since_today", self.base_url)
    }

    /// Coding-time breakdown for the configured range
    pub async fn fetch_stats(&self) -> Result<WakaStats> {
        let stats: WakaStats = self.get_data(&self.stats_url()).await?;
        stats.validate()?;
        Ok(stats)
    }

    /// Total coding time since the account was created
    pub async fn fetch_all_time(&self) -> Result<AllTime> {
        self.get_data(&self.all_time_url()).await
    }

    fn request(&self, url: &str) -> RequestBuilder {
        self.client.get(url).basic_auth(&self.api_key, None::<&str>)
    }

    async fn get_data<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "Requesting WakaTime data");

        let response = self.request(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RecapError::wakatime_api(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}
