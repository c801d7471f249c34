//! Traffic-info HTTP client.

use async_trait::async_trait;

use super::error::UpstreamError;
use super::types::TrafficInfoList;

/// Default base URL for the Wiener Linien open-data API.
const DEFAULT_BASE_URL: &str = "https://www.wienerlinien.at";

/// A source of raw traffic-info payloads.
///
/// The real implementation is [`WienerLinienClient`]; tests use
/// [`StaticDisruptionSource`](super::StaticDisruptionSource).
#[async_trait]
pub trait DisruptionSource: Send + Sync {
    /// Fetch the current traffic-info payload.
    async fn fetch(&self) -> Result<TrafficInfoList, UpstreamError>;
}

/// Configuration for the upstream client.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL for the API (defaults to the production host)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// HTTP client for the Wiener Linien traffic-info API.
#[derive(Debug, Clone)]
pub struct WienerLinienClient {
    http: reqwest::Client,
    base_url: String,
}

impl WienerLinienClient {
    /// Create a new client with the given configuration.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }
}

#[async_trait]
impl DisruptionSource for WienerLinienClient {
    async fn fetch(&self) -> Result<TrafficInfoList, UpstreamError> {
        let url = format!("{}/ogd_realtime/trafficInfoList", self.base_url);

        let response = self.http.get(&url).send().await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| UpstreamError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}
