//! Static disruption source for testing without API access.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::client::DisruptionSource;
use super::error::UpstreamError;
use super::types::TrafficInfoList;

/// A [`DisruptionSource`] that serves a fixed payload.
///
/// Useful for development without network access and for exercising the
/// cache layer: every `fetch` is counted, and the payload can be swapped
/// to simulate an upstream change between polls.
pub struct StaticDisruptionSource {
    payload: Mutex<TrafficInfoList>,
    fetches: AtomicUsize,
}

impl StaticDisruptionSource {
    /// Create a source serving the given payload.
    pub fn new(payload: TrafficInfoList) -> Self {
        Self {
            payload: Mutex::new(payload),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Create a source from a raw JSON response body.
    pub fn from_json(json: &str) -> Result<Self, UpstreamError> {
        let payload = serde_json::from_str(json).map_err(|e| UpstreamError::Json {
            message: e.to_string(),
            body: Some(json.chars().take(500).collect()),
        })?;
        Ok(Self::new(payload))
    }

    /// Replace the served payload.
    pub fn set_payload(&self, payload: TrafficInfoList) {
        *self.payload.lock().unwrap() = payload;
    }

    /// Number of times `fetch` has been called.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DisruptionSource for StaticDisruptionSource {
    async fn fetch(&self) -> Result<TrafficInfoList, UpstreamError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.payload.lock().unwrap().clone())
    }
}
