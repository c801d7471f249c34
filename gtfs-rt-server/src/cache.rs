//! Caching layer for the upstream traffic-info feed.
//!
//! The operator asks feed consumers to poll at most every five minutes, so
//! the raw payload is reused for a freshness window slightly under that.
//! The window is a throttle, not a resilience fallback: once it has passed,
//! a failed refresh surfaces the error rather than serving stale data.
//!
//! `moka`'s `try_get_with` coalesces concurrent refreshes into a single
//! in-flight fetch and does not cache failures, so an error never poisons
//! the window for later requests.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::upstream::{DisruptionSource, TrafficInfoList, UpstreamError};

/// Configuration for the feed cache.
#[derive(Debug, Clone)]
pub struct FeedCacheConfig {
    /// How long a fetched payload stays fresh.
    pub ttl: Duration,
}

impl Default for FeedCacheConfig {
    fn default() -> Self {
        Self {
            // 4 minutes 50 seconds, just under the operator's polling limit.
            ttl: Duration::from_secs(290),
        }
    }
}

/// A disruption source with a freshness window.
///
/// Wraps a [`DisruptionSource`] and memoizes the last successful payload.
pub struct CachedFeedClient {
    source: Arc<dyn DisruptionSource>,
    cache: MokaCache<(), Arc<TrafficInfoList>>,
}

impl CachedFeedClient {
    /// Create a new cached client.
    pub fn new(source: Arc<dyn DisruptionSource>, config: &FeedCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(1)
            .build();

        Self { source, cache }
    }

    /// Get the current raw payload, fetching only outside the freshness
    /// window. Concurrent calls during a refresh share one fetch.
    pub async fn current(&self) -> Result<Arc<TrafficInfoList>, UpstreamError> {
        let source = Arc::clone(&self.source);
        self.cache
            .try_get_with((), async move { source.fetch().await.map(Arc::new) })
            .await
            .map_err(UpstreamError::Shared)
    }
}
