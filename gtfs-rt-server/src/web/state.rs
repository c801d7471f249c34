//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedFeedClient;
use crate::mapping::MappingStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached upstream feed client
    pub upstream: Arc<CachedFeedClient>,

    /// Line and stop identifier mappings, immutable after startup
    pub mappings: Arc<MappingStore>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(upstream: CachedFeedClient, mappings: MappingStore) -> Self {
        Self {
            upstream: Arc::new(upstream),
            mappings: Arc::new(mappings),
        }
    }
}
