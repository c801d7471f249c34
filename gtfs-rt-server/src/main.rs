use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use gtfs_rt_server::cache::{CachedFeedClient, FeedCacheConfig};
use gtfs_rt_server::mapping::MappingStore;
use gtfs_rt_server::upstream::{UpstreamConfig, WienerLinienClient};
use gtfs_rt_server::web::{AppState, create_router};

/// Mapping assets, generated offline from the GTFS dataset and the
/// municipal stop list.
const LINE_MAPPING_PATH: &str = "line_to_gtfs_id_mapping.json";
const STOP_MAPPING_PATH: &str = "stopid_to_gtfs_id_mapping.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load mapping assets (fail fast if missing or malformed)
    let mappings = MappingStore::load(LINE_MAPPING_PATH, STOP_MAPPING_PATH)
        .expect("Failed to load mapping assets");
    tracing::info!(
        lines = mappings.line_count(),
        stops = mappings.stop_count(),
        feed_version = mappings.feed_version(),
        gtfs_stops_version = mappings.stop_feed_version(),
        "loaded mapping assets"
    );

    // Create upstream client with the default freshness window
    let client =
        WienerLinienClient::new(UpstreamConfig::new()).expect("Failed to create upstream client");
    let upstream = CachedFeedClient::new(Arc::new(client), &FeedCacheConfig::default());

    // Build app state and router
    let state = AppState::new(upstream, mappings);
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("Vienna GTFS-RT server listening on http://{addr}");
    println!();
    println!("Endpoints:");
    println!("  GET /health             - Health check");
    println!("  GET /vienna-gtfs-rt.pb  - Binary GTFS-RT feed");
    println!("  GET /vienna-gtfs-rt.json - JSON projection of the feed");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
