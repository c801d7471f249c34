//! Web layer for the GTFS-RT feed server.
//!
//! Serves the converted feed as binary protobuf and as a JSON projection.

mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
