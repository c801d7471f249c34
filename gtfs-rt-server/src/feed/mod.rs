//! GTFS-RT feed assembly.

mod build;

pub use build::build_feed;
