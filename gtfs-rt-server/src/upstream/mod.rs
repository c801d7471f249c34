//! Wiener Linien traffic-info client.
//!
//! The operator publishes service disruptions as a JSON feed at
//! `/ogd_realtime/trafficInfoList`. This module fetches the raw payload,
//! and normalizes it into domain [`Disruption`](crate::domain::Disruption)
//! records.
//!
//! Key characteristics of the upstream feed:
//! - one `message` envelope with `value` ("OK" on success) and `serverTime`
//! - disruption categories are referenced by id and resolved by name
//! - timestamps are ISO-8601 with explicit UTC offsets, with or without
//!   a colon in the offset (`+01:00` and `+0100` both occur)

mod client;
mod error;
mod mock;
mod normalize;
mod types;

pub use client::{DisruptionSource, UpstreamConfig, WienerLinienClient};
pub use error::UpstreamError;
pub use mock::StaticDisruptionSource;
pub use normalize::normalize;
pub use types::{
    ResponseMessage, TimeWindow, TrafficInfo, TrafficInfoCategory, TrafficInfoData,
    TrafficInfoList,
};
