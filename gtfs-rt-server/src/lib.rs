//! Wiener Linien disruption feed to GTFS-Realtime converter.
//!
//! Fetches the operator's free-text traffic-info feed, classifies each
//! disruption into the GTFS-RT cause/effect enumerations, translates line
//! and stop identifiers to GTFS ids, and serves the result as a GTFS-RT
//! `FeedMessage` over HTTP.

pub mod cache;
pub mod classify;
pub mod domain;
pub mod feed;
pub mod mapping;
pub mod upstream;
pub mod web;
