//! Assembly of the GTFS-RT `FeedMessage` from classified disruptions.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use gtfs_realtime::translated_string::Translation;
use gtfs_realtime::{
    Alert, EntitySelector, FeedEntity, FeedHeader, FeedMessage, TimeRange, TranslatedString,
    feed_header::Incrementality,
};
use tracing::{debug, warn};

use crate::classify::ClassifiedDisruption;
use crate::domain::InformedEntity;
use crate::mapping::{MappingError, MappingStore};

/// Informational URL attached to every alert.
const INFO_URL: &str = "https://www.wienerlinien.at/betriebsinfo";

/// Language tag for all alert text.
const LANGUAGE: &str = "de";

/// Build a `FeedMessage` from classified disruptions.
///
/// Alerts are emitted in slice order; given identical inputs the output is
/// byte-identical across builds. A line label missing from the mapping is
/// fatal; a missing stop id is skipped.
pub fn build_feed(
    server_time: DateTime<FixedOffset>,
    disruptions: &[ClassifiedDisruption],
    mappings: &MappingStore,
) -> Result<FeedMessage, MappingError> {
    let mut entities = Vec::with_capacity(disruptions.len());
    for classified in disruptions {
        entities.push(build_entity(classified, mappings)?);
    }

    Ok(FeedMessage {
        header: FeedHeader {
            gtfs_realtime_version: "2.0".to_string(),
            incrementality: Some(Incrementality::FullDataset.into()),
            timestamp: Some(server_time.timestamp() as u64),
            feed_version: Some(mappings.feed_version().to_string()),
        },
        entity: entities,
    })
}

fn build_entity(
    classified: &ClassifiedDisruption,
    mappings: &MappingStore,
) -> Result<FeedEntity, MappingError> {
    let disruption = &classified.disruption;
    let all_text = disruption.all_text();

    let alert = Alert {
        active_period: vec![TimeRange {
            start: Some(disruption.active_start.timestamp() as u64),
            end: Some(disruption.active_end.timestamp() as u64),
        }],
        informed_entity: informed_entities(classified, &all_text, mappings)?,
        cause: Some(classified.cause.into()),
        effect: Some(classified.effect.into()),
        url: Some(translated(INFO_URL)),
        header_text: Some(translated(&disruption.title)),
        description_text: Some(translated(&disruption.description)),
        ..Default::default()
    };

    Ok(FeedEntity {
        id: disruption.id.clone(),
        alert: Some(alert),
        ..Default::default()
    })
}

/// Translate a disruption's line labels and stop ids into informed
/// entities.
///
/// Duplicate suppression is scoped to one alert: the key is the raw
/// identifier paired with the disruption's text, and the text is constant
/// within an alert, so a repeated identifier is a repeated key.
fn informed_entities(
    classified: &ClassifiedDisruption,
    all_text: &str,
    mappings: &MappingStore,
) -> Result<Vec<EntitySelector>, MappingError> {
    let disruption = &classified.disruption;
    let mut selectors = Vec::new();

    let mut seen_lines: HashSet<&str> = HashSet::new();
    for line in &disruption.related_lines {
        if !seen_lines.insert(line) {
            debug!(id = %disruption.id, %line, "suppressing duplicate line entity");
            continue;
        }
        let route_id = mappings.route_id(line)?;
        selectors.push(InformedEntity::Route(route_id.to_string()).into_selector());
    }

    let mut seen_stops: HashSet<u64> = HashSet::new();
    for &stop in &disruption.related_stops {
        if !seen_stops.insert(stop) {
            debug!(id = %disruption.id, stop, "suppressing duplicate stop entity");
            continue;
        }
        match mappings.stop_id(stop) {
            Some(stop_id) => {
                selectors.push(InformedEntity::Stop(stop_id.to_string()).into_selector());
            }
            None => warn!(id = %disruption.id, stop, text = %all_text, "no GTFS stop id for stop"),
        }
    }

    Ok(selectors)
}

fn translated(text: &str) -> TranslatedString {
    TranslatedString {
        translation: vec![Translation {
            text: text.to_string(),
            language: Some(LANGUAGE.to_string()),
        }],
    }
}
