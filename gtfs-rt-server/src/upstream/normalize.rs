//! Normalization of raw traffic-info payloads into domain disruptions.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use tracing::debug;

use crate::domain::Disruption;

use super::error::UpstreamError;
use super::types::{TrafficInfo, TrafficInfoList};

/// Category name of elevator outages, which are not mapped to alerts.
///
/// This is a hard-coded match against the upstream category name; if the
/// operator renames the category the filter silently stops applying.
const ELEVATOR_CATEGORY: &str = "aufzugsinfo";

/// Timestamp format of the feed: ISO 8601 with optional fractional seconds
/// and an explicit UTC offset (with or without colon).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Validate and reshape a raw payload into domain disruptions.
///
/// Returns the response's generation time and the disruptions in upstream
/// iteration order. Entries sharing an id are collapsed last-write-wins,
/// keeping the position of the first occurrence. Elevator outages are
/// skipped entirely.
pub fn normalize(
    raw: &TrafficInfoList,
) -> Result<(DateTime<FixedOffset>, Vec<Disruption>), UpstreamError> {
    if raw.message.value != "OK" {
        return Err(UpstreamError::Format(format!(
            "message.value was {:?}",
            raw.message.value
        )));
    }

    let server_time = parse_timestamp(&raw.message.server_time)
        .map_err(|e| UpstreamError::Format(format!("message.serverTime: {e}")))?;

    let categories: HashMap<u64, &str> = raw
        .data
        .traffic_info_categories
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect();

    let mut disruptions: Vec<Disruption> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for info in &raw.data.traffic_infos {
        let category = categories.get(&info.category_id).copied().ok_or_else(|| {
            UpstreamError::Format(format!(
                "disruption {:?} references unknown category id {}",
                info.name, info.category_id
            ))
        })?;

        if category == ELEVATOR_CATEGORY {
            debug!(id = %info.name, "skipping elevator disruption");
            continue;
        }

        let disruption = convert_info(info, category)?;

        match index_by_id.get(&disruption.id) {
            // Later entries replace earlier ones, keeping the original position.
            Some(&i) => disruptions[i] = disruption,
            None => {
                index_by_id.insert(disruption.id.clone(), disruptions.len());
                disruptions.push(disruption);
            }
        }
    }

    Ok((server_time, disruptions))
}

/// Convert a single raw entry. The category name is already resolved.
fn convert_info(info: &TrafficInfo, category: &str) -> Result<Disruption, UpstreamError> {
    let time = info
        .time
        .as_ref()
        .ok_or_else(|| UpstreamError::Format(format!("disruption {:?} has no time", info.name)))?;

    let start = required_timestamp(time.start.as_deref(), &info.name, "time.start")?;
    let end = required_timestamp(time.end.as_deref(), &info.name, "time.end")?;

    if end < start {
        return Err(UpstreamError::Format(format!(
            "disruption {:?} has an inverted active period ({start} > {end})",
            info.name
        )));
    }

    Ok(Disruption {
        id: info.name.clone(),
        category: category.to_string(),
        title: info.title.clone(),
        description: info.description.clone(),
        related_lines: info.related_lines.clone().unwrap_or_default(),
        related_stops: info.related_stops.clone().unwrap_or_default(),
        active_start: start,
        active_end: end,
    })
}

fn required_timestamp(
    value: Option<&str>,
    id: &str,
    field: &str,
) -> Result<DateTime<FixedOffset>, UpstreamError> {
    let value = value
        .ok_or_else(|| UpstreamError::Format(format!("disruption {id:?} has no {field}")))?;

    parse_timestamp(value)
        .map_err(|e| UpstreamError::Format(format!("disruption {id:?} {field}: {e}")))
}

fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    DateTime::parse_from_str(value, TIMESTAMP_FORMAT)
}
