//! Traffic-info API response DTOs.
//!
//! These types map directly to the `/ogd_realtime/trafficInfoList` JSON
//! response. Timestamps stay as strings here; the normalizer parses them.
//! Fields the pipeline does not use are omitted and ignored by serde.

use serde::Deserialize;

/// Response from `/ogd_realtime/trafficInfoList`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficInfoList {
    /// Response envelope with status and generation time.
    pub message: ResponseMessage,

    /// The actual disruption data.
    pub data: TrafficInfoData,
}

/// Response envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMessage {
    /// Status string; "OK" on success.
    pub value: String,

    /// Numeric status code.
    pub message_code: Option<i64>,

    /// When this response was generated (ISO 8601 with offset).
    pub server_time: String,
}

/// Payload of a traffic-info response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficInfoData {
    /// Disruption categories, referenced by id from `traffic_infos`.
    #[serde(default)]
    pub traffic_info_categories: Vec<TrafficInfoCategory>,

    /// The disruptions themselves.
    #[serde(default)]
    pub traffic_infos: Vec<TrafficInfo>,
}

/// A disruption category (e.g. long-term disruption, elevator outage).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficInfoCategory {
    pub id: u64,

    /// Machine-readable category name (e.g. "stoerunglang", "aufzugsinfo").
    pub name: String,

    /// Human-readable category title.
    pub title: Option<String>,
}

/// A single disruption entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficInfo {
    /// The upstream's disruption identifier, unique per snapshot.
    pub name: String,

    /// Short summary.
    pub title: String,

    /// Full description text.
    pub description: String,

    /// Category reference into `traffic_info_categories`.
    #[serde(rename = "refTrafficInfoCategoryId")]
    pub category_id: u64,

    /// Affected line labels. Omitted upstream when no lines are affected.
    pub related_lines: Option<Vec<String>>,

    /// Affected stop ids. Omitted upstream when no stops are affected.
    pub related_stops: Option<Vec<u64>>,

    /// Active period of the disruption.
    pub time: Option<TimeWindow>,
}

/// Active period of a disruption.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    /// Start timestamp (ISO 8601 with offset).
    pub start: Option<String>,

    /// End timestamp (ISO 8601 with offset).
    pub end: Option<String>,

    /// When normal operation is expected to resume (informational).
    pub resume: Option<String>,
}
