//! A normalized service disruption.

use chrono::{DateTime, FixedOffset};

/// A single disruption from the operator's traffic-info feed.
///
/// Invariant: `active_start <= active_end` (enforced by the normalizer).
/// The `id` is unique within one feed snapshot; duplicates in the raw
/// payload are resolved before this type is constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Disruption {
    /// Upstream disruption identifier (the entry's `name` field).
    pub id: String,

    /// Resolved category name (e.g. "stoerunglang").
    pub category: String,

    /// Short human-readable summary.
    pub title: String,

    /// Full free-text description.
    pub description: String,

    /// Affected line labels, in upstream order (e.g. "U4", "49").
    pub related_lines: Vec<String>,

    /// Affected stop ids, in upstream order (operator-internal numbering).
    pub related_stops: Vec<u64>,

    /// Start of the active period.
    pub active_start: DateTime<FixedOffset>,

    /// End of the active period.
    pub active_end: DateTime<FixedOffset>,
}

impl Disruption {
    /// Title and description joined with a single space.
    ///
    /// This is the text the classifier and the duplicate-suppression key
    /// operate on.
    pub fn all_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}
