//! Loading and querying the line and stop mapping assets.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::Deserialize;

use super::error::MappingError;

/// Line mapping asset: `{meta: {version, ...}, mapping: {label: route_id}}`.
#[derive(Debug, Deserialize)]
struct LineMappingFile {
    meta: LineMeta,
    mapping: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct LineMeta {
    version: MetaVersion,
}

/// Stop mapping asset: `{meta: {gtfs_stops: {version, ...}, ...},
/// mapping: {stop_id: {gtfs_stop_id: string|null, ...}}}`.
#[derive(Debug, Deserialize)]
struct StopMappingFile {
    meta: StopMeta,
    mapping: HashMap<String, StopEntry>,
}

#[derive(Debug, Deserialize)]
struct StopMeta {
    gtfs_stops: GtfsStopsMeta,
}

#[derive(Debug, Deserialize)]
struct GtfsStopsMeta {
    version: MetaVersion,
}

#[derive(Debug, Deserialize)]
struct StopEntry {
    /// Null for stops the offline matcher could not pair with a GTFS stop.
    gtfs_stop_id: Option<String>,
}

/// Asset version, written as a bare number by some generator versions.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MetaVersion {
    Text(String),
    Number(i64),
}

impl fmt::Display for MetaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaVersion::Text(s) => f.write_str(s),
            MetaVersion::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Immutable lookup from upstream line/stop identifiers to GTFS ids.
///
/// Loaded once at startup; read-only for the process lifetime. Replacing
/// the assets requires a restart.
pub struct MappingStore {
    lines: HashMap<String, String>,
    stops: HashMap<u64, String>,
    feed_version: String,
    stop_feed_version: String,
}

impl MappingStore {
    /// Load both mapping assets.
    ///
    /// Stop entries with a null `gtfs_stop_id` are dropped here, so every
    /// surviving entry is usable.
    pub fn load(
        line_path: impl AsRef<Path>,
        stop_path: impl AsRef<Path>,
    ) -> Result<Self, MappingError> {
        let line_file: LineMappingFile = read_asset(line_path.as_ref())?;

        let stop_file: StopMappingFile = read_asset(stop_path.as_ref())?;
        let mut stops = HashMap::with_capacity(stop_file.mapping.len());
        for (key, entry) in stop_file.mapping {
            let stop_id = key.parse::<u64>().map_err(|_| MappingError::Parse {
                path: stop_path.as_ref().display().to_string(),
                message: format!("non-numeric stop id {key:?}"),
            })?;
            if let Some(gtfs_stop_id) = entry.gtfs_stop_id {
                stops.insert(stop_id, gtfs_stop_id);
            }
        }

        Ok(Self {
            lines: line_file.mapping,
            stops,
            feed_version: line_file.meta.version.to_string(),
            stop_feed_version: stop_file.meta.gtfs_stops.version.to_string(),
        })
    }

    /// Look up the GTFS route id for a line label.
    ///
    /// Line coverage is expected to be total; a miss is an error.
    pub fn route_id(&self, line: &str) -> Result<&str, MappingError> {
        self.lines
            .get(line)
            .map(String::as_str)
            .ok_or_else(|| MappingError::UnknownLine(line.to_string()))
    }

    /// Look up the GTFS stop id for an upstream stop id.
    ///
    /// Stop coverage is known to be partial; a miss is not an error.
    pub fn stop_id(&self, stop: u64) -> Option<&str> {
        self.stops.get(&stop).map(String::as_str)
    }

    /// Version of the line mapping asset, used as the feed version.
    pub fn feed_version(&self) -> &str {
        &self.feed_version
    }

    /// Version of the GTFS dataset the stop mapping was built against.
    pub fn stop_feed_version(&self) -> &str {
        &self.stop_feed_version
    }

    /// Number of line mappings.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of usable stop mappings.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }
}

fn read_asset<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, MappingError> {
    let json = std::fs::read_to_string(path).map_err(|source| MappingError::Io {
        path: path.display().to_string(),
        source,
    })?;

    serde_json::from_str(&json).map_err(|e| MappingError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
