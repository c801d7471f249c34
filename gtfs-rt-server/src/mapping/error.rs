//! Mapping store error types.

/// Errors from loading or querying the identifier mappings.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// Failed to read a mapping asset from disk
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A mapping asset did not match the expected shape
    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    /// A disruption references a line label with no GTFS route id.
    /// Line coverage is expected to be total, so this indicates a stale
    /// mapping asset that needs regeneration.
    #[error("no GTFS route id for line {0:?}")]
    UnknownLine(String),
}
