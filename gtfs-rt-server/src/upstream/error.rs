//! Upstream client error types.

use std::sync::Arc;

/// Errors from fetching or normalizing the traffic-info feed.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream returned an error status code
    #[error("upstream API error {status}: {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// The payload parsed but violates the feed's format contract
    /// (`message.value` not "OK", missing fields, unknown category id,
    /// malformed or inverted active period)
    #[error("malformed upstream feed: {0}")]
    Format(String),

    /// A failure observed by another request whose in-flight fetch this
    /// request was coalesced onto
    #[error("{0}")]
    Shared(Arc<UpstreamError>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = UpstreamError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(
            err.to_string(),
            "upstream API error 503: Service Unavailable"
        );

        let err = UpstreamError::Format("message.value was \"ERROR\"".into());
        assert!(err.to_string().contains("malformed upstream feed"));
    }

    #[test]
    fn shared_error_forwards_display() {
        let inner = Arc::new(UpstreamError::Format("bad".into()));
        let err = UpstreamError::Shared(inner);
        assert_eq!(err.to_string(), "malformed upstream feed: bad");
    }
}
