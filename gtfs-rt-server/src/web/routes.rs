//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use gtfs_realtime::FeedMessage;
use prost::Message;
use serde::Serialize;

use crate::classify::classify_all;
use crate::feed::build_feed;
use crate::mapping::MappingError;
use crate::upstream::{UpstreamError, normalize};

use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/vienna-gtfs-rt.pb", get(feed_pb))
        .route("/vienna-gtfs-rt.json", get(feed_json))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Run the full pipeline: cached fetch, normalize, classify, build.
///
/// The `FeedMessage` itself is never cached; only the raw upstream payload
/// is, so repeated requests inside the freshness window still rebuild the
/// feed deterministically.
async fn build_current_feed(state: &AppState) -> Result<FeedMessage, AppError> {
    let raw = state.upstream.current().await?;
    let (server_time, disruptions) = normalize(&raw)?;
    let classified = classify_all(disruptions);
    Ok(build_feed(server_time, &classified, &state.mappings)?)
}

/// Binary GTFS-RT feed.
async fn feed_pb(State(state): State<AppState>) -> Result<Response, AppError> {
    let feed = build_current_feed(&state).await?;
    let body = feed.encode_to_vec();

    Ok(([(header::CONTENT_TYPE, "application/x-protobuf")], body).into_response())
}

/// JSON projection of the same feed, with proto field names and integer
/// enums.
async fn feed_json(State(state): State<AppState>) -> Result<Response, AppError> {
    let feed = build_current_feed(&state).await?;

    Ok(Json(feed).into_response())
}

/// Application error type.
///
/// Every pipeline failure aborts the request; a partial feed is never
/// served.
#[derive(Debug)]
pub enum AppError {
    Upstream(UpstreamError),
    Mapping(MappingError),
}

impl From<UpstreamError> for AppError {
    fn from(e: UpstreamError) -> Self {
        AppError::Upstream(e)
    }
}

impl From<MappingError> for AppError {
    fn from(e: MappingError) -> Self {
        AppError::Mapping(e)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Network-level upstream failures are the gateway's fault (502);
/// malformed payloads and mapping gaps are ours (500).
fn upstream_status(err: &UpstreamError) -> StatusCode {
    match err {
        UpstreamError::Shared(inner) => upstream_status(inner),
        UpstreamError::Format(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Upstream(e) => (upstream_status(e), e.to_string()),
            AppError::Mapping(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        };

        tracing::error!(%status, %message, "request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CachedFeedClient, FeedCacheConfig};
    use crate::mapping::MappingStore;
    use crate::upstream::StaticDisruptionSource;
    use gtfs_realtime::alert::{Cause, Effect};
    use std::io::Write;
    use std::sync::Arc;

    const UPSTREAM_BODY: &str = r#"{
        "message": {"value": "OK", "messageCode": 1, "serverTime": "2026-01-02T16:40:00+01:00"},
        "data": {
            "trafficInfoCategories": [{"id": 1, "name": "stoerunglang"}],
            "trafficInfos": [
                {
                    "name": "X1",
                    "refTrafficInfoCategoryId": 1,
                    "title": "Bauarbeiten",
                    "description": "Wartungsarbeiten",
                    "relatedLines": ["U4"],
                    "time": {"start": "2026-01-02T10:00:00+01:00", "end": "2026-01-02T20:00:00+01:00"}
                }
            ]
        }
    }"#;

    fn mappings() -> MappingStore {
        let mut line_file = tempfile::NamedTempFile::new().unwrap();
        line_file
            .write_all(br#"{"meta": {"version": "2026-01"}, "mapping": {"U4": "1234.U4"}}"#)
            .unwrap();
        let mut stop_file = tempfile::NamedTempFile::new().unwrap();
        stop_file
            .write_all(br#"{"meta": {"gtfs_stops": {"version": "2026-01"}}, "mapping": {}}"#)
            .unwrap();
        MappingStore::load(line_file.path(), stop_file.path()).unwrap()
    }

    fn state_with(body: &str) -> AppState {
        let source = Arc::new(StaticDisruptionSource::from_json(body).unwrap());
        let upstream = CachedFeedClient::new(source, &FeedCacheConfig::default());
        AppState::new(upstream, mappings())
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn pipeline_produces_expected_alert() {
        let state = state_with(UPSTREAM_BODY);

        let feed = build_current_feed(&state).await.unwrap();

        assert_eq!(feed.header.timestamp, Some(1767368400));
        assert_eq!(feed.entity.len(), 1);

        let alert = feed.entity[0].alert.as_ref().unwrap();
        // The description's "Wartung" needle precedes "Bauarbeiten" in the
        // cause table; nothing matches an effect rule.
        assert_eq!(alert.cause, Some(Cause::Maintenance.into()));
        assert_eq!(alert.effect, Some(Effect::UnknownEffect.into()));
        assert_eq!(
            alert.informed_entity[0].route_id.as_deref(),
            Some("1234.U4")
        );
        assert_eq!(alert.active_period[0].start, Some(1767344400));
        assert_eq!(alert.active_period[0].end, Some(1767380400));
    }

    #[tokio::test]
    async fn pb_endpoint_serves_decodable_protobuf() {
        let state = state_with(UPSTREAM_BODY);

        let response = feed_pb(State(state)).await.unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/x-protobuf"
        );

        let bytes = body_bytes(response).await;
        let decoded = FeedMessage::decode(bytes.as_slice()).unwrap();
        assert_eq!(decoded.entity[0].id, "X1");
    }

    #[tokio::test]
    async fn json_endpoint_serves_integer_enums() {
        let state = state_with(UPSTREAM_BODY);

        let response = feed_json(State(state)).await.unwrap();
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let bytes = body_bytes(response).await;
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["header"]["gtfs_realtime_version"], "2.0");
        let alert = &value["entity"][0]["alert"];
        assert_eq!(alert["cause"], i32::from(Cause::Maintenance));
        assert_eq!(alert["effect"], i32::from(Effect::UnknownEffect));
    }

    #[tokio::test]
    async fn malformed_upstream_is_a_server_error() {
        let body = r#"{
            "message": {"value": "ERROR", "messageCode": 0, "serverTime": "2026-01-02T16:40:00+01:00"},
            "data": {}
        }"#;
        let state = state_with(body);

        let err = build_current_feed(&state).await.unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn unknown_line_is_a_server_error() {
        let body = UPSTREAM_BODY.replace("\"U4\"", "\"U5\"");
        let state = state_with(&body);

        let err = build_current_feed(&state).await.unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn upstream_api_failure_maps_to_bad_gateway() {
        let err = AppError::Upstream(UpstreamError::Api {
            status: 503,
            message: "down".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);

        let shared = AppError::Upstream(UpstreamError::Shared(Arc::new(UpstreamError::Api {
            status: 503,
            message: "down".to_string(),
        })));
        assert_eq!(shared.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
