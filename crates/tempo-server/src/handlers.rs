//! HTTP handlers for the public routes

use crate::error::ApiError;
use crate::models::{large_payload, TimeDto, SMALL_PAYLOAD};
use crate::sse::{self, EventStream};
use crate::state::AppState;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::sse::Sse;
use axum::response::{IntoResponse, Json, Response};

/// Vendor-specific media type served by `/time` on request
pub const VENDOR_JSON: &str = "application/vnd.tempo+json";

/// Returns the current server time.
///
/// Responds with the vendor media type when the `Accept` header asks
/// for it, plain `application/json` otherwise.
#[utoipa::path(
    get,
    path = "/time",
    tag = "time",
    responses(
        (status = 200, description = "Successful response with the current time", content(
            ("application/json" = TimeDto,
                example = json!({"time": "2025-09-30T11:32:16.4693641"})),
            ("application/vnd.tempo+json" = TimeDto,
                example = json!({"time": "2025-09-30T11:32:16.4693641"})),
        )),
    ),
)]
pub async fn time(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let dto = TimeDto::from(state.clock.now());
    let content_type = if wants_vendor_json(&headers) {
        VENDOR_JSON
    } else {
        "application/json"
    };
    let body = serde_json::to_vec(&dto).map_err(tempo_core::Error::from)?;
    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

/// Tiny JSON payload, kept below the compression threshold.
#[utoipa::path(
    get,
    path = "/test/small",
    tag = "test",
    responses(
        (status = 200, description = "Payload below the compression threshold",
         body = String, content_type = "application/json"),
    ),
)]
pub async fn test_small() -> Response {
    ([(header::CONTENT_TYPE, "application/json")], SMALL_PAYLOAD).into_response()
}

/// Large JSON payload, above the compression threshold.
#[utoipa::path(
    get,
    path = "/test/large",
    tag = "test",
    responses(
        (status = 200, description = "Payload above the compression threshold",
         body = String, content_type = "application/json"),
    ),
)]
pub async fn test_large() -> Response {
    ([(header::CONTENT_TYPE, "application/json")], large_payload()).into_response()
}

/// Single-event stream: sends `data: hello` and completes.
///
/// Event production runs in a detached task so the accepting path
/// returns immediately; the stream is bounded by the configured
/// timeout.
#[utoipa::path(
    get,
    path = "/test/sse",
    tag = "test",
    responses(
        (status = 200, description = "Single-event stream",
         body = String, content_type = "text/event-stream"),
    ),
)]
pub async fn test_sse(State(state): State<AppState>) -> Sse<EventStream> {
    let (mut sink, stream) = sse::open_stream(state.config.sse.timeout);

    tokio::spawn(async move {
        // A failed send already performed the error transition
        if sink.send("hello").await.is_ok() {
            sink.complete();
        }
    });

    Sse::new(stream)
}

/// Liveness probe; deliberately absent from the API description.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "UP" }))
}

/// Machine-readable description of the public routes.
pub async fn openapi_json(State(state): State<AppState>) -> Json<utoipa::openapi::OpenApi> {
    Json(state.openapi.as_ref().clone())
}

fn wants_vendor_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains(VENDOR_JSON))
}
