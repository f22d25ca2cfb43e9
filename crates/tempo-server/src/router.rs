//! Route table and middleware stack

use crate::error::not_found;
use crate::handlers;
use crate::state::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// The compression layer wraps every route, including the fallback;
/// the policy itself decides per response whether to encode.
pub fn build_router(state: AppState) -> Router {
    let compression = Arc::new(state.config.compression.clone());

    Router::new()
        .route("/time", get(handlers::time))
        .route("/test/small", get(handlers::test_small))
        .route("/test/large", get(handlers::test_large))
        .route("/test/sse", get(handlers::test_sse))
        .route("/health", get(handlers::health))
        .route("/api-docs/openapi.json", get(handlers::openapi_json))
        .fallback(not_found)
        .layer(from_fn_with_state(
            compression,
            tempo_compression::compress_response,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
