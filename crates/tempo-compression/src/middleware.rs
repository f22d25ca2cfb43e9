//! Compression middleware implementation

use crate::compressor::Compressor;
use crate::config::CompressionConfig;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use bytes::Bytes;
use http::header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE, VARY};
use http::HeaderValue;
use http_body_util::BodyExt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Apply the compression policy to a response.
///
/// The content type is inspected before the body: streaming and
/// non-compressible responses pass through without ever being
/// buffered. Everything else is collected, run through the size and
/// capability checks, and either re-emitted with an accurate
/// `Content-Length` or gzip-encoded with chunked framing.
pub async fn compress_response(
    State(config): State<Arc<CompressionConfig>>,
    req: Request,
    next: Next,
) -> Response {
    let client_accepts_gzip = Compressor::accepts_gzip(
        req.headers()
            .get(ACCEPT_ENCODING)
            .and_then(|v| v.to_str().ok()),
    );

    let response = next.run(req).await;

    if !config.enabled || !response.status().is_success() {
        return response;
    }

    // Don't touch bodies that are already encoded
    if response.headers().contains_key(CONTENT_ENCODING) {
        return response;
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_owned();

    // Streaming and binary bodies pass through unbuffered
    if CompressionConfig::is_streaming_media_type(&content_type)
        || !CompressionConfig::is_compressible_content_type(&content_type)
    {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let body_bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            warn!(error = %e, "Failed to read response body");
            let mut response = Response::new(Body::empty());
            *response.status_mut() = http::StatusCode::INTERNAL_SERVER_ERROR;
            return response;
        }
    };

    if !config.should_compress(body_bytes.len(), &content_type, client_accepts_gzip) {
        return with_exact_length(parts, body_bytes);
    }

    match Compressor::gzip(&body_bytes, config.level) {
        Ok(compressed) => {
            debug!(
                original = body_bytes.len(),
                compressed = compressed.len(),
                "Response compressed"
            );
            parts
                .headers
                .insert(CONTENT_ENCODING, HeaderValue::from_static("gzip"));
            parts
                .headers
                .append(VARY, HeaderValue::from_static("accept-encoding"));
            // The compressed length is never asserted on the wire; an
            // unknown-size body makes hyper fall back to chunked framing.
            parts.headers.remove(CONTENT_LENGTH);
            let body = Body::from_stream(futures::stream::once(async move {
                Ok::<_, std::convert::Infallible>(compressed)
            }));
            Response::from_parts(parts, body)
        }
        Err(e) => {
            // Encoding failures never surface as request failures
            warn!(error = %e, "Gzip encoding failed, returning uncompressed body");
            with_exact_length(parts, body_bytes)
        }
    }
}

fn with_exact_length(mut parts: http::response::Parts, body: Bytes) -> Response {
    parts
        .headers
        .insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
    Response::from_parts(parts, Body::from(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::middleware::from_fn_with_state;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::Router;
    use http::StatusCode;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let config = Arc::new(CompressionConfig::default());
        Router::new()
            .route(
                "/large",
                get(|| async {
                    ([(CONTENT_TYPE, "application/json")], "x".repeat(2000)).into_response()
                }),
            )
            .route(
                "/small",
                get(|| async {
                    ([(CONTENT_TYPE, "application/json")], r#"{"msg":"small"}"#).into_response()
                }),
            )
            .route(
                "/stream",
                get(|| async {
                    ([(CONTENT_TYPE, "text/event-stream")], "data: hi\n\n").into_response()
                }),
            )
            .route(
                "/binary",
                get(|| async {
                    (
                        [(CONTENT_TYPE, "application/octet-stream")],
                        vec![0u8; 4096],
                    )
                        .into_response()
                }),
            )
            .layer(from_fn_with_state(config, compress_response))
    }

    async fn body_bytes(response: Response) -> Bytes {
        response.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_large_body_compressed_when_gzip_accepted() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/large")
                    .header(ACCEPT_ENCODING, "gzip")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_ENCODING).unwrap(),
            "gzip"
        );
        let vary = response.headers().get(VARY).unwrap().to_str().unwrap();
        assert!(vary.to_lowercase().contains("accept-encoding"));
        assert!(response.headers().get(CONTENT_LENGTH).is_none());

        let body = body_bytes(response).await;
        assert_eq!(&body[..2], &[0x1f, 0x8b]);
    }

    #[tokio::test]
    async fn test_large_body_untouched_without_accept_encoding() {
        let response = test_app()
            .oneshot(Request::builder().uri("/large").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().get(CONTENT_ENCODING).is_none());
        assert_eq!(
            response.headers().get(CONTENT_LENGTH).unwrap(),
            "2000"
        );
        let body = body_bytes(response).await;
        assert_ne!(&body[..2], &[0x1f, 0x8b]);
        assert_eq!(body.len(), 2000);
    }

    #[tokio::test]
    async fn test_small_body_untouched_with_gzip() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/small")
                    .header(ACCEPT_ENCODING, "gzip")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get(CONTENT_ENCODING).is_none());
        assert!(response.headers().get(CONTENT_LENGTH).is_some());
        let body = body_bytes(response).await;
        assert_eq!(&body[..], br#"{"msg":"small"}"#);
    }

    #[tokio::test]
    async fn test_event_stream_untouched_with_gzip() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/stream")
                    .header(ACCEPT_ENCODING, "gzip")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get(CONTENT_ENCODING).is_none());
        let body = body_bytes(response).await;
        assert_eq!(&body[..], b"data: hi\n\n");
    }

    #[tokio::test]
    async fn test_binary_body_untouched_with_gzip() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/binary")
                    .header(ACCEPT_ENCODING, "gzip")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.headers().get(CONTENT_ENCODING).is_none());
        let body = body_bytes(response).await;
        assert_eq!(body.len(), 4096);
    }
}
