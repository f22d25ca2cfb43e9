//! Error responses and the custom HTML error page

use askama::Template;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Json, Response};
use serde_json::json;

/// Wrapper mapping core errors onto HTTP responses with a JSON body.
#[derive(Debug)]
pub struct ApiError(pub tempo_core::Error);

impl<E> From<E> for ApiError
where
    E: Into<tempo_core::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.to_status_code();
        tracing::error!(error = %self.0, "request failed");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Helper struct for rendering Askama templates
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {err}"),
            )
                .into_response(),
        }
    }
}

/// Custom error page template
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPageTemplate {
    /// HTTP status code shown on the page
    pub status: u16,
    /// Human-readable explanation
    pub message: String,
    /// Path that was requested
    pub path: String,
}

/// Fallback for unmatched routes: an HTML page when the client
/// prefers HTML, a JSON error body otherwise.
pub async fn not_found(uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path().to_owned();

    if wants_html(&headers) {
        let page = ErrorPageTemplate {
            status: StatusCode::NOT_FOUND.as_u16(),
            message: "The page you are looking for does not exist.".to_owned(),
            path,
        };
        (StatusCode::NOT_FOUND, HtmlTemplate(page)).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Not Found", "path": path })),
        )
            .into_response()
    }
}

fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_page_renders() {
        let page = ErrorPageTemplate {
            status: 404,
            message: "The page you are looking for does not exist.".to_owned(),
            path: "/no-route".to_owned(),
        };
        let html = page.render().unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("404"));
        assert!(html.contains("/no-route"));
        assert!(html.contains("Back to home"));
    }

    #[test]
    fn test_wants_html() {
        let mut headers = HeaderMap::new();
        assert!(!wants_html(&headers));

        headers.insert(header::ACCEPT, "application/json".parse().unwrap());
        assert!(!wants_html(&headers));

        headers.insert(header::ACCEPT, "text/html,application/xhtml+xml".parse().unwrap());
        assert!(wants_html(&headers));
    }
}
