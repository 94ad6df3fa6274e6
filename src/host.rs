//! Host integration shim.
//!
//! Wraps the documentation site so every HTML page it serves carries the
//! widget bootstrap snippet. Pages are otherwise passed through untouched:
//! status, headers (minus `Content-Length`) and non-HTML responses are not
//! modified.

use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

const BODY_CLOSE: &str = "</body>";

/// Insert `snippet` before the last `</body>` of `html`.
///
/// The tag is matched case-insensitively. Documents without one get the
/// snippet appended.
#[must_use]
pub fn inject_widget(html: &str, snippet: &str) -> String {
    let mut out = String::with_capacity(html.len() + snippet.len());
    match html.to_ascii_lowercase().rfind(BODY_CLOSE) {
        Some(at) => {
            out.push_str(&html[..at]);
            out.push_str(snippet);
            out.push_str(&html[at..]);
        }
        None => {
            out.push_str(html);
            out.push_str(snippet);
        }
    }
    out
}

/// Middleware state: the rendered snippet and a buffering limit.
#[derive(Debug, Clone)]
pub struct HostShim {
    snippet: Arc<str>,
    body_limit: usize,
}

impl HostShim {
    #[must_use]
    pub fn new(snippet: impl Into<Arc<str>>, body_limit: usize) -> Self {
        Self {
            snippet: snippet.into(),
            body_limit,
        }
    }

    #[must_use]
    pub fn snippet(&self) -> &str {
        &self.snippet
    }
}

fn is_injectable(method: &Method, status: StatusCode, headers: &HeaderMap, body_limit: usize) -> bool {
    if method != Method::GET
        || status != StatusCode::OK
        || headers.contains_key(header::CONTENT_ENCODING)
    {
        return false;
    }
    let is_html = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with("text/html"));
    let too_large = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .is_some_and(|len| len > body_limit);
    is_html && !too_large
}

/// Inject the widget snippet into HTML responses.
///
/// Only `GET` pages are rewritten. A page whose body turns out larger than
/// the buffering limit is served unchanged.
pub async fn inject_widget_middleware(
    State(shim): State<HostShim>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let response = next.run(request).await;
    if !is_injectable(&method, response.status(), response.headers(), shim.body_limit) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(name: "host.inject.read_failed", error = %e, "Failed to buffer page body");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    if bytes.len() > shim.body_limit {
        tracing::debug!(
            name: "host.inject.skipped",
            size = bytes.len(),
            limit = shim.body_limit,
            "Page exceeds body limit, serving unchanged"
        );
        return Response::from_parts(parts, Body::from(bytes));
    }

    let Ok(html) = std::str::from_utf8(&bytes) else {
        tracing::debug!(name: "host.inject.skipped", "Page is not UTF-8, serving unchanged");
        return Response::from_parts(parts, Body::from(bytes));
    };

    let page = inject_widget(html, shim.snippet());
    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(page))
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use axum::{http::HeaderValue, response::Html};
    use tower::{Layer, ServiceExt, service_fn};

    use super::*;

    const PAGE: &str = "<html><body><p>A long chapter about ownership</p></body></html>";

    /// Serve `PAGE` through the shim. The inner page carries no `Content-Length`.
    async fn fetch(body_limit: usize, method: Method) -> (StatusCode, String) {
        let page = service_fn(|_request: Request| async {
            Ok::<_, Infallible>(Html(PAGE).into_response())
        });
        let shimmed = axum::middleware::from_fn_with_state(
            HostShim::new("[w]", body_limit),
            inject_widget_middleware,
        )
        .layer(page);

        let request = Request::builder()
            .method(method)
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let response = shimmed.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn test_injects_before_closing_body() {
        let page = "<html><body><p>Docs</p></body></html>";
        assert_eq!(
            inject_widget(page, "<div id=w></div>"),
            "<html><body><p>Docs</p><div id=w></div></body></html>"
        );
    }

    #[test]
    fn test_matches_last_body_tag_case_insensitively() {
        let page = "<BODY><pre>&lt;/body&gt; </body> in code</pre></BODY>";
        let out = inject_widget(page, "[w]");
        assert_eq!(out, "<BODY><pre>&lt;/body&gt; </body> in code</pre>[w]</BODY>");
    }

    #[test]
    fn test_appends_without_body_tag() {
        assert_eq!(inject_widget("<p>fragment</p>", "[w]"), "<p>fragment</p>[w]");
    }

    #[test]
    fn test_only_plain_ok_html_is_injectable() {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
        assert!(is_injectable(&Method::GET, StatusCode::OK, &headers, 1024));
        assert!(!is_injectable(&Method::HEAD, StatusCode::OK, &headers, 1024));
        assert!(!is_injectable(&Method::GET, StatusCode::NOT_MODIFIED, &headers, 1024));

        headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("4096"));
        assert!(!is_injectable(&Method::GET, StatusCode::OK, &headers, 1024));

        headers.remove(header::CONTENT_LENGTH);
        headers.insert(header::CONTENT_ENCODING, HeaderValue::from_static("gzip"));
        assert!(!is_injectable(&Method::GET, StatusCode::OK, &headers, 1024));

        let mut css = HeaderMap::new();
        css.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/css"));
        assert!(!is_injectable(&Method::GET, StatusCode::OK, &css, 1024));
    }

    #[tokio::test]
    async fn test_get_page_within_limit_is_injected() {
        let (status, body) = fetch(1024, Method::GET).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.ends_with("[w]</body></html>"));
    }

    #[tokio::test]
    async fn test_oversized_page_without_length_passes_through() {
        let (status, body) = fetch(16, Method::GET).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, PAGE);
    }

    #[tokio::test]
    async fn test_head_response_is_not_rewritten() {
        let (status, body) = fetch(1024, Method::HEAD).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, PAGE);
    }
}
