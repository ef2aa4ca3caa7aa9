//! Cookie parsing.
//!
//! Parses the `Cookie` request header into a read-only map attached to the
//! request. No route handler consumes cookies today; the map exists so
//! client-side state is available to middleware and future handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request},
    middleware::Next,
    response::Response,
};

/// Read-only view of the cookies sent with a request.
#[derive(Clone, Debug, Default)]
pub struct Cookies {
    entries: Arc<HashMap<String, String>>,
}

impl Cookies {
    /// Look up a cookie by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Number of cookies sent with the request.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the request carried no cookies.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse the `Cookie` header and attach the result to the request.
pub async fn parse_cookies(mut req: Request<Body>, next: Next) -> Response {
    let entries = req
        .headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(parse_header)
        .unwrap_or_default();

    req.extensions_mut().insert(Cookies {
        entries: Arc::new(entries),
    });
    next.run(req).await
}

/// Split a `Cookie` header into name/value pairs.
///
/// Malformed segments (no `=`) are skipped rather than rejected.
fn parse_header(raw: &str) -> HashMap<String, String> {
    raw.split(';')
        .filter_map(|pair| pair.split_once('='))
        .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::{middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    use super::*;

    #[test]
    fn test_parse_header_pairs() {
        let cookies = parse_header("session=abc123; theme=dark");
        assert_eq!(cookies.get("session").map(String::as_str), Some("abc123"));
        assert_eq!(cookies.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn test_parse_header_skips_malformed_segments() {
        let cookies = parse_header("valid=1; malformed; =");
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies.get("valid").map(String::as_str), Some("1"));
        assert_eq!(cookies.get("").map(String::as_str), Some(""));
    }

    #[test]
    fn test_parse_header_value_keeps_inner_equals() {
        let cookies = parse_header("token=a=b=c");
        assert_eq!(cookies.get("token").map(String::as_str), Some("a=b=c"));
    }

    #[tokio::test]
    async fn test_cookies_attached_to_request() {
        async fn probe(Extension(cookies): Extension<Cookies>) -> String {
            cookies.get("session").unwrap_or("none").to_string()
        }

        let app = Router::new()
            .route("/", get(probe))
            .layer(middleware::from_fn(parse_cookies));

        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header("cookie", "session=abc123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"abc123");

        // No header at all still yields an (empty) map.
        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"none");
    }
}
