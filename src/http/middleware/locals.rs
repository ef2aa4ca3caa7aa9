//! Per-request locals.
//!
//! Every request gets a fresh [`Locals`] scratch map before route dispatch,
//! for passing intermediate values between middleware and handlers. The map
//! is never shared across requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::http::server::AppState;

/// Request-scoped scratch map.
///
/// Cloning yields a handle to the same underlying map, so middleware and
/// handlers within one request observe each other's entries.
#[derive(Clone, Debug, Default)]
pub struct Locals {
    entries: Arc<Mutex<HashMap<String, Value>>>,
}

impl Locals {
    /// Store a value under `key`, replacing any previous entry.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        self.entries
            .lock()
            .expect("locals mutex poisoned")
            .insert(key.into(), value);
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries
            .lock()
            .expect("locals mutex poisoned")
            .get(key)
            .cloned()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("locals mutex poisoned").len()
    }

    /// Whether no entries have been stored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Attach an empty [`Locals`] map to the request before route dispatch.
///
/// Also logs the incoming request with its client address; `X-Forwarded-For`
/// is consulted only when the server is configured to trust a fronting
/// proxy, and only when it carries a parseable IP.
pub async fn attach_locals(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let client = client_addr(&req, state.config.trust_proxy);
    tracing::debug!(
        client = %client,
        method = %req.method(),
        path = %req.uri().path(),
        "request received"
    );

    req.extensions_mut().insert(Locals::default());
    next.run(req).await
}

/// Resolve the client address for logging.
fn client_addr(req: &Request<Body>, trust_proxy: bool) -> String {
    if trust_proxy {
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .and_then(|value| value.trim().parse::<std::net::IpAddr>().ok());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(peer)| peer.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::{middleware, routing::get, Extension, Router};
    use tower::ServiceExt;

    use super::*;
    use crate::config::{validate, ServerOptions};

    fn test_state(trust_proxy: bool) -> AppState {
        let options = ServerOptions {
            trust_proxy: Some(trust_proxy),
            ..Default::default()
        };
        let config = validate(&options, Path::new("/tmp")).unwrap();
        AppState {
            config: Arc::new(config),
        }
    }

    async fn probe(Extension(locals): Extension<Locals>) -> String {
        // A shared map would already hold the previous request's entry.
        assert!(locals.is_empty());
        locals.insert("seen", serde_json::json!(true));
        locals.len().to_string()
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/", get(probe))
            .layer(middleware::from_fn_with_state(state.clone(), attach_locals))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_each_request_gets_fresh_locals() {
        let app = app(test_state(false));

        for _ in 0..2 {
            let res = app
                .clone()
                .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(res.status(), 200);
            let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
            assert_eq!(&body[..], b"1");
        }
    }

    #[test]
    fn test_forwarded_header_honored_only_when_trusted() {
        let req = Request::builder()
            .uri("/")
            .header("x-forwarded-for", "203.0.113.7, 10.0.0.1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(client_addr(&req, true), "203.0.113.7");
        assert_eq!(client_addr(&req, false), "unknown");
    }

    #[test]
    fn test_unparseable_forwarded_header_falls_back_to_peer() {
        let mut req = Request::builder()
            .uri("/")
            .header("x-forwarded-for", "garbage")
            .body(Body::empty())
            .unwrap();
        req.extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("192.0.2.1:4000".parse().unwrap()));

        assert_eq!(client_addr(&req, true), "192.0.2.1:4000");
    }

    #[test]
    fn test_locals_round_trip() {
        let locals = Locals::default();
        assert!(locals.get("missing").is_none());
        locals.insert("key", serde_json::json!(42));
        assert_eq!(locals.get("key"), Some(serde_json::json!(42)));
        assert_eq!(locals.len(), 1);
    }
}
