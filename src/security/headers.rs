//! Security response headers.
//!
//! # Responsibilities
//! - Emit `referrer-policy: origin` on every response
//! - Keep responses free of fingerprinting and policy headers the viewer
//!   does not use: no `x-powered-by`, no content-security-policy, no
//!   cross-origin-embedder-policy

use axum::http::header::{HeaderValue, REFERRER_POLICY};
use tower_http::set_header::SetResponseHeaderLayer;

/// Layer applying the baseline security headers to every response.
///
/// Content-security-policy and cross-origin-embedder-policy are never
/// emitted, and nothing in the stack adds an `x-powered-by` banner.
pub fn layer() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(REFERRER_POLICY, HeaderValue::from_static("origin"))
}
