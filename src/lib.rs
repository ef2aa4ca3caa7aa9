//! HTTP server for serving test code coverage reports.
//!
//! A thin composition over axum and tower-http: validated configuration,
//! one landing-page route, static-file mounts, and baseline security
//! headers. The bundled single-page viewer does its own routing
//! client-side.

pub mod bundler;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routes;
pub mod security;

pub use config::{validate, ConfigError, ServerConfig, ServerOptions};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
