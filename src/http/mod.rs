//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, bind, graceful shutdown)
//!     → middleware (cookies, per-request locals)
//!     → route table or static-file service
//!     → response (security headers applied on the way out)
//! ```

pub mod middleware;
pub mod server;

pub use server::{AppState, HttpServer};
