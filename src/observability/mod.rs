//! Observability subsystem.
//!
//! Structured logging only; the request-level log events come from the
//! tracing layer wired into the router and from individual handlers.

pub mod logging;
