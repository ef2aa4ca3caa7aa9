//! Request middleware.
//!
//! Runs before route dispatch for every request: cookie parsing, then
//! per-request locals attachment.

pub mod cookies;
pub mod locals;

pub use cookies::Cookies;
pub use locals::Locals;
