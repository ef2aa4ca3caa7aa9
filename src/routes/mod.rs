//! Route table.
//!
//! One route today: the landing page. Everything else is either a static
//! asset or client-side routing inside the bundled application.

pub mod home;

use axum::{routing::get, Router};

use crate::http::server::AppState;

/// Register route handlers on the router.
pub fn register(router: Router<AppState>) -> Router<AppState> {
    router.route("/", get(home::handler))
}
