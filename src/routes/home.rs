//! Landing page handler.

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::http::server::AppState;

/// Serve the HTML shell that bootstraps the coverage viewer.
///
/// The trailing slash is appended for logging only; no redirect is issued.
/// All application routing past this point happens client-side.
pub async fn handler(State(state): State<AppState>, uri: Uri) -> Response {
    let mut url = uri.path().to_string();
    if !url.ends_with('/') {
        url.push('/');
    }
    tracing::info!(url = %url, "resolved URL");

    let shell = state.config.root.join("index.html");
    match tokio::fs::read(&shell).await {
        Ok(body) => ([(header::CONTENT_TYPE, "text/html")], body).into_response(),
        Err(error) => {
            tracing::error!(
                path = %shell.display(),
                %error,
                "unable to load application shell"
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
