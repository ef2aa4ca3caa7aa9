//! Structured logging initialization.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber at the validated log level.
///
/// `RUST_LOG` takes precedence when set, so operators can raise verbosity
/// without touching the options document. Level `OFF` silences the crate.
pub fn init(level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("coverage_server={level},tower_http=warn")));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
