//! HTTP server setup.
//!
//! # Responsibilities
//! - Build the axum router: security headers, cookie parsing, per-request
//!   locals, the route table, and one static-file service per mount
//! - Bind the configured address and report readiness or failure exactly once
//! - Serve with graceful shutdown, deferring final cleanup by one tick

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{extract::Request, middleware, Router, ServiceExt};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::Layer;
use tower_http::{
    normalize_path::NormalizePathLayer, services::ServeDir, trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::http::middleware::{cookies, locals};
use crate::routes;
use crate::security;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Validated server configuration; `config.root` is the directory route
    /// handlers resolve the application shell against.
    pub config: Arc<ServerConfig>,
}

/// HTTP server for the coverage viewer.
pub struct HttpServer {
    router: Router,
    config: Arc<ServerConfig>,
}

impl HttpServer {
    /// Build a server from a validated configuration.
    pub fn new(config: ServerConfig) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            config: config.clone(),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the axum router with all middleware layers and static mounts.
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        let mut router = routes::register(Router::new());

        // A mount at "/" becomes the router fallback so the route table keeps
        // precedence for the landing page.
        for mount in &config.mounts {
            let service = static_service(&mount.dirs);
            if mount.prefix == "/" {
                router = router.fallback_service(service);
            } else {
                router = router.nest_service(mount.prefix.trim_end_matches('/'), service);
            }
        }

        router
            .layer(middleware::from_fn_with_state(
                state.clone(),
                locals::attach_locals,
            ))
            .layer(middleware::from_fn(cookies::parse_cookies))
            .layer(security::headers::layer())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Bind the configured address.
    ///
    /// Readiness is logged on success; bind failures are logged and returned.
    /// Either way the outcome is reported exactly once.
    pub async fn bind(&self) -> io::Result<TcpListener> {
        let addr = self.config.socket_addr();
        match TcpListener::bind(addr).await {
            Ok(listener) => {
                let local = listener.local_addr()?;
                tracing::info!(
                    address = %local,
                    hostname = %self.config.hostname,
                    "HTTP server initialized, listening for requests"
                );
                Ok(listener)
            }
            Err(error) => {
                tracing::error!(address = %addr, %error, "failed to bind HTTP server");
                Err(error)
            }
        }
    }

    /// Run the server until the shutdown signal fires.
    ///
    /// Trailing-slash trimming wraps the router so the rewrite happens before
    /// route matching. After the serve loop drains, cleanup is deferred one
    /// scheduler tick so in-flight tasks settle before completion is
    /// reported.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> io::Result<()> {
        let shutdown = async move {
            let _ = shutdown.recv().await;
        };

        if self.config.ignore_trailing_slash {
            let app = NormalizePathLayer::trim_trailing_slash().layer(self.router);
            axum::serve(
                listener,
                ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
            )
            .with_graceful_shutdown(shutdown)
            .await?;
        } else {
            axum::serve(
                listener,
                self.router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown)
            .await?;
        }

        tokio::task::yield_now().await;
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Wildcard file service over one or more directories.
///
/// Multiple directories share the mount prefix: each is tried in declaration
/// order and the first hit wins.
fn static_service(dirs: &[PathBuf]) -> Router {
    let mut rev = dirs.iter().rev();
    // Validation guarantees at least one directory per mount.
    let innermost = rev.next().expect("static mount with no directories");
    let mut service = Router::new().fallback_service(ServeDir::new(innermost));
    for dir in rev {
        service = Router::new().fallback_service(ServeDir::new(dir).fallback(service));
    }
    service
}
