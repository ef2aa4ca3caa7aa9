//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::Path;

use tempfile::TempDir;

use coverage_server::config::{validate, ServerOptions};
use coverage_server::{HttpServer, Shutdown};

/// Create a document root with an application shell and a bundled asset,
/// mirroring the layout the front-end build produces.
pub fn doc_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("index.html"),
        "<!doctype html><title>coverage</title>",
    )
    .unwrap();
    std::fs::create_dir_all(dir.path().join("public/js")).unwrap();
    std::fs::write(dir.path().join("public/js/bundle.js"), "console.log(1);").unwrap();
    dir
}

/// Validate options against `base_dir`, bind an ephemeral port, and spawn
/// the server. The returned [`Shutdown`] must be kept alive for the
/// server's lifetime.
pub async fn spawn_server(options: ServerOptions, base_dir: &Path) -> (SocketAddr, Shutdown) {
    let config = validate(&options, base_dir).unwrap();
    let server = HttpServer::new(config);
    let listener = server.bind().await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}
