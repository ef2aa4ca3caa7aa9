use std::path::PathBuf;

use clap::Parser;

use coverage_server::bundler::BundlerConfig;
use coverage_server::config::{self, LoggerSetting, ServerOptions};
use coverage_server::{lifecycle, observability, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "coverage-server")]
#[command(about = "HTTP server for a test-coverage report viewer", long_about = None)]
struct Cli {
    /// Path to a TOML options file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address override.
    #[arg(long)]
    address: Option<String>,

    /// Port override; 0 binds an ephemeral port.
    #[arg(long)]
    port: Option<u16>,

    /// Root directory override.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Print the front-end bundler configuration as JSON and exit.
    #[arg(long)]
    emit_bundler_config: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.emit_bundler_config {
        println!("{}", BundlerConfig::default().to_json());
        return Ok(());
    }

    let mut options = match &cli.config {
        Some(path) => config::load_options(path)?,
        None => ServerOptions::default(),
    };
    if let Some(address) = cli.address {
        options.address = Some(address);
    }
    if let Some(port) = cli.port {
        options.port = Some(port);
    }
    if let Some(root) = cli.root {
        options.root = Some(root);
    }
    if let Some(level) = cli.log_level {
        options.logger = Some(LoggerSetting::Level(level));
    }

    let base_dir = std::env::current_dir()?;
    let config = config::validate(&options, &base_dir)?;

    observability::logging::init(config.logger);

    tracing::info!(
        address = %config.address,
        port = config.port,
        root = %config.root.display(),
        mounts = config.mounts.len(),
        "configuration loaded"
    );

    let server = HttpServer::new(config);
    let listener = server.bind().await?;

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        lifecycle::signals::shutdown_on_signal(&shutdown).await;
    });

    server.run(listener, rx).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
