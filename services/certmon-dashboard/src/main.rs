//! Certmon Dashboard CLI
//!
//! Command-line interface for the certificate monitor web dashboard.

use std::path::PathBuf;

use clap::Parser;
use certmon_dashboard::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "certmon-dashboard")]
#[command(about = "Web dashboard for a TLS certificate monitor")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Backend base URL (overrides config file)
    #[arg(long)]
    backend_url: Option<String>,

    /// Dashboard port (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, backend_url={:?}, port={:?}, log_level={:?}",
        args.config,
        args.backend_url,
        args.port,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(backend_url) = args.backend_url {
        config.backend.url = backend_url;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;

    tracing::info!(
        "Starting certmon dashboard for backend {}",
        config.backend.url
    );

    certmon_dashboard::run(config).await?;

    Ok(())
}
