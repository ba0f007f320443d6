//! Certmon Dashboard - web front-end for a TLS certificate monitor
//!
//! Reads certificates, monitored states and their chains from the backend,
//! renders them as tabbed tables and proxies ad-hoc checks.

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod io;
pub mod loader;

pub use config::{load_config, Config};
pub use error::{DashboardError, Result};

use std::net::SocketAddr;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::backend::BackendClient;
use crate::io::ReqwestHttpClient;

/// Run the dashboard until Ctrl-C is received
pub async fn run(config: Config) -> Result<()> {
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::new());
    let backend = BackendClient::new(&config.backend.url, http);
    let cancel = CancellationToken::new();

    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
        cancel_for_signal.cancel();
    });

    serve(backend, config.server.port, cancel).await
}

/// Serve the dashboard on `port` until `cancel` fires
pub async fn serve(backend: BackendClient, port: u16, cancel: CancellationToken) -> Result<()> {
    let router = dashboard::build_router(backend);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind dashboard to port {}: {}", port, e);
        DashboardError::Io(e)
    })?;
    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await?;

    tracing::info!("Dashboard stopped");
    Ok(())
}
