//! Paper catalog server.
//!
//! ```bash
//! PAPER_CATALOG_ADMIN_TOKEN=secret RUST_LOG=info cargo run -p paper-catalog
//! ```

use anyhow::Context;
use catalog_framework::tracing::setup_tracing;
use paper_catalog::auth::AdminDirectory;
use paper_catalog::config::Config;
use paper_catalog::http::{router, AppState};
use paper_catalog::lifecycle::CatalogSystem;
use paper_catalog::storage::UploadStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = Config::load()?;
    let uploads = UploadStore::new(&config.upload_dir, config.max_upload_bytes);
    uploads.init().await?;

    let system = CatalogSystem::new(uploads.clone(), config.actor_buffer);
    let admins = Arc::new(AdminDirectory::new(&config.admins));
    info!(admins = admins.len(), "Administrators loaded");

    let app = router(
        AppState {
            catalog: system.catalog.clone(),
            admins,
        },
        &uploads,
    );

    let address = config.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    system.shutdown().await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
