//! powcache - Proof-of-work block hash cache daemon
//!
//! Serves the diagnostics API over a block hash cache that is restored from
//! and periodically saved to a flat-file snapshot.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use powcache::api::{create_router, AppState};
use powcache::persist::FlatFileStore;
use powcache::tasks::{maintenance_channel, spawn_maintenance_task};
use powcache::{AlgorithmSet, CacheOwner, Config};

/// Main entry point for the powcache daemon.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the block hash cache and restore its snapshot
/// 4. Start the maintenance task
/// 5. Serve the diagnostics API on the configured port
/// 6. On SIGINT/SIGTERM, stop maintenance and write a final snapshot
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "powcache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting powcache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, snapshot={}",
        config.server_port,
        config.snapshot_path.display()
    );

    let snapshots = Arc::new(FlatFileStore::new(config.snapshot_path.clone()));
    let owner = CacheOwner::from_env(AlgorithmSet::development()).with_snapshot_store(snapshots);
    let cache = owner.instance();

    // A snapshot we could not read but that may still be valid (another
    // version, section or an I/O error) is never overwritten.
    let restore_target = cache.clone();
    let snapshot_writable =
        match tokio::task::spawn_blocking(move || restore_target.load_snapshot()).await? {
            Ok(loaded) => {
                info!("{} ({} restored)", cache.describe(), loaded);
                true
            }
            Err(e) if e.is_corruption() => {
                warn!("Discarding corrupt block cache snapshot: {}", e);
                true
            }
            Err(e) => {
                warn!(
                    "Keeping unreadable block cache snapshot, saving disabled: {}",
                    e
                );
                false
            }
        };

    let state = AppState::new(cache.clone());
    let (state, maintenance) = if snapshot_writable {
        let (notifier, rx) = maintenance_channel();
        let maintenance = spawn_maintenance_task(cache.clone(), rx);
        info!("Maintenance task started");
        (state.with_notifier(notifier), Some(maintenance))
    } else {
        (state, None)
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // The router (and its notifier) is gone, so the task drains and exits.
    if let Some(maintenance) = maintenance {
        if let Err(e) = maintenance.await {
            warn!("Maintenance task ended abnormally: {}", e);
        }
    }

    if snapshot_writable {
        let final_cache = cache.clone();
        match tokio::task::spawn_blocking(move || final_cache.persist()).await? {
            Ok(()) => info!("Final snapshot written"),
            Err(e) => warn!("Final snapshot failed: {}", e),
        }
    }

    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
