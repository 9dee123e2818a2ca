//! Graceful shutdown and signal handling.
//!
//! SIGTERM/SIGINT stop the listener and let in-flight requests drain.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;

/// Resolves once Ctrl+C or SIGTERM is received.
///
/// If a handler cannot be installed that signal is logged and ignored; the
/// other one still triggers shutdown.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

/// Resolves `grace` after `triggered` is notified. Never resolves otherwise.
pub async fn grace_period_elapsed(triggered: Arc<Notify>, grace: Duration) {
    triggered.notified().await;
    tracing::info!(
        grace_secs = grace.as_secs(),
        "Graceful shutdown initiated, waiting for connections to close"
    );
    tokio::time::sleep(grace).await;
}
