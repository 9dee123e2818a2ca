//! HTTP server startup logic.

use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::SHUTDOWN_GRACE_SECS;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Bind `addr` and serve `app` until SIGTERM/SIGINT.
///
/// This function blocks until the server shuts down. A bind failure is returned
/// as `ServerError::Bind` without anything having been served.
pub async fn start_server(app: Router, addr: &str) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    let port = listener.local_addr()?.port();
    tracing::info!(%addr, "starting service on http://localhost:{}", port);

    serve(listener, app, shutdown::shutdown_signal()).await
}

/// Serve `app` on an already bound listener until `signal` resolves.
///
/// Once the signal fires no new connections are accepted; in-flight requests get
/// up to `SHUTDOWN_GRACE_SECS` to finish before the server returns anyway.
pub async fn serve<F>(listener: TcpListener, app: Router, signal: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let triggered = Arc::new(Notify::new());
    let notify = triggered.clone();

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        signal.await;
        notify.notify_one();
    })
    .into_future();

    tokio::select! {
        result = server => result.map_err(ServerError::Serve),
        _ = shutdown::grace_period_elapsed(triggered, Duration::from_secs(SHUTDOWN_GRACE_SECS)) => {
            tracing::warn!(
                grace_secs = SHUTDOWN_GRACE_SECS,
                "Connections still open after grace period, shutting down anyway"
            );
            Ok(())
        }
    }
}
