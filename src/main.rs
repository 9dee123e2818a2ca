//! geo-echo entry point.
//!
//! Initializes tracing, builds the router, and serves it on port 8080 until
//! SIGTERM/SIGINT. Failing to bind the port is fatal and exits with status 1.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geo_echo::config::{BIND_ADDR, DEFAULT_LOG_FILTER};
use geo_echo::create_router;
use geo_echo::http::start_server;

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG overrides the default filter
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = create_router();

    match start_server(app, BIND_ADDR).await {
        Ok(()) => {
            tracing::info!("Server stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal server error");
            ExitCode::FAILURE
        }
    }
}
