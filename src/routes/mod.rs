//! HTTP routes.
//!
//! Two method-agnostic routes: `/api` echoes a decoded location, `/healthz`
//! answers liveness probes. The router is built explicitly and owns no global
//! state, so any number of instances can be served (or tested) in one process.
//!
//! Request logging runs as the outermost layer so every request, routed or
//! not, produces its request line.

pub mod echo;
pub mod health;

use axum::{middleware, routing::any, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{API_PATH, HEALTH_PATH};
use crate::middleware::request_log_layer;

/// Creates the Axum router with both routes and the request logging layer.
pub fn create_router() -> Router {
    let echo_routes = Router::new().route(API_PATH, any(echo::echo));

    // Health check - never cached, probes must see a fresh answer
    let health_routes = Router::new().route(HEALTH_PATH, any(health::health)).layer(
        SetResponseHeaderLayer::if_not_present(CACHE_CONTROL, HeaderValue::from_static("no-store")),
    );

    Router::new()
        .merge(echo_routes)
        .merge(health_routes)
        .layer(middleware::from_fn(request_log_layer))
}
