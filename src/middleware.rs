//! Request logging middleware.
//!
//! Emits one line per request (remote address, method, URI) before handing the
//! request on unchanged. Each request also gets a UUID v4 and a tracing span, so
//! the handler's own log lines can be correlated with the request line.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Extension type for accessing the request ID in handlers if needed.
#[derive(Clone, Debug)]
pub struct RequestId(pub Uuid);

/// Peer address as recorded in the log line, or `-` when the server was not
/// started with connect info (e.g. when a router is driven directly in tests).
pub fn remote_addr(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Middleware that logs the request line and wraps the rest of the request in a span.
///
/// This should be the outermost layer so the request line is written before any
/// routing or handler work happens.
pub async fn request_log_layer(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let remote = remote_addr(&request);
    let method = request.method().clone();
    let uri = request.uri().clone();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        duration_ms = tracing::field::Empty,
    );

    tracing::info!(
        parent: &span,
        remote_addr = %remote,
        method = %method,
        uri = %uri,
        "{} {} {}",
        remote,
        method,
        uri
    );

    request.extensions_mut().insert(RequestId(request_id));
    let start = Instant::now();

    async move {
        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::debug!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await
}
