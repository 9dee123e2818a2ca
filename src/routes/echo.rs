//! Echo endpoint: decodes a location from the request body and writes it back.
//!
//! The body is buffered in full (bounded by `MAX_BODY_BYTES` and
//! `BODY_READ_TIMEOUT_SECS`), decoded as a `Location`, and re-encoded with the
//! canonical lowercase keys. Any decode failure yields `400 {"message":"bad json"}`.

use std::time::Duration;

use axum::{
    body::{to_bytes, Body, Bytes},
    http::StatusCode,
    response::Response,
};
use http_body_util::LengthLimitError;
use tokio::time::timeout;

use crate::config::{BODY_READ_TIMEOUT_SECS, MAX_BODY_BYTES};
use crate::error::{json_bytes, ApiError};
use crate::location::Location;

/// Echo handler. Accepts any method.
pub async fn echo(body: Body) -> Result<Response, ApiError> {
    let bytes = read_body(body, MAX_BODY_BYTES, Duration::from_secs(BODY_READ_TIMEOUT_SECS)).await?;

    let location = Location::from_slice(&bytes).map_err(ApiError::MalformedInput)?;

    // Encode up front so an encoding failure becomes a JSON 500 rather than a partial body.
    let encoded = location.to_vec().map_err(ApiError::Serialization)?;
    tracing::info!(lat = location.latitude, lon = location.longitude, "Received: {}", location);

    Ok(json_bytes(StatusCode::OK, encoded))
}

/// Reads the whole body, distinguishing oversize bodies and stalled reads from
/// transport failures.
pub async fn read_body(body: Body, limit: usize, deadline: Duration) -> Result<Bytes, ApiError> {
    match timeout(deadline, to_bytes(body, limit)).await {
        Ok(Ok(bytes)) => Ok(bytes),
        Ok(Err(e)) => {
            if is_length_limit(&e) {
                Err(ApiError::PayloadTooLarge { limit })
            } else {
                Err(ApiError::TransportRead(e))
            }
        }
        Err(_) => Err(ApiError::ReadTimeout),
    }
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source = Some(err as &(dyn std::error::Error + 'static));
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}
