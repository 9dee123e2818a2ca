//! Request-level errors and their JSON rendering.
//!
//! Every failure branch of a handler ends up here. Each variant maps to a status
//! code and a fixed client-facing message; the underlying cause is logged but
//! never echoed back to the caller.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::config::BAD_JSON_MESSAGE;

/// JSON error payload: `{"message": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The payload sent for any echo body that cannot be decoded.
    pub fn bad_json() -> Self {
        Self::new(BAD_JSON_MESSAGE)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("malformed input: {0}")]
    MalformedInput(#[source] serde_json::Error),

    #[error("error reading the body: {0}")]
    TransportRead(#[source] axum::Error),

    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("timed out reading the request body")]
    ReadTimeout,

    #[error("failed to encode response: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedInput(_) | ApiError::TransportRead(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::ReadTimeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing payload. Deliberately fixed per variant.
    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::MalformedInput(_) | ApiError::TransportRead(_) => ErrorBody::bad_json(),
            ApiError::PayloadTooLarge { .. } => ErrorBody::new("payload too large"),
            ApiError::ReadTimeout => ErrorBody::new("request timeout"),
            ApiError::Serialization(_) => ErrorBody::new("internal error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Serialization(_) => tracing::error!(error = %self, "Internal error"),
            ApiError::MalformedInput(_) => tracing::warn!(error = %self, "Decoding error"),
            _ => tracing::warn!(error = %self, "Rejected request body"),
        }

        json_response(status, &self.body())
    }
}

/// Builds a JSON response with the given status.
///
/// If the payload itself cannot be encoded the result is a 500 with a static
/// JSON error body, so callers never see a non-JSON error.
pub fn json_response<T: Serialize>(status: StatusCode, payload: &T) -> Response {
    match serde_json::to_vec(payload) {
        Ok(bytes) => json_bytes(status, bytes),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode response payload");
            json_bytes(
                StatusCode::INTERNAL_SERVER_ERROR,
                br#"{"message":"internal error"}"#.to_vec(),
            )
        }
    }
}

/// Wraps already-encoded JSON in a response with `Content-Type: application/json`.
pub fn json_bytes(status: StatusCode, bytes: Vec<u8>) -> Response {
    (
        status,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        bytes,
    )
        .into_response()
}
