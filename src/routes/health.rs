//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe that returns 200 OK with `{"alive":true}` whenever
//! the process can answer HTTP. It ignores the method, query and body.

use axum::Json;
use serde::{Deserialize, Serialize};

/// Liveness payload.
///
/// Always `alive: true` today. Checks against downstream dependencies would be
/// folded in here, and must stay fast (or be bounded by a timeout) since probes
/// call this on a tight interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub alive: bool,
}

impl HealthStatus {
    pub fn alive() -> Self {
        Self { alive: true }
    }
}

/// Health check handler.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::alive())
}
