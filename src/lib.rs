//! geo-echo: a small HTTP service that validates and echoes geolocation payloads.
//!
//! `POST /api` decodes a `{"lat":..,"lon":..}` body and writes it back with
//! canonical keys; `/healthz` answers liveness probes. Every request is logged.

pub mod config;
pub mod error;
pub mod http;
pub mod location;
pub mod middleware;
pub mod routes;

pub use error::{ApiError, ErrorBody};
pub use location::Location;
pub use routes::create_router;
