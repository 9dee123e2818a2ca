//! HTTP server bootstrap.
//!
//! Binds the listener, serves the router with peer addresses attached (the
//! request log line needs them), and drains in-flight requests on SIGTERM/SIGINT.

mod server;
mod shutdown;

pub use server::{serve, start_server, ServerError};
