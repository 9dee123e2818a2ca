//! Fixed service settings.
//!
//! The service takes no configuration file and no command line flags. Everything
//! it needs (listen address, route paths, body limits, deadlines, the default log
//! filter) is a compile-time constant defined here.

use const_format::formatcp;

// =============================================================================
// Listener
// =============================================================================

/// Interface the HTTP listener binds to (all interfaces)
pub const HTTP_HOST: &str = "0.0.0.0";

/// TCP port the HTTP listener binds to
pub const HTTP_PORT: u16 = 8080;

/// Socket address passed to the listener
pub const BIND_ADDR: &str = formatcp!("{}:{}", HTTP_HOST, HTTP_PORT);

// =============================================================================
// Routes
// =============================================================================

/// Echo endpoint: decodes a location and writes it back
pub const API_PATH: &str = "/api";

/// Liveness probe endpoint
pub const HEALTH_PATH: &str = "/healthz";

// =============================================================================
// Request limits and deadlines
// =============================================================================

/// Largest request body the echo endpoint will buffer (1 MiB)
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Deadline in seconds for reading the full echo request body
pub const BODY_READ_TIMEOUT_SECS: u64 = 10;

/// Upper bound in seconds for draining in-flight requests on shutdown
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

// =============================================================================
// Logging
// =============================================================================

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "geo_echo=info";

/// Fixed message returned for any echo body that fails to decode
pub const BAD_JSON_MESSAGE: &str = "bad json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_listens_on_all_interfaces() {
        assert_eq!(BIND_ADDR, "0.0.0.0:8080");
    }

    #[test]
    fn test_bind_addr_parses_as_socket_addr() {
        let addr: std::net::SocketAddr = BIND_ADDR.parse().unwrap();
        assert_eq!(addr.port(), HTTP_PORT);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_default_log_filter_targets_this_crate() {
        assert_eq!(DEFAULT_LOG_FILTER, "geo_echo=info");
    }
}
