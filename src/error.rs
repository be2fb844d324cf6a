//! Route-planning error types

use thiserror::Error;

/// Maximum number of characters of a response body carried in a transport error
const BODY_SNIPPET_CHARS: usize = 200;

/// Errors that can occur while resolving locations or planning routes
#[derive(Debug, Error)]
pub enum RoutingError {
    /// The location query was empty after trimming
    #[error("Location query must not be empty")]
    EmptyQuery,

    /// Geocoding returned no usable candidates for the query
    #[error("No geocoding results for '{query}'")]
    NoResults {
        /// The query as entered by the user
        query: String,
    },

    /// A route was requested with fewer than two waypoints
    #[error("A route needs at least 2 waypoints, got {count}")]
    InsufficientWaypoints {
        /// Number of waypoints currently in the set
        count: usize,
    },

    /// A waypoint index was outside the set
    #[error("Waypoint index {index} is out of range (length {len})")]
    IndexOutOfRange {
        /// The rejected index
        index: usize,
        /// Length of the waypoint set at the time of the call
        len: usize,
    },

    /// The routing service was reachable but could not connect the waypoints
    #[error("No route found for the given points")]
    NoRouteFound,

    /// The service answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Transport {
        /// HTTP status code
        status: u16,
        /// Response body, truncated
        body: String,
    },

    /// Transport-level failure (DNS, connection refused, TLS)
    #[error("Connection failed: {0}")]
    Network(String),

    /// The request exceeded its per-call timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The configured timeout in seconds
        timeout_secs: u64,
    },

    /// Failed to decode a response payload
    #[error("Response parse error: {0}")]
    Parse(String),

    /// Missing or placeholder credential, fatal at startup
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RoutingError {
    /// Build a transport error, truncating the body for log and message safety
    pub(crate) fn transport(status: u16, body: &str) -> Self {
        Self::Transport {
            status,
            body: body.chars().take(BODY_SNIPPET_CHARS).collect(),
        }
    }

    /// Map a failed `reqwest` send into the timeout or network variant
    pub(crate) fn from_send(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::Network(err.to_string())
        }
    }

    /// Returns true if the caller may retry the operation with different input
    ///
    /// Only configuration errors are fatal; everything else is recoverable
    /// within a planning session.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(RoutingError::EmptyQuery.is_recoverable());
        assert!(
            RoutingError::NoResults {
                query: "Atlantis".to_string()
            }
            .is_recoverable()
        );
        assert!(RoutingError::InsufficientWaypoints { count: 1 }.is_recoverable());
        assert!(RoutingError::NoRouteFound.is_recoverable());
        assert!(
            RoutingError::Transport {
                status: 500,
                body: "boom".to_string()
            }
            .is_recoverable()
        );
        assert!(RoutingError::Timeout { timeout_secs: 30 }.is_recoverable());
    }

    #[test]
    fn test_configuration_error_is_fatal() {
        assert!(!RoutingError::Configuration("missing key".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_display() {
        let err = RoutingError::NoResults {
            query: "Nowhereville".to_string(),
        };
        assert!(err.to_string().contains("Nowhereville"));

        let err = RoutingError::IndexOutOfRange { index: 5, len: 2 };
        assert!(err.to_string().contains('5'));
        assert!(err.to_string().contains('2'));

        let err = RoutingError::Timeout { timeout_secs: 15 };
        assert!(err.to_string().contains("15"));
    }

    #[test]
    fn test_transport_body_truncation() {
        let long_body = "x".repeat(500);
        let err = RoutingError::transport(502, &long_body);
        match err {
            RoutingError::Transport { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.chars().count(), 200);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_transport_short_body_kept_verbatim() {
        let err = RoutingError::transport(401, "unauthorized");
        assert_eq!(err.to_string(), "HTTP 401: unauthorized");
    }
}
