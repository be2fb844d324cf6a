//! Route-planning configuration

use std::env;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RoutingError;

/// Environment variable holding the GraphHopper API credential
pub const API_KEY_ENV: &str = "GRAPHHOPPER_KEY";

/// Placeholder credential that must be replaced before any network call
const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";

/// Configuration for the GraphHopper geocoding and routing services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// URL of the geocoding endpoint
    #[serde(default = "default_geocode_url")]
    pub geocode_url: String,

    /// URL of the routing endpoint
    #[serde(default = "default_route_url")]
    pub route_url: String,

    /// API credential forwarded with every request
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Geocoding timeout in seconds
    #[serde(default = "default_geocode_timeout_secs")]
    pub geocode_timeout_secs: u64,

    /// Routing timeout in seconds
    #[serde(default = "default_route_timeout_secs")]
    pub route_timeout_secs: u64,
}

fn default_geocode_url() -> String {
    "https://graphhopper.com/api/1/geocode".to_string()
}

fn default_route_url() -> String {
    "https://graphhopper.com/api/1/route".to_string()
}

fn default_api_key() -> String {
    "6c57578b-b515-4eac-9303-166acf4ca72b".to_string()
}

const fn default_geocode_timeout_secs() -> u64 {
    15
}

const fn default_route_timeout_secs() -> u64 {
    30
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            geocode_url: default_geocode_url(),
            route_url: default_route_url(),
            api_key: default_api_key(),
            geocode_timeout_secs: default_geocode_timeout_secs(),
            route_timeout_secs: default_route_timeout_secs(),
        }
    }
}

impl RoutingConfig {
    /// Build a configuration with the credential taken from `GRAPHHOPPER_KEY`
    ///
    /// Falls back to the bundled default key when the variable is unset.
    /// The value is read once; every outgoing request reuses it read-only.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_ENV).unwrap_or_else(|_| {
            debug!(env_var = API_KEY_ENV, "Credential not set, using default");
            default_api_key()
        });
        Self {
            api_key,
            ..Self::default()
        }
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            geocode_timeout_secs: 5,
            route_timeout_secs: 5,
            ..Self::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::Configuration`] if the credential is missing
    /// or still the placeholder, or if an endpoint or timeout is unusable.
    /// Callers should treat this as fatal before issuing any network call.
    pub fn validate(&self) -> Result<(), RoutingError> {
        if self.api_key.is_empty() || self.api_key == PLACEHOLDER_API_KEY {
            return Err(RoutingError::Configuration(format!(
                "Set the {API_KEY_ENV} environment variable to a valid GraphHopper API key"
            )));
        }

        if self.geocode_url.is_empty() || self.route_url.is_empty() {
            return Err(RoutingError::Configuration(
                "Service endpoint URLs must not be empty".to_string(),
            ));
        }

        if self.geocode_timeout_secs == 0 || self.route_timeout_secs == 0 {
            return Err(RoutingError::Configuration(
                "Timeouts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RoutingConfig::default();
        assert_eq!(config.geocode_url, "https://graphhopper.com/api/1/geocode");
        assert_eq!(config.route_url, "https://graphhopper.com/api/1/route");
        assert_eq!(config.geocode_timeout_secs, 15);
        assert_eq!(config.route_timeout_secs, 30);
        assert!(!config.api_key.is_empty());
    }

    #[test]
    fn test_testing_config() {
        let config = RoutingConfig::for_testing();
        assert_eq!(config.geocode_timeout_secs, 5);
        assert_eq!(config.route_timeout_secs, 5);
    }

    #[test]
    fn test_validation_success() {
        assert!(RoutingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validation_empty_key() {
        let config = RoutingConfig {
            api_key: String::new(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, RoutingError::Configuration(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_validation_placeholder_key() {
        let config = RoutingConfig {
            api_key: "YOUR_API_KEY".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_url() {
        let config = RoutingConfig {
            route_url: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = RoutingConfig {
            geocode_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let config = RoutingConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: RoutingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.geocode_url, config.geocode_url);
        assert_eq!(deserialized.api_key, config.api_key);
    }

    #[test]
    fn test_deserialization_fills_defaults() {
        let config: RoutingConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.route_timeout_secs, 30);
        assert!(!config.api_key.is_empty());
    }
}
