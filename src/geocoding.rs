//! GraphHopper geocoding client
//!
//! Resolves free-text place queries to ranked coordinate candidates via the
//! [GraphHopper geocoding API](https://docs.graphhopper.com/#tag/Geocoding-API).
//! Hits without a complete coordinate pair are dropped before they surface;
//! a partial hit is worse than no hit.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::models::Candidate;

/// Smallest accepted candidate limit
pub const MIN_LIMIT: u8 = 1;

/// Largest accepted candidate limit
pub const MAX_LIMIT: u8 = 10;

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodeResolver: Send + Sync {
    /// Resolve a free-text query to ranked candidate locations
    ///
    /// `limit` is clamped to `[MIN_LIMIT, MAX_LIMIT]`, never rejected.
    async fn resolve(&self, query: &str, limit: u8) -> Result<Vec<Candidate>, RoutingError>;
}

/// GraphHopper-backed geocoding client
#[derive(Debug)]
pub struct GraphHopperGeocoder {
    client: Client,
    config: RoutingConfig,
}

impl GraphHopperGeocoder {
    /// Create a new geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &RoutingConfig) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.geocode_timeout_secs))
            .user_agent("graphhopper-routing/0.1")
            .build()
            .map_err(|e| RoutingError::Network(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Parse the raw geocoding JSON into candidates, dropping incomplete hits
    fn parse_response(body: &str, query: &str) -> Result<Vec<Candidate>, RoutingError> {
        let raw: RawGeocodeResponse =
            serde_json::from_str(body).map_err(|e| RoutingError::Parse(e.to_string()))?;

        Ok(raw
            .hits
            .into_iter()
            .filter_map(|hit| Self::convert_hit(hit, query))
            .collect())
    }

    /// Convert one raw hit, or discard it when a coordinate is missing
    fn convert_hit(hit: RawHit, query: &str) -> Option<Candidate> {
        let point = hit.point.as_ref()?;
        let (lat, lng) = (point.lat?, point.lng?);
        Some(Candidate {
            display_name: Self::display_name(&hit, query),
            lat,
            lng,
        })
    }

    /// Compose a display name from the hit's fields
    ///
    /// Joins the non-empty of name, city, state, country with ", ".
    /// When all four are empty the original query is used, then the raw name.
    fn display_name(hit: &RawHit, query: &str) -> String {
        let parts: Vec<&str> = [
            hit.name.as_str(),
            hit.city.as_str(),
            hit.state.as_str(),
            hit.country.as_str(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect();

        if parts.is_empty() {
            if query.is_empty() {
                hit.name.clone()
            } else {
                query.to_string()
            }
        } else {
            parts.join(", ")
        }
    }
}

#[async_trait]
impl GeocodeResolver for GraphHopperGeocoder {
    #[instrument(skip(self))]
    async fn resolve(&self, query: &str, limit: u8) -> Result<Vec<Candidate>, RoutingError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(RoutingError::EmptyQuery);
        }
        let limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);

        let params = [
            ("q", query.to_string()),
            ("limit", limit.to_string()),
            ("key", self.config.api_key.clone()),
        ];

        debug!(%query, limit, "Geocoding query");

        let response = self
            .client
            .get(&self.config.geocode_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| RoutingError::from_send(&e, self.config.geocode_timeout_secs))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::Parse(e.to_string()))?;

        if !status.is_success() {
            return Err(RoutingError::transport(status.as_u16(), &body));
        }

        let candidates = Self::parse_response(&body, query)?;
        if candidates.is_empty() {
            return Err(RoutingError::NoResults {
                query: query.to_string(),
            });
        }

        debug!(count = candidates.len(), "Geocoding candidates found");
        Ok(candidates)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawGeocodeResponse {
    #[serde(default)]
    hits: Vec<RawHit>,
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(default)]
    name: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    country: String,
    point: Option<RawPoint>,
}

#[derive(Debug, Deserialize)]
struct RawPoint {
    lat: Option<f64>,
    lng: Option<f64>,
}
