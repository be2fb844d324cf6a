//! GraphHopper routing client
//!
//! Builds routing requests from an ordered waypoint set and normalizes the
//! service response into a [`RoutePath`] via the
//! [GraphHopper routing API](https://docs.graphhopper.com/#tag/Routing-API).
//!
//! Waypoints are transmitted unencoded (`points_encoded=false`), one
//! `point` parameter per waypoint in travel order, so the outgoing request
//! stays observable and debuggable. When the service offers alternative
//! paths, only the first is taken (single-best-path policy).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::models::{Instruction, RoutePath, TravelProfile, WaypointSet};

/// A validated routing-service request
///
/// Can only be built from a routable waypoint set, so holding a value of
/// this type proves the minimum-size invariant was checked.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    points: Vec<(f64, f64)>,
    profile: TravelProfile,
}

impl RouteRequest {
    /// Build a request from an ordered waypoint set and a travel profile
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::InsufficientWaypoints`] when the set holds
    /// fewer than two waypoints.
    pub fn build(waypoints: &WaypointSet, profile: TravelProfile) -> Result<Self, RoutingError> {
        if !waypoints.is_routable() {
            return Err(RoutingError::InsufficientWaypoints {
                count: waypoints.len(),
            });
        }

        Ok(Self {
            points: waypoints
                .waypoints()
                .iter()
                .map(|w| (w.lat, w.lng))
                .collect(),
            profile,
        })
    }

    /// Coordinate pairs in travel order (origin first, destination last)
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// The profile passed through to the routing engine
    #[must_use]
    pub const fn profile(&self) -> TravelProfile {
        self.profile
    }
}

/// Trait for routing-service clients
#[async_trait]
pub trait RouteClient: Send + Sync {
    /// Execute a routing request and normalize the response
    async fn execute(&self, request: &RouteRequest) -> Result<RoutePath, RoutingError>;
}

/// GraphHopper-backed routing client
#[derive(Debug)]
pub struct GraphHopperRouteClient {
    client: Client,
    config: RoutingConfig,
}

impl GraphHopperRouteClient {
    /// Create a new routing client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &RoutingConfig) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.route_timeout_secs))
            .user_agent("graphhopper-routing/0.1")
            .build()
            .map_err(|e| RoutingError::Network(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Parse the raw routing JSON into a normalized path
    ///
    /// An empty or missing `paths` collection is [`RoutingError::NoRouteFound`]:
    /// the service was reachable but could not connect the waypoints.
    fn parse_response(body: &str) -> Result<RoutePath, RoutingError> {
        let raw: RawRouteResponse =
            serde_json::from_str(body).map_err(|e| RoutingError::Parse(e.to_string()))?;

        let Some(first) = raw.paths.into_iter().next() else {
            return Err(RoutingError::NoRouteFound);
        };

        Ok(Self::convert_path(first))
    }

    /// Convert a raw path, defaulting the optional fields
    fn convert_path(raw: RawPath) -> RoutePath {
        let profile = raw
            .profile
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| TravelProfile::Car.as_str().to_string());

        RoutePath {
            distance_m: raw.distance,
            duration_ms: raw.time,
            profile,
            instructions: raw
                .instructions
                .into_iter()
                .map(|step| Instruction {
                    text: step.text,
                    distance_m: step.distance,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl RouteClient for GraphHopperRouteClient {
    #[instrument(skip(self, request), fields(points = request.points().len(), profile = %request.profile()))]
    async fn execute(&self, request: &RouteRequest) -> Result<RoutePath, RoutingError> {
        let mut params: Vec<(&str, String)> = vec![
            ("key", self.config.api_key.clone()),
            ("vehicle", request.profile().to_string()),
            ("points_encoded", "false".to_string()),
        ];
        for (lat, lng) in request.points() {
            params.push(("point", format!("{lat},{lng}")));
        }

        debug!(points = request.points().len(), "Requesting route");

        let response = self
            .client
            .get(&self.config.route_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| RoutingError::from_send(&e, self.config.route_timeout_secs))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::Parse(e.to_string()))?;

        if !status.is_success() {
            return Err(RoutingError::transport(status.as_u16(), &body));
        }

        let path = Self::parse_response(&body)?;
        debug!(
            distance_m = path.distance_m,
            duration_ms = path.duration_ms,
            "Route found"
        );
        Ok(path)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawRouteResponse {
    #[serde(default)]
    paths: Vec<RawPath>,
}

#[derive(Debug, Deserialize)]
struct RawPath {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    time: u64,
    profile: Option<String>,
    #[serde(default)]
    instructions: Vec<RawInstruction>,
}

#[derive(Debug, Deserialize)]
struct RawInstruction {
    #[serde(default)]
    text: String,
    #[serde(default)]
    distance: f64,
}
