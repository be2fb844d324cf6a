//! Route-planning facade
//!
//! [`RoutePlanner`] is the only surface presentation layers (CLI, GUI,
//! exporters) depend on: resolve candidates, plan a route over an ordered
//! waypoint set, and derive summary metrics. It holds no state beyond the
//! two clients; paths and summaries are replaced wholesale on every call.

use tracing::instrument;

use crate::client::{GraphHopperRouteClient, RouteClient, RouteRequest};
use crate::config::RoutingConfig;
use crate::error::RoutingError;
use crate::geocoding::{GeocodeResolver, GraphHopperGeocoder};
use crate::models::{Candidate, RoutePath, RouteSummary, TravelProfile, WaypointSet};

/// Facade tying the geocoding and routing clients together
#[derive(Debug)]
pub struct RoutePlanner<G = GraphHopperGeocoder, R = GraphHopperRouteClient> {
    geocoder: G,
    router: R,
}

impl RoutePlanner {
    /// Create a planner backed by the GraphHopper services
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::Configuration`] for a missing or placeholder
    /// credential (fatal at startup, before any network call), or a network
    /// error if an HTTP client cannot be initialized.
    pub fn new(config: &RoutingConfig) -> Result<Self, RoutingError> {
        config.validate()?;
        Ok(Self {
            geocoder: GraphHopperGeocoder::new(config)?,
            router: GraphHopperRouteClient::new(config)?,
        })
    }
}

impl<G: GeocodeResolver, R: RouteClient> RoutePlanner<G, R> {
    /// Create a planner from explicit client implementations
    pub const fn with_clients(geocoder: G, router: R) -> Self {
        Self { geocoder, router }
    }

    /// Resolve a free-text query to ranked candidate locations
    ///
    /// # Errors
    ///
    /// [`RoutingError::EmptyQuery`] for a blank query (no network call),
    /// [`RoutingError::NoResults`] when no hit carries both coordinates,
    /// or a transport-level error.
    pub async fn resolve_candidates(
        &self,
        query: &str,
        limit: u8,
    ) -> Result<Vec<Candidate>, RoutingError> {
        self.geocoder.resolve(query, limit).await
    }

    /// Request a route visiting the waypoints in order
    ///
    /// # Errors
    ///
    /// [`RoutingError::InsufficientWaypoints`] for a non-routable set (no
    /// network call), [`RoutingError::NoRouteFound`] when the service cannot
    /// connect the waypoints, or a transport-level error.
    #[instrument(skip(self, waypoints), fields(waypoints = waypoints.len(), profile = %profile))]
    pub async fn plan_route(
        &self,
        waypoints: &WaypointSet,
        profile: TravelProfile,
    ) -> Result<RoutePath, RoutingError> {
        let request = RouteRequest::build(waypoints, profile)?;
        self.router.execute(&request).await
    }

    /// Derive presentation metrics from a route path
    ///
    /// Pure and infallible; identical input yields identical output.
    #[must_use]
    pub fn summarize(&self, path: &RoutePath) -> RouteSummary {
        RouteSummary::derive(path)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::models::Instruction;

    /// Stub clients that count calls so tests can prove short-circuits
    #[derive(Debug, Default)]
    struct CountingGeocoder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GeocodeResolver for CountingGeocoder {
        async fn resolve(&self, query: &str, _limit: u8) -> Result<Vec<Candidate>, RoutingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Candidate::new(query, 0.0, 0.0)])
        }
    }

    #[derive(Debug, Default)]
    struct CountingRouter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RouteClient for CountingRouter {
        async fn execute(&self, _request: &RouteRequest) -> Result<RoutePath, RoutingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RoutePath {
                distance_m: 5000.0,
                duration_ms: 600_000,
                profile: "bike".to_string(),
                instructions: vec![Instruction {
                    text: "Head north".to_string(),
                    distance_m: 5000.0,
                }],
            })
        }
    }

    fn stub_planner() -> RoutePlanner<CountingGeocoder, CountingRouter> {
        RoutePlanner::with_clients(CountingGeocoder::default(), CountingRouter::default())
    }

    #[tokio::test]
    async fn test_plan_route_short_circuits_below_two_waypoints() {
        let planner = stub_planner();

        let mut set = WaypointSet::new();
        let err = planner
            .plan_route(&set, TravelProfile::Car)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RoutingError::InsufficientWaypoints { count: 0 }
        ));

        set.add(&Candidate::new("A", 0.0, 0.0));
        let err = planner
            .plan_route(&set, TravelProfile::Car)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RoutingError::InsufficientWaypoints { count: 1 }
        ));

        // The route client must never have been reached
        assert_eq!(planner.router.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_plan_route_reaches_client_when_routable() {
        let planner = stub_planner();

        let mut set = WaypointSet::new();
        set.add(&Candidate::new("A", 0.0, 0.0));
        set.add(&Candidate::new("B", 1.0, 1.0));

        let path = planner.plan_route(&set, TravelProfile::Bike).await.unwrap();
        assert_eq!(path.profile, "bike");
        assert_eq!(planner.router.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_plan_then_summarize_scenario() {
        let planner = stub_planner();

        let mut set = WaypointSet::new();
        set.add(&Candidate::new("A", 0.0, 0.0));
        set.add(&Candidate::new("B", 1.0, 1.0));

        let path = planner.plan_route(&set, TravelProfile::Bike).await.unwrap();
        let summary = planner.summarize(&path);

        assert_eq!(path.profile, "bike");
        assert_eq!(format!("{:.2}", summary.distance_km), "5.00");
        assert_eq!(format!("{:.2}", summary.distance_mi), "3.11");
        assert_eq!(summary.duration, "00:10:00");
    }

    #[tokio::test]
    async fn test_resolve_candidates_delegates() {
        let planner = stub_planner();
        let candidates = planner.resolve_candidates("Berlin", 5).await.unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(planner.geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_new_rejects_placeholder_credential() {
        let config = RoutingConfig {
            api_key: "YOUR_API_KEY".to_string(),
            ..Default::default()
        };
        let err = RoutePlanner::new(&config).unwrap_err();
        assert!(matches!(err, RoutingError::Configuration(_)));
    }

    #[test]
    fn test_new_accepts_valid_config() {
        assert!(RoutePlanner::new(&RoutingConfig::for_testing()).is_ok());
    }
}
