//! GraphHopper route planning for ordered place lists
//!
//! Resolves free-text place names to coordinate candidates via the
//! [GraphHopper geocoding API](https://docs.graphhopper.com/#tag/Geocoding-API),
//! collects user-selected candidates into an ordered [`WaypointSet`], plans a
//! route over it via the
//! [GraphHopper routing API](https://docs.graphhopper.com/#tag/Routing-API),
//! and derives presentation-ready metrics ([`RouteSummary`]) from the
//! normalized result.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern: [`GeocodeResolver`] defines the
//! geocoding interface, implemented by [`GraphHopperGeocoder`];
//! [`RouteClient`] defines the routing interface, implemented by
//! [`GraphHopperRouteClient`]. [`RoutePlanner`] composes the two behind the
//! three calls presentation layers are allowed to depend on:
//! `resolve_candidates`, `plan_route`, and `summarize`.
//!
//! Every resolver/routing call is a single bounded network round trip: no
//! retries, no caching, no state shared between calls. The API credential is
//! read once from the environment and reused read-only.
//!
//! # Example
//!
//! ```rust,ignore
//! use graphhopper_routing::{RoutePlanner, RoutingConfig, TravelProfile, WaypointSet};
//!
//! let config = RoutingConfig::from_env();
//! let planner = RoutePlanner::new(&config)?;
//!
//! let candidates = planner.resolve_candidates("Berlin Alexanderplatz", 5).await?;
//! let mut waypoints = WaypointSet::new();
//! waypoints.add(&candidates[0]); // user picked the first suggestion
//! // ... resolve and add at least one more stop ...
//!
//! let path = planner.plan_route(&waypoints, TravelProfile::Bike).await?;
//! let summary = planner.summarize(&path);
//! println!("{summary}");
//! ```

mod client;
mod config;
mod error;
mod geocoding;
mod models;
mod planner;

pub use client::{GraphHopperRouteClient, RouteClient, RouteRequest};
pub use config::{API_KEY_ENV, RoutingConfig};
pub use error::RoutingError;
pub use geocoding::{GeocodeResolver, GraphHopperGeocoder, MAX_LIMIT, MIN_LIMIT};
pub use models::{
    Candidate, Instruction, RoutePath, RouteSummary, StepSummary, TravelProfile, Waypoint,
    WaypointSet, format_duration_ms,
};
pub use planner::RoutePlanner;
