//! Route-planning data models
//!
//! Typed representations of geocoding candidates, ordered waypoints, travel
//! profiles, and normalized routes as returned by the GraphHopper APIs,
//! plus the derived presentation metrics.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RoutingError;

/// Kilometres per statute mile, fixed for reproducible output
const KM_PER_MILE: f64 = 1.60934;

/// One geocoding result, immutable once constructed
///
/// Candidates always carry both coordinates; hits lacking either are
/// discarded by the resolver before they surface here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    /// Human-readable place description
    pub display_name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

impl Candidate {
    /// Create a new candidate
    #[must_use]
    pub fn new(display_name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            display_name: display_name.into(),
            lat,
            lng,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  ({:.5}, {:.5})", self.display_name, self.lat, self.lng)
    }
}

/// A candidate accepted into the route
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Waypoint {
    /// Human-readable place description
    pub display_name: String,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

impl From<&Candidate> for Waypoint {
    fn from(candidate: &Candidate) -> Self {
        Self {
            display_name: candidate.display_name.clone(),
            lat: candidate.lat,
            lng: candidate.lng,
        }
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name)
    }
}

/// An ordered, mutable collection of waypoints
///
/// Insertion order is the travel order: first entry is the origin, last is
/// the final destination, everything in between is visited in sequence.
/// Identical waypoints may repeat (round trips are legal); no operation
/// reorders, sorts, or deduplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WaypointSet {
    waypoints: Vec<Waypoint>,
}

impl WaypointSet {
    /// Create an empty waypoint set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a waypoint built from the given candidate
    pub fn add(&mut self, candidate: &Candidate) {
        self.waypoints.push(Waypoint::from(candidate));
    }

    /// Remove and return the waypoint at `index`
    ///
    /// # Errors
    ///
    /// Returns [`RoutingError::IndexOutOfRange`] if `index` is invalid.
    /// The relative order of the remaining waypoints is preserved.
    pub fn remove(&mut self, index: usize) -> Result<Waypoint, RoutingError> {
        if index >= self.waypoints.len() {
            return Err(RoutingError::IndexOutOfRange {
                index,
                len: self.waypoints.len(),
            });
        }
        Ok(self.waypoints.remove(index))
    }

    /// Reset the set to empty
    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    /// Number of waypoints in the set
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the set holds no waypoints
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// True iff a route request may be built from this set (length >= 2)
    #[must_use]
    pub fn is_routable(&self) -> bool {
        self.waypoints.len() >= 2
    }

    /// The waypoints in travel order
    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }
}

/// Mode of travel used to compute a route
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelProfile {
    /// Routing for cars
    #[default]
    Car,
    /// Routing for bicycles
    Bike,
    /// Routing for pedestrians
    Foot,
}

impl TravelProfile {
    /// Normalize free-form user input to a profile
    ///
    /// Matching is case-insensitive after trimming. Anything unrecognized
    /// falls back to [`Self::Car`] with a warning event rather than an error.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "" | "car" => Self::Car,
            "bike" => Self::Bike,
            "foot" => Self::Foot,
            other => {
                warn!(profile = %other, "Unknown travel profile, defaulting to car");
                Self::Car
            }
        }
    }

    /// The profile string the routing engine expects
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Bike => "bike",
            Self::Foot => "foot",
        }
    }
}

impl fmt::Display for TravelProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One maneuver step within a path's turn-by-turn guidance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instruction {
    /// Human-readable maneuver description (empty if the service omitted it)
    pub text: String,
    /// Step distance in metres (0 if the service omitted it)
    pub distance_m: f64,
}

/// The normalized result of a routing call
///
/// Replaced wholesale on every routing call; never mutated incrementally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutePath {
    /// Total distance in metres
    pub distance_m: f64,
    /// Total travel time in milliseconds
    pub duration_ms: u64,
    /// Profile the route was computed with ("car" if the service omitted it)
    pub profile: String,
    /// Ordered turn-by-turn instructions, possibly empty
    pub instructions: Vec<Instruction>,
}

/// One instruction reduced to presentation units
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepSummary {
    /// Maneuver description
    pub text: String,
    /// Step distance in kilometres
    pub distance_km: f64,
}

/// Presentation-ready metrics derived from a [`RoutePath`]
///
/// Derivation is pure: it owns no state of its own and can be recomputed
/// from the same path at any time with identical output. Step distances
/// are converted independently of the total and may not sum to it exactly
/// when the service's figures are not perfectly additive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteSummary {
    /// Total distance in kilometres
    pub distance_km: f64,
    /// Total distance in statute miles
    pub distance_mi: f64,
    /// Total duration formatted as `HH:MM:SS`
    pub duration: String,
    /// Per-instruction distances in kilometres
    pub steps: Vec<StepSummary>,
}

impl RouteSummary {
    /// Derive summary metrics from a normalized route path
    #[must_use]
    pub fn derive(path: &RoutePath) -> Self {
        let distance_km = path.distance_m / 1000.0;
        Self {
            distance_km,
            distance_mi: distance_km / KM_PER_MILE,
            duration: format_duration_ms(path.duration_ms),
            steps: path
                .instructions
                .iter()
                .map(|step| StepSummary {
                    text: step.text.clone(),
                    distance_km: step.distance_m / 1000.0,
                })
                .collect(),
        }
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} km ({:.2} mi) in {}",
            self.distance_km, self.distance_mi, self.duration
        )
    }
}

/// Format milliseconds as zero-padded `HH:MM:SS`
///
/// Sub-second precision is truncated, never rounded. Hours widen beyond two
/// digits only if the underlying value does.
#[must_use]
pub fn format_duration_ms(ms: u64) -> String {
    let total_secs = ms / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
