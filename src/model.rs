//! Data model for a single day of haul planning.
//!
//! Everything here is created fresh per planning run and serializes to the
//! JSON shapes consumed by dispatch tooling. The builder creates `Route`s,
//! the backhaul inserter mutates their legs and totals in place, and the
//! fairness auditor only reads them.

use serde::{Deserialize, Serialize};

/// Default reload base for demo scenarios.
pub const DEFAULT_BASE_RELOAD_LOCATION: &str = "Grand Island, NE";

/// A driver in the fleet. Immutable during a planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    #[serde(rename = "start")]
    pub start_location: String,
    /// Defaults to the start location when absent.
    #[serde(rename = "home", default, skip_serializing_if = "Option::is_none")]
    pub home_location: Option<String>,
}

impl Driver {
    pub fn new(name: impl Into<String>, start_location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start_location: start_location.into(),
            home_location: None,
        }
    }

    pub fn home(mut self, home_location: impl Into<String>) -> Self {
        self.home_location = Some(home_location.into());
        self
    }

    /// Where the driver heads when the day ends empty.
    pub fn home_or_start(&self) -> &str {
        self.home_location.as_deref().unwrap_or(&self.start_location)
    }
}

/// Kind of movement a leg represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegType {
    /// Base to delivery stop, loaded.
    Deliver,
    /// Delivery stop back to base, empty (mandatory reload).
    ReloadToBase,
    /// Delivery stop to a backhaul pickup site.
    BackhaulPickup,
    /// Backhaul site back to base, loaded with the pickup.
    ReturnToBase,
}

/// One directional movement segment within a route.
///
/// Costs are `None` when the oracle had no route for the pair; a missing
/// cost is never coerced to zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leg {
    #[serde(rename = "type")]
    pub leg_type: LegType,
    pub from: String,
    pub to: String,
    pub distance_miles: Option<f64>,
    pub duration_minutes: Option<f64>,
    /// 1-based position within the route's leg list.
    pub sequence: usize,
}

/// A delivery stop with its 1-based order among a driver's deliveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delivery {
    pub delivery_stop: String,
    pub sequence: usize,
}

/// One driver's full day-plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub driver: String,
    pub start_location: String,
    pub end_location: String,
    pub deliveries: Vec<Delivery>,
    pub legs: Vec<Leg>,
    pub total_distance_miles: f64,
    pub total_duration_minutes: f64,
    #[serde(default)]
    pub backhaul_minutes_added: f64,
}

/// The full fleet plan for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlan {
    pub base_reload_location: String,
    /// One route per driver, in input driver order.
    pub routes: Vec<Route>,
    /// Stops that could not be placed within the hours cap (or whose
    /// round-trip cost was unknown).
    pub unassigned_deliveries: Vec<String>,
    /// Free-text annotations, append-only.
    pub notes: Vec<String>,
}

/// A fixed named backhaul pickup location. Never a delivery stop; only ever
/// the endpoint of backhaul legs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackhaulSite {
    pub name: String,
}

impl BackhaulSite {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Normalize a location string: trim and collapse internal whitespace.
///
/// Returns `None` for blank input so callers can drop empty entries before
/// they ever reach the oracle.
pub fn normalize_location(raw: &str) -> Option<String> {
    let normalized = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// Case-insensitive equality key for a normalized location.
pub fn location_key(location: &str) -> String {
    location.to_lowercase()
}

/// Whether two location strings name the same place.
pub fn same_location(a: &str, b: &str) -> bool {
    match (normalize_location(a), normalize_location(b)) {
        (Some(a), Some(b)) => location_key(&a) == location_key(&b),
        _ => false,
    }
}
