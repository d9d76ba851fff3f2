//! In-memory table-backed oracle (fallback when no live matrix API is
//! available).
//!
//! Costs come from a pre-seeded pairwise table instead of an HTTP call, so
//! it is deterministic and always available. Pairs that were never seeded
//! resolve to unknown cells, the same way a live oracle reports unroutable
//! pairs.

use std::collections::HashMap;

use crate::matrix::{normalize_locations, CostMatrix, DistanceOracle, OracleError};
use crate::model::location_key;

/// Oracle backed by an explicit (from, to) -> (miles, minutes) table.
#[derive(Debug, Clone, Default)]
pub struct TableOracle {
    entries: HashMap<(String, String), (f64, f64)>,
}

impl TableOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a one-directional cost. Keys are whitespace/case-normalized.
    pub fn set(&mut self, from: &str, to: &str, miles: f64, minutes: f64) {
        self.entries
            .insert((location_key(from), location_key(to)), (miles, minutes));
    }

    /// Seed the same cost in both directions.
    pub fn set_symmetric(&mut self, a: &str, b: &str, miles: f64, minutes: f64) {
        self.set(a, b, miles, minutes);
        self.set(b, a, miles, minutes);
    }

    fn lookup(&self, from: &str, to: &str) -> Option<(f64, f64)> {
        if location_key(from) == location_key(to) {
            return Some((0.0, 0.0));
        }
        self.entries
            .get(&(location_key(from), location_key(to)))
            .copied()
    }
}

impl DistanceOracle for TableOracle {
    fn query(&self, origins: &[String], destinations: &[String]) -> Result<CostMatrix, OracleError> {
        let origins = normalize_locations(origins);
        let destinations = normalize_locations(destinations);
        if origins.is_empty() || destinations.is_empty() {
            return Ok(CostMatrix::empty());
        }

        let mut distance_miles = Vec::with_capacity(origins.len());
        let mut duration_minutes = Vec::with_capacity(origins.len());
        for from in &origins {
            let mut distances = Vec::with_capacity(destinations.len());
            let mut durations = Vec::with_capacity(destinations.len());
            for to in &destinations {
                match self.lookup(from, to) {
                    Some((miles, minutes)) => {
                        distances.push(Some(miles));
                        durations.push(Some(minutes));
                    }
                    None => {
                        distances.push(None);
                        durations.push(None);
                    }
                }
            }
            distance_miles.push(distances);
            duration_minutes.push(durations);
        }

        Ok(CostMatrix {
            origins,
            destinations,
            distance_miles,
            duration_minutes,
        })
    }
}
