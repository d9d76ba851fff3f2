//! Distance/duration matrices and the oracle seam.
//!
//! The planner never computes travel costs itself; it consumes a dense
//! origins x destinations table from a `DistanceOracle`. Cells the oracle
//! cannot resolve stay `None` so downstream stages can exclude them rather
//! than mistake them for free travel.

use thiserror::Error;

use crate::model::normalize_location;

/// Fatal oracle failures. A failed query aborts the planning run; the
/// planner never proceeds on a partially valid matrix.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("distance oracle transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("distance oracle returned non-success status: {0}")]
    BadStatus(String),
    #[error("distance oracle response malformed: {0}")]
    MalformedResponse(String),
}

/// Dense pairwise distance/duration table.
///
/// Indexed `[origin][destination]` in the order of the normalized input
/// lists. `None` means no route known for that pair.
#[derive(Debug, Clone, Default)]
pub struct CostMatrix {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    pub distance_miles: Vec<Vec<Option<f64>>>,
    pub duration_minutes: Vec<Vec<Option<f64>>>,
}

impl CostMatrix {
    /// The empty-result marker returned when a query has no usable inputs.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty() || self.destinations.is_empty()
    }

    /// Distance in miles for the (origin, destination) pair, if known.
    pub fn distance(&self, origin: usize, destination: usize) -> Option<f64> {
        *self.distance_miles.get(origin)?.get(destination)?
    }

    /// Duration in minutes for the (origin, destination) pair, if known.
    pub fn duration(&self, origin: usize, destination: usize) -> Option<f64> {
        *self.duration_minutes.get(origin)?.get(destination)?
    }
}

/// Supplies pairwise travel costs for sets of named locations.
///
/// Implementations must normalize inputs (trim, collapse whitespace) and
/// drop blanks before querying; if either side becomes empty they return
/// `CostMatrix::empty()` instead of issuing a query. Unreachable backends
/// or non-success backend statuses are fatal errors, while individual
/// unroutable pairs surface as `None` cells.
pub trait DistanceOracle {
    fn query(&self, origins: &[String], destinations: &[String]) -> Result<CostMatrix, OracleError>;
}

/// Normalize a location list for an oracle query, dropping blanks.
pub fn normalize_locations(raw: &[String]) -> Vec<String> {
    raw.iter()
        .filter_map(|location| normalize_location(location))
        .collect()
}
