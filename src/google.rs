//! Google Distance Matrix HTTP adapter for the oracle seam.

use serde::Deserialize;

use crate::matrix::{normalize_locations, CostMatrix, DistanceOracle, OracleError};

const METERS_PER_MILE: f64 = 1609.344;
const SECONDS_PER_MINUTE: f64 = 60.0;

#[derive(Debug, Clone)]
pub struct GoogleMatrixConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl GoogleMatrixConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api/distancematrix/json".to_string(),
            api_key: api_key.into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleMatrixClient {
    config: GoogleMatrixConfig,
    client: reqwest::blocking::Client,
}

impl GoogleMatrixClient {
    pub fn new(config: GoogleMatrixConfig) -> Result<Self, OracleError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl DistanceOracle for GoogleMatrixClient {
    fn query(&self, origins: &[String], destinations: &[String]) -> Result<CostMatrix, OracleError> {
        let origins = normalize_locations(origins);
        let destinations = normalize_locations(destinations);
        if origins.is_empty() || destinations.is_empty() {
            return Ok(CostMatrix::empty());
        }

        let response: TableResponse = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("origins", origins.join("|")),
                ("destinations", destinations.join("|")),
                ("units", "imperial".to_string()),
                ("key", self.config.api_key.clone()),
            ])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json())?;

        matrix_from_response(response, origins, destinations)
    }
}

fn matrix_from_response(
    response: TableResponse,
    origins: Vec<String>,
    destinations: Vec<String>,
) -> Result<CostMatrix, OracleError> {
    if response.status != "OK" {
        return Err(OracleError::BadStatus(response.status));
    }
    if response.rows.len() != origins.len() {
        return Err(OracleError::MalformedResponse(format!(
            "expected {} rows, got {}",
            origins.len(),
            response.rows.len()
        )));
    }

    let mut distance_miles = Vec::with_capacity(origins.len());
    let mut duration_minutes = Vec::with_capacity(origins.len());

    for row in &response.rows {
        if row.elements.len() != destinations.len() {
            return Err(OracleError::MalformedResponse(format!(
                "expected {} elements per row, got {}",
                destinations.len(),
                row.elements.len()
            )));
        }

        let mut distances = Vec::with_capacity(destinations.len());
        let mut durations = Vec::with_capacity(destinations.len());
        for element in &row.elements {
            // Anything but an OK element (NOT_FOUND, ZERO_RESULTS, ...) is
            // an unknown cell, never a zero.
            if element.status == "OK" {
                distances.push(element.distance.as_ref().map(|d| d.value / METERS_PER_MILE));
                durations.push(element.duration.as_ref().map(|d| d.value / SECONDS_PER_MINUTE));
            } else {
                distances.push(None);
                durations.push(None);
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

#[derive(Debug, Deserialize)]
struct TableResponse {
    status: String,
    #[serde(default)]
    rows: Vec<TableRow>,
}

#[derive(Debug, Deserialize)]
struct TableRow {
    #[serde(default)]
    elements: Vec<TableElement>,
}

#[derive(Debug, Deserialize)]
struct TableElement {
    status: String,
    distance: Option<TableValue>,
    duration: Option<TableValue>,
}

#[derive(Debug, Deserialize)]
struct TableValue {
    /// Meters for distances, seconds for durations.
    value: f64,
}
