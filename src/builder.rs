//! Route builder: fairness-first assignment of delivery stops to drivers.
//!
//! Every delivery is a full reload cycle (base -> stop -> base), so each
//! stop has a self-contained round-trip cost and assignment reduces to
//! spreading round trips evenly. Stops are placed largest-first through a
//! round-robin driver cycle so small jobs fill remaining capacity late in
//! the day without starving any driver.

use std::cmp::Ordering;

use tracing::{debug, info, warn};

use crate::matrix::{DistanceOracle, OracleError};
use crate::model::{normalize_location, Delivery, Driver, Leg, LegType, Route, RoutePlan};

#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Legal driving cap per driver, in hours.
    pub max_hours_per_driver: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_hours_per_driver: 10.0,
        }
    }
}

/// Round-trip cost of one candidate delivery, as resolved from the oracle.
#[derive(Debug, Clone)]
struct StopCost {
    stop: String,
    outbound_miles: Option<f64>,
    outbound_minutes: Option<f64>,
    return_miles: Option<f64>,
    return_minutes: Option<f64>,
}

impl StopCost {
    fn round_trip_minutes(&self) -> Option<f64> {
        Some(self.outbound_minutes? + self.return_minutes?)
    }

    fn round_trip_miles(&self) -> Option<f64> {
        Some(self.outbound_miles? + self.return_miles?)
    }
}

/// Build a day-plan assigning `stops` to `drivers` out of the shared
/// reload base.
///
/// Invalid input (no drivers, or no usable base/stops) produces an
/// empty-but-well-formed plan; only oracle failures abort the run.
pub fn build_route_plan<O>(
    drivers: &[Driver],
    stops: &[String],
    base_reload_location: &str,
    oracle: &O,
    options: &BuildOptions,
) -> Result<RoutePlan, OracleError>
where
    O: DistanceOracle + Sync,
{
    let stops: Vec<String> = stops
        .iter()
        .filter_map(|stop| normalize_location(stop))
        .collect();

    let Some(base) = normalize_location(base_reload_location) else {
        warn!("blank base reload location; returning empty plan");
        return Ok(empty_plan(String::new(), stops));
    };

    if drivers.is_empty() {
        warn!("no drivers supplied; returning empty plan");
        return Ok(empty_plan(base, stops));
    }

    if stops.is_empty() {
        // No work: every driver idles at the base.
        let routes = drivers
            .iter()
            .map(|driver| idle_route(driver, &base))
            .collect();
        let mut plan = RoutePlan {
            base_reload_location: base,
            routes,
            unassigned_deliveries: Vec::new(),
            notes: Vec::new(),
        };
        push_policy_notes(&mut plan);
        return Ok(plan);
    }

    let base_list = vec![base.clone()];
    let (outbound, back) = rayon::join(
        || oracle.query(&base_list, &stops),
        || oracle.query(&stops, &base_list),
    );
    let (outbound, back) = (outbound?, back?);

    let costs: Vec<StopCost> = stops
        .iter()
        .enumerate()
        .map(|(i, stop)| StopCost {
            stop: stop.clone(),
            outbound_miles: outbound.distance(0, i),
            outbound_minutes: outbound.duration(0, i),
            return_miles: back.distance(i, 0),
            return_minutes: back.duration(i, 0),
        })
        .collect();

    let mut unassigned: Vec<String> = Vec::new();
    let mut candidates: Vec<StopCost> = Vec::new();
    for cost in costs {
        if cost.round_trip_minutes().is_some() {
            candidates.push(cost);
        } else {
            // No known round-trip cost: the stop can never pass the
            // capacity check.
            warn!(stop = %cost.stop, "round-trip cost unknown; stop unassignable");
            unassigned.push(cost.stop);
        }
    }

    // Largest round trips first; stable sort keeps input order on ties.
    candidates.sort_by(|a, b| {
        b.round_trip_minutes()
            .partial_cmp(&a.round_trip_minutes())
            .unwrap_or(Ordering::Equal)
    });

    let cap_minutes = options.max_hours_per_driver * 60.0;
    let mut assigned: Vec<Vec<StopCost>> = vec![Vec::new(); drivers.len()];
    let mut running_minutes: Vec<f64> = vec![0.0; drivers.len()];
    let mut cursor = 0usize;

    for candidate in candidates {
        let round_trip = candidate
            .round_trip_minutes()
            .unwrap_or(f64::INFINITY);

        let mut placed = None;
        for offset in 0..drivers.len() {
            let idx = (cursor + offset) % drivers.len();
            if running_minutes[idx] + round_trip <= cap_minutes {
                placed = Some(idx);
                break;
            }
        }

        match placed {
            Some(idx) => {
                debug!(
                    driver = %drivers[idx].name,
                    stop = %candidate.stop,
                    round_trip_minutes = round_trip,
                    "assigned stop"
                );
                running_minutes[idx] += round_trip;
                assigned[idx].push(candidate);
                cursor = (idx + 1) % drivers.len();
            }
            None => {
                // One full cycle tried, nobody has capacity left.
                warn!(stop = %candidate.stop, "no driver has capacity; stop unassigned");
                unassigned.push(candidate.stop);
            }
        }
    }

    let routes: Vec<Route> = drivers
        .iter()
        .zip(&assigned)
        .map(|(driver, stops_for_driver)| build_route(driver, stops_for_driver, &base))
        .collect();

    info!(
        drivers = drivers.len(),
        assigned = routes.iter().map(|r| r.deliveries.len()).sum::<usize>(),
        unassigned = unassigned.len(),
        "route plan built"
    );

    let mut plan = RoutePlan {
        base_reload_location: base,
        routes,
        unassigned_deliveries: unassigned,
        notes: Vec::new(),
    };
    push_policy_notes(&mut plan);
    Ok(plan)
}

fn push_policy_notes(plan: &mut RoutePlan) {
    plan.notes
        .push("round-robin fairness assignment".to_string());
    plan.notes
        .push("reload enforced between every delivery".to_string());
}

fn empty_plan(base: String, stops: Vec<String>) -> RoutePlan {
    let mut plan = RoutePlan {
        base_reload_location: base,
        routes: Vec::new(),
        unassigned_deliveries: stops,
        notes: Vec::new(),
    };
    push_policy_notes(&mut plan);
    plan
}

/// Route for a driver with no work at all: the base is both start and end.
fn idle_route(driver: &Driver, base: &str) -> Route {
    Route {
        driver: driver.name.clone(),
        start_location: base.to_string(),
        end_location: base.to_string(),
        deliveries: Vec::new(),
        legs: Vec::new(),
        total_distance_miles: 0.0,
        total_duration_minutes: 0.0,
        backhaul_minutes_added: 0.0,
    }
}

fn build_route(driver: &Driver, stops: &[StopCost], base: &str) -> Route {
    let start_location = normalize_location(&driver.start_location)
        .unwrap_or_else(|| base.to_string());

    let mut deliveries = Vec::with_capacity(stops.len());
    let mut legs = Vec::with_capacity(stops.len() * 2);
    let mut total_distance_miles = 0.0;
    let mut total_duration_minutes = 0.0;

    for (i, cost) in stops.iter().enumerate() {
        deliveries.push(Delivery {
            delivery_stop: cost.stop.clone(),
            sequence: i + 1,
        });
        legs.push(Leg {
            leg_type: LegType::Deliver,
            from: base.to_string(),
            to: cost.stop.clone(),
            distance_miles: cost.outbound_miles,
            duration_minutes: cost.outbound_minutes,
            sequence: legs.len() + 1,
        });
        legs.push(Leg {
            leg_type: LegType::ReloadToBase,
            from: cost.stop.clone(),
            to: base.to_string(),
            distance_miles: cost.return_miles,
            duration_minutes: cost.return_minutes,
            sequence: legs.len() + 1,
        });
        total_distance_miles += cost.round_trip_miles().unwrap_or(0.0);
        total_duration_minutes += cost.round_trip_minutes().unwrap_or(0.0);
    }

    let end_location = if deliveries.is_empty() {
        start_location.clone()
    } else {
        base.to_string()
    };

    Route {
        driver: driver.name.clone(),
        start_location,
        end_location,
        deliveries,
        legs,
        total_distance_miles,
        total_duration_minutes,
        backhaul_minutes_added: 0.0,
    }
}
