//! Opportunistic backhaul insertion on reload legs.
//!
//! Backhauls are pickups made on the way back to base after a delivery.
//! Only `reload_to_base` legs are ever examined, so running the inserter
//! again over an already-processed plan changes nothing. A candidate site
//! qualifies when the detour it adds over the direct return fits a
//! minutes budget; drivers already running long against the fleet average
//! get a tighter budget so backhauls do not worsen the day's balance.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::matrix::{CostMatrix, DistanceOracle, OracleError};
use crate::model::{location_key, normalize_location, BackhaulSite, Leg, LegType, RoutePlan};

/// Extra minutes a driver may run beyond the fleet average before the
/// detour budget is halved.
const OVERLOAD_SLACK_MINUTES: f64 = 15.0;

#[derive(Debug, Clone)]
pub struct BackhaulOptions {
    /// Maximum extra minutes a detour may add versus the direct return leg.
    pub detour_budget_minutes: f64,
}

impl Default for BackhaulOptions {
    fn default() -> Self {
        Self {
            detour_budget_minutes: 20.0,
        }
    }
}

/// The fixed pickup catalogue used by the Nebraska grain fleet.
pub fn default_backhaul_sites() -> Vec<BackhaulSite> {
    [
        "ADM Columbus, NE",
        "Sutherland, NE",
        "Wood River, NE",
        "Aurora, NE",
        "Council Bluffs, IA",
        "Central City, NE",
        "Hastings, NE",
        "York, NE",
    ]
    .into_iter()
    .map(BackhaulSite::new)
    .collect()
}

/// Insert at most one backhaul per reload leg, in place.
///
/// Deliveries and delivery sequencing are never altered; a reload leg is
/// either kept or replaced by a `backhaul_pickup` + `return_to_base` pair
/// at the same position.
pub fn insert_backhauls<O>(
    plan: &mut RoutePlan,
    sites: &[BackhaulSite],
    oracle: &O,
    options: &BackhaulOptions,
) -> Result<(), OracleError>
where
    O: DistanceOracle + Sync,
{
    let site_names: Vec<String> = sites
        .iter()
        .filter_map(|site| normalize_location(&site.name))
        .collect();
    if plan.routes.is_empty() || site_names.is_empty() {
        return Ok(());
    }

    // Every distinct reload origin across the plan, queried in one matrix.
    let mut reload_stops: Vec<String> = Vec::new();
    let mut stop_rows: HashMap<String, usize> = HashMap::new();
    for route in &plan.routes {
        for leg in &route.legs {
            if leg.leg_type == LegType::ReloadToBase {
                let key = location_key(&leg.from);
                if !stop_rows.contains_key(&key) {
                    stop_rows.insert(key, reload_stops.len());
                    reload_stops.push(leg.from.clone());
                }
            }
        }
    }

    if reload_stops.is_empty() {
        return Ok(());
    }

    let base_list = vec![plan.base_reload_location.clone()];
    let (stops_to_sites, sites_to_base) = rayon::join(
        || oracle.query(&reload_stops, &site_names),
        || oracle.query(&site_names, &base_list),
    );
    let (stops_to_sites, sites_to_base) = (stops_to_sites?, sites_to_base?);

    // Fleet average before any insertion, shared across all drivers.
    let fleet_avg_minutes = plan
        .routes
        .iter()
        .map(|route| route.total_duration_minutes)
        .sum::<f64>()
        / plan.routes.len().max(1) as f64;

    let mut inserted = 0usize;
    for route in &mut plan.routes {
        let driver_minutes = route.total_duration_minutes;
        let mut effective_budget = options.detour_budget_minutes;
        if driver_minutes > fleet_avg_minutes + OVERLOAD_SLACK_MINUTES {
            // Overloaded driver gets a tighter detour allowance.
            effective_budget /= 2.0;
        }

        let mut added_minutes = 0.0;
        let mut added_miles = 0.0;
        let legs = std::mem::take(&mut route.legs);
        let mut new_legs: Vec<Leg> = Vec::with_capacity(legs.len());

        for leg in legs {
            if leg.leg_type != LegType::ReloadToBase {
                new_legs.push(leg);
                continue;
            }

            let Some(&row) = stop_rows.get(&location_key(&leg.from)) else {
                new_legs.push(leg);
                continue;
            };

            match best_detour(
                &stops_to_sites,
                &sites_to_base,
                &site_names,
                row,
                &leg,
                effective_budget,
            ) {
                Some(choice) => {
                    debug!(
                        driver = %route.driver,
                        stop = %leg.from,
                        site = %choice.site,
                        detour_minutes = choice.detour_minutes,
                        "backhaul inserted on reload leg"
                    );
                    added_minutes += choice.detour_minutes;
                    added_miles += choice.miles_delta;
                    inserted += 1;
                    new_legs.push(Leg {
                        leg_type: LegType::BackhaulPickup,
                        from: leg.from.clone(),
                        to: choice.site.clone(),
                        distance_miles: choice.pickup_miles,
                        duration_minutes: Some(choice.pickup_minutes),
                        sequence: 0,
                    });
                    new_legs.push(Leg {
                        leg_type: LegType::ReturnToBase,
                        from: choice.site,
                        to: plan.base_reload_location.clone(),
                        distance_miles: choice.return_miles,
                        duration_minutes: Some(choice.return_minutes),
                        sequence: 0,
                    });
                }
                None => new_legs.push(leg),
            }
        }

        for (i, leg) in new_legs.iter_mut().enumerate() {
            leg.sequence = i + 1;
        }

        route.legs = new_legs;
        route.total_duration_minutes += added_minutes;
        route.total_distance_miles += added_miles;
        // Accumulates so the figure survives a re-run over an
        // already-processed plan.
        route.backhaul_minutes_added += added_minutes;
    }

    info!(inserted, "backhaul pass complete");

    plan.notes
        .push("backhauls inserted only on reload legs using detour-minutes budget".to_string());
    plan.notes.push(format!(
        "detour budget: {} minutes",
        options.detour_budget_minutes
    ));

    Ok(())
}

struct DetourChoice {
    site: String,
    detour_minutes: f64,
    miles_delta: f64,
    pickup_miles: Option<f64>,
    pickup_minutes: f64,
    return_miles: Option<f64>,
    return_minutes: f64,
}

/// Smallest-detour site that fits the budget; ties keep catalogue order.
fn best_detour(
    stops_to_sites: &CostMatrix,
    sites_to_base: &CostMatrix,
    site_names: &[String],
    stop_row: usize,
    reload_leg: &Leg,
    effective_budget: f64,
) -> Option<DetourChoice> {
    let direct_minutes = reload_leg.duration_minutes.unwrap_or(0.0);
    let direct_miles = reload_leg.distance_miles.unwrap_or(0.0);

    let mut best: Option<DetourChoice> = None;
    for (j, site) in site_names.iter().enumerate() {
        let Some(pickup_minutes) = stops_to_sites.duration(stop_row, j) else {
            continue;
        };
        let Some(return_minutes) = sites_to_base.duration(j, 0) else {
            continue;
        };
        if pickup_minutes <= 0.0 || return_minutes <= 0.0 {
            continue;
        }

        // A site strictly on the way costs nothing extra.
        let detour_minutes =
            ((pickup_minutes + return_minutes) - direct_minutes).max(0.0);
        if detour_minutes > effective_budget {
            continue;
        }

        if best
            .as_ref()
            .is_none_or(|current| detour_minutes < current.detour_minutes)
        {
            let pickup_miles = stops_to_sites.distance(stop_row, j);
            let return_miles = sites_to_base.distance(j, 0);
            let miles_delta = pickup_miles.unwrap_or(0.0) + return_miles.unwrap_or(0.0)
                - direct_miles;
            best = Some(DetourChoice {
                site: site.clone(),
                detour_minutes,
                miles_delta,
                pickup_miles,
                pickup_minutes,
                return_miles,
                return_minutes,
            });
        }
    }

    best
}
