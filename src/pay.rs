//! Freight pay math and fleet fairness auditing.
//!
//! Pure functions over route totals; the auditor never mutates a plan.
//! The core computes in full precision; any rounding happens at the
//! presentation boundary.

use serde::Serialize;

use crate::model::RoutePlan;

/// Floor freight rate in dollars per ton.
pub const MIN_RATE_PER_TON: f64 = 7.00;
/// Dollars of freight rate accrued per mile, spread over a load.
pub const RATE_PER_MILE: f64 = 5.50;
/// One full truckload; every delivery is a full reload cycle.
pub const TONS_PER_LOAD: f64 = 24.0;
/// Driver's share of total freight revenue.
pub const DRIVER_PAY_PERCENT: f64 = 0.29;

/// Revenue and pay figures for one route.
#[derive(Debug, Clone, Serialize)]
pub struct PayBreakdown {
    pub distance_miles: f64,
    pub tons: f64,
    pub freight_rate_per_ton: f64,
    pub total_freight_revenue: f64,
    pub driver_pay: f64,
    /// `None` when hours are unknown or zero.
    pub pay_per_hour: Option<f64>,
}

/// Compute freight revenue and driver pay for a route.
///
/// Rate per ton is `max($7.00, $5.50 * miles / 24)`. No miles or no tons
/// means no pay, regardless of hours. Negative inputs clamp to zero.
pub fn route_pay(distance_miles: f64, tons: f64, hours: Option<f64>) -> PayBreakdown {
    let distance_miles = distance_miles.max(0.0);
    let tons = tons.max(0.0);

    if distance_miles == 0.0 || tons == 0.0 {
        return PayBreakdown {
            distance_miles,
            tons,
            freight_rate_per_ton: 0.0,
            total_freight_revenue: 0.0,
            driver_pay: 0.0,
            pay_per_hour: match hours {
                Some(h) if h > 0.0 => Some(0.0),
                _ => None,
            },
        };
    }

    let freight_rate_per_ton = MIN_RATE_PER_TON.max(RATE_PER_MILE * distance_miles / TONS_PER_LOAD);
    let total_freight_revenue = freight_rate_per_ton * tons;
    let driver_pay = DRIVER_PAY_PERCENT * total_freight_revenue;

    let pay_per_hour = match hours {
        Some(h) if h > 0.0 => Some(driver_pay / h),
        _ => None,
    };

    PayBreakdown {
        distance_miles,
        tons,
        freight_rate_per_ton,
        total_freight_revenue,
        driver_pay,
        pay_per_hour,
    }
}

/// Per-driver figures within a fairness report.
#[derive(Debug, Clone, Serialize)]
pub struct DriverStats {
    pub name: String,
    pub deliveries: usize,
    pub hours: f64,
    pub minutes: f64,
    pub distance_miles: f64,
    pub tons: f64,
    pub pay: f64,
    pub pay_per_hour: Option<f64>,
}

/// Fleet-wide pay-per-hour fairness summary.
#[derive(Debug, Clone, Serialize)]
pub struct FairnessReport {
    pub driver_stats: Vec<DriverStats>,
    /// Average over drivers with hours > 0; zero when none qualify.
    pub avg_pay_per_hour: f64,
    /// Largest percentage deviation from the average; zero when the
    /// average is zero or no driver qualifies.
    pub max_deviation_percent: f64,
}

/// Audit a finished plan: per-driver pay plus fleet deviation.
///
/// Read-only; degrades to zero/`None` figures for idle or zero-hours
/// drivers instead of failing.
pub fn audit_fairness(plan: &RoutePlan) -> FairnessReport {
    let driver_stats: Vec<DriverStats> = plan
        .routes
        .iter()
        .map(|route| {
            let minutes = route.total_duration_minutes;
            let hours = minutes / 60.0;
            let tons = route.deliveries.len() as f64 * TONS_PER_LOAD;
            let breakdown = route_pay(
                route.total_distance_miles,
                tons,
                if hours > 0.0 { Some(hours) } else { None },
            );
            DriverStats {
                name: route.driver.clone(),
                deliveries: route.deliveries.len(),
                hours,
                minutes,
                distance_miles: route.total_distance_miles,
                tons,
                pay: breakdown.driver_pay,
                pay_per_hour: breakdown.pay_per_hour,
            }
        })
        .collect();

    let rates: Vec<f64> = driver_stats
        .iter()
        .filter(|stats| stats.hours > 0.0)
        .filter_map(|stats| stats.pay_per_hour)
        .collect();

    let avg_pay_per_hour = if rates.is_empty() {
        0.0
    } else {
        rates.iter().sum::<f64>() / rates.len() as f64
    };

    let max_deviation_percent = if avg_pay_per_hour == 0.0 {
        0.0
    } else {
        rates
            .iter()
            .map(|rate| (rate - avg_pay_per_hour).abs() / avg_pay_per_hour * 100.0)
            .fold(0.0, f64::max)
    };

    FairnessReport {
        driver_stats,
        avg_pay_per_hour,
        max_deviation_percent,
    }
}
