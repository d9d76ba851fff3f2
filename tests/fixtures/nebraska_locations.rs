//! Central Nebraska locations for realistic test fixtures.
//!
//! Mileage and drive times approximate real highway legs out of the
//! Grand Island reload base, so planner behavior in tests mirrors a real
//! dispatch day.

use haul_planner::model::DEFAULT_BASE_RELOAD_LOCATION;
use haul_planner::table::TableOracle;

pub const BASE: &str = DEFAULT_BASE_RELOAD_LOCATION;

// ============================================================================
// Delivery towns (round trips from the base)
// ============================================================================

pub const KEARNEY: &str = "Kearney, NE";
pub const HASTINGS: &str = "Hastings, NE";
pub const YORK: &str = "York, NE";
pub const NORFOLK: &str = "Norfolk, NE";
pub const LINCOLN: &str = "Lincoln, NE";
pub const COLUMBUS: &str = "Columbus, NE";

// ============================================================================
// Backhaul pickup sites
// ============================================================================

pub const AURORA_SITE: &str = "Aurora, NE";
pub const WOOD_RIVER_SITE: &str = "Wood River, NE";
pub const CENTRAL_CITY_SITE: &str = "Central City, NE";

/// Oracle seeded with symmetric base<->town legs plus the site legs the
/// backhaul inserter needs.
pub fn fleet_oracle() -> TableOracle {
    let mut oracle = TableOracle::new();

    // Base round trips: (miles, minutes) each way.
    oracle.set_symmetric(BASE, KEARNEY, 46.0, 48.0);
    oracle.set_symmetric(BASE, HASTINGS, 25.0, 30.0);
    oracle.set_symmetric(BASE, YORK, 40.0, 42.0);
    oracle.set_symmetric(BASE, NORFOLK, 95.0, 100.0);
    oracle.set_symmetric(BASE, LINCOLN, 93.0, 92.0);
    oracle.set_symmetric(BASE, COLUMBUS, 65.0, 70.0);

    // Stop -> site -> base legs for backhaul candidates.
    oracle.set(YORK, AURORA_SITE, 22.0, 24.0);
    oracle.set(AURORA_SITE, BASE, 20.0, 22.0);
    oracle.set(KEARNEY, WOOD_RIVER_SITE, 30.0, 32.0);
    oracle.set(WOOD_RIVER_SITE, BASE, 17.0, 18.0);
    oracle.set(COLUMBUS, CENTRAL_CITY_SITE, 40.0, 44.0);
    oracle.set(CENTRAL_CITY_SITE, BASE, 24.0, 26.0);

    oracle
}
