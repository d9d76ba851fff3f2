//! haul-planner core
//!
//! Same-day route assignment for a small fleet working out of a shared
//! reload base: fairness-first stop assignment, opportunistic backhaul
//! insertion on return legs, and per-driver pay/fairness auditing.

pub mod model;
pub mod matrix;
pub mod google;
pub mod table;
pub mod builder;
pub mod backhaul;
pub mod pay;
