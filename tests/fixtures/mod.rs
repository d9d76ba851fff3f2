//! Test fixtures for haul-planner.
//!
//! Provides realistic test data including:
//! - Central Nebraska towns and backhaul sites
//! - A pre-seeded table oracle with approximate highway legs

pub mod nebraska_locations;

#[allow(unused_imports)]
pub use nebraska_locations::*;
