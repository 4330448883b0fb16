//! Pure simulation logic for Brigade.
//!
//! This crate contains the kitchen rules that are independent of the ECS
//! engine: configuration tables, pantry stock, equipment bonuses, recipe
//! mastery, the staff performance model and the economy formulas. Functions
//! take plain data and return results, so they can be tested in isolation.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Recipe/equipment/trait/mood/morale tables, balance parameters, JSON loading |
//! | [`constants`] | Fixed constants (completion threshold, log capacities) |
//! | [`economy`] | Spawn probability, pricing, day settlement, satisfaction, rating |
//! | [`equipment`] | Equipment levels and aggregate bonuses |
//! | [`inventory`] | Atomic ingredient checks, consumption and restocking |
//! | [`mastery`] | Per-recipe completion counts and mastery multipliers |
//! | [`mood`] | Mood table lookups and weighted mood re-rolls |
//! | [`performance`] | Fatigue, morale factors, efficiency composition, throughput |

pub mod config;
pub mod constants;
pub mod economy;
pub mod equipment;
pub mod inventory;
pub mod mastery;
pub mod mood;
pub mod performance;
