//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to entities.
//! Orders and staff members are entities; everything restaurant-wide lives
//! in [`crate::restaurant::Restaurant`].

mod order;
mod staff;

pub use order::*;
pub use staff::*;
