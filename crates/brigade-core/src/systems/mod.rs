//! Systems - logic that operates on components
//!
//! Free functions over `&mut World` plus the restaurant state they touch.
//! The engine calls them in a fixed order every tick.

mod lookup;
mod assignment;
mod orders;
mod staff;
mod generation;
mod day;

pub use lookup::*;
pub use assignment::*;
pub use orders::*;
pub use staff::*;
pub use generation::*;
pub use day::*;
