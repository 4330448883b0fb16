//! Generation - procedural creation of staff

mod names;
mod staff;

pub use names::*;
pub use staff::*;
