//! Brigade Core - Restaurant Kitchen Simulation Engine
//!
//! An ECS-based simulation of a restaurant kitchen: customer orders arrive,
//! staff cook them under fatigue, morale and mood, and each service day is
//! settled against the till.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Orders and staff members
//! - **Components**: Pure data attached to entities (Order, Staff, Vitals, MoodState, Traits)
//! - **Systems**: Free functions that query and update components once per tick
//!
//! Restaurant-wide state (money, pantry, equipment, mastery) lives beside
//! the world in [`restaurant::Restaurant`]. Balance rules are pure
//! functions in `brigade-logic`.
//!
//! # Example
//!
//! ```rust,no_run
//! use brigade_core::prelude::*;
//!
//! let mut engine = SimulationEngine::with_seed(GameConfig::default(), 42);
//! engine.start_day().unwrap();
//!
//! loop {
//!     engine.advance();
//!     if engine.phase() == SimPhase::AwaitingDayConfirmation {
//!         engine.acknowledge_day_boundary().unwrap();
//!     }
//!     for event in engine.drain_events() {
//!         println!("{:?}", event);
//!     }
//! }
//! ```

pub mod achievements;
pub mod components;
pub mod engine;
pub mod error;
pub mod events;
pub mod generation;
pub mod restaurant;
pub mod snapshot;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{SimPhase, SimulationEngine};
    pub use crate::error::ActionError;
    pub use crate::events::DomainEvent;
    pub use crate::snapshot::SimulationSnapshot;
    pub use brigade_logic::config::GameConfig;
}
