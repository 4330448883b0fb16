//! Operator action errors.
//!
//! Every operator method on [`crate::engine::SimulationEngine`] returns
//! `Result<_, ActionError>`. A rejected action leaves the simulation
//! unchanged apart from a negative feedback event.

use brigade_logic::inventory::InventoryError;

use crate::components::OrderStatus;
use crate::engine::SimPhase;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ActionError {
    #[error("order #{0} not found")]
    OrderNotFound(u32),

    #[error("staff member #{0} not found")]
    StaffNotFound(u32),

    #[error("unknown equipment '{0}'")]
    EquipmentNotFound(String),

    #[error("unknown recipe '{0}'")]
    UnknownRecipe(String),

    #[error("recipe '{0}' is not unlocked yet")]
    RecipeLocked(String),

    #[error("unknown ingredient '{0}'")]
    UnknownIngredient(String),

    #[error("order #{order_id} is {status:?}")]
    InvalidOrderState { order_id: u32, status: OrderStatus },

    #[error("no staff available for order #{0}")]
    NoAvailableStaff(u32),

    #[error("not enough {ingredient}: need {needed}, have {available}")]
    InsufficientIngredients {
        ingredient: String,
        needed: u32,
        available: u32,
    },

    #[error("not enough revenue: costs ${cost}, have ${available}")]
    InsufficientFunds { cost: i64, available: i64 },

    #[error("already at max level")]
    LevelCapReached,

    #[error("kitchen is full ({0} staff)")]
    StaffCapReached(usize),

    #[error("staff member #{0} is busy")]
    StaffBusy(u32),

    #[error("order board is full ({0} live orders)")]
    AtCapacity(usize),

    #[error("an order needs at least one item")]
    EmptyOrder,

    #[error("simulation is not running")]
    NotRunning,

    #[error("cannot do that while {0:?}")]
    WrongPhase(SimPhase),

    #[error("game over")]
    GameOver,
}

impl From<InventoryError> for ActionError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::UnknownIngredient(name) => ActionError::UnknownIngredient(name),
            InventoryError::Insufficient {
                ingredient,
                needed,
                available,
            } => ActionError::InsufficientIngredients {
                ingredient,
                needed,
                available,
            },
        }
    }
}
