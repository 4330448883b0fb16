//! Read-only snapshot of the simulation for renderers and tests

use brigade_logic::equipment::EquipmentRack;
use brigade_logic::inventory::Inventory;
use brigade_logic::mastery::MasteryBook;
use brigade_logic::mood::Mood;
use serde::{Deserialize, Serialize};

use crate::achievements::Achievement;
use crate::components::{Order, Staff, Vitals};
use crate::engine::SimPhase;
use crate::systems::{DaySummary, TopPerformer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffSnapshot {
    pub staff: Staff,
    pub vitals: Vitals,
    pub mood: Mood,
    pub traits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub tick: u64,
    pub day: u32,
    pub day_timer: u32,
    pub day_duration: u32,
    pub phase: SimPhase,
    pub revenue: i64,
    pub total_earned: i64,
    pub reputation: u32,
    pub satisfaction: f32,
    pub rating: f32,
    pub happy_customers: u32,
    pub unhappy_customers: u32,
    pub average_wait: f32,
    pub spawn_chance: f32,
    /// Live orders by id
    pub orders: Vec<Order>,
    /// Staff by id
    pub staff: Vec<StaffSnapshot>,
    pub inventory: Inventory,
    pub equipment: EquipmentRack,
    pub mastery: MasteryBook,
    pub unlocked_recipes: Vec<String>,
    pub achievements: Vec<Achievement>,
    pub top_performer: Option<TopPerformer>,
    pub pending_summary: Option<DaySummary>,
    /// Most recent operator feedback, oldest first
    pub feedback: Vec<String>,
}

impl SimulationSnapshot {
    pub fn order(&self, id: u32) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn staff_member(&self, id: u32) -> Option<&StaffSnapshot> {
        self.staff.iter().find(|s| s.staff.id == id)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
