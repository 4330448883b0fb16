//! Staff components: Staff, Vitals, MoodState, Traits

use brigade_logic::config::{Cuisine, GameConfig};
use brigade_logic::mood::{mood_multiplier, Mood};
use brigade_logic::performance::{efficiency, MoraleContext, StaffStatus, TraitModifiers};
use serde::{Deserialize, Serialize};

/// Identity, skill and record of a staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: u32,
    pub name: String,
    pub role: String,
    pub specialty: Cuisine,
    pub base_efficiency: f32,
    /// Recomputed every tick from base, upgrades, fatigue, morale and mood
    pub efficiency: f32,
    pub upgrade_level: u8,
    pub status: StaffStatus,
    pub current_order: Option<u32>,
    /// 0 to the trait-adjusted cap (100 plus trait performance)
    pub performance: f32,
    pub loyalty: f32,
    pub orders_completed: u32,
    pub day_orders: u32,
    pub month_orders: u32,
}

impl Staff {
    pub fn is_available(&self) -> bool {
        self.status == StaffStatus::Available
    }

    /// Take an order
    pub fn begin(&mut self, order_id: u32) {
        self.status = StaffStatus::Busy;
        self.current_order = Some(order_id);
    }

    /// Drop the current order and go back to `Available` or `Resting`
    pub fn release(&mut self, rest: bool) {
        self.current_order = None;
        self.status = if rest {
            StaffStatus::Resting
        } else {
            StaffStatus::Available
        };
    }
}

/// Fatigue, morale and streak tracking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    /// 0-100, rises while busy
    pub fatigue: f32,
    /// 0-100
    pub morale: f32,
    pub consecutive_orders: u32,
    /// Ticks spent Available without work
    pub idle_ticks: u32,
}

impl Vitals {
    pub fn fresh(baseline_morale: f32) -> Self {
        Self {
            fatigue: 0.0,
            morale: baseline_morale,
            consecutive_orders: 0,
            idle_ticks: 0,
        }
    }
}

/// Current mood and ticks until it is re-rolled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodState {
    pub mood: Mood,
    pub timer: u32,
}

/// Immutable personality modifiers assigned at hire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    pub ids: Vec<String>,
    pub modifiers: TraitModifiers,
}

impl Traits {
    pub fn from_ids(ids: Vec<String>, config: &GameConfig) -> Self {
        let modifiers = TraitModifiers::from_traits(&config.traits, &ids);
        Self { ids, modifiers }
    }

    /// Ceiling of the performance score for this staff member
    pub fn performance_cap(&self, config: &GameConfig) -> f32 {
        self.modifiers.performance_cap(&config.performance)
    }
}

/// Recompose `staff.efficiency` from its inputs
pub fn refresh_efficiency(staff: &mut Staff, vitals: &Vitals, mood: &MoodState, config: &GameConfig) {
    staff.efficiency = efficiency(
        staff.base_efficiency,
        staff.upgrade_level,
        vitals.fatigue,
        vitals.morale,
        mood_multiplier(&config.moods, mood.mood),
        &config.performance,
    );
}

/// Inputs that gate morale factors for this staff member
pub fn morale_context(staff: &Staff, vitals: &Vitals) -> MoraleContext {
    MoraleContext {
        fatigue: vitals.fatigue,
        performance: staff.performance,
        consecutive_orders: vitals.consecutive_orders,
        idle_ticks: vitals.idle_ticks,
    }
}
