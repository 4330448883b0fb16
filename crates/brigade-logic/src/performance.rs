//! Staff performance model: fatigue, morale factors, efficiency and throughput.
//!
//! Efficiency is composed in a fixed order so results are reproducible:
//!
//! ```text
//! efficiency = base × (1 + upgrade × bonus) × fatigue(f) × morale(m) × mood
//! ```
//!
//! Throughput modifiers (specialty, mastery, top performer, cooking speed)
//! are applied only when progress is added to an order and never stored in
//! `efficiency` itself.
//!
//! ```
//! use brigade_logic::config::PerformanceConfig;
//! use brigade_logic::performance::efficiency;
//!
//! let cfg = PerformanceConfig::default();
//! let e = efficiency(0.8, 1, 10.0, 50.0, 1.0, &cfg);
//! assert!((e - 0.88).abs() < 1e-5);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{MoraleCondition, MoraleFactor, PerformanceConfig, TraitDef};

/// Upper bound of fatigue, morale and loyalty.
pub const STAT_MAX: f32 = 100.0;

/// Work status of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffStatus {
    Available,
    Busy,
    Resting,
}

/// Named events that move morale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoraleEvent {
    /// Evaluated every tick.
    HighFatigue,
    /// Evaluated every tick.
    LowFatigueHighPerformance,
    /// Evaluated every tick.
    LongIdle,
    OrderCompleted,
    SpecialtyMatch,
    OrderStreak,
    OrderFailed,
    Preempted,
    ColleagueDismissed,
}

impl MoraleEvent {
    /// Factors checked on every tick rather than on a discrete event.
    pub const AMBIENT: [MoraleEvent; 3] = [
        MoraleEvent::HighFatigue,
        MoraleEvent::LowFatigueHighPerformance,
        MoraleEvent::LongIdle,
    ];
}

/// Aggregated effect of a staff member's traits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitModifiers {
    /// Additive performance points.
    pub performance: f32,
    /// Product of fatigue rate multipliers.
    pub fatigue_rate: f32,
    /// Product of morale gain multipliers.
    pub morale_gain: f32,
}

impl Default for TraitModifiers {
    fn default() -> Self {
        Self {
            performance: 0.0,
            fatigue_rate: 1.0,
            morale_gain: 1.0,
        }
    }
}

impl TraitModifiers {
    /// Combine the named traits; unknown ids are skipped.
    pub fn from_traits(defs: &[TraitDef], ids: &[String]) -> Self {
        ids.iter()
            .filter_map(|id| defs.iter().find(|d| &d.id == id))
            .fold(Self::default(), |acc, t| Self {
                performance: acc.performance + t.performance,
                fatigue_rate: acc.fatigue_rate * t.fatigue_rate,
                morale_gain: acc.morale_gain * t.morale_gain,
            })
    }

    /// Ceiling of the performance score for this trait set.
    pub fn performance_cap(&self, config: &PerformanceConfig) -> f32 {
        (config.base_performance + self.performance).max(0.0)
    }
}

/// Compose the current efficiency of a staff member.
pub fn efficiency(
    base_efficiency: f32,
    upgrade_level: u8,
    fatigue: f32,
    morale: f32,
    mood_multiplier: f32,
    config: &PerformanceConfig,
) -> f32 {
    base_efficiency
        * (1.0 + upgrade_level as f32 * config.upgrade_bonus_per_level)
        * config.fatigue_curve.eval(fatigue)
        * config.morale_curve.eval(morale)
        * mood_multiplier
}

/// Signed fatigue change for one tick in the given status.
pub fn fatigue_delta(
    status: StaffStatus,
    fatigue_reduction: f32,
    traits: &TraitModifiers,
    config: &PerformanceConfig,
) -> f32 {
    match status {
        StaffStatus::Busy => {
            config.fatigue_gain_rate * (1.0 - fatigue_reduction) * traits.fatigue_rate
        }
        StaffStatus::Available => -config.idle_recovery_rate,
        StaffStatus::Resting => -config.rest_recovery_rate,
    }
}

/// Apply one tick of fatigue change, clamped to 0–100.
pub fn apply_fatigue(
    fatigue: f32,
    status: StaffStatus,
    fatigue_reduction: f32,
    traits: &TraitModifiers,
    config: &PerformanceConfig,
) -> f32 {
    (fatigue + fatigue_delta(status, fatigue_reduction, traits, config)).clamp(0.0, STAT_MAX)
}

/// Whether a resting staff member is recovered enough to work.
pub fn ready_to_return(fatigue: f32, config: &PerformanceConfig) -> bool {
    fatigue < config.rest_exit_threshold
}

/// Whether a staff member finishing an order should go rest.
pub fn needs_rest(fatigue: f32, config: &PerformanceConfig) -> bool {
    config.auto_rest && fatigue > config.auto_rest_threshold
}

/// Inputs to morale factor gating.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoraleContext {
    pub fatigue: f32,
    pub performance: f32,
    pub consecutive_orders: u32,
    pub idle_ticks: u32,
}

impl MoraleCondition {
    pub fn holds(&self, ctx: &MoraleContext) -> bool {
        self.min_fatigue.map_or(true, |v| ctx.fatigue >= v)
            && self.max_fatigue.map_or(true, |v| ctx.fatigue <= v)
            && self.min_performance.map_or(true, |v| ctx.performance >= v)
            && self
                .min_consecutive_orders
                .map_or(true, |v| ctx.consecutive_orders >= v)
            && self.min_idle_ticks.map_or(true, |v| ctx.idle_ticks >= v)
    }
}

/// Sum the deltas of every factor triggered by `events` whose condition holds.
///
/// Positive deltas are scaled by the trait morale gain; penalties are not.
pub fn morale_delta(
    factors: &[MoraleFactor],
    events: &[MoraleEvent],
    ctx: &MoraleContext,
    traits: &TraitModifiers,
) -> f32 {
    factors
        .iter()
        .filter(|f| events.contains(&f.event) && f.condition.holds(ctx))
        .map(|f| {
            if f.delta > 0.0 {
                f.delta * traits.morale_gain
            } else {
                f.delta
            }
        })
        .sum()
}

pub fn apply_morale(morale: f32, delta: f32) -> f32 {
    (morale + delta).clamp(0.0, STAT_MAX)
}

/// Per-order multipliers applied at the point progress is added.
#[derive(Debug, Clone, Copy)]
pub struct ThroughputInput {
    pub efficiency: f32,
    pub specialty_match: bool,
    pub mastery_speed: f32,
    pub top_performer: bool,
    /// Cooking-speed factor fixed on the order at creation.
    pub speed_factor: f32,
}

/// Progress points added to an order this tick.
pub fn progress_per_tick(input: &ThroughputInput, config: &PerformanceConfig) -> f32 {
    let specialty = if input.specialty_match {
        1.0 + config.specialty_bonus
    } else {
        1.0
    };
    let top = if input.top_performer {
        1.0 + config.top_performer_bonus
    } else {
        1.0
    };
    input.efficiency
        * config.throughput
        * specialty
        * input.mastery_speed
        * top
        * input.speed_factor
}
