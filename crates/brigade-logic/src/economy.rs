//! Pure economy logic for spawn pressure, pricing, settlement and satisfaction.

use serde::{Deserialize, Serialize};

use crate::config::{EconomyConfig, OrderConfig};

/// Part of the service day, used to shape order pressure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayPhase {
    Quiet,
    Steady,
    Rush,
}

/// Base spawn chance for a day: grows with each day up to a ceiling.
pub fn spawn_chance_for_day(day: u32, config: &OrderConfig) -> f32 {
    let grown = config.base_spawn_chance + day.saturating_sub(1) as f32 * config.spawn_chance_step;
    grown.min(config.max_spawn_chance)
}

pub fn day_phase(day_timer: u32, day_duration: u32, config: &OrderConfig) -> DayPhase {
    let elapsed = if day_duration == 0 {
        1.0
    } else {
        day_timer as f32 / day_duration as f32
    };
    if elapsed < config.quiet_until {
        DayPhase::Quiet
    } else if elapsed < config.rush_after {
        DayPhase::Steady
    } else {
        DayPhase::Rush
    }
}

pub fn phase_multiplier(phase: DayPhase, config: &OrderConfig) -> f32 {
    match phase {
        DayPhase::Quiet => config.quiet_multiplier,
        DayPhase::Steady => config.steady_multiplier,
        DayPhase::Rush => config.rush_multiplier,
    }
}

/// Probability that one generation attempt produces an order.
pub fn spawn_probability(
    spawn_chance: f32,
    day_timer: u32,
    day_duration: u32,
    available_staff: usize,
    config: &OrderConfig,
) -> f64 {
    let phase = phase_multiplier(day_phase(day_timer, day_duration, config), config);
    let staff = config.staff_factor_base + available_staff as f32 * config.staff_factor_per_available;
    let p = spawn_chance * phase * staff;
    (p as f64).clamp(0.0, config.max_spawn_probability as f64)
}

/// Final price of an order, rounded to whole currency units.
pub fn order_price(
    item_total: u32,
    price_boost: f32,
    vip: bool,
    mastery_multiplier: f32,
    config: &OrderConfig,
) -> u32 {
    let vip_mult = if vip { config.vip_price_multiplier } else { 1.0 };
    (item_total as f32 * (1.0 + price_boost) * vip_mult * mastery_multiplier).round() as u32
}

/// Deadline for an order whose slowest item takes `max_item_time`.
pub fn time_limit(max_item_time: u32, config: &OrderConfig) -> u32 {
    max_item_time + config.time_buffer
}

/// Lost value of an order left unfinished at closing.
pub fn unfinished_penalty(total_price: u32, progress: f32) -> f32 {
    let completed = (progress / 100.0).clamp(0.0, 1.0);
    total_price as f32 * (1.0 - completed)
}

/// Sum of penalties over `(total_price, progress)` pairs, rounded.
pub fn settlement_penalty(unfinished: impl IntoIterator<Item = (u32, f32)>) -> i64 {
    unfinished
        .into_iter()
        .map(|(price, progress)| unfinished_penalty(price, progress))
        .sum::<f32>()
        .round() as i64
}

pub fn end_of_day_bonus(revenue: i64, config: &EconomyConfig) -> i64 {
    if revenue <= 0 {
        0
    } else {
        (revenue as f64 * config.end_of_day_bonus_rate as f64).floor() as i64
    }
}

pub fn reputation_bonus(reputation: u32, config: &EconomyConfig) -> i64 {
    (reputation as f64 * config.reputation_bonus_rate as f64).floor() as i64
}

/// Satisfaction after applying `delta`, clamped to 0–100.
pub fn adjust_satisfaction(current: f32, delta: f32) -> f32 {
    (current + delta).clamp(0.0, 100.0)
}

/// Average star rating out of 5; an unserved restaurant rates 5.0.
pub fn average_rating(happy: u32, unhappy: u32) -> f32 {
    let total = happy + unhappy;
    if total == 0 {
        5.0
    } else {
        happy as f32 / total as f32 * 5.0
    }
}

/// Whether a purchase of `cost` is affordable without emptying the till.
pub fn can_afford(revenue: i64, cost: i64) -> bool {
    revenue > cost
}
