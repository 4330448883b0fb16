//! Achievements - one-shot milestones announced through the event log

use brigade_logic::config::GameConfig;
use serde::{Deserialize, Serialize};

use crate::events::{DomainEvent, EventLog};
use crate::restaurant::Restaurant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Achievement {
    FirstOrder,
    TenOrders,
    FiftyOrders,
    FirstVip,
    /// A day closed with at least five completions and no failures
    PerfectDay,
    /// Staff count reached the hiring cap
    FullBrigade,
    Tycoon,
}

impl Achievement {
    pub fn title(&self) -> &'static str {
        match self {
            Achievement::FirstOrder => "First Order",
            Achievement::TenOrders => "Getting Busy",
            Achievement::FiftyOrders => "Well Oiled",
            Achievement::FirstVip => "Red Carpet",
            Achievement::PerfectDay => "Perfect Day",
            Achievement::FullBrigade => "Full Brigade",
            Achievement::Tycoon => "Tycoon",
        }
    }
}

const PERFECT_DAY_MIN_ORDERS: u32 = 5;

/// Milestones currently satisfied, excluding the end-of-day ones
fn reached(restaurant: &Restaurant, staff_count: usize, config: &GameConfig) -> Vec<Achievement> {
    let mut out = Vec::new();
    let done = restaurant.orders_completed;
    if done >= 1 {
        out.push(Achievement::FirstOrder);
    }
    if done >= 10 {
        out.push(Achievement::TenOrders);
    }
    if done >= 50 {
        out.push(Achievement::FiftyOrders);
    }
    if restaurant.vip_served >= 1 {
        out.push(Achievement::FirstVip);
    }
    if staff_count >= config.economy.max_staff {
        out.push(Achievement::FullBrigade);
    }
    if restaurant.revenue >= config.economy.tycoon_revenue {
        out.push(Achievement::Tycoon);
    }
    out
}

fn unlock(restaurant: &mut Restaurant, achievement: Achievement, events: &mut EventLog) {
    if restaurant.achievements.insert(achievement) {
        log::info!("Achievement unlocked: {}", achievement.title());
        events.push(DomainEvent::AchievementUnlocked(achievement));
    }
}

/// Unlock everything newly satisfied. Returns how many were unlocked.
pub fn check_achievements(
    restaurant: &mut Restaurant,
    staff_count: usize,
    config: &GameConfig,
    events: &mut EventLog,
) -> usize {
    let before = restaurant.achievements.len();
    for achievement in reached(restaurant, staff_count, config) {
        unlock(restaurant, achievement, events);
    }
    restaurant.achievements.len() - before
}

/// End-of-day milestone, checked against the day that just closed
pub fn check_day_achievements(restaurant: &mut Restaurant, events: &mut EventLog) {
    let today = restaurant.today;
    if today.completed >= PERFECT_DAY_MIN_ORDERS && today.failed == 0 {
        unlock(restaurant, Achievement::PerfectDay, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_achievement_fires_once() {
        let config = GameConfig::default();
        let mut restaurant = Restaurant::new(&config);
        let mut events = EventLog::new();

        restaurant.orders_completed = 1;
        assert_eq!(check_achievements(&mut restaurant, 4, &config, &mut events), 1);
        assert_eq!(check_achievements(&mut restaurant, 4, &config, &mut events), 0);
        assert_eq!(
            events.drain(),
            vec![DomainEvent::AchievementUnlocked(Achievement::FirstOrder)]
        );
    }

    #[test]
    fn full_brigade_and_tycoon() {
        let config = GameConfig::default();
        let mut restaurant = Restaurant::new(&config);
        let mut events = EventLog::new();
        restaurant.revenue = 1000;
        check_achievements(&mut restaurant, config.economy.max_staff, &config, &mut events);
        assert!(restaurant.achievements.contains(&Achievement::FullBrigade));
        assert!(restaurant.achievements.contains(&Achievement::Tycoon));
        assert!(!restaurant.achievements.contains(&Achievement::FirstOrder));
    }

    #[test]
    fn perfect_day_needs_volume_and_no_failures() {
        let config = GameConfig::default();
        let mut restaurant = Restaurant::new(&config);
        let mut events = EventLog::new();

        restaurant.today.completed = 6;
        restaurant.today.failed = 1;
        check_day_achievements(&mut restaurant, &mut events);
        assert!(events.is_empty());

        restaurant.today.failed = 0;
        check_day_achievements(&mut restaurant, &mut events);
        assert!(restaurant.achievements.contains(&Achievement::PerfectDay));
    }
}
