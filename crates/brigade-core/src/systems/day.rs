//! Day settlement - closing the books at the day boundary
//!
//! The boundary produces a [`DaySummary`] preview. Acknowledging it charges
//! the penalty for unfinished work; if the restaurant survives, live orders
//! are cleared, staff are reset and bonuses are paid.

use brigade_logic::config::GameConfig;
use brigade_logic::economy::{end_of_day_bonus, reputation_bonus, settlement_penalty};
use brigade_logic::performance::StaffStatus;
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};

use crate::components::{refresh_efficiency, MoodState, Order, OrderStatus, Staff, Vitals};
use crate::restaurant::Restaurant;

/// Throughput bonus granted to the previous day's best staff member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopPerformer {
    pub staff_id: u32,
    pub remaining_ticks: u32,
}

impl TopPerformer {
    /// Count down one tick. Returns false once the bonus has run out.
    pub fn tick(&mut self) -> bool {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        self.remaining_ticks > 0
    }
}

/// End-of-day report, computed at the boundary and again at settlement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub day: u32,
    pub orders_completed: u32,
    pub orders_failed: u32,
    pub earned: i64,
    /// InProgress or Paused orders someone had started
    pub unfinished_orders: usize,
    pub penalty: i64,
    pub revenue_after_penalty: i64,
    pub end_of_day_bonus: i64,
    pub reputation_bonus: i64,
    pub top_performer: Option<u32>,
}

impl DaySummary {
    /// Whether the restaurant stays open after the penalty
    pub fn survives(&self) -> bool {
        self.revenue_after_penalty > 0
    }

    pub fn total_bonus(&self) -> i64 {
        self.end_of_day_bonus + self.reputation_bonus
    }
}

/// Staff member with the most completions today; ties to the lowest id,
/// nobody if nothing was completed
pub fn top_performer_of_day(world: &World) -> Option<u32> {
    world
        .query::<&Staff>()
        .iter()
        .filter(|(_, s)| s.day_orders > 0)
        .map(|(_, s)| (s.day_orders, s.id))
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)))
        .map(|(_, id)| id)
}

pub fn summarize_day(world: &World, restaurant: &Restaurant, config: &GameConfig, day: u32) -> DaySummary {
    let unfinished: Vec<(u32, f32)> = world
        .query::<&Order>()
        .iter()
        .filter(|(_, o)| {
            matches!(o.status, OrderStatus::InProgress | OrderStatus::Paused)
                && o.last_assignee.is_some()
        })
        .map(|(_, o)| (o.total_price, o.progress))
        .collect();

    let penalty = settlement_penalty(unfinished.iter().copied());
    let revenue_after_penalty = restaurant.revenue - penalty;
    let (eod, rep) = if revenue_after_penalty > 0 {
        (
            end_of_day_bonus(revenue_after_penalty, &config.economy),
            reputation_bonus(restaurant.reputation, &config.economy),
        )
    } else {
        (0, 0)
    };

    DaySummary {
        day,
        orders_completed: restaurant.today.completed,
        orders_failed: restaurant.today.failed,
        earned: restaurant.today.earned,
        unfinished_orders: unfinished.len(),
        penalty,
        revenue_after_penalty,
        end_of_day_bonus: eod,
        reputation_bonus: rep,
        top_performer: top_performer_of_day(world),
    }
}

/// Apply a settlement. Returns false (and only charges the penalty) when
/// the restaurant cannot cover it.
pub fn settle_day(
    world: &mut World,
    restaurant: &mut Restaurant,
    config: &GameConfig,
    summary: &DaySummary,
    new_month: bool,
) -> bool {
    restaurant.revenue -= summary.penalty;
    if restaurant.revenue <= 0 {
        return false;
    }

    let orders: Vec<Entity> = world.query::<&Order>().iter().map(|(e, _)| e).collect();
    for entity in orders {
        let _ = world.despawn(entity);
    }

    for (_, (staff, vitals, mood)) in world.query_mut::<(&mut Staff, &mut Vitals, &MoodState)>() {
        *vitals = Vitals::fresh(config.performance.baseline_morale);
        staff.status = StaffStatus::Available;
        staff.current_order = None;
        staff.day_orders = 0;
        if new_month {
            staff.month_orders = 0;
        }
        refresh_efficiency(staff, vitals, mood, config);
    }

    restaurant.revenue += summary.total_bonus();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{LineItem, Traits};
    use brigade_logic::config::Cuisine;
    use brigade_logic::inventory::Requirements;
    use brigade_logic::mood::Mood;

    fn staff(world: &mut World, config: &GameConfig, id: u32, day_orders: u32) -> Entity {
        let s = Staff {
            id,
            name: format!("Cook {}", id),
            role: "Line Cook".into(),
            specialty: Cuisine::Grill,
            base_efficiency: 0.8,
            efficiency: 0.8,
            upgrade_level: 0,
            status: StaffStatus::Busy,
            current_order: Some(1),
            performance: 100.0,
            loyalty: 50.0,
            orders_completed: day_orders,
            day_orders,
            month_orders: day_orders,
        };
        let vitals = Vitals {
            fatigue: 70.0,
            morale: 20.0,
            consecutive_orders: 3,
            idle_ticks: 0,
        };
        let mood = MoodState { mood: Mood::Neutral, timer: 100 };
        world.spawn((s, vitals, mood, Traits::from_ids(Vec::new(), config)))
    }

    fn started_order(config: &GameConfig, price: u32, progress: f32) -> Order {
        let recipe = config.recipe("beef_steak").unwrap();
        let mut o = Order::new(1, vec![LineItem::from_recipe(recipe)], price, 210, Requirements::new(), false);
        o.start(1);
        o.progress = progress;
        o
    }

    #[test]
    fn top_performer_ties_to_lowest_id() {
        let config = GameConfig::default();
        let mut world = World::new();
        assert_eq!(top_performer_of_day(&world), None);
        staff(&mut world, &config, 4, 3);
        staff(&mut world, &config, 2, 3);
        staff(&mut world, &config, 1, 1);
        assert_eq!(top_performer_of_day(&world), Some(2));
    }

    #[test]
    fn nobody_is_top_on_an_empty_day() {
        let config = GameConfig::default();
        let mut world = World::new();
        staff(&mut world, &config, 1, 0);
        assert_eq!(top_performer_of_day(&world), None);
    }

    #[test]
    fn penalty_only_counts_started_orders() {
        let config = GameConfig::default();
        let mut world = World::new();
        let mut restaurant = Restaurant::new(&config);
        restaurant.reputation = 9;
        world.spawn((started_order(&config, 50, 60.0),));
        let recipe = config.recipe("cheese_pizza").unwrap();
        world.spawn((Order::new(2, vec![LineItem::from_recipe(recipe)], 14, 150, Requirements::new(), false),));

        let summary = summarize_day(&world, &restaurant, &config, 1);
        assert_eq!(summary.unfinished_orders, 1);
        assert_eq!(summary.penalty, 20);
        assert_eq!(summary.revenue_after_penalty, 480);
        assert_eq!(summary.end_of_day_bonus, 48);
        assert_eq!(summary.reputation_bonus, 4);
        assert!(summary.survives());
    }

    #[test]
    fn settlement_resets_the_kitchen() {
        let config = GameConfig::default();
        let mut world = World::new();
        let mut restaurant = Restaurant::new(&config);
        let cook = staff(&mut world, &config, 1, 2);
        world.spawn((started_order(&config, 50, 0.0),));

        let summary = summarize_day(&world, &restaurant, &config, 1);
        assert!(settle_day(&mut world, &mut restaurant, &config, &summary, false));

        // 500 - 50 = 450, bonus 45
        assert_eq!(restaurant.revenue, 495);
        assert_eq!(world.query::<&Order>().iter().count(), 0);
        let s = world.get::<&Staff>(cook).unwrap();
        assert_eq!(s.status, StaffStatus::Available);
        assert_eq!(s.day_orders, 0);
        assert_eq!(s.month_orders, 2);
        let v = world.get::<&Vitals>(cook).unwrap();
        assert_eq!(v.fatigue, 0.0);
        assert_eq!(v.morale, 50.0);
        assert_eq!(v.consecutive_orders, 0);
    }

    #[test]
    fn unpayable_penalty_closes_the_restaurant() {
        let config = GameConfig::default();
        let mut world = World::new();
        let mut restaurant = Restaurant::new(&config);
        restaurant.revenue = 40;
        world.spawn((started_order(&config, 50, 0.0),));

        let summary = summarize_day(&world, &restaurant, &config, 3);
        assert!(!summary.survives());
        assert!(!settle_day(&mut world, &mut restaurant, &config, &summary, false));
        assert_eq!(restaurant.revenue, -10);
        assert_eq!(world.query::<&Order>().iter().count(), 1);
    }

    #[test]
    fn top_performer_bonus_expires() {
        let mut top = TopPerformer { staff_id: 1, remaining_ticks: 2 };
        assert!(top.tick());
        assert!(!top.tick());
    }
}
