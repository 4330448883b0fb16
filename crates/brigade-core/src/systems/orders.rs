//! Order system - ticks every live order and settles the ones that finish

use std::collections::HashMap;

use brigade_logic::config::{Cuisine, GameConfig};
use brigade_logic::performance::{
    needs_rest, progress_per_tick, MoraleEvent, ThroughputInput, STAT_MAX,
};
use hecs::{Entity, World};

use super::lookup::find_staff;
use super::staff::apply_morale_events;
use crate::components::{Order, OrderStatus, OrderTick, Staff, Traits, Vitals};
use crate::events::{DomainEvent, EventLog};
use crate::restaurant::Restaurant;

/// Orders that reached a terminal state this tick, by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderOutcomes {
    pub completed: Vec<u32>,
    pub failed: Vec<u32>,
}

/// Tick every live order, then book completions and failures and despawn them.
pub fn order_system(
    world: &mut World,
    restaurant: &mut Restaurant,
    config: &GameConfig,
    top_performer: Option<u32>,
    events: &mut EventLog,
) -> OrderOutcomes {
    let cooks: HashMap<u32, (f32, Cuisine)> = world
        .query::<&Staff>()
        .iter()
        .map(|(_, s)| (s.id, (s.efficiency, s.specialty)))
        .collect();

    let mut finished: Vec<(Entity, Order, OrderTick)> = Vec::new();
    for (entity, order) in world.query_mut::<&mut Order>() {
        let cook = order
            .assigned_staff
            .and_then(|id| cooks.get(&id).map(|&(eff, specialty)| (id, eff, specialty)));
        let gain = match cook {
            Some((staff_id, efficiency, specialty)) if order.status == OrderStatus::InProgress => {
                let mastery_speed = order.primary_recipe().map_or(1.0, |recipe| {
                    restaurant.mastery.speed_multiplier(recipe, &config.mastery)
                });
                progress_per_tick(
                    &ThroughputInput {
                        efficiency,
                        specialty_match: order.matches_specialty(specialty),
                        mastery_speed,
                        top_performer: top_performer == Some(staff_id),
                        speed_factor: order.speed_factor,
                    },
                    &config.performance,
                )
            }
            _ => 0.0,
        };

        let outcome = order.tick(gain);
        if outcome != OrderTick::Continue {
            finished.push((entity, order.clone(), outcome));
        }
    }

    finished.sort_by_key(|(_, order, _)| order.id);

    let mut outcomes = OrderOutcomes::default();
    for (entity, order, outcome) in finished {
        let _ = world.despawn(entity);
        match outcome {
            OrderTick::Completed { staff_id } => {
                complete_order(world, restaurant, config, &order, staff_id, events);
                outcomes.completed.push(order.id);
            }
            OrderTick::Failed { staff_id } => {
                fail_order(world, restaurant, config, &order, staff_id, events);
                outcomes.failed.push(order.id);
            }
            OrderTick::Continue => {}
        }
    }
    outcomes
}

fn complete_order(
    world: &mut World,
    restaurant: &mut Restaurant,
    config: &GameConfig,
    order: &Order,
    staff_id: Option<u32>,
    events: &mut EventLog,
) {
    restaurant.record_completion(order, config);

    if let Some(entity) = staff_id.and_then(|id| find_staff(world, id)) {
        if let Ok((staff, vitals, traits)) =
            world.query_one_mut::<(&mut Staff, &mut Vitals, &Traits)>(entity)
        {
            let perf = &config.performance;
            staff.orders_completed += 1;
            staff.day_orders += 1;
            staff.month_orders += 1;
            staff.performance =
                (staff.performance + perf.performance_gain).min(traits.performance_cap(config));
            staff.loyalty = (staff.loyalty + perf.loyalty_gain).min(STAT_MAX);
            vitals.consecutive_orders += 1;

            let mut morale_events = vec![MoraleEvent::OrderCompleted, MoraleEvent::OrderStreak];
            if order.matches_specialty(staff.specialty) {
                morale_events.push(MoraleEvent::SpecialtyMatch);
            }
            apply_morale_events(staff, vitals, traits, &morale_events, config);

            if staff.current_order == Some(order.id) {
                staff.release(needs_rest(vitals.fatigue, perf));
                vitals.idle_ticks = 0;
            }
        }
    }

    log::debug!(
        "Order #{} completed for ${} by {:?}",
        order.id,
        order.total_price,
        staff_id
    );
    events.push(DomainEvent::OrderCompleted {
        order_id: order.id,
        staff_id,
        revenue: order.total_price,
        is_vip: order.is_vip,
    });
}

fn fail_order(
    world: &mut World,
    restaurant: &mut Restaurant,
    config: &GameConfig,
    order: &Order,
    staff_id: Option<u32>,
    events: &mut EventLog,
) {
    restaurant.record_failure(order, config);

    if let Some(entity) = staff_id.and_then(|id| find_staff(world, id)) {
        if let Ok((staff, vitals, traits)) =
            world.query_one_mut::<(&mut Staff, &mut Vitals, &Traits)>(entity)
        {
            staff.performance = (staff.performance - config.performance.performance_loss).max(0.0);
            vitals.consecutive_orders = 0;
            apply_morale_events(staff, vitals, traits, &[MoraleEvent::OrderFailed], config);
            if staff.current_order == Some(order.id) {
                staff.release(false);
            }
        }
    }

    log::debug!("Order #{} failed (staff {:?})", order.id, staff_id);
    events.push(DomainEvent::OrderFailed {
        order_id: order.id,
        staff_id,
        is_vip: order.is_vip,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{LineItem, MoodState};
    use brigade_logic::inventory::Requirements;
    use brigade_logic::mood::Mood;
    use brigade_logic::performance::StaffStatus;

    fn cook(world: &mut World, config: &GameConfig, id: u32, efficiency: f32) -> Entity {
        let staff = Staff {
            id,
            name: format!("Cook {}", id),
            role: "Line Cook".into(),
            specialty: Cuisine::Asian,
            base_efficiency: efficiency,
            efficiency,
            upgrade_level: 0,
            status: StaffStatus::Available,
            current_order: None,
            performance: 100.0,
            loyalty: 50.0,
            orders_completed: 0,
            day_orders: 0,
            month_orders: 0,
        };
        world.spawn((
            staff,
            Vitals::fresh(50.0),
            MoodState { mood: Mood::Neutral, timer: 1000 },
            Traits::from_ids(Vec::new(), config),
        ))
    }

    fn grill_order(config: &GameConfig, id: u32, limit: u32) -> Order {
        let recipe = config.recipe("beef_steak").unwrap();
        Order::new(id, vec![LineItem::from_recipe(recipe)], 25, limit, Requirements::new(), false)
    }

    fn put_to_work(world: &mut World, staff: Entity, order: &mut Order) {
        let mut s = world.get::<&mut Staff>(staff).unwrap();
        s.begin(order.id);
        order.start(s.id);
    }

    #[test]
    fn full_efficiency_finishes_in_67_ticks() {
        let config = GameConfig::default();
        let mut world = World::new();
        let mut restaurant = Restaurant::new(&config);
        let mut events = EventLog::new();
        let staff = cook(&mut world, &config, 1, 1.0);
        let mut order = grill_order(&config, 1, 100);
        put_to_work(&mut world, staff, &mut order);
        world.spawn((order,));

        for _ in 0..66 {
            let out = order_system(&mut world, &mut restaurant, &config, None, &mut events);
            assert!(out.completed.is_empty());
        }
        let out = order_system(&mut world, &mut restaurant, &config, None, &mut events);
        assert_eq!(out.completed, vec![1]);
        assert_eq!(restaurant.revenue, 525);
        assert_eq!(world.query::<&Order>().iter().count(), 0);

        let s = world.get::<&Staff>(staff).unwrap();
        assert_eq!(s.status, StaffStatus::Available);
        assert_eq!(s.current_order, None);
        assert_eq!(s.orders_completed, 1);
        assert_eq!(s.day_orders, 1);
    }

    #[test]
    fn unattended_order_fails_and_costs_satisfaction() {
        let config = GameConfig::default();
        let mut world = World::new();
        let mut restaurant = Restaurant::new(&config);
        let mut events = EventLog::new();
        world.spawn((grill_order(&config, 4, 10),));

        for _ in 0..9 {
            order_system(&mut world, &mut restaurant, &config, None, &mut events);
        }
        let out = order_system(&mut world, &mut restaurant, &config, None, &mut events);
        assert_eq!(out.failed, vec![4]);
        assert!((restaurant.satisfaction - 90.0).abs() < f32::EPSILON);
        assert_eq!(restaurant.unhappy_customers, 1);
        assert_eq!(
            events.drain(),
            vec![DomainEvent::OrderFailed { order_id: 4, staff_id: None, is_vip: false }]
        );
    }

    #[test]
    fn failure_frees_and_penalizes_the_cook() {
        let config = GameConfig::default();
        let mut world = World::new();
        let mut restaurant = Restaurant::new(&config);
        let mut events = EventLog::new();
        let staff = cook(&mut world, &config, 2, 0.1);
        world.get::<&mut Vitals>(staff).unwrap().consecutive_orders = 4;
        let mut order = grill_order(&config, 1, 5);
        put_to_work(&mut world, staff, &mut order);
        world.spawn((order,));

        for _ in 0..5 {
            order_system(&mut world, &mut restaurant, &config, None, &mut events);
        }
        let s = world.get::<&Staff>(staff).unwrap();
        assert_eq!(s.status, StaffStatus::Available);
        assert!((s.performance - 95.0).abs() < f32::EPSILON);
        let v = world.get::<&Vitals>(staff).unwrap();
        assert_eq!(v.consecutive_orders, 0);
        assert!((v.morale - 45.0).abs() < f32::EPSILON);
    }

    #[test]
    fn top_performer_and_specialty_speed_up_work() {
        let config = GameConfig::default();
        let mut world = World::new();
        let mut restaurant = Restaurant::new(&config);
        let mut events = EventLog::new();
        let staff = cook(&mut world, &config, 3, 1.0);
        let recipe = config.recipe("chicken_rice_bowl").unwrap();
        let mut order = Order::new(9, vec![LineItem::from_recipe(recipe)], 16, 100, Requirements::new(), false);
        put_to_work(&mut world, staff, &mut order);
        let e = world.spawn((order,));

        order_system(&mut world, &mut restaurant, &config, Some(3), &mut events);
        let progress = world.get::<&Order>(e).unwrap().progress;
        assert!((progress - 1.5 * 1.15 * 1.1).abs() < 1e-5);
    }
}
