//! Assignment system - matches orders to staff, with priority preemption
//!
//! The ordinary path only takes Available staff (most efficient first, ties
//! to the lowest id). A priority order that finds nobody free may take a
//! Busy staff member off a non-priority order, chosen by the configured
//! [`PreemptionPolicy`]. A priority order is never preempted.

use std::cmp::Ordering;
use std::collections::HashMap;

use brigade_logic::config::{GameConfig, PreemptionPolicy};
use brigade_logic::inventory::Requirements;
use brigade_logic::performance::{MoraleEvent, StaffStatus};
use hecs::{Entity, World};
use rand::Rng;

use super::lookup::{available_staff_count, find_order};
use super::staff::apply_morale_events;
use crate::components::{Order, OrderStatus, Staff, Traits, Vitals};
use crate::error::ActionError;
use crate::events::{DomainEvent, EventLog};
use crate::restaurant::Restaurant;

/// Busy staff member that a priority order could take over
#[derive(Debug, Clone, Copy)]
struct Victim {
    entity: Entity,
    staff_id: u32,
    order_id: u32,
    morale: f32,
    progress: f32,
}

/// Most efficient Available staff member, ties to the lowest id
fn best_available(world: &World) -> Option<(Entity, u32)> {
    world
        .query::<&Staff>()
        .iter()
        .filter(|(_, s)| s.is_available())
        .max_by(|(_, a), (_, b)| {
            a.efficiency
                .partial_cmp(&b.efficiency)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.id.cmp(&a.id))
        })
        .map(|(entity, s)| (entity, s.id))
}

fn pick_victim(world: &World, policy: PreemptionPolicy) -> Option<Victim> {
    let orders: HashMap<u32, (bool, f32)> = world
        .query::<&Order>()
        .iter()
        .map(|(_, o)| (o.id, (o.is_priority, o.progress)))
        .collect();

    let candidates: Vec<Victim> = world
        .query::<(&Staff, &Vitals)>()
        .iter()
        .filter_map(|(entity, (staff, vitals))| {
            if staff.status != StaffStatus::Busy {
                return None;
            }
            let order_id = staff.current_order?;
            let &(is_priority, progress) = orders.get(&order_id)?;
            (!is_priority).then_some(Victim {
                entity,
                staff_id: staff.id,
                order_id,
                morale: vitals.morale,
                progress,
            })
        })
        .collect();

    match policy {
        PreemptionPolicy::HighestMorale => candidates.into_iter().max_by(|a, b| {
            a.morale
                .partial_cmp(&b.morale)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.staff_id.cmp(&a.staff_id))
        }),
        PreemptionPolicy::LeastProgress => candidates.into_iter().min_by(|a, b| {
            a.progress
                .partial_cmp(&b.progress)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.staff_id.cmp(&b.staff_id))
        }),
    }
}

/// Units actually drawn from the pantry after ingredient-efficiency saves
fn roll_ingredient_usage(required: &Requirements, save_chance: f32, rng: &mut impl Rng) -> Requirements {
    let mut usage = Requirements::new();
    for (name, &count) in required {
        let mut used = 0;
        for _ in 0..count {
            let saved = save_chance > 0.0 && rng.gen_bool(save_chance as f64);
            if !saved {
                used += 1;
            }
        }
        if used > 0 {
            usage.insert(name.clone(), used);
        }
    }
    usage
}

/// Pause the victim's order and hand the staff member a morale and loyalty hit
fn preempt(world: &mut World, config: &GameConfig, victim: &Victim, by_order: u32, events: &mut EventLog) {
    if let Some(entity) = find_order(world, victim.order_id) {
        if let Ok(mut order) = world.get::<&mut Order>(entity) {
            order.pause();
        }
    }
    if let Ok((staff, vitals, traits)) =
        world.query_one_mut::<(&mut Staff, &mut Vitals, &Traits)>(victim.entity)
    {
        apply_morale_events(staff, vitals, traits, &[MoraleEvent::Preempted], config);
        staff.loyalty = (staff.loyalty - config.performance.loyalty_loss_preempted).max(0.0);
        staff.release(false);
    }
    log::info!(
        "Order #{} paused: staff #{} moved to priority order #{}",
        victim.order_id,
        victim.staff_id,
        by_order
    );
    events.push(DomainEvent::OrderPaused {
        order_id: victim.order_id,
        staff_id: victim.staff_id,
        preempted_by: by_order,
    });
}

/// Assign an order to staff. Returns the staff id on success.
///
/// `allow_preemption` lets a priority order take a Busy staff member when
/// nobody is free. On first assignment the order's ingredients are drawn
/// (after equipment saves) and paid for; a shortfall fails the call before
/// anything is mutated.
pub fn assign_order(
    world: &mut World,
    restaurant: &mut Restaurant,
    config: &GameConfig,
    order_id: u32,
    allow_preemption: bool,
    rng: &mut impl Rng,
    events: &mut EventLog,
) -> Result<u32, ActionError> {
    let order_entity = find_order(world, order_id).ok_or(ActionError::OrderNotFound(order_id))?;
    let (status, is_priority, consumed, required) = {
        let order = world
            .get::<&Order>(order_entity)
            .map_err(|_| ActionError::OrderNotFound(order_id))?;
        (
            order.status,
            order.is_priority,
            order.ingredients_consumed,
            order.required_ingredients.clone(),
        )
    };
    if !status.is_assignable() {
        return Err(ActionError::InvalidOrderState { order_id, status });
    }

    let (staff_entity, staff_id, victim) = match best_available(world) {
        Some((entity, id)) => (entity, id, None),
        None if allow_preemption && is_priority => {
            let victim = pick_victim(world, config.performance.preemption)
                .ok_or(ActionError::NoAvailableStaff(order_id))?;
            (victim.entity, victim.staff_id, Some(victim))
        }
        None => return Err(ActionError::NoAvailableStaff(order_id)),
    };

    let usage = if consumed {
        None
    } else {
        let save_chance = restaurant.bonuses(config).ingredient_efficiency;
        let usage = roll_ingredient_usage(&required, save_chance, rng);
        restaurant.inventory.check(&usage)?;
        Some(usage)
    };

    if let Some(victim) = &victim {
        preempt(world, config, victim, order_id, events);
    }

    if let Some(usage) = usage {
        restaurant.inventory.consume(&usage)?;
        let units: u32 = usage.values().sum();
        restaurant.revenue -= units as i64 * config.economy.ingredient_unit_cost;
    }

    if let Ok(mut order) = world.get::<&mut Order>(order_entity) {
        order.ingredients_consumed = true;
        order.start(staff_id);
    }
    if let Ok((staff, vitals)) = world.query_one_mut::<(&mut Staff, &mut Vitals)>(staff_entity) {
        staff.begin(order_id);
        vitals.idle_ticks = 0;
        log::debug!("Order #{} assigned to {}", order_id, staff.name);
    }

    Ok(staff_id)
}

/// Per-tick sweep run before orders advance.
///
/// Paused orders resume first (least time left first) on the ordinary
/// path; then pending orders under the urgency threshold are forced
/// through [`assign_order`], where a priority order may preempt.
pub fn reassignment_sweep(
    world: &mut World,
    restaurant: &mut Restaurant,
    config: &GameConfig,
    rng: &mut impl Rng,
    events: &mut EventLog,
) {
    let mut paused: Vec<(u32, u32)> = world
        .query::<&Order>()
        .iter()
        .filter(|(_, o)| o.status == OrderStatus::Paused)
        .map(|(_, o)| (o.time_remaining, o.id))
        .collect();
    paused.sort_unstable();

    for (_, order_id) in paused {
        if available_staff_count(world) == 0 {
            break;
        }
        if let Err(e) = assign_order(world, restaurant, config, order_id, false, rng, events) {
            log::debug!("Resuming order #{} failed: {}", order_id, e);
        }
    }

    let fraction = config.orders.urgent_fraction;
    let mut urgent: Vec<(u32, u32)> = world
        .query::<&Order>()
        .iter()
        .filter(|(_, o)| o.status == OrderStatus::Pending && o.is_urgent(fraction))
        .map(|(_, o)| (o.time_remaining, o.id))
        .collect();
    urgent.sort_unstable();

    for (_, order_id) in urgent {
        if let Err(e) = assign_order(world, restaurant, config, order_id, true, rng, events) {
            log::debug!("Urgent order #{} left waiting: {}", order_id, e);
        }
    }
}
