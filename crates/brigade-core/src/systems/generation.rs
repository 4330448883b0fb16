//! Order generation - synthesizes customer orders from the unlocked menu

use brigade_logic::config::{GameConfig, Recipe};
use brigade_logic::economy::{order_price, spawn_probability, time_limit};
use brigade_logic::inventory::Requirements;
use hecs::World;
use rand::seq::SliceRandom;
use rand::Rng;

use super::lookup::live_order_count;
use crate::components::{LineItem, Order};
use crate::error::ActionError;
use crate::restaurant::Restaurant;

/// One unit of every recipe ingredient, per line item
pub fn ingredient_requirements(recipes: &[&Recipe]) -> Requirements {
    let mut required = Requirements::new();
    for recipe in recipes {
        for ingredient in &recipe.ingredients {
            *required.entry(ingredient.clone()).or_insert(0) += 1;
        }
    }
    required
}

/// Build an order for the given recipes, pricing it with the current
/// equipment and the primary recipe's mastery.
pub fn build_order(
    id: u32,
    recipes: &[&Recipe],
    is_vip: bool,
    restaurant: &Restaurant,
    config: &GameConfig,
    tick: u64,
) -> Result<Order, ActionError> {
    let primary = recipes.first().ok_or(ActionError::EmptyOrder)?;
    let items: Vec<LineItem> = recipes.iter().map(|r| LineItem::from_recipe(r)).collect();
    let item_total: u32 = items.iter().map(|i| i.price).sum();
    let slowest = items.iter().map(|i| i.prep_time).max().unwrap_or(0);

    let bonuses = restaurant.bonuses(config);
    let mastery = restaurant.mastery.price_multiplier(&primary.id, &config.mastery);
    let price = order_price(item_total, bonuses.price_boost, is_vip, mastery, &config.orders);

    let mut order = Order::new(
        id,
        items,
        price,
        time_limit(slowest, &config.orders),
        ingredient_requirements(recipes),
        is_vip,
    );
    order.speed_factor = bonuses.speed_factor();
    order.created_at_tick = tick;
    Ok(order)
}

/// Reject an order the board or the pantry cannot take
pub fn admit_order(
    world: &World,
    restaurant: &Restaurant,
    config: &GameConfig,
    order: &Order,
) -> Result<(), ActionError> {
    let live = live_order_count(world);
    if live >= config.orders.max_live_orders {
        return Err(ActionError::AtCapacity(live));
    }
    restaurant.inventory.check(&order.required_ingredients)?;
    Ok(())
}

/// Whether this generation attempt produces an order
pub fn roll_spawn(
    spawn_chance: f32,
    day_timer: u32,
    available_staff: usize,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> bool {
    let p = spawn_probability(
        spawn_chance,
        day_timer,
        config.economy.day_duration,
        available_staff,
        &config.orders,
    );
    p > 0.0 && rng.gen_bool(p)
}

/// Draw 1 to `max_items_per_order` line items from the unlocked menu, plus
/// the VIP roll. Returns no recipes when nothing is unlocked.
pub fn draw_order<'a>(
    restaurant: &Restaurant,
    config: &'a GameConfig,
    rng: &mut impl Rng,
) -> (Vec<&'a Recipe>, bool) {
    let menu = restaurant.available_recipes(config);
    if menu.is_empty() {
        return (Vec::new(), false);
    }
    let count = rng.gen_range(1..=config.orders.max_items_per_order);
    let mut recipes = Vec::with_capacity(count);
    for _ in 0..count {
        if let Some(recipe) = menu.choose(rng) {
            recipes.push(*recipe);
        }
    }
    let vip = rng.gen_bool(config.orders.vip_chance.clamp(0.0, 1.0) as f64);
    (recipes, vip)
}
