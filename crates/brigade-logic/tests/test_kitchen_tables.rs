//! Integration tests for the configuration pipeline and the pure models
//! that consume it.
//!
//! Exercises: JSON tables → GameConfig → Inventory / EquipmentRack /
//! MasteryBook → efficiency and order pricing.
//!
//! All tests are pure logic with no world or engine.

use brigade_logic::config::{Cuisine, GameConfig, PreemptionPolicy};
use brigade_logic::economy::{order_price, settlement_penalty, spawn_probability, time_limit};
use brigade_logic::equipment::EquipmentRack;
use brigade_logic::inventory::{Inventory, Requirements};
use brigade_logic::mastery::MasteryBook;
use brigade_logic::mood::mood_multiplier;
use brigade_logic::performance::{efficiency, progress_per_tick, ThroughputInput, TraitModifiers};

// ── Helpers ────────────────────────────────────────────────────────────

const SHIPPED_CONFIG: &str = include_str!("../../../data/default_config.json");

fn shipped() -> GameConfig {
    GameConfig::from_json_str(SHIPPED_CONFIG).expect("shipped config must parse")
}

fn requirements_for(config: &GameConfig, recipe_ids: &[&str]) -> Requirements {
    let mut req = Requirements::new();
    for id in recipe_ids {
        let recipe = config.recipe(id).expect("known recipe");
        for ingredient in &recipe.ingredients {
            *req.entry(ingredient.clone()).or_insert(0) += 1;
        }
    }
    req
}

// ── Config ─────────────────────────────────────────────────────────────

#[test]
fn shipped_config_matches_builtin_tables() {
    assert_eq!(shipped(), GameConfig::default());
}

#[test]
fn shipped_config_covers_every_cuisine() {
    let config = shipped();
    for cuisine in Cuisine::ALL {
        assert!(
            config.recipes.iter().any(|r| r.category == cuisine),
            "no recipe for {:?}",
            cuisine
        );
    }
    assert_eq!(config.performance.preemption, PreemptionPolicy::HighestMorale);
}

#[test]
fn starting_recipes_are_cookable_from_a_full_pantry() {
    let config = shipped();
    let pantry = Inventory::from_defs(&config.ingredients);
    for recipe in config.recipes.iter().filter(|r| r.unlock_threshold <= 0) {
        let req = requirements_for(&config, &[recipe.id.as_str()]);
        assert!(pantry.can_fulfill(&req), "{} not cookable", recipe.id);
    }
}

// ── Pipeline ───────────────────────────────────────────────────────────

#[test]
fn three_item_order_consumes_one_unit_per_ingredient_per_item() {
    let config = shipped();
    let mut pantry = Inventory::from_defs(&config.ingredients);
    let req = requirements_for(&config, &["beef_steak", "beef_steak", "grilled_fish"]);
    assert_eq!(req.get("Beef"), Some(&2));
    assert_eq!(req.get("Vegetables"), Some(&3));
    assert_eq!(req.get("Fish"), Some(&1));

    pantry.consume(&req).unwrap();
    assert_eq!(pantry.get("Vegetables").unwrap().current, 97);
    assert_eq!(pantry.total_missing(), 6);
}

#[test]
fn equipment_and_mastery_raise_price_and_speed() {
    let config = shipped();
    let mut rack = EquipmentRack::from_defs(&config.equipment);
    let mut book = MasteryBook::new();

    let plain = order_price(25, rack.bonuses(0.5).price_boost, false, 1.0, &config.orders);
    assert_eq!(plain, 25);

    rack.raise_level("plating_kit");
    rack.raise_level("plating_kit");
    for _ in 0..5 {
        book.record("beef_steak", &config.mastery);
    }
    let boosted = order_price(
        25,
        rack.bonuses(config.performance.max_equipment_bonus).price_boost,
        true,
        book.price_multiplier("beef_steak", &config.mastery),
        &config.orders,
    );
    // 25 × 1.1 × 1.5 × 1.05
    assert_eq!(boosted, 43);
    assert_eq!(time_limit(180, &config.orders), 210);
}

#[test]
fn roster_staff_make_steady_progress() {
    let config = shipped();
    for template in &config.roster {
        let traits = TraitModifiers::from_traits(&config.traits, &template.traits);
        assert!(traits.performance_cap(&config.performance) >= 100.0);

        let eff = efficiency(
            template.base_efficiency,
            0,
            0.0,
            config.performance.baseline_morale,
            mood_multiplier(&config.moods, brigade_logic::mood::Mood::Neutral),
            &config.performance,
        );
        let per_tick = progress_per_tick(
            &ThroughputInput {
                efficiency: eff,
                specialty_match: false,
                mastery_speed: 1.0,
                top_performer: false,
                speed_factor: 1.0,
            },
            &config.performance,
        );
        // Every roster member can finish an order inside a day.
        let ticks = (100.0 / per_tick).ceil() as u32;
        assert!(ticks < config.economy.day_duration, "{} too slow", template.name);
    }
}

#[test]
fn busier_days_spawn_more_orders() {
    let config = shipped();
    let early = spawn_probability(0.4, 20, 180, 4, &config.orders);
    let late = spawn_probability(0.8, 160, 180, 4, &config.orders);
    assert!(late > early);
    assert!(late <= config.orders.max_spawn_probability as f64);
}

#[test]
fn settlement_charges_only_unfinished_work() {
    assert_eq!(settlement_penalty([(50, 100.0), (30, 50.0)]), 15);
}
