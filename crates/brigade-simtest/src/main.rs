//! Brigade Headless Simulation Harness
//!
//! Drives the kitchen simulation without a renderer: checks the shipped
//! tables, replays the reference scenarios and soaks a few service days
//! while checking invariants every tick.
//!
//! Usage:
//!   cargo run -p brigade-simtest
//!   cargo run -p brigade-simtest -- --verbose

use std::collections::{BTreeMap, BTreeSet};

use brigade_core::prelude::*;
use brigade_core::snapshot::SimulationSnapshot;
use brigade_logic::config::{Cuisine, StaffTemplate};
use brigade_logic::inventory::Requirements;
use brigade_logic::mood::mood_multiplier;
use brigade_logic::performance::{efficiency, StaffStatus};

const SHIPPED_CONFIG: &str = include_str!("../../../data/default_config.json");

const SOAK_SEED: u64 = 0xB41_6ADE;
const SOAK_DAYS: u32 = 5;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .format_timestamp(None)
        .init();
    println!("=== Brigade Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Shipped tables
    results.extend(validate_config(verbose));

    // 2. Efficiency sweep
    results.extend(validate_performance_model(verbose));

    // 3. Reference scenarios
    results.extend(validate_scenarios(verbose));

    // 4. Multi-day soak
    results.extend(validate_soak(verbose));

    // 5. Seeded replays
    results.extend(validate_determinism(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Config ───────────────────────────────────────────────────────────

fn validate_config(verbose: bool) -> Vec<TestResult> {
    println!("--- Config Tables ---");
    let mut results = Vec::new();

    let config = match GameConfig::from_json_str(SHIPPED_CONFIG) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult {
                name: "config_parse".into(),
                passed: false,
                detail: format!("shipped config rejected: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "config_matches_builtin".into(),
        passed: config == GameConfig::default(),
        detail: "data/default_config.json equals GameConfig::default()".into(),
    });

    let starters = config.recipes.iter().filter(|r| r.unlock_threshold <= 0).count();
    results.push(TestResult {
        name: "config_starter_menu".into(),
        passed: starters > 0 && starters < config.recipes.len(),
        detail: format!("{} of {} recipes open on day 1", starters, config.recipes.len()),
    });

    let pantry: BTreeSet<&str> = config.ingredients.iter().map(|i| i.name.as_str()).collect();
    let missing: Vec<String> = config
        .recipes
        .iter()
        .flat_map(|r| r.ingredients.iter())
        .filter(|i| !pantry.contains(i.as_str()))
        .cloned()
        .collect();
    results.push(TestResult {
        name: "config_ingredients_stocked".into(),
        passed: missing.is_empty(),
        detail: if missing.is_empty() {
            "every recipe ingredient has a pantry slot".into()
        } else {
            format!("unstocked: {}", missing.join(", "))
        },
    });

    let covered: BTreeSet<Cuisine> = config.recipes.iter().map(|r| r.category).collect();
    results.push(TestResult {
        name: "config_cuisine_coverage".into(),
        passed: Cuisine::ALL.iter().all(|c| covered.contains(c)),
        detail: format!("{} of {} cuisines on the menu", covered.len(), Cuisine::ALL.len()),
    });

    if verbose {
        println!("  Menu:");
        for r in &config.recipes {
            println!(
                "    {:22} {:10} ${:3} {:3} ticks unlock ${}",
                r.name,
                format!("{:?}", r.category),
                r.price,
                r.time,
                r.unlock_threshold
            );
        }
    }

    results
}

// ── 2. Performance Model ────────────────────────────────────────────────

fn validate_performance_model(verbose: bool) -> Vec<TestResult> {
    println!("--- Performance Model ---");
    let mut results = Vec::new();
    let config = GameConfig::default();
    let perf = &config.performance;

    // Efficiency stays positive over the whole reachable input space
    let mut lowest = f32::MAX;
    let mut highest: f32 = 0.0;
    for def in &config.moods {
        let mood = mood_multiplier(&config.moods, def.mood);
        for level in 0..=perf.max_upgrade_level {
            for fatigue in (0..=100).step_by(5) {
                for morale in (0..=100).step_by(5) {
                    let e = efficiency(
                        config.economy.hire_efficiency_min,
                        level,
                        fatigue as f32,
                        morale as f32,
                        mood,
                        perf,
                    );
                    lowest = lowest.min(e);
                    highest = highest.max(e);
                }
            }
        }
    }
    results.push(TestResult {
        name: "perf_efficiency_positive".into(),
        passed: lowest > 0.0,
        detail: format!("efficiency spans {:.3}..{:.3}", lowest, highest),
    });

    // Fatigue only ever slows a cook down
    let fresh = efficiency(0.8, 0, 0.0, 50.0, 1.0, perf);
    let tired = efficiency(0.8, 0, 90.0, 50.0, 1.0, perf);
    results.push(TestResult {
        name: "perf_fatigue_slows".into(),
        passed: tired < fresh,
        detail: format!("fresh={:.3} exhausted={:.3}", fresh, tired),
    });

    // Training helps
    let trained = efficiency(0.8, perf.max_upgrade_level, 0.0, 50.0, 1.0, perf);
    results.push(TestResult {
        name: "perf_upgrades_help".into(),
        passed: trained > fresh,
        detail: format!("untrained={:.3} max level={:.3}", fresh, trained),
    });

    if verbose {
        println!("  Mood multipliers:");
        for def in &config.moods {
            println!("    {:10} x{:.2}", def.mood.label(), def.multiplier);
        }
    }

    results
}

// ── 3. Scenarios ────────────────────────────────────────────────────────

fn cook(name: &str, base_efficiency: f32) -> StaffTemplate {
    StaffTemplate {
        name: name.into(),
        role: "Line Cook".into(),
        base_efficiency,
        specialty: Cuisine::Vegetarian,
        traits: Vec::new(),
    }
}

/// Engine with a fixed roster, no spontaneous orders and no mood swings
fn scenario_engine(roster: Vec<StaffTemplate>, day_duration: u32) -> SimulationEngine {
    let mut config = GameConfig::default();
    config.roster = roster;
    config.orders.base_spawn_chance = 0.0;
    config.orders.max_spawn_chance = 0.0;
    config.economy.day_duration = day_duration;

    let mut engine = SimulationEngine::with_seed(config, 1);
    for (_, mood) in engine.world.query_mut::<&mut MoodState>() {
        mood.timer = u32::MAX;
    }
    let _ = engine.start_day();
    engine
}

fn steak(engine: &SimulationEngine, price: u32, time_limit: u32) -> Option<Order> {
    let recipe = engine.config().recipe("beef_steak")?;
    let required: Requirements = recipe.ingredients.iter().map(|i| (i.clone(), 1)).collect();
    Some(Order::new(
        0,
        vec![LineItem::from_recipe(recipe)],
        price,
        time_limit,
        required,
        false,
    ))
}

fn place(engine: &mut SimulationEngine, order: Option<Order>) -> Option<u32> {
    order.map(|o| engine.insert_order(o))
}

fn validate_scenarios(_verbose: bool) -> Vec<TestResult> {
    println!("--- Reference Scenarios ---");
    vec![
        scenario_full_efficiency(),
        scenario_unattended_expiry(),
        scenario_priority_preemption(),
        scenario_short_pantry(),
        scenario_unpayable_penalty(),
    ]
}

/// Efficiency 1.0, no specialty match: 1.5 progress per tick
fn scenario_full_efficiency() -> TestResult {
    let mut engine = scenario_engine(vec![cook("Ana", 1.0)], 180);
    let order = steak(&engine, 25, 100);
    let Some(id) = place(&mut engine, order) else {
        return missing_recipe("scenario_a_completes_in_67");
    };
    let assigned = engine.assign(id).is_ok();

    let mut finished_at = None;
    for tick in 1..=100 {
        engine.advance();
        if engine.order(id).is_none() {
            finished_at = Some(tick);
            break;
        }
    }
    TestResult {
        name: "scenario_a_completes_in_67".into(),
        passed: assigned && finished_at == Some(67) && engine.restaurant.orders_completed == 1,
        detail: format!("finished after {:?} ticks", finished_at),
    }
}

/// Never assigned, 10 tick limit: fails and costs 10 satisfaction
fn scenario_unattended_expiry() -> TestResult {
    let mut engine = scenario_engine(Vec::new(), 180);
    let order = steak(&engine, 25, 10);
    let Some(id) = place(&mut engine, order) else {
        return missing_recipe("scenario_b_expires");
    };
    engine.advance_by(9);
    let alive_at_9 = engine.order(id).is_some();
    engine.advance();
    let gone_at_10 = engine.order(id).is_none();
    let satisfaction = engine.restaurant.satisfaction;

    TestResult {
        name: "scenario_b_expires".into(),
        passed: alive_at_9 && gone_at_10 && (satisfaction - 90.0).abs() < 1e-4,
        detail: format!("alive@9={} gone@10={} satisfaction={:.1}", alive_at_9, gone_at_10, satisfaction),
    }
}

/// Everyone busy: a priority order takes the happiest cook
fn scenario_priority_preemption() -> TestResult {
    let mut engine = scenario_engine(vec![cook("Ana", 0.8), cook("Ben", 0.8)], 180);
    let first = steak(&engine, 25, 150);
    let second = steak(&engine, 25, 150);
    let (Some(a), Some(b)) = (place(&mut engine, first), place(&mut engine, second)) else {
        return missing_recipe("scenario_c_preempts");
    };
    let _ = engine.assign(a);
    let _ = engine.assign(b);
    for (_, (staff, vitals)) in engine.world.query_mut::<(&Staff, &mut Vitals)>() {
        vitals.morale = if staff.id == 1 { 60.0 } else { 80.0 };
    }

    let mut urgent = steak(&engine, 25, 150);
    if let Some(o) = urgent.as_mut() {
        o.is_priority = true;
    }
    let Some(c) = place(&mut engine, urgent) else {
        return missing_recipe("scenario_c_preempts");
    };
    let taken_by = engine.assign(c);
    let status = |id| engine.order(id).map(|o| o.status);

    TestResult {
        name: "scenario_c_preempts".into(),
        passed: taken_by == Ok(2)
            && status(b) == Some(OrderStatus::Paused)
            && status(c) == Some(OrderStatus::InProgress)
            && status(a) == Some(OrderStatus::InProgress),
        detail: format!(
            "priority taken by {:?}; #{} {:?}, #{} {:?}",
            taken_by,
            b,
            status(b),
            c,
            status(c)
        ),
    }
}

/// One Beef in stock, two needed: rejected, pantry untouched
fn scenario_short_pantry() -> TestResult {
    let mut engine = scenario_engine(vec![cook("Ana", 1.0)], 180);
    let _ = engine.restaurant.inventory.set_current("Beef", 1);
    let before = engine.restaurant.inventory.clone();
    let result = engine.place_order(&["beef_steak", "beef_steak"], false);

    TestResult {
        name: "scenario_d_short_pantry".into(),
        passed: matches!(
            result,
            Err(ActionError::InsufficientIngredients { needed: 2, available: 1, .. })
        ) && engine.restaurant.inventory == before
            && engine.orders().is_empty(),
        detail: format!("{:?}", result),
    }
}

/// Revenue 40 against a 50 penalty: the game ends and the day stays put
fn scenario_unpayable_penalty() -> TestResult {
    let mut engine = scenario_engine(vec![cook("Ana", 0.1)], 5);
    let order = steak(&engine, 50, 100);
    let Some(id) = place(&mut engine, order) else {
        return missing_recipe("scenario_e_game_over");
    };
    let _ = engine.assign(id);
    engine.advance_by(5);
    let at_boundary = engine.phase() == SimPhase::AwaitingDayConfirmation;

    engine.restaurant.revenue = 40;
    for (_, order) in engine.world.query_mut::<&mut Order>() {
        order.progress = 0.0;
    }
    let summary = engine.acknowledge_day_boundary();

    TestResult {
        name: "scenario_e_game_over".into(),
        passed: at_boundary
            && engine.phase() == SimPhase::GameOver
            && engine.day() == 1
            && engine.revenue() == -10,
        detail: format!(
            "penalty={:?} phase={:?} day={}",
            summary.map(|s| s.penalty),
            engine.phase(),
            engine.day()
        ),
    }
}

fn missing_recipe(name: &str) -> TestResult {
    TestResult {
        name: name.into(),
        passed: false,
        detail: "beef_steak missing from the menu".into(),
    }
}

// ── 4. Soak ─────────────────────────────────────────────────────────────

/// Assign waiting work, keep the pantry stocked, settle each day
fn operate(engine: &mut SimulationEngine) {
    match engine.phase() {
        SimPhase::AwaitingDayConfirmation => {
            if let Ok(summary) = engine.acknowledge_day_boundary() {
                log::info!(
                    "Day {} settled: {} done, {} failed, penalty ${}, bonus ${}",
                    summary.day,
                    summary.orders_completed,
                    summary.orders_failed,
                    summary.penalty,
                    summary.total_bonus()
                );
            }
            if engine.day() == 2 {
                let _ = engine.hire_staff();
            }
            if engine.day() == 3 {
                let _ = engine.upgrade_equipment("range");
            }
        }
        SimPhase::Running => {
            let tick = engine.tick();
            if tick % 3 == 0 {
                for order in engine.orders() {
                    if order.status == OrderStatus::Pending {
                        let _ = engine.assign(order.id);
                    }
                }
            }
            if tick % 30 == 0 {
                let newest = engine
                    .orders()
                    .into_iter()
                    .filter(|o| o.status == OrderStatus::Pending && !o.is_priority)
                    .map(|o| o.id)
                    .max();
                if let Some(id) = newest {
                    let _ = engine.toggle_order_priority(id);
                }
            }
            if tick % 20 == 0
                && engine
                    .restaurant
                    .inventory
                    .iter()
                    .any(|(_, s)| s.fill_fraction() < 0.3)
            {
                let _ = engine.restock(None);
            }
        }
        _ => {}
    }
}

/// First broken invariant in a snapshot, if any
fn find_violation(snapshot: &SimulationSnapshot, last_progress: &BTreeMap<u32, f32>) -> Option<String> {
    for order in &snapshot.orders {
        if !(0.0..=100.0).contains(&order.progress) {
            return Some(format!("order #{} progress {}", order.id, order.progress));
        }
        if last_progress.get(&order.id).map_or(false, |&p| order.progress < p) {
            return Some(format!("order #{} lost progress", order.id));
        }
        if order.status.is_terminal() {
            return Some(format!("finished order #{} still on the board", order.id));
        }
        if order.status == OrderStatus::Paused && order.is_priority {
            return Some(format!("priority order #{} paused", order.id));
        }
    }
    for (name, stock) in snapshot.inventory.iter() {
        if stock.current > stock.max {
            return Some(format!("{} overfilled: {}/{}", name, stock.current, stock.max));
        }
    }
    let mut taken = BTreeSet::new();
    for member in &snapshot.staff {
        let s = &member.staff;
        if s.efficiency <= 0.0 {
            return Some(format!("{} efficiency {}", s.name, s.efficiency));
        }
        if s.current_order.is_some() != (s.status == StaffStatus::Busy) {
            return Some(format!("{} is {:?} holding {:?}", s.name, s.status, s.current_order));
        }
        if let Some(order_id) = s.current_order {
            if !taken.insert(order_id) {
                return Some(format!("order #{} has two cooks", order_id));
            }
        }
    }
    None
}

fn soak(seed: u64, days: u32) -> (SimulationEngine, Option<String>) {
    let mut engine = SimulationEngine::with_seed(GameConfig::default(), seed);
    let _ = engine.start_day();
    let mut last_progress = BTreeMap::new();

    let limit = days * engine.config().economy.day_duration * 2;
    for _ in 0..limit {
        if engine.day() > days || engine.phase() == SimPhase::GameOver {
            break;
        }
        operate(&mut engine);
        if !engine.advance() {
            continue;
        }
        let snapshot = engine.snapshot();
        if let Some(violation) = find_violation(&snapshot, &last_progress) {
            return (engine, Some(format!("tick {}: {}", snapshot.tick, violation)));
        }
        last_progress = snapshot.orders.iter().map(|o| (o.id, o.progress)).collect();
    }
    (engine, None)
}

fn validate_soak(verbose: bool) -> Vec<TestResult> {
    println!("--- Multi-day Soak ---");
    let mut results = Vec::new();
    let (mut engine, violation) = soak(SOAK_SEED, SOAK_DAYS);

    results.push(TestResult {
        name: "soak_invariants".into(),
        passed: violation.is_none(),
        detail: violation.unwrap_or_else(|| format!("{} ticks clean", engine.tick())),
    });

    let reached_end = engine.day() > SOAK_DAYS || engine.phase() == SimPhase::GameOver;
    results.push(TestResult {
        name: "soak_progresses".into(),
        passed: reached_end,
        detail: format!("day {} phase {:?}", engine.day(), engine.phase()),
    });

    let snapshot = engine.snapshot();
    results.push(TestResult {
        name: "soak_serves_customers".into(),
        passed: snapshot.happy_customers > 0,
        detail: format!(
            "{} happy, {} unhappy, rating {:.2}, revenue ${}",
            snapshot.happy_customers, snapshot.unhappy_customers, snapshot.rating, snapshot.revenue
        ),
    });

    let json = snapshot.to_json();
    let round_trip = json
        .as_ref()
        .ok()
        .and_then(|j| serde_json::from_str::<SimulationSnapshot>(j).ok());
    results.push(TestResult {
        name: "soak_snapshot_json".into(),
        passed: round_trip.is_some(),
        detail: format!("{} bytes", json.map(|j| j.len()).unwrap_or(0)),
    });

    if verbose {
        let events = engine.drain_events();
        println!("  Last {} events:", events.len().min(10));
        for event in events.iter().rev().take(10).rev() {
            println!("    {:?}", event);
        }
        println!("  Achievements: {:?}", snapshot.achievements);
        println!("  Unlocked: {}", snapshot.unlocked_recipes.join(", "));
    }

    results
}

// ── 5. Determinism ──────────────────────────────────────────────────────

fn validate_determinism(_verbose: bool) -> Vec<TestResult> {
    println!("--- Seeded Replays ---");
    let (a, _) = soak(SOAK_SEED, 2);
    let (b, _) = soak(SOAK_SEED, 2);
    let (c, _) = soak(SOAK_SEED + 1, 2);

    let same = a.snapshot() == b.snapshot();
    let differs = a.snapshot() != c.snapshot();
    vec![
        TestResult {
            name: "replay_same_seed".into(),
            passed: same,
            detail: format!("tick {} vs {}", a.tick(), b.tick()),
        },
        TestResult {
            name: "replay_other_seed_diverges".into(),
            passed: differs,
            detail: format!("seed {} vs {}", SOAK_SEED, SOAK_SEED + 1),
        },
    ]
}
