//! Simulation engine - main entry point for running the restaurant
//!
//! One [`SimulationEngine::advance`] call is one tick. Each tick runs, in
//! order: the game-over check, the reassignment sweep, order progress,
//! staff vitals, ambient satisfaction decay, the top-performer countdown
//! and the day timer. Order generation runs every
//! `orders.generation_interval` ticks on its own counter and is skipped on
//! the tick that closes the day.
//!
//! Operator actions return `Result<_, ActionError>`. A rejected action
//! changes nothing except for a negative feedback message.

use std::collections::VecDeque;

use brigade_logic::config::{GameConfig, Recipe};
use brigade_logic::constants::FEEDBACK_HISTORY;
use brigade_logic::economy::spawn_chance_for_day;
use brigade_logic::performance::{MoraleEvent, StaffStatus};
use hecs::World;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::achievements::{check_achievements, check_day_achievements};
use crate::components::*;
use crate::error::ActionError;
use crate::events::{DomainEvent, EventLog};
use crate::generation::{random_recruit, spawn_roster, spawn_staff};
use crate::restaurant::{DayStats, Restaurant};
use crate::snapshot::{SimulationSnapshot, StaffSnapshot};
use crate::systems::*;

/// Where the simulation is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimPhase {
    /// Built but not started
    Idle,
    Running,
    Paused,
    /// The day is over; waiting for the operator to settle it
    AwaitingDayConfirmation,
    /// Terminal
    GameOver,
}

/// Main simulation engine
pub struct SimulationEngine {
    /// ECS world holding orders and staff
    pub world: World,
    /// Restaurant-wide resources and counters
    pub restaurant: Restaurant,
    config: GameConfig,
    rng: StdRng,
    seed: u64,
    events: EventLog,
    feedback: VecDeque<String>,

    phase: SimPhase,
    tick: u64,
    day: u32,
    day_timer: u32,
    generation_counter: u32,
    spawn_chance: f32,
    top_performer: Option<TopPerformer>,
    pending_summary: Option<DaySummary>,

    next_order_id: u32,
    next_staff_id: u32,
}

impl SimulationEngine {
    /// New simulation with an entropy seed
    pub fn new(config: GameConfig) -> Self {
        Self::with_seed(config, rand::random())
    }

    /// New simulation whose every random draw follows `seed`
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        let mut engine = Self {
            world: World::new(),
            restaurant: Restaurant::new(&config),
            rng: StdRng::seed_from_u64(seed),
            seed,
            events: EventLog::new(),
            feedback: VecDeque::with_capacity(FEEDBACK_HISTORY),
            phase: SimPhase::Idle,
            tick: 0,
            day: 1,
            day_timer: 0,
            generation_counter: 0,
            spawn_chance: spawn_chance_for_day(1, &config.orders),
            top_performer: None,
            pending_summary: None,
            next_order_id: 1,
            next_staff_id: 1,
            config,
        };
        let roster = spawn_roster(&mut engine.world, engine.next_staff_id, &engine.config, &mut engine.rng);
        engine.next_staff_id += roster.len() as u32;
        log::info!(
            "Restaurant opened with {} staff and ${} (seed {})",
            roster.len(),
            engine.restaurant.revenue,
            seed
        );
        engine
    }

    /// Throw away all state and start over with the same config and seed
    pub fn reset(&mut self) {
        log::info!("Resetting simulation");
        *self = Self::with_seed(self.config.clone(), self.seed);
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Open the first day, or resume from a pause
    pub fn start_day(&mut self) -> Result<(), ActionError> {
        match self.phase {
            SimPhase::Running => Ok(()),
            SimPhase::Idle => {
                log::info!("Day {} begins", self.day);
                self.events.push(DomainEvent::DayStarted { day: self.day });
                self.phase = SimPhase::Running;
                Ok(())
            }
            SimPhase::Paused => {
                self.phase = SimPhase::Running;
                Ok(())
            }
            SimPhase::GameOver => self.reject(ActionError::GameOver),
            phase => self.reject(ActionError::WrongPhase(phase)),
        }
    }

    pub fn pause(&mut self) -> Result<(), ActionError> {
        match self.phase {
            SimPhase::Running => {
                self.phase = SimPhase::Paused;
                Ok(())
            }
            SimPhase::Paused => Ok(()),
            _ => self.reject(ActionError::NotRunning),
        }
    }

    pub fn resume(&mut self) -> Result<(), ActionError> {
        match self.phase {
            SimPhase::Paused => {
                self.phase = SimPhase::Running;
                Ok(())
            }
            SimPhase::Running => Ok(()),
            SimPhase::GameOver => self.reject(ActionError::GameOver),
            phase => self.reject(ActionError::WrongPhase(phase)),
        }
    }

    /// Run one tick. Returns false when nothing ran because the simulation
    /// is not `Running`.
    pub fn advance(&mut self) -> bool {
        if self.phase != SimPhase::Running {
            return false;
        }
        if self.restaurant.revenue <= 0 {
            self.enter_game_over();
            return false;
        }
        self.tick += 1;

        reassignment_sweep(
            &mut self.world,
            &mut self.restaurant,
            &self.config,
            &mut self.rng,
            &mut self.events,
        );

        let top = self.top_performer.map(|t| t.staff_id);
        let outcomes = order_system(
            &mut self.world,
            &mut self.restaurant,
            &self.config,
            top,
            &mut self.events,
        );
        if !outcomes.completed.is_empty() || !outcomes.failed.is_empty() {
            log::debug!(
                "Tick {}: {} completed, {} failed",
                self.tick,
                outcomes.completed.len(),
                outcomes.failed.len()
            );
        }
        self.check_milestones();

        let bonuses = self.restaurant.bonuses(&self.config);
        staff_system(&mut self.world, &self.config, &bonuses, &mut self.rng, &mut self.events);

        if live_order_count(&self.world) > self.config.economy.ambient_decay_threshold {
            self.restaurant.adjust_satisfaction(-self.config.economy.ambient_decay);
        }

        let expired = self.top_performer.as_mut().map_or(false, |t| !t.tick());
        if expired {
            self.top_performer = None;
        }

        self.day_timer += 1;
        if self.day_timer >= self.config.economy.day_duration {
            self.close_day();
            return true;
        }

        self.generation_counter += 1;
        if self.generation_counter >= self.config.orders.generation_interval {
            self.generation_counter = 0;
            self.try_generate_order();
        }
        true
    }

    /// Run up to `ticks` ticks, stopping early when the phase changes.
    /// Returns how many ran.
    pub fn advance_by(&mut self, ticks: u32) -> u32 {
        let mut ran = 0;
        while ran < ticks && self.advance() {
            ran += 1;
        }
        ran
    }

    /// Settle the finished day. Charges the penalty for unfinished work;
    /// if the restaurant survives, pays bonuses and opens the next day,
    /// otherwise the game is over. Either way returns the final summary.
    pub fn acknowledge_day_boundary(&mut self) -> Result<DaySummary, ActionError> {
        match self.phase {
            SimPhase::AwaitingDayConfirmation => {}
            SimPhase::GameOver => return self.reject(ActionError::GameOver),
            phase => return self.reject(ActionError::WrongPhase(phase)),
        }

        let summary = summarize_day(&self.world, &self.restaurant, &self.config, self.day);
        let new_month = self.day % self.config.economy.days_per_month.max(1) == 0;
        self.pending_summary = None;

        if !settle_day(&mut self.world, &mut self.restaurant, &self.config, &summary, new_month) {
            log::warn!(
                "Day {} penalty of ${} could not be covered",
                self.day,
                summary.penalty
            );
            self.enter_game_over();
            return Ok(summary);
        }

        check_day_achievements(&mut self.restaurant, &mut self.events);
        self.restaurant.today = DayStats::default();

        self.day += 1;
        self.day_timer = 0;
        self.generation_counter = 0;
        self.spawn_chance = spawn_chance_for_day(self.day, &self.config.orders);
        self.top_performer = summary.top_performer.map(|staff_id| TopPerformer {
            staff_id,
            remaining_ticks: self.config.performance.top_performer_duration,
        });
        self.check_milestones();

        log::info!(
            "Day {} begins: revenue ${}, spawn chance {:.2}, top performer {:?}",
            self.day,
            self.restaurant.revenue,
            self.spawn_chance,
            summary.top_performer
        );
        self.events.push(DomainEvent::DayStarted { day: self.day });
        self.phase = SimPhase::Running;
        Ok(summary)
    }

    fn close_day(&mut self) {
        let summary = summarize_day(&self.world, &self.restaurant, &self.config, self.day);
        log::info!(
            "Day {} closed: {} completed, {} failed, ${} earned, ${} penalty pending",
            summary.day,
            summary.orders_completed,
            summary.orders_failed,
            summary.earned,
            summary.penalty
        );
        self.events.push(DomainEvent::DayBoundaryReached(summary.clone()));
        self.pending_summary = Some(summary);
        self.phase = SimPhase::AwaitingDayConfirmation;
    }

    fn enter_game_over(&mut self) {
        if self.phase == SimPhase::GameOver {
            return;
        }
        log::info!("Game over on day {} with ${}", self.day, self.restaurant.revenue);
        self.phase = SimPhase::GameOver;
        self.events.push(DomainEvent::GameOver {
            day: self.day,
            revenue: self.restaurant.revenue,
        });
    }

    /// Recipe unlocks and achievements reachable from the current totals
    fn check_milestones(&mut self) {
        for recipe in self.restaurant.unlock_recipes(&self.config) {
            log::info!("Recipe unlocked: {}", recipe.name);
            self.events.push(DomainEvent::RecipeUnlocked {
                recipe_id: recipe.id.clone(),
                name: recipe.name.clone(),
            });
        }
        let staff = staff_count(&self.world);
        check_achievements(&mut self.restaurant, staff, &self.config, &mut self.events);
    }

    fn try_generate_order(&mut self) {
        let available = available_staff_count(&self.world);
        if !roll_spawn(self.spawn_chance, self.day_timer, available, &self.config, &mut self.rng) {
            return;
        }
        let (drawn, vip) = draw_order(&self.restaurant, &self.config, &mut self.rng);
        let recipes: Vec<Recipe> = drawn.into_iter().cloned().collect();
        let refs: Vec<&Recipe> = recipes.iter().collect();

        if let Err(e) = self.open_order(&refs, vip) {
            log::info!("Customer turned away: {}", e);
            self.push_feedback(format!("Customer turned away: {}", e), false);
        }
    }

    fn open_order(&mut self, recipes: &[&Recipe], vip: bool) -> Result<u32, ActionError> {
        let order = build_order(
            self.next_order_id,
            recipes,
            vip,
            &self.restaurant,
            &self.config,
            self.tick,
        )?;
        admit_order(&self.world, &self.restaurant, &self.config, &order)?;
        self.next_order_id += 1;
        Ok(self.spawn_order(order))
    }

    fn spawn_order(&mut self, order: Order) -> u32 {
        let id = order.id;
        log::debug!(
            "Order #{} placed: {} item(s), ${}{}",
            id,
            order.items.len(),
            order.total_price,
            if order.is_vip { " (VIP)" } else { "" }
        );
        self.events.push(DomainEvent::OrderCreated {
            order_id: id,
            total_price: order.total_price,
            is_vip: order.is_vip,
        });
        self.world.spawn((order,));
        id
    }

    // ------------------------------------------------------------------
    // Operator actions
    // ------------------------------------------------------------------

    /// Take a customer order for unlocked recipes. Returns the order id.
    pub fn place_order(&mut self, recipe_ids: &[&str], vip: bool) -> Result<u32, ActionError> {
        self.ensure_open()?;
        let mut recipes = Vec::with_capacity(recipe_ids.len());
        for &id in recipe_ids {
            let recipe = match self.config.recipe(id) {
                Some(recipe) => recipe.clone(),
                None => return self.reject(ActionError::UnknownRecipe(id.to_string())),
            };
            if !self.restaurant.unlocked_recipes.contains(&recipe.id) {
                return self.reject(ActionError::RecipeLocked(recipe.id));
            }
            recipes.push(recipe);
        }
        let refs: Vec<&Recipe> = recipes.iter().collect();
        match self.open_order(&refs, vip) {
            Ok(id) => Ok(id),
            Err(e) => self.reject(e),
        }
    }

    /// Put a prepared order straight on the board, skipping the menu and
    /// pantry checks. The order gets the next free id, which is returned.
    pub fn insert_order(&mut self, mut order: Order) -> u32 {
        order.id = self.next_order_id;
        order.created_at_tick = self.tick;
        self.next_order_id += 1;
        self.spawn_order(order)
    }

    /// Assign an order to the best free staff member. A priority order may
    /// preempt a busy one. Returns the staff id.
    pub fn assign(&mut self, order_id: u32) -> Result<u32, ActionError> {
        self.ensure_open()?;
        match assign_order(
            &mut self.world,
            &mut self.restaurant,
            &self.config,
            order_id,
            true,
            &mut self.rng,
            &mut self.events,
        ) {
            Ok(staff_id) => {
                self.push_feedback(format!("Order #{} assigned", order_id), true);
                Ok(staff_id)
            }
            Err(e) => self.reject(e),
        }
    }

    /// Flip an order's priority flag. Returns the new value.
    pub fn toggle_order_priority(&mut self, order_id: u32) -> Result<bool, ActionError> {
        self.ensure_open()?;
        let toggled = find_order(&self.world, order_id).and_then(|entity| {
            self.world
                .get::<&mut Order>(entity)
                .map(|mut order| {
                    order.is_priority = !order.is_priority;
                    order.is_priority
                })
                .ok()
        });
        match toggled {
            Some(priority) => {
                log::debug!("Order #{} priority set to {}", order_id, priority);
                Ok(priority)
            }
            None => self.reject(ActionError::OrderNotFound(order_id)),
        }
    }

    /// Hire a random recruit. Returns the new staff id.
    pub fn hire_staff(&mut self) -> Result<u32, ActionError> {
        self.ensure_open()?;
        let count = staff_count(&self.world);
        if count >= self.config.economy.max_staff {
            return self.reject(ActionError::StaffCapReached(count));
        }
        if let Err(e) = self.restaurant.spend(self.config.economy.hire_cost) {
            return self.reject(e);
        }

        let recruit = random_recruit(&self.config, &mut self.rng);
        let id = self.next_staff_id;
        self.next_staff_id += 1;
        spawn_staff(&mut self.world, id, &recruit, &self.config, &mut self.rng);

        log::info!(
            "Hired {} ({}, {:?}, efficiency {:.2})",
            recruit.name,
            recruit.role,
            recruit.specialty,
            recruit.base_efficiency
        );
        self.events.push(DomainEvent::StaffHired {
            staff_id: id,
            name: recruit.name.clone(),
        });
        self.push_feedback(format!("Hired {}", recruit.name), true);
        self.check_milestones();
        Ok(id)
    }

    /// Let a staff member go. Busy staff must finish first.
    pub fn dismiss_staff(&mut self, staff_id: u32) -> Result<(), ActionError> {
        self.ensure_open()?;
        let found = find_staff(&self.world, staff_id).and_then(|entity| {
            self.world
                .get::<&Staff>(entity)
                .map(|s| (entity, s.status, s.name.clone()))
                .ok()
        });
        let Some((entity, status, name)) = found else {
            return self.reject(ActionError::StaffNotFound(staff_id));
        };
        if status == StaffStatus::Busy {
            return self.reject(ActionError::StaffBusy(staff_id));
        }

        let _ = self.world.despawn(entity);
        for (_, (staff, vitals, traits)) in self.world.query_mut::<(&Staff, &mut Vitals, &Traits)>() {
            apply_morale_events(staff, vitals, traits, &[MoraleEvent::ColleagueDismissed], &self.config);
        }
        if self.top_performer.map(|t| t.staff_id) == Some(staff_id) {
            self.top_performer = None;
        }

        log::info!("Dismissed {}", name);
        self.events.push(DomainEvent::StaffDismissed {
            staff_id,
            name: name.clone(),
        });
        self.push_feedback(format!("Dismissed {}", name), true);
        Ok(())
    }

    /// Train a staff member one level. Returns the new level.
    pub fn upgrade_staff(&mut self, staff_id: u32) -> Result<u8, ActionError> {
        self.ensure_open()?;
        let found = find_staff(&self.world, staff_id).and_then(|entity| {
            self.world
                .get::<&Staff>(entity)
                .map(|s| (entity, s.upgrade_level))
                .ok()
        });
        let Some((entity, level)) = found else {
            return self.reject(ActionError::StaffNotFound(staff_id));
        };
        if level >= self.config.performance.max_upgrade_level {
            return self.reject(ActionError::LevelCapReached);
        }
        let cost = self.config.economy.staff_upgrade_cost * (level as i64 + 1);
        if let Err(e) = self.restaurant.spend(cost) {
            return self.reject(e);
        }

        if let Ok((staff, vitals, mood)) =
            self.world.query_one_mut::<(&mut Staff, &Vitals, &MoodState)>(entity)
        {
            staff.upgrade_level += 1;
            refresh_efficiency(staff, vitals, mood, &self.config);
            log::info!("{} trained to level {} for ${}", staff.name, staff.upgrade_level, cost);
        }
        self.push_feedback(format!("Staff #{} trained to level {}", staff_id, level + 1), true);
        Ok(level + 1)
    }

    /// Buy the next level of a piece of equipment. Returns the new level.
    pub fn upgrade_equipment(&mut self, equipment_id: &str) -> Result<u8, ActionError> {
        self.ensure_open()?;
        let cost = match self.restaurant.equipment.get(equipment_id) {
            Some(slot) => slot.next_upgrade_cost(),
            None => return self.reject(ActionError::EquipmentNotFound(equipment_id.to_string())),
        };
        let Some(cost) = cost else {
            return self.reject(ActionError::LevelCapReached);
        };
        if let Err(e) = self.restaurant.spend(cost) {
            return self.reject(e);
        }

        match self.restaurant.equipment.raise_level(equipment_id) {
            Some(level) => {
                log::info!("{} upgraded to level {} for ${}", equipment_id, level, cost);
                self.push_feedback(format!("{} upgraded to level {}", equipment_id, level), true);
                Ok(level)
            }
            None => self.reject(ActionError::LevelCapReached),
        }
    }

    /// Refill the pantry: everything for a flat fee, or one ingredient at
    /// a per-unit price. Returns what was charged; nothing is charged when
    /// the stock is already full.
    pub fn restock(&mut self, ingredient: Option<&str>) -> Result<i64, ActionError> {
        self.ensure_open()?;
        let full_cost = self.config.economy.full_restock_cost;
        let unit_cost = self.config.economy.unit_restock_cost;
        let cost = match ingredient {
            None => {
                if self.restaurant.inventory.total_missing() == 0 {
                    return Ok(0);
                }
                full_cost
            }
            Some(name) => match self.restaurant.inventory.get(name) {
                Some(stock) if stock.missing() == 0 => return Ok(0),
                Some(stock) => stock.missing() as i64 * unit_cost,
                None => return self.reject(ActionError::UnknownIngredient(name.to_string())),
            },
        };
        if let Err(e) = self.restaurant.spend(cost) {
            return self.reject(e);
        }

        let added = match ingredient {
            None => self.restaurant.inventory.restock_all(),
            Some(name) => match self.restaurant.inventory.restock(name) {
                Ok(added) => added,
                Err(e) => return self.reject(e.into()),
            },
        };
        log::info!("Restocked {} unit(s) for ${}", added, cost);
        self.push_feedback(format!("Restocked {} unit(s) for ${}", added, cost), true);
        Ok(cost)
    }

    fn ensure_open(&mut self) -> Result<(), ActionError> {
        if self.phase == SimPhase::GameOver {
            return self.reject(ActionError::GameOver);
        }
        Ok(())
    }

    fn reject<T>(&mut self, err: ActionError) -> Result<T, ActionError> {
        log::info!("Action rejected: {}", err);
        self.push_feedback(err.to_string(), false);
        Err(err)
    }

    fn push_feedback(&mut self, message: String, positive: bool) {
        if self.feedback.len() >= FEEDBACK_HISTORY {
            self.feedback.pop_front();
        }
        self.feedback.push_back(message.clone());
        self.events.push(DomainEvent::Feedback { message, positive });
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn day_timer(&self) -> u32 {
        self.day_timer
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn spawn_chance(&self) -> f32 {
        self.spawn_chance
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn revenue(&self) -> i64 {
        self.restaurant.revenue
    }

    pub fn rating(&self) -> f32 {
        self.restaurant.rating()
    }

    pub fn top_performer(&self) -> Option<TopPerformer> {
        self.top_performer
    }

    /// Summary shown while waiting for the operator to close the day
    pub fn pending_summary(&self) -> Option<&DaySummary> {
        self.pending_summary.as_ref()
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<DomainEvent> {
        self.events.drain()
    }

    pub fn recent_feedback(&self) -> impl Iterator<Item = &String> {
        self.feedback.iter()
    }

    pub fn order(&self, order_id: u32) -> Option<Order> {
        let entity = find_order(&self.world, order_id)?;
        self.world.get::<&Order>(entity).ok().map(|o| (*o).clone())
    }

    pub fn staff(&self, staff_id: u32) -> Option<Staff> {
        let entity = find_staff(&self.world, staff_id)?;
        self.world.get::<&Staff>(entity).ok().map(|s| (*s).clone())
    }

    pub fn vitals(&self, staff_id: u32) -> Option<Vitals> {
        let entity = find_staff(&self.world, staff_id)?;
        self.world.get::<&Vitals>(entity).ok().map(|v| *v)
    }

    /// Live orders by id
    pub fn orders(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .world
            .query::<&Order>()
            .iter()
            .map(|(_, o)| o.clone())
            .collect();
        orders.sort_by_key(|o| o.id);
        orders
    }

    /// Copy of everything a renderer needs
    pub fn snapshot(&self) -> SimulationSnapshot {
        let mut staff: Vec<StaffSnapshot> = self
            .world
            .query::<(&Staff, &Vitals, &MoodState, &Traits)>()
            .iter()
            .map(|(_, (staff, vitals, mood, traits))| StaffSnapshot {
                staff: staff.clone(),
                vitals: *vitals,
                mood: mood.mood,
                traits: traits.ids.clone(),
            })
            .collect();
        staff.sort_by_key(|s| s.staff.id);

        let r = &self.restaurant;
        SimulationSnapshot {
            tick: self.tick,
            day: self.day,
            day_timer: self.day_timer,
            day_duration: self.config.economy.day_duration,
            phase: self.phase,
            revenue: r.revenue,
            total_earned: r.total_earned,
            reputation: r.reputation,
            satisfaction: r.satisfaction,
            rating: r.rating(),
            happy_customers: r.happy_customers,
            unhappy_customers: r.unhappy_customers,
            average_wait: r.average_wait(),
            spawn_chance: self.spawn_chance,
            orders: self.orders(),
            staff,
            inventory: r.inventory.clone(),
            equipment: r.equipment.clone(),
            mastery: r.mastery.clone(),
            unlocked_recipes: r.unlocked_recipes.iter().cloned().collect(),
            achievements: r.achievements.iter().copied().collect(),
            top_performer: self.top_performer,
            pending_summary: self.pending_summary.clone(),
            feedback: self.feedback.iter().cloned().collect(),
        }
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brigade_logic::config::{Cuisine, StaffTemplate};
    use brigade_logic::inventory::Requirements;

    fn cook(name: &str, efficiency: f32) -> StaffTemplate {
        StaffTemplate {
            name: name.into(),
            role: "Line Cook".into(),
            base_efficiency: efficiency,
            specialty: Cuisine::Vegetarian,
            traits: Vec::new(),
        }
    }

    /// No spontaneous orders, a fixed roster
    fn quiet_config(roster: Vec<StaffTemplate>) -> GameConfig {
        let mut config = GameConfig::default();
        config.roster = roster;
        config.orders.base_spawn_chance = 0.0;
        config.orders.max_spawn_chance = 0.0;
        config
    }

    fn engine(roster: Vec<StaffTemplate>) -> SimulationEngine {
        let mut engine = SimulationEngine::with_seed(quiet_config(roster), 7);
        for (_, mood) in engine.world.query_mut::<&mut MoodState>() {
            mood.timer = 10_000;
        }
        engine.start_day().unwrap();
        engine
    }

    fn steak(engine: &SimulationEngine, price: u32, limit: u32) -> Order {
        let recipe = engine.config().recipe("beef_steak").unwrap();
        let required: Requirements = [("Beef".to_string(), 1), ("Vegetables".to_string(), 1)]
            .into_iter()
            .collect();
        Order::new(0, vec![LineItem::from_recipe(recipe)], price, limit, required, false)
    }

    #[test]
    fn starts_idle_with_roster() {
        let engine = SimulationEngine::with_seed(GameConfig::default(), 1);
        assert_eq!(engine.phase(), SimPhase::Idle);
        assert_eq!(engine.snapshot().staff.len(), GameConfig::default().roster.len());
        assert_eq!(engine.revenue(), 500);
    }

    #[test]
    fn idle_engine_does_not_tick() {
        let mut engine = SimulationEngine::with_seed(GameConfig::default(), 1);
        assert!(!engine.advance());
        assert_eq!(engine.tick(), 0);
    }

    #[test]
    fn pause_and_resume() {
        let mut engine = engine(vec![cook("Ana", 1.0)]);
        engine.pause().unwrap();
        assert!(!engine.advance());
        engine.resume().unwrap();
        assert!(engine.advance());
        assert_eq!(engine.tick(), 1);
    }

    #[test]
    fn full_efficiency_order_takes_67_ticks() {
        let mut engine = engine(vec![cook("Ana", 1.0)]);
        let order = steak(&engine, 25, 100);
        let id = engine.insert_order(order);
        assert_eq!(engine.assign(id).unwrap(), 1);
        assert_eq!(engine.revenue(), 496);

        assert_eq!(engine.advance_by(66), 66);
        assert_eq!(engine.order(id).unwrap().status, OrderStatus::InProgress);
        engine.advance();
        assert!(engine.order(id).is_none());

        assert_eq!(engine.revenue(), 521);
        let ana = engine.staff(1).unwrap();
        assert_eq!(ana.orders_completed, 1);
        assert_eq!(ana.status, StaffStatus::Available);
        assert!(engine
            .drain_events()
            .iter()
            .any(|e| matches!(e, DomainEvent::OrderCompleted { order_id, .. } if *order_id == id)));
    }

    #[test]
    fn unattended_order_expires() {
        let mut engine = engine(Vec::new());
        let order = steak(&engine, 25, 10);
        let id = engine.insert_order(order);

        engine.advance_by(9);
        assert_eq!(engine.order(id).unwrap().status, OrderStatus::Pending);
        engine.advance();
        assert!(engine.order(id).is_none());
        assert!((engine.restaurant.satisfaction - 90.0).abs() < 1e-4);
        assert_eq!(engine.restaurant.unhappy_customers, 1);
    }

    #[test]
    fn sweep_picks_up_order_only_once_below_urgent_fraction() {
        let mut engine = engine(vec![cook("Ana", 1.0)]);
        let order = steak(&engine, 25, 100);
        let id = engine.insert_order(order);

        // tick 71 sweeps at exactly 30 remaining, which is not yet urgent
        engine.advance_by(71);
        let waiting = engine.order(id).unwrap();
        assert_eq!(waiting.status, OrderStatus::Pending);
        assert_eq!(waiting.time_remaining, 29);

        engine.advance();
        let picked = engine.order(id).unwrap();
        assert_eq!(picked.status, OrderStatus::InProgress);
        assert_eq!(picked.assigned_staff, Some(1));
    }

    #[test]
    fn priority_order_preempts_happiest_cook() {
        let mut engine = engine(vec![cook("Ana", 0.8), cook("Ben", 0.8)]);
        let first = steak(&engine, 25, 150);
        let second = steak(&engine, 25, 150);
        let a = engine.insert_order(first);
        let b = engine.insert_order(second);
        assert_eq!(engine.assign(a).unwrap(), 1);
        assert_eq!(engine.assign(b).unwrap(), 2);

        for (_, (staff, vitals)) in engine.world.query_mut::<(&Staff, &mut Vitals)>() {
            vitals.morale = if staff.id == 1 { 60.0 } else { 80.0 };
        }

        let mut urgent = steak(&engine, 25, 150);
        urgent.is_priority = true;
        let c = engine.insert_order(urgent);
        assert_eq!(engine.assign(c).unwrap(), 2);

        assert_eq!(engine.order(b).unwrap().status, OrderStatus::Paused);
        assert_eq!(engine.order(c).unwrap().status, OrderStatus::InProgress);
        assert_eq!(engine.order(a).unwrap().status, OrderStatus::InProgress);
    }

    #[test]
    fn short_pantry_rejects_order_without_side_effects() {
        let mut engine = engine(vec![cook("Ana", 1.0)]);
        engine.restaurant.inventory.set_current("Beef", 1).unwrap();
        let before = engine.restaurant.inventory.clone();

        let err = engine.place_order(&["beef_steak", "beef_steak"], false).unwrap_err();
        assert_eq!(
            err,
            ActionError::InsufficientIngredients {
                ingredient: "Beef".into(),
                needed: 2,
                available: 1
            }
        );
        assert_eq!(engine.restaurant.inventory, before);
        assert!(engine.orders().is_empty());
        assert!(engine
            .drain_events()
            .iter()
            .any(|e| matches!(e, DomainEvent::Feedback { positive: false, .. })));
    }

    #[test]
    fn unaffordable_penalty_ends_the_game() {
        let mut config = quiet_config(vec![cook("Ana", 0.1)]);
        config.economy.day_duration = 5;
        let mut engine = SimulationEngine::with_seed(config, 3);
        engine.start_day().unwrap();

        let order = steak(&engine, 50, 100);
        let id = engine.insert_order(order);
        engine.assign(id).unwrap();
        engine.advance_by(5);
        assert_eq!(engine.phase(), SimPhase::AwaitingDayConfirmation);
        assert!(engine.pending_summary().is_some());

        engine.restaurant.revenue = 40;
        for (_, order) in engine.world.query_mut::<&mut Order>() {
            order.progress = 0.0;
        }
        let summary = engine.acknowledge_day_boundary().unwrap();
        assert_eq!(summary.penalty, 50);
        assert!(!summary.survives());
        assert_eq!(engine.phase(), SimPhase::GameOver);
        assert_eq!(engine.revenue(), -10);
        assert_eq!(engine.day(), 1);
        assert!(engine.order(id).is_some());

        assert!(!engine.advance());
        assert_eq!(engine.hire_staff(), Err(ActionError::GameOver));
    }

    #[test]
    fn settled_day_opens_the_next() {
        let mut config = quiet_config(vec![cook("Ana", 1.0)]);
        config.economy.day_duration = 80;
        let mut engine = SimulationEngine::with_seed(config, 3);
        engine.start_day().unwrap();
        let order = steak(&engine, 25, 100);
        let id = engine.insert_order(order);
        engine.assign(id).unwrap();

        assert_eq!(engine.advance_by(100), 80);
        assert_eq!(engine.phase(), SimPhase::AwaitingDayConfirmation);
        assert!(!engine.advance());

        let summary = engine.acknowledge_day_boundary().unwrap();
        assert_eq!(summary.orders_completed, 1);
        assert_eq!(summary.top_performer, Some(1));
        assert_eq!(engine.phase(), SimPhase::Running);
        assert_eq!(engine.day(), 2);
        assert_eq!(engine.day_timer(), 0);
        assert_eq!(engine.top_performer().map(|t| t.staff_id), Some(1));
        assert_eq!(engine.staff(1).unwrap().day_orders, 0);
        assert_eq!(engine.restaurant.today, DayStats::default());
        // 521 + floor(521 * 0.1) + floor(1 * 0.5)
        assert_eq!(engine.revenue(), 573);
    }

    #[test]
    fn acknowledge_outside_boundary_is_rejected() {
        let mut engine = engine(vec![cook("Ana", 1.0)]);
        assert_eq!(
            engine.acknowledge_day_boundary(),
            Err(ActionError::WrongPhase(SimPhase::Running))
        );
    }

    #[test]
    fn locked_and_unknown_recipes() {
        let mut engine = engine(vec![cook("Ana", 1.0)]);
        assert_eq!(
            engine.place_order(&["truffle_soup"], false),
            Err(ActionError::UnknownRecipe("truffle_soup".into()))
        );
        let locked = engine
            .config()
            .recipes
            .iter()
            .find(|r| r.unlock_threshold > 0)
            .map(|r| r.id.clone())
            .unwrap();
        assert_eq!(
            engine.place_order(&[locked.as_str()], false),
            Err(ActionError::RecipeLocked(locked.clone()))
        );
        assert_eq!(engine.place_order(&[], false), Err(ActionError::EmptyOrder));
    }

    #[test]
    fn hire_and_dismiss() {
        let mut engine = engine(vec![cook("Ana", 1.0), cook("Ben", 1.0)]);
        let id = engine.hire_staff().unwrap();
        assert_eq!(id, 3);
        assert_eq!(engine.revenue(), 350);
        let recruit = engine.staff(id).unwrap();
        let economy = &engine.config().economy;
        assert!(recruit.base_efficiency >= economy.hire_efficiency_min);
        assert!(recruit.base_efficiency <= economy.hire_efficiency_max);

        let morale_before = engine.vitals(1).unwrap().morale;
        engine.dismiss_staff(id).unwrap();
        assert!(engine.staff(id).is_none());
        assert!(engine.vitals(1).unwrap().morale < morale_before);
        assert_eq!(engine.dismiss_staff(id), Err(ActionError::StaffNotFound(id)));
    }

    #[test]
    fn busy_staff_cannot_be_dismissed() {
        let mut engine = engine(vec![cook("Ana", 1.0)]);
        let order = steak(&engine, 25, 100);
        let id = engine.insert_order(order);
        engine.assign(id).unwrap();
        assert_eq!(engine.dismiss_staff(1), Err(ActionError::StaffBusy(1)));
    }

    #[test]
    fn purchases_must_leave_money_in_the_till() {
        let mut engine = engine(vec![cook("Ana", 1.0)]);
        engine.restaurant.revenue = 150;
        assert_eq!(
            engine.hire_staff(),
            Err(ActionError::InsufficientFunds { cost: 150, available: 150 })
        );
        assert_eq!(engine.revenue(), 150);
        assert_eq!(engine.staff(2), None);
    }

    #[test]
    fn staff_upgrades_cost_more_each_level() {
        let mut engine = engine(vec![cook("Ana", 0.5)]);
        let before = engine.staff(1).unwrap().efficiency;
        assert_eq!(engine.upgrade_staff(1).unwrap(), 1);
        assert_eq!(engine.revenue(), 400);
        assert!(engine.staff(1).unwrap().efficiency > before);
        assert_eq!(engine.upgrade_staff(1).unwrap(), 2);
        assert_eq!(engine.revenue(), 200);
        assert_eq!(engine.upgrade_staff(9), Err(ActionError::StaffNotFound(9)));
    }

    #[test]
    fn equipment_upgrade() {
        let mut engine = engine(vec![cook("Ana", 1.0)]);
        assert_eq!(engine.upgrade_equipment("range").unwrap(), 1);
        assert_eq!(engine.revenue(), 350);
        assert_eq!(
            engine.upgrade_equipment("espresso"),
            Err(ActionError::EquipmentNotFound("espresso".into()))
        );
    }

    #[test]
    fn prep_station_saves_ingredients() {
        let roster = (1..=40).map(|i| cook(&format!("Cook {i}"), 1.0)).collect();
        let mut engine = engine(roster);
        while engine.restaurant.equipment.raise_level("prep_station").is_some() {}
        assert!(engine.restaurant.bonuses(engine.config()).ingredient_efficiency > 0.2);

        for _ in 0..40 {
            let order = steak(&engine, 25, 100);
            let id = engine.insert_order(order);
            engine.assign(id).unwrap();
        }

        let pantry = &engine.restaurant.inventory;
        let left = pantry.get("Beef").unwrap().current + pantry.get("Vegetables").unwrap().current;
        let drawn = 200 - left;
        assert!(drawn < 80, "drew {drawn} of 80 required units");
        assert!(drawn > 0);
        assert_eq!(engine.revenue(), 500 - 2 * drawn as i64);
    }

    #[test]
    fn restock_prices() {
        let mut engine = engine(vec![cook("Ana", 1.0)]);
        assert_eq!(engine.restock(None).unwrap(), 0);

        engine.restaurant.inventory.set_current("Beef", 90).unwrap();
        assert_eq!(engine.restock(Some("Beef")).unwrap(), 10);
        assert_eq!(engine.revenue(), 490);

        engine.restaurant.inventory.set_current("Rice", 10).unwrap();
        assert_eq!(engine.restock(None).unwrap(), 50);
        assert_eq!(engine.restaurant.inventory.total_missing(), 0);
        assert_eq!(
            engine.restock(Some("Saffron")),
            Err(ActionError::UnknownIngredient("Saffron".into()))
        );
    }

    #[test]
    fn toggle_priority() {
        let mut engine = engine(vec![cook("Ana", 1.0)]);
        let order = steak(&engine, 25, 100);
        let id = engine.insert_order(order);
        assert_eq!(engine.toggle_order_priority(id), Ok(true));
        assert_eq!(engine.toggle_order_priority(id), Ok(false));
        assert_eq!(engine.toggle_order_priority(99), Err(ActionError::OrderNotFound(99)));
    }

    #[test]
    fn feedback_history_is_bounded() {
        let mut engine = engine(Vec::new());
        for id in 100..110 {
            let _ = engine.assign(id);
        }
        assert_eq!(engine.recent_feedback().count(), FEEDBACK_HISTORY);
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let mut engine = SimulationEngine::with_seed(GameConfig::default(), 42);
            engine.start_day().unwrap();
            engine.advance_by(120);
            engine.snapshot().to_json().unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn reset_restores_opening_state() {
        let mut engine = SimulationEngine::with_seed(GameConfig::default(), 9);
        let opening = engine.snapshot();
        engine.start_day().unwrap();
        engine.advance_by(50);
        engine.reset();
        assert_eq!(engine.phase(), SimPhase::Idle);
        assert_eq!(engine.snapshot(), opening);
    }
}
