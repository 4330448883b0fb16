//! Restaurant-wide state: treasury, reputation, customers, pantry, equipment
//!
//! Singleton-like, stored in the engine next to the `World`. Systems borrow
//! it alongside the world rather than looking it up as an entity.

use std::collections::BTreeSet;

use brigade_logic::config::{GameConfig, Recipe};
use brigade_logic::economy::{adjust_satisfaction, average_rating, can_afford};
use brigade_logic::equipment::{EquipmentBonuses, EquipmentRack};
use brigade_logic::inventory::Inventory;
use brigade_logic::mastery::MasteryBook;
use serde::{Deserialize, Serialize};

use crate::achievements::Achievement;
use crate::components::Order;
use crate::error::ActionError;

/// Counters for the day in progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    pub completed: u32,
    pub failed: u32,
    pub earned: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    /// Treasury; the game ends when it reaches zero
    pub revenue: i64,
    /// Lifetime order income, drives recipe unlocks
    pub total_earned: i64,
    pub reputation: u32,
    /// 0-100
    pub satisfaction: f32,
    pub happy_customers: u32,
    pub unhappy_customers: u32,
    pub orders_completed: u32,
    pub vip_served: u32,
    pub total_wait_ticks: u64,
    pub inventory: Inventory,
    pub equipment: EquipmentRack,
    pub mastery: MasteryBook,
    pub unlocked_recipes: BTreeSet<String>,
    pub achievements: BTreeSet<Achievement>,
    pub today: DayStats,
}

impl Restaurant {
    /// Opening state: full pantry, stock equipment, starter recipes
    pub fn new(config: &GameConfig) -> Self {
        let unlocked_recipes = config
            .recipes
            .iter()
            .filter(|r| r.unlock_threshold <= 0)
            .map(|r| r.id.clone())
            .collect();
        Self {
            revenue: config.economy.starting_revenue,
            total_earned: 0,
            reputation: 0,
            satisfaction: 100.0,
            happy_customers: 0,
            unhappy_customers: 0,
            orders_completed: 0,
            vip_served: 0,
            total_wait_ticks: 0,
            inventory: Inventory::from_defs(&config.ingredients),
            equipment: EquipmentRack::from_defs(&config.equipment),
            mastery: MasteryBook::new(),
            unlocked_recipes,
            achievements: BTreeSet::new(),
            today: DayStats::default(),
        }
    }

    /// Aggregate equipment bonuses under the configured cap
    pub fn bonuses(&self, config: &GameConfig) -> EquipmentBonuses {
        self.equipment.bonuses(config.performance.max_equipment_bonus)
    }

    pub fn rating(&self) -> f32 {
        average_rating(self.happy_customers, self.unhappy_customers)
    }

    /// Mean ticks from creation to completion
    pub fn average_wait(&self) -> f32 {
        if self.orders_completed == 0 {
            0.0
        } else {
            self.total_wait_ticks as f32 / self.orders_completed as f32
        }
    }

    pub fn adjust_satisfaction(&mut self, delta: f32) {
        self.satisfaction = adjust_satisfaction(self.satisfaction, delta);
    }

    /// Recipes order generation may draw from, in table order
    pub fn available_recipes<'a>(&self, config: &'a GameConfig) -> Vec<&'a Recipe> {
        config
            .recipes
            .iter()
            .filter(|r| self.unlocked_recipes.contains(&r.id))
            .collect()
    }

    /// Deduct `cost` if the till stays positive afterwards
    pub fn spend(&mut self, cost: i64) -> Result<(), ActionError> {
        if !can_afford(self.revenue, cost) {
            return Err(ActionError::InsufficientFunds {
                cost,
                available: self.revenue,
            });
        }
        self.revenue -= cost;
        Ok(())
    }

    /// Book a completed order: money, reputation, customers, mastery
    pub fn record_completion(&mut self, order: &Order, config: &GameConfig) {
        let economy = &config.economy;
        let price = order.total_price as i64;
        self.revenue += price;
        self.total_earned += price;
        self.today.earned += price;
        self.today.completed += 1;
        self.orders_completed += 1;
        self.happy_customers += 1;
        self.total_wait_ticks += order.elapsed() as u64;

        if order.is_vip {
            self.vip_served += 1;
            self.reputation += economy.vip_reputation_gain;
            self.adjust_satisfaction(economy.vip_satisfaction_gain);
        } else {
            self.reputation += economy.reputation_gain;
            self.adjust_satisfaction(economy.satisfaction_gain);
        }

        for item in &order.items {
            if let Some(level) = self.mastery.record(&item.recipe_id, &config.mastery) {
                log::info!("{} mastery reached level {}", item.name, level);
            }
        }
    }

    /// Book a failed order: one more unhappy customer
    pub fn record_failure(&mut self, order: &Order, config: &GameConfig) {
        let economy = &config.economy;
        self.today.failed += 1;
        self.unhappy_customers += 1;
        let penalty = if order.is_vip {
            economy.vip_satisfaction_penalty
        } else {
            economy.satisfaction_penalty
        };
        self.adjust_satisfaction(-penalty);
    }

    /// Unlock every recipe whose earnings threshold has been crossed.
    /// Returns the newly unlocked recipes.
    pub fn unlock_recipes<'a>(&mut self, config: &'a GameConfig) -> Vec<&'a Recipe> {
        let fresh: Vec<&Recipe> = config
            .recipes
            .iter()
            .filter(|r| r.unlock_threshold <= self.total_earned)
            .filter(|r| !self.unlocked_recipes.contains(&r.id))
            .collect();
        for recipe in &fresh {
            self.unlocked_recipes.insert(recipe.id.clone());
        }
        fresh
    }
}
