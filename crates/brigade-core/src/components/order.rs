//! Order components: Order, LineItem, OrderStatus

use brigade_logic::config::{Cuisine, Recipe};
use brigade_logic::constants::PROGRESS_COMPLETE;
use brigade_logic::inventory::Requirements;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    InProgress,
    Paused,
    Completed,
    Failed,
}

impl OrderStatus {
    /// Completed and Failed orders never change again
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Failed)
    }

    /// Whether a staff member may pick this order up
    pub fn is_assignable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Paused)
    }

    /// Still occupying a slot on the order board
    pub fn is_live(&self) -> bool {
        !self.is_terminal()
    }
}

/// One dish on an order, copied from the recipe book at creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub recipe_id: String,
    pub name: String,
    pub category: Cuisine,
    pub price: u32,
    /// Base prep time in ticks
    pub prep_time: u32,
}

impl LineItem {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            recipe_id: recipe.id.clone(),
            name: recipe.name.clone(),
            category: recipe.category,
            price: recipe.price,
            prep_time: recipe.time,
        }
    }
}

/// What happened to an order during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderTick {
    /// Still live
    Continue,
    /// Reached 100% progress; carries the staff member who finished it
    Completed { staff_id: Option<u32> },
    /// Ran out of time; carries the staff member working it, if any
    Failed { staff_id: Option<u32> },
}

/// A customer order working its way through the kitchen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u32,
    pub items: Vec<LineItem>,
    pub total_price: u32,
    /// Ticks allowed from creation
    pub time_limit: u32,
    pub time_remaining: u32,
    pub status: OrderStatus,
    /// 0-100
    pub progress: f32,
    /// Set exactly while InProgress
    pub assigned_staff: Option<u32>,
    /// Most recent staff member to work on the order
    pub last_assignee: Option<u32>,
    /// Units of each ingredient the order needs
    pub required_ingredients: Requirements,
    pub is_vip: bool,
    pub is_priority: bool,
    /// Ingredients are paid for on first assignment only
    pub ingredients_consumed: bool,
    /// Cooking-speed multiplier fixed when the order was created
    pub speed_factor: f32,
    pub created_at_tick: u64,
}

impl Order {
    /// Create a pending order with a full clock
    pub fn new(
        id: u32,
        items: Vec<LineItem>,
        total_price: u32,
        time_limit: u32,
        required_ingredients: Requirements,
        is_vip: bool,
    ) -> Self {
        Self {
            id,
            items,
            total_price,
            time_limit,
            time_remaining: time_limit,
            status: OrderStatus::Pending,
            progress: 0.0,
            assigned_staff: None,
            last_assignee: None,
            required_ingredients,
            is_vip,
            is_priority: false,
            ingredients_consumed: false,
            speed_factor: 1.0,
            created_at_tick: 0,
        }
    }

    /// Recipe that drives mastery bonuses for the whole order
    pub fn primary_recipe(&self) -> Option<&str> {
        self.items.first().map(|i| i.recipe_id.as_str())
    }

    /// Whether any line item is in the given cuisine
    pub fn matches_specialty(&self, specialty: Cuisine) -> bool {
        self.items.iter().any(|i| i.category == specialty)
    }

    /// Below `fraction` of its time limit and still waiting for a cook
    pub fn is_urgent(&self, fraction: f32) -> bool {
        self.time_limit > 0 && (self.time_remaining as f32 / self.time_limit as f32) < fraction
    }

    /// Ticks spent waiting since creation
    pub fn elapsed(&self) -> u32 {
        self.time_limit.saturating_sub(self.time_remaining)
    }

    /// Hand the order to a staff member
    pub fn start(&mut self, staff_id: u32) {
        debug_assert!(self.status.is_assignable());
        self.status = OrderStatus::InProgress;
        self.assigned_staff = Some(staff_id);
        self.last_assignee = Some(staff_id);
    }

    /// Take the order away from its cook, keeping progress
    pub fn pause(&mut self) -> Option<u32> {
        if self.status != OrderStatus::InProgress {
            return None;
        }
        self.status = OrderStatus::Paused;
        self.assigned_staff.take()
    }

    /// Advance one tick: burn a tick of the clock, add `progress_gain` if
    /// someone is cooking, then settle completion before failure.
    pub fn tick(&mut self, progress_gain: f32) -> OrderTick {
        if self.status.is_terminal() {
            return OrderTick::Continue;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);

        if self.status == OrderStatus::InProgress {
            self.progress = (self.progress + progress_gain).min(PROGRESS_COMPLETE);
            if self.progress >= PROGRESS_COMPLETE {
                self.status = OrderStatus::Completed;
                return OrderTick::Completed {
                    staff_id: self.assigned_staff.take(),
                };
            }
        }

        if self.time_remaining == 0 {
            self.status = OrderStatus::Failed;
            return OrderTick::Failed {
                staff_id: self.assigned_staff.take(),
            };
        }

        OrderTick::Continue
    }
}
