//! Domain events - what happened in the kitchen, for whoever is listening
//!
//! The engine pushes events into a bounded [`EventLog`]; the caller drains
//! it between ticks. Nobody has to drain it: once full, the oldest entries
//! are dropped.

use std::collections::VecDeque;

use brigade_logic::constants::EVENT_LOG_CAPACITY;
use brigade_logic::mood::Mood;
use serde::{Deserialize, Serialize};

use crate::achievements::Achievement;
use crate::systems::DaySummary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainEvent {
    OrderCreated {
        order_id: u32,
        total_price: u32,
        is_vip: bool,
    },
    OrderCompleted {
        order_id: u32,
        staff_id: Option<u32>,
        revenue: u32,
        is_vip: bool,
    },
    OrderFailed {
        order_id: u32,
        staff_id: Option<u32>,
        is_vip: bool,
    },
    /// A priority order took this staff member away from `order_id`
    OrderPaused {
        order_id: u32,
        staff_id: u32,
        preempted_by: u32,
    },
    StaffMoodChanged {
        staff_id: u32,
        from: Mood,
        to: Mood,
    },
    StaffHired {
        staff_id: u32,
        name: String,
    },
    StaffDismissed {
        staff_id: u32,
        name: String,
    },
    RecipeUnlocked {
        recipe_id: String,
        name: String,
    },
    AchievementUnlocked(Achievement),
    DayBoundaryReached(DaySummary),
    DayStarted {
        day: u32,
    },
    GameOver {
        day: u32,
        revenue: i64,
    },
    /// Operator-facing message
    Feedback {
        message: String,
        positive: bool,
    },
}

/// Bounded FIFO of domain events
#[derive(Debug, Clone)]
pub struct EventLog {
    events: VecDeque<DomainEvent>,
    capacity: usize,
    dropped: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: DomainEvent) {
        if self.events.len() >= self.capacity {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> Vec<DomainEvent> {
        self.events.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomainEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events lost to overflow since creation
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}
