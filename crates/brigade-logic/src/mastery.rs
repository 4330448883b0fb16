//! Recipe mastery: the kitchen gets better at dishes it cooks often.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::MasteryConfig;

/// Completions per recipe id, shared by the whole kitchen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasteryBook {
    completions: BTreeMap<String, u32>,
}

impl MasteryBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn completions(&self, recipe: &str) -> u32 {
        self.completions.get(recipe).copied().unwrap_or(0)
    }

    /// Mastery level: number of thresholds reached.
    pub fn level(&self, recipe: &str, config: &MasteryConfig) -> u8 {
        let done = self.completions(recipe);
        config.thresholds.iter().filter(|&&t| done >= t).count() as u8
    }

    /// Count one completion. Returns the new level if it went up.
    pub fn record(&mut self, recipe: &str, config: &MasteryConfig) -> Option<u8> {
        let before = self.level(recipe, config);
        *self.completions.entry(recipe.to_string()).or_insert(0) += 1;
        let after = self.level(recipe, config);
        (after > before).then_some(after)
    }

    pub fn speed_multiplier(&self, recipe: &str, config: &MasteryConfig) -> f32 {
        1.0 + self.level(recipe, config) as f32 * config.speed_bonus_per_level
    }

    pub fn price_multiplier(&self, recipe: &str, config: &MasteryConfig) -> f32 {
        1.0 + self.level(recipe, config) as f32 * config.price_bonus_per_level
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &u32)> {
        self.completions.iter()
    }
}
