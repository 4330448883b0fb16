//! Pantry stock. Every order contends for it.
//!
//! Consumption is all-or-nothing: [`Inventory::consume`] checks the whole
//! requirement before deducting anything, so stock never goes negative and
//! a failed call leaves the pantry untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::IngredientDef;

/// Ingredient name → units required.
pub type Requirements = BTreeMap<String, u32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub current: u32,
    pub max: u32,
}

impl Stock {
    pub fn fill_fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    pub fn missing(&self) -> u32 {
        self.max - self.current
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("unknown ingredient '{0}'")]
    UnknownIngredient(String),

    #[error("not enough {ingredient}: need {needed}, have {available}")]
    Insufficient {
        ingredient: String,
        needed: u32,
        available: u32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    stocks: BTreeMap<String, Stock>,
}

impl Inventory {
    /// Full pantry built from the ingredient table.
    pub fn from_defs(defs: &[IngredientDef]) -> Self {
        let stocks = defs
            .iter()
            .map(|d| {
                (
                    d.name.clone(),
                    Stock {
                        current: d.max,
                        max: d.max,
                    },
                )
            })
            .collect();
        Self { stocks }
    }

    pub fn get(&self, name: &str) -> Option<Stock> {
        self.stocks.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Stock)> {
        self.stocks.iter()
    }

    /// First ingredient that cannot cover `required`, if any.
    pub fn check(&self, required: &Requirements) -> Result<(), InventoryError> {
        for (name, &needed) in required {
            let stock = self
                .stocks
                .get(name)
                .ok_or_else(|| InventoryError::UnknownIngredient(name.clone()))?;
            if stock.current < needed {
                return Err(InventoryError::Insufficient {
                    ingredient: name.clone(),
                    needed,
                    available: stock.current,
                });
            }
        }
        Ok(())
    }

    pub fn can_fulfill(&self, required: &Requirements) -> bool {
        self.check(required).is_ok()
    }

    /// Deduct `required` atomically.
    pub fn consume(&mut self, required: &Requirements) -> Result<(), InventoryError> {
        self.check(required)?;
        for (name, &needed) in required {
            if let Some(stock) = self.stocks.get_mut(name) {
                stock.current = stock.current.saturating_sub(needed);
            }
        }
        Ok(())
    }

    /// Units needed to top every ingredient up to its max.
    pub fn total_missing(&self) -> u32 {
        self.stocks.values().map(Stock::missing).sum()
    }

    /// Fill everything to max. Returns units added.
    pub fn restock_all(&mut self) -> u32 {
        let added = self.total_missing();
        for stock in self.stocks.values_mut() {
            stock.current = stock.max;
        }
        added
    }

    /// Fill one ingredient to max. Returns units added.
    pub fn restock(&mut self, name: &str) -> Result<u32, InventoryError> {
        let stock = self
            .stocks
            .get_mut(name)
            .ok_or_else(|| InventoryError::UnknownIngredient(name.to_string()))?;
        let added = stock.missing();
        stock.current = stock.max;
        Ok(added)
    }

    /// Overwrite the current level, clamped to `[0, max]`.
    pub fn set_current(&mut self, name: &str, value: u32) -> Result<(), InventoryError> {
        let stock = self
            .stocks
            .get_mut(name)
            .ok_or_else(|| InventoryError::UnknownIngredient(name.to_string()))?;
        stock.current = value.min(stock.max);
        Ok(())
    }
}
