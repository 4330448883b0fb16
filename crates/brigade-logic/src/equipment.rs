//! Kitchen equipment levels and the aggregate bonuses they grant.
//!
//! Equipment is read-only to the simulation except for its level, which
//! only changes through an explicit upgrade. The engine reads four
//! aggregate bonuses, each capped so no effect can reach 100%.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::EquipmentDef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentEffect {
    /// Shortens the work an order needs (fixed at order creation).
    CookingSpeed,
    /// Chance per ingredient unit of not consuming it.
    IngredientEfficiency,
    /// Price increase at order creation.
    PriceBoost,
    /// Slows fatigue gain while busy.
    FatigueReduction,
}

/// Aggregate bonus per effect kind, each a fraction in [0, cap].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentBonuses {
    pub cooking_speed: f32,
    pub ingredient_efficiency: f32,
    pub price_boost: f32,
    pub fatigue_reduction: f32,
}

impl EquipmentBonuses {
    /// Progress multiplier that shortens required cooking time.
    pub fn speed_factor(&self) -> f32 {
        1.0 / (1.0 - self.cooking_speed)
    }
}

/// One installed piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSlot {
    pub name: String,
    pub effect: EquipmentEffect,
    pub effect_per_level: f32,
    pub level: u8,
    pub max_level: u8,
    pub base_cost: i64,
}

impl EquipmentSlot {
    /// Price of the next level, or `None` at the cap.
    pub fn next_upgrade_cost(&self) -> Option<i64> {
        if self.level >= self.max_level {
            None
        } else {
            Some(self.base_cost * (self.level as i64 + 1))
        }
    }
}

/// Equipment installed in the kitchen, keyed by equipment id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRack {
    slots: BTreeMap<String, EquipmentSlot>,
}

impl EquipmentRack {
    pub fn from_defs(defs: &[EquipmentDef]) -> Self {
        let slots = defs
            .iter()
            .map(|d| {
                (
                    d.id.clone(),
                    EquipmentSlot {
                        name: d.name.clone(),
                        effect: d.effect,
                        effect_per_level: d.effect_per_level,
                        level: d.starting_level,
                        max_level: d.max_level,
                        base_cost: d.base_cost,
                    },
                )
            })
            .collect();
        Self { slots }
    }

    pub fn get(&self, id: &str) -> Option<&EquipmentSlot> {
        self.slots.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EquipmentSlot)> {
        self.slots.iter()
    }

    /// Raise an item one level. Returns the new level, or `None` if the id
    /// is unknown or already at its cap.
    pub fn raise_level(&mut self, id: &str) -> Option<u8> {
        let slot = self.slots.get_mut(id)?;
        if slot.level >= slot.max_level {
            return None;
        }
        slot.level += 1;
        Some(slot.level)
    }

    /// Sum effects per kind and clamp each to `cap`.
    pub fn bonuses(&self, cap: f32) -> EquipmentBonuses {
        let mut b = EquipmentBonuses::default();
        for slot in self.slots.values() {
            let amount = slot.effect_per_level * slot.level as f32;
            match slot.effect {
                EquipmentEffect::CookingSpeed => b.cooking_speed += amount,
                EquipmentEffect::IngredientEfficiency => b.ingredient_efficiency += amount,
                EquipmentEffect::PriceBoost => b.price_boost += amount,
                EquipmentEffect::FatigueReduction => b.fatigue_reduction += amount,
            }
        }
        EquipmentBonuses {
            cooking_speed: b.cooking_speed.clamp(0.0, cap),
            ingredient_efficiency: b.ingredient_efficiency.clamp(0.0, cap),
            price_boost: b.price_boost.clamp(0.0, cap),
            fatigue_reduction: b.fatigue_reduction.clamp(0.0, cap),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn fresh_rack_has_no_bonus() {
        let rack = EquipmentRack::from_defs(&GameConfig::default().equipment);
        assert_eq!(rack.bonuses(0.5), EquipmentBonuses::default());
        assert!((rack.bonuses(0.5).speed_factor() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn upgrades_accumulate_and_cap() {
        let mut rack = EquipmentRack::from_defs(&GameConfig::default().equipment);
        assert_eq!(rack.raise_level("break_room"), Some(1));
        assert_eq!(rack.raise_level("break_room"), Some(2));
        assert!((rack.bonuses(0.5).fatigue_reduction - 0.16).abs() < 1e-6);

        for _ in 0..3 {
            rack.raise_level("break_room");
        }
        assert_eq!(rack.raise_level("break_room"), None);
        // 5 × 0.08 = 0.4, below the cap
        assert!((rack.bonuses(0.5).fatigue_reduction - 0.4).abs() < 1e-6);
        assert!((rack.bonuses(0.25).fatigue_reduction - 0.25).abs() < 1e-6);
    }

    #[test]
    fn upgrade_cost_scales_with_level() {
        let mut rack = EquipmentRack::from_defs(&GameConfig::default().equipment);
        assert_eq!(rack.get("range").unwrap().next_upgrade_cost(), Some(150));
        rack.raise_level("range");
        assert_eq!(rack.get("range").unwrap().next_upgrade_cost(), Some(300));
    }

    #[test]
    fn unknown_equipment() {
        let mut rack = EquipmentRack::default();
        assert_eq!(rack.raise_level("espresso"), None);
    }

    #[test]
    fn cooking_speed_factor() {
        let b = EquipmentBonuses {
            cooking_speed: 0.2,
            ..Default::default()
        };
        assert!((b.speed_factor() - 1.25).abs() < 1e-6);
    }
}
