//! Staff moods and the weighted re-roll that changes them.
//!
//! Every staff member carries one mood with a multiplicative effect on
//! efficiency. When their mood timer runs out a new mood is drawn from the
//! configured table, excluding the current one and anything that does not
//! fit their fatigue and morale.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{MoodDef, PerformanceConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Neutral,
    Happy,
    Focused,
    Tired,
    Stressed,
    Inspired,
}

impl Mood {
    pub fn label(&self) -> &'static str {
        match self {
            Mood::Neutral => "Neutral",
            Mood::Happy => "Happy",
            Mood::Focused => "Focused",
            Mood::Tired => "Tired",
            Mood::Stressed => "Stressed",
            Mood::Inspired => "Inspired",
        }
    }
}

impl MoodDef {
    /// Whether this mood is consistent with the given fatigue and morale.
    pub fn fits(&self, fatigue: f32, morale: f32) -> bool {
        self.min_fatigue.map_or(true, |v| fatigue >= v)
            && self.max_fatigue.map_or(true, |v| fatigue <= v)
            && self.min_morale.map_or(true, |v| morale >= v)
            && self.max_morale.map_or(true, |v| morale <= v)
    }
}

/// Efficiency multiplier for a mood; moods missing from the table are neutral.
pub fn mood_multiplier(moods: &[MoodDef], mood: Mood) -> f32 {
    moods
        .iter()
        .find(|m| m.mood == mood)
        .map(|m| m.multiplier)
        .unwrap_or(1.0)
}

/// Draw the next mood. Returns `None` when no other mood is eligible.
pub fn pick_next_mood(
    moods: &[MoodDef],
    current: Mood,
    fatigue: f32,
    morale: f32,
    rng: &mut impl Rng,
) -> Option<Mood> {
    let candidates: Vec<&MoodDef> = moods
        .iter()
        .filter(|m| m.mood != current && m.weight > 0.0 && m.fits(fatigue, morale))
        .collect();
    if candidates.is_empty() {
        return None;
    }

    let dist = WeightedIndex::new(candidates.iter().map(|m| m.weight)).ok()?;
    candidates.get(dist.sample(rng)).map(|m| m.mood)
}

/// Ticks until the next mood change, uniform in the configured range.
pub fn roll_mood_timer(config: &PerformanceConfig, rng: &mut impl Rng) -> u32 {
    rng.gen_range(config.mood_timer_min..=config.mood_timer_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn never_repeats_current_mood() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let next = pick_next_mood(&config.moods, Mood::Neutral, 20.0, 60.0, &mut rng);
            assert_ne!(next, Some(Mood::Neutral));
            assert!(next.is_some());
        }
    }

    #[test]
    fn rested_staff_never_tired() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let next = pick_next_mood(&config.moods, Mood::Happy, 5.0, 60.0, &mut rng);
            assert_ne!(next, Some(Mood::Tired));
        }
    }

    #[test]
    fn exhausted_staff_never_focused_or_inspired() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let next = pick_next_mood(&config.moods, Mood::Neutral, 95.0, 80.0, &mut rng);
            assert!(!matches!(next, Some(Mood::Focused) | Some(Mood::Inspired)));
        }
    }

    #[test]
    fn no_eligible_mood_keeps_current() {
        let moods = vec![MoodDef {
            mood: Mood::Neutral,
            multiplier: 1.0,
            weight: 1.0,
            min_fatigue: None,
            max_fatigue: None,
            min_morale: None,
            max_morale: None,
        }];
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_next_mood(&moods, Mood::Neutral, 0.0, 50.0, &mut rng), None);
    }

    #[test]
    fn timer_within_range() {
        let config = PerformanceConfig::default();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let t = roll_mood_timer(&config, &mut rng);
            assert!((60..=120).contains(&t));
        }
    }

    #[test]
    fn missing_mood_is_neutral() {
        assert!((mood_multiplier(&[], Mood::Inspired) - 1.0).abs() < f32::EPSILON);
    }
}
