//! Staff generation - the opening roster and random hires

use brigade_logic::config::{Cuisine, GameConfig, StaffTemplate};
use brigade_logic::constants::{STARTING_LOYALTY, TRAITS_PER_STAFF};
use brigade_logic::mood::{roll_mood_timer, Mood};
use brigade_logic::performance::StaffStatus;
use hecs::{Entity, World};
use rand::seq::SliceRandom;
use rand::Rng;

use super::names::{generate_name, role_for};
use crate::components::{refresh_efficiency, MoodState, Staff, Traits, Vitals};

/// Spawn one staff member from a template
pub fn spawn_staff(
    world: &mut World,
    id: u32,
    template: &StaffTemplate,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Entity {
    let traits = Traits::from_ids(template.traits.clone(), config);
    let vitals = Vitals::fresh(config.performance.baseline_morale);
    let mood = MoodState {
        mood: Mood::Neutral,
        timer: roll_mood_timer(&config.performance, rng),
    };
    let mut staff = Staff {
        id,
        name: template.name.clone(),
        role: template.role.clone(),
        specialty: template.specialty,
        base_efficiency: template.base_efficiency,
        efficiency: template.base_efficiency,
        upgrade_level: 0,
        status: StaffStatus::Available,
        current_order: None,
        performance: traits.performance_cap(config),
        loyalty: STARTING_LOYALTY,
        orders_completed: 0,
        day_orders: 0,
        month_orders: 0,
    };
    refresh_efficiency(&mut staff, &vitals, &mood, config);

    world.spawn((staff, vitals, mood, traits))
}

/// Spawn the configured opening roster with ids starting at `first_id`
pub fn spawn_roster(
    world: &mut World,
    first_id: u32,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    config
        .roster
        .iter()
        .zip(first_id..)
        .map(|(template, id)| spawn_staff(world, id, template, config, rng))
        .collect()
}

/// Random recruit: efficiency uniform in the hiring range, a random
/// specialty and distinct traits
pub fn random_recruit(config: &GameConfig, rng: &mut impl Rng) -> StaffTemplate {
    let economy = &config.economy;
    let base_efficiency = rng.gen_range(economy.hire_efficiency_min..=economy.hire_efficiency_max);
    let specialty = Cuisine::ALL[rng.gen_range(0..Cuisine::ALL.len())];
    let traits = config
        .traits
        .choose_multiple(rng, TRAITS_PER_STAFF)
        .map(|t| t.id.clone())
        .collect();

    StaffTemplate {
        name: generate_name(rng),
        role: role_for(base_efficiency).to_string(),
        base_efficiency,
        specialty,
        traits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn roster_spawns_with_sequential_ids() {
        let config = GameConfig::default();
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(1);
        let entities = spawn_roster(&mut world, 1, &config, &mut rng);
        assert_eq!(entities.len(), 4);

        let mario = world.get::<&Staff>(entities[0]).unwrap();
        assert_eq!(mario.id, 1);
        assert_eq!(mario.name, "Chef Mario");
        // perfectionist adds 10 performance points
        assert!((mario.performance - 110.0).abs() < f32::EPSILON);
        assert!((mario.efficiency - 0.9).abs() < 1e-6);
        assert_eq!(world.get::<&Staff>(entities[3]).unwrap().id, 4);
    }

    #[test]
    fn recruits_stay_in_hiring_range() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(17);
        for _ in 0..200 {
            let recruit = random_recruit(&config, &mut rng);
            assert!((0.6..=0.9).contains(&recruit.base_efficiency));
            assert_eq!(recruit.traits.len(), 2);
            assert_ne!(recruit.traits[0], recruit.traits[1]);
        }
    }
}
