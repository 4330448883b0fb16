//! Staff system - fatigue, morale, mood and efficiency for every staff member

use brigade_logic::config::GameConfig;
use brigade_logic::equipment::EquipmentBonuses;
use brigade_logic::mood::{pick_next_mood, roll_mood_timer};
use brigade_logic::performance::{
    apply_fatigue, apply_morale, morale_delta, ready_to_return, MoraleEvent, StaffStatus,
};
use hecs::World;
use rand::Rng;

use crate::components::{morale_context, refresh_efficiency, MoodState, Staff, Traits, Vitals};
use crate::events::{DomainEvent, EventLog};

/// Apply discrete morale events to one staff member
pub fn apply_morale_events(
    staff: &Staff,
    vitals: &mut Vitals,
    traits: &Traits,
    morale_events: &[MoraleEvent],
    config: &GameConfig,
) {
    let delta = morale_delta(
        &config.morale_factors,
        morale_events,
        &morale_context(staff, vitals),
        &traits.modifiers,
    );
    vitals.morale = apply_morale(vitals.morale, delta);
}

/// One tick of the performance model for every staff member.
///
/// Order per staff member: fatigue, status transitions and idle tracking,
/// ambient morale factors, mood timer, then efficiency recompute.
pub fn staff_system(
    world: &mut World,
    config: &GameConfig,
    bonuses: &EquipmentBonuses,
    rng: &mut impl Rng,
    events: &mut EventLog,
) {
    let perf = &config.performance;

    for (_, (staff, vitals, mood, traits)) in
        world.query_mut::<(&mut Staff, &mut Vitals, &mut MoodState, &Traits)>()
    {
        vitals.fatigue = apply_fatigue(
            vitals.fatigue,
            staff.status,
            bonuses.fatigue_reduction,
            &traits.modifiers,
            perf,
        );

        match staff.status {
            StaffStatus::Resting => {
                if ready_to_return(vitals.fatigue, perf) {
                    staff.status = StaffStatus::Available;
                }
            }
            StaffStatus::Available => {
                vitals.idle_ticks += 1;
                staff.performance =
                    (staff.performance + perf.performance_recovery).min(traits.performance_cap(config));
            }
            StaffStatus::Busy => vitals.idle_ticks = 0,
        }

        apply_morale_events(staff, vitals, traits, &MoraleEvent::AMBIENT, config);

        mood.timer = mood.timer.saturating_sub(1);
        if mood.timer == 0 {
            if let Some(next) =
                pick_next_mood(&config.moods, mood.mood, vitals.fatigue, vitals.morale, rng)
            {
                log::debug!("{} is now {}", staff.name, next.label());
                events.push(DomainEvent::StaffMoodChanged {
                    staff_id: staff.id,
                    from: mood.mood,
                    to: next,
                });
                mood.mood = next;
            }
            mood.timer = roll_mood_timer(perf, rng);
        }

        refresh_efficiency(staff, vitals, mood, config);
    }
}
