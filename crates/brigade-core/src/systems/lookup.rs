//! Id-based lookups over the world

use brigade_logic::performance::StaffStatus;
use hecs::{Entity, World};

use crate::components::{Order, Staff};

/// Entity holding the live order with this id
pub fn find_order(world: &World, order_id: u32) -> Option<Entity> {
    world
        .query::<&Order>()
        .iter()
        .find(|(_, o)| o.id == order_id)
        .map(|(entity, _)| entity)
}

/// Entity holding the staff member with this id
pub fn find_staff(world: &World, staff_id: u32) -> Option<Entity> {
    world
        .query::<&Staff>()
        .iter()
        .find(|(_, s)| s.id == staff_id)
        .map(|(entity, _)| entity)
}

/// Orders still on the board
pub fn live_order_count(world: &World) -> usize {
    world
        .query::<&Order>()
        .iter()
        .filter(|(_, o)| o.status.is_live())
        .count()
}

pub fn staff_count(world: &World) -> usize {
    world.query::<&Staff>().iter().count()
}

pub fn available_staff_count(world: &World) -> usize {
    world
        .query::<&Staff>()
        .iter()
        .filter(|(_, s)| s.status == StaffStatus::Available)
        .count()
}
