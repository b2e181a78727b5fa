//! # Encounter Placement
//!
//! Puts the player in the first room and scatters the floor's enemies over
//! the others.

use crate::config::MAX_ENTITIES;
use crate::game::{Entity, Level};
use crate::rendering::SPRITE_ENEMY_BASE;
use crate::utils::Lcg;
use log::{trace, warn};

/// Number of enemies spawned on floor `level_num`.
pub fn enemy_count(level_num: u8) -> usize {
    (usize::from(level_num) + 2).min(MAX_ENTITIES)
}

/// Places the player and refills every enemy slot for a freshly generated
/// floor.
///
/// The player lands on a random cell of room 0. Each of the first
/// [`enemy_count`] slots draws a room (any but room 0 when there is more
/// than one) and a cell in it; a draw that hits the player or the stairs is
/// not retried and leaves its slot inactive. The remaining slots are
/// cleared.
pub fn place_entities(
    level: &Level,
    player: &mut Entity,
    entities: &mut [Entity; MAX_ENTITIES],
    rng: &mut Lcg,
) {
    let rooms = level.rooms();
    let Some(first_room) = rooms.first() else {
        warn!("Floor {} has no rooms; nothing placed", level.level_num);
        entities.fill(Entity::inactive());
        return;
    };

    player.position = first_room.random_point(rng);

    let count = enemy_count(level.level_num);
    let last_room = rooms.len() as u8 - 1;

    for (idx, slot) in entities.iter_mut().enumerate() {
        if idx >= count {
            *slot = Entity::inactive();
            continue;
        }

        let room_idx = if last_room > 0 {
            rng.range(1, last_room)
        } else {
            0
        };
        let pos = rooms[usize::from(room_idx)].random_point(rng);

        if pos == player.position || pos == level.stairs {
            trace!("Enemy slot {} collided at {:?}; left empty", idx, pos);
            *slot = Entity::inactive();
            continue;
        }

        let sprite_idx = SPRITE_ENEMY_BASE + (idx % 4) as u8;
        *slot = Entity::enemy(pos, level.level_num, sprite_idx);
    }
}
