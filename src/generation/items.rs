//! # Item Placement
//!
//! Scatters a floor's loot over its rooms.

use crate::config::{MAX_ENTITIES, MAX_ITEMS};
use crate::game::{Entity, Inventory, Item, ItemType, Level, Position};
use crate::generation::GenerationConfig;
use crate::utils::Lcg;
use log::warn;

/// Number of items placed on floor `level_num`.
pub fn item_count(level_num: u8) -> usize {
    (3 + usize::from(level_num) / 2).min(MAX_ITEMS)
}

/// Value of every item generated on floor `level_num`.
pub fn item_value(level_num: u8) -> u8 {
    1 + level_num / 3
}

/// Refills the item array for a freshly populated floor.
///
/// Records referenced by `inventory` are left untouched so held items keep
/// their data across floors. Every other record is taken off the floor, and
/// the first [`item_count`] of them are placed again: each draws a random
/// room and cell, retrying until the cell is free of the player, the stairs,
/// active enemies and items placed earlier in this call. A record that finds
/// no free cell within the configured attempt budget stays off the floor.
pub fn place_items(
    level: &Level,
    player: &Entity,
    entities: &[Entity; MAX_ENTITIES],
    inventory: &Inventory,
    items: &mut [Item; MAX_ITEMS],
    config: &GenerationConfig,
    rng: &mut Lcg,
) {
    for (idx, item) in items.iter_mut().enumerate() {
        if !inventory.contains(idx as u8) {
            item.in_world = false;
        }
    }

    if level.num_rooms() == 0 {
        return;
    }

    let count = item_count(level.level_num);
    let free_slots = (0..MAX_ITEMS)
        .filter(|&idx| !inventory.contains(idx as u8))
        .take(count);

    for idx in free_slots {
        let Some(pos) = find_free_cell(level, player, entities, items, config, rng) else {
            warn!(
                "No free cell for item {} on floor {} after {} attempts",
                idx, level.level_num, config.item_placement_attempts
            );
            continue;
        };

        let item_type = ItemType::from_index(rng.range(0, 5));
        let subtype = rng.range(0, 3);
        items[idx] = Item {
            item_type,
            subtype,
            value: item_value(level.level_num),
            position: pos,
            in_world: true,
        };
    }
}

fn find_free_cell(
    level: &Level,
    player: &Entity,
    entities: &[Entity; MAX_ENTITIES],
    items: &[Item; MAX_ITEMS],
    config: &GenerationConfig,
    rng: &mut Lcg,
) -> Option<Position> {
    let rooms = level.rooms();
    let last_room = rooms.len() as u8 - 1;

    for _ in 0..config.item_placement_attempts {
        let room_idx = rng.range(0, last_room);
        let pos = rooms[usize::from(room_idx)].random_point(rng);

        let taken = pos == player.position
            || pos == level.stairs
            || entities.iter().any(|entity| entity.occupies(pos))
            || items.iter().any(|item| item.lies_at(pos));
        if !taken {
            return Some(pos);
        }
    }
    None
}
