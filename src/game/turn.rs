//! # Turn Engine
//!
//! Per-action world updates: player movement and attacks, the enemy pass,
//! hunger, item pickup and use, and floor transitions.
//!
//! Nothing here fails. Every rejected action (blocked move, full inventory,
//! empty slot) leaves the state untouched.

use crate::config::MAX_HUNGER;
use crate::game::combat::{self, CombatOutcome};
use crate::game::{Direction, GameMode, GameState, ItemType, Tile};
use crate::utils::next_level_seed;
use log::{info, trace};

impl GameState {
    /// Moves the player one cell by `(dx, dy)`, each in `{-1, 0, 1}`.
    ///
    /// Walking into an enemy attacks it without moving, whatever the outcome.
    /// Stepping onto the stairs descends immediately. A completed step costs
    /// one hunger point and gives every enemy one move.
    pub fn move_player(&mut self, dx: i8, dy: i8) {
        let Some(target) = self.player.position.offset(dx, dy) else {
            return;
        };
        if !self.level.is_walkable(target) {
            return;
        }

        if let Some(idx) = self.enemy_at(target) {
            let outcome = combat::resolve(&mut self.player, &mut self.entities[idx]);
            self.record_player_attack(&outcome);
            self.statistics.turns_taken += 1;
            return;
        }

        if self.level.tile(target) == Tile::Stairs {
            self.change_level(self.level.level_num.saturating_add(1));
            return;
        }

        self.player.position = target;
        self.statistics.turns_taken += 1;
        self.update_hunger();
        self.update_enemies();
    }

    /// Gives every active enemy one move, in slot order.
    ///
    /// An enemy sharing the player's room steps toward the player on both
    /// axes at once; anywhere else it wanders in a random cardinal direction.
    /// Stepping into the player attacks instead of moving. Enemies never
    /// fight or swap with each other.
    pub fn update_enemies(&mut self) {
        for idx in 0..self.entities.len() {
            if !self.entities[idx].active {
                continue;
            }

            let enemy_pos = self.entities[idx].position;
            let player_pos = self.player.position;
            let player_room = self.level.room_at(player_pos);

            let (dx, dy) = match player_room {
                Some(room) if self.level.room_at(enemy_pos) == Some(room) => {
                    enemy_pos.step_toward(player_pos)
                }
                _ => {
                    let roll = usize::from(self.rng.next_byte() % 4);
                    Direction::CARDINAL[roll].to_delta()
                }
            };

            let Some(target) = enemy_pos.offset(dx, dy) else {
                continue;
            };
            if !self.level.is_walkable(target) {
                continue;
            }

            if target == player_pos {
                let outcome = combat::resolve(&mut self.entities[idx], &mut self.player);
                self.statistics.damage_taken += u32::from(outcome.damage);
                if self.player.stats.hp == 0 {
                    self.game_over();
                }
                continue;
            }

            let blocked = self
                .entities
                .iter()
                .enumerate()
                .any(|(other, entity)| other != idx && entity.occupies(target));
            if blocked {
                continue;
            }

            trace!("Enemy {} moves {:?} -> {:?}", idx, enemy_pos, target);
            self.entities[idx].position = target;
        }
    }

    /// Burns one hunger point; an empty stomach costs 1 hp per turn.
    pub fn update_hunger(&mut self) {
        let stats = &mut self.player.stats;
        stats.hunger = stats.hunger.saturating_sub(1);

        if stats.hunger == 0 && stats.hp > 0 {
            stats.hp -= 1;
            self.statistics.damage_taken += 1;
            if self.player.stats.hp == 0 {
                info!("Player starved on floor {}", self.level.level_num);
                self.game_over();
            }
        }
    }

    /// Moves the first item lying under the player into the first free
    /// inventory slot. Returns false when there is nothing to pick up or the
    /// inventory is full (the item then stays on the floor).
    pub fn pickup_item(&mut self) -> bool {
        let pos = self.player.position;
        let Some(item_idx) = self.items.iter().position(|item| item.lies_at(pos)) else {
            return false;
        };

        if self.inventory.insert(item_idx as u8).is_none() {
            return false;
        }
        self.items[item_idx].in_world = false;
        self.statistics.items_collected += 1;
        true
    }

    /// Applies the item in inventory `slot`. Empty or out-of-range slots are
    /// ignored.
    ///
    /// Weapons and armor overwrite the player's attack or defense and stay in
    /// the inventory. Potions, scrolls and food are consumed.
    pub fn use_item(&mut self, slot: usize) -> bool {
        let Some(item_idx) = self.inventory.get(slot) else {
            return false;
        };
        let item = self.items[usize::from(item_idx)];
        let stats = &mut self.player.stats;

        match item.item_type {
            ItemType::Weapon => stats.attack = item.value,
            ItemType::Armor => stats.defense = item.value,
            ItemType::Potion => {
                stats.hp = stats.hp.saturating_add(item.value).min(stats.max_hp);
            }
            ItemType::Scroll => self.scroll_blast(item.value),
            ItemType::Food => {
                let restored = u16::from(stats.hunger) + u16::from(item.value) * 10;
                stats.hunger = restored.min(u16::from(MAX_HUNGER)) as u8;
            }
            // Reserved for locked doors
            ItemType::Key => {}
        }

        if item.item_type.is_consumed_on_use() {
            self.inventory.take(slot);
        }
        self.statistics.items_used += 1;
        true
    }

    /// Damages every active enemy in the player's room by `power`.
    fn scroll_blast(&mut self, power: u8) {
        let Some(room) = self.level.room_at(self.player.position) else {
            return;
        };

        for enemy in self.entities.iter_mut().filter(|e| e.active) {
            if self.level.room_at(enemy.position) != Some(room) {
                continue;
            }
            if enemy.stats.hp <= power {
                self.statistics.damage_dealt += u32::from(enemy.stats.hp);
                self.statistics.enemies_defeated += 1;
                enemy.stats.hp = 0;
                enemy.active = false;
            } else {
                enemy.stats.hp -= power;
                self.statistics.damage_dealt += u32::from(power);
            }
        }
    }

    /// Replaces the current floor with floor `new_level_num`.
    ///
    /// The next seed comes from the level-seed LCG; the new floor is then
    /// generated and populated exactly like the first one. Player stats and
    /// inventory contents carry over.
    pub fn change_level(&mut self, new_level_num: u8) {
        self.seed = next_level_seed(self.seed);
        info!(
            "Descending to floor {} (seed {:#010x})",
            new_level_num, self.seed
        );
        self.build_level(new_level_num);
    }

    /// Ends the game.
    pub fn game_over(&mut self) {
        if self.mode != GameMode::GameOver {
            info!(
                "Game over on floor {} after {} turns",
                self.level.level_num, self.statistics.turns_taken
            );
        }
        self.mode = GameMode::GameOver;
    }

    fn record_player_attack(&mut self, outcome: &CombatOutcome) {
        self.statistics.damage_dealt += u32::from(outcome.damage);
        if outcome.defender_died {
            self.statistics.enemies_defeated += 1;
        }
        if outcome.leveled_up {
            info!("Player reached level {}", self.player.stats.level);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{MAX_ENTITIES, MAX_ITEMS};
    use crate::game::{
        Direction, Entity, GameMode, GameState, Item, ItemType, Level, Position, Tile,
    };
    use crate::generation::Room;

    /// A single 8x8 room at (2,2) with the stairs in the far corner and no
    /// enemies or items.
    fn arena() -> GameState {
        let mut game_state = GameState::new();
        let mut level = Level::new(1);
        level.add_room(Room::new(2, 2, 8, 8));
        level.place_stairs(Position::new(9, 9));

        game_state.level = level;
        game_state.mode = GameMode::Playing;
        game_state.player.position = Position::new(3, 3);
        game_state.entities = [Entity::inactive(); MAX_ENTITIES];
        game_state.items = [Item::default(); MAX_ITEMS];
        game_state.inventory.clear();
        game_state
    }

    fn give(game_state: &mut GameState, item_type: ItemType, value: u8) -> usize {
        let idx = (0..MAX_ITEMS)
            .find(|&idx| !game_state.inventory.contains(idx as u8))
            .unwrap();
        game_state.items[idx] = Item {
            item_type,
            value,
            ..Item::default()
        };
        game_state.inventory.insert(idx as u8).unwrap()
    }

    #[test]
    fn test_move_into_floor() {
        let mut game_state = arena();
        game_state.move_player(1, 0);
        assert_eq!(game_state.player.position, Position::new(4, 3));
        assert_eq!(game_state.player.stats.hunger, 99);
        assert_eq!(game_state.statistics.turns_taken, 1);
    }

    #[test]
    fn test_move_into_wall_is_ignored() {
        let mut game_state = arena();
        game_state.player.position = Position::new(2, 2);
        let before = game_state.clone();
        game_state.move_player(-1, 0);
        game_state.move_player(-1, -1);
        game_state.move_player(0, -1);
        assert_eq!(game_state.player, before.player);
        assert_eq!(game_state.statistics, before.statistics);
        assert_eq!(game_state.rng, before.rng);
    }

    #[test]
    fn test_diagonal_move() {
        let mut game_state = arena();
        game_state.move_player(1, 1);
        assert_eq!(game_state.player.position, Position::new(4, 4));
    }

    #[test]
    fn test_attack_in_place_when_enemy_survives() {
        let mut game_state = arena();
        game_state.entities[0] = Entity::enemy(Position::new(4, 3), 1, 4);
        game_state.entities[0].stats.hp = 9;

        game_state.move_player(1, 0);

        assert_eq!(game_state.player.position, Position::new(3, 3));
        assert_eq!(game_state.entities[0].stats.hp, 7);
        assert!(game_state.entities[0].active);
        // Attacks do not advance hunger
        assert_eq!(game_state.player.stats.hunger, 100);
    }

    #[test]
    fn test_kill_does_not_displace_player() {
        let mut game_state = arena();
        game_state.entities[0] = Entity::enemy(Position::new(4, 3), 1, 4);
        game_state.entities[0].stats.hp = 1;

        game_state.move_player(1, 0);

        assert!(!game_state.entities[0].active);
        assert_eq!(game_state.player.position, Position::new(3, 3));
        assert_eq!(game_state.player.stats.experience, 15);
        assert_eq!(game_state.statistics.enemies_defeated, 1);
    }

    #[test]
    fn test_stairs_trigger_level_change() {
        let mut game_state = arena();
        game_state.player.position = Position::new(8, 9);
        let seed = game_state.seed;

        game_state.move_player(1, 0);

        assert_eq!(game_state.level.level_num, 2);
        assert_eq!(game_state.seed, crate::utils::next_level_seed(seed));
        assert_eq!(game_state.statistics.max_depth_reached, 2);
        // Descending is not a regular step
        assert_eq!(game_state.player.stats.hunger, 100);
    }

    #[test]
    fn test_enemy_in_room_closes_diagonally() {
        let mut game_state = arena();
        game_state.entities[0] = Entity::enemy(Position::new(7, 7), 1, 4);

        game_state.move_player(1, 0);

        assert_eq!(game_state.entities[0].position, Position::new(6, 6));
    }

    #[test]
    fn test_enemy_attacks_instead_of_entering_player_tile() {
        let mut game_state = arena();
        game_state.entities[0] = Entity::enemy(Position::new(6, 4), 1, 4);

        // Player steps to (4,3); enemy at (6,4) steps to (5,3)
        game_state.move_player(1, 0);
        assert_eq!(game_state.entities[0].position, Position::new(5, 3));
        assert_eq!(game_state.player.stats.hp, 10);

        // Player steps away to (4,4); enemy's diagonal step lands on the player
        game_state.move_player(0, 1);
        assert_eq!(game_state.entities[0].position, Position::new(5, 3));
        assert_eq!(game_state.player.stats.hp, 9);
        assert_eq!(game_state.statistics.damage_taken, 1);
    }

    #[test]
    fn test_enemies_block_each_other() {
        let mut game_state = arena();
        game_state.player.position = Position::new(3, 5);
        game_state.entities[0] = Entity::enemy(Position::new(8, 5), 1, 4);
        game_state.entities[1] = Entity::enemy(Position::new(7, 5), 1, 5);

        // Slot 0 moves first and is blocked by slot 1, which then advances
        game_state.move_player(1, 0);

        assert_eq!(game_state.entities[0].position, Position::new(8, 5));
        assert_eq!(game_state.entities[1].position, Position::new(6, 5));
    }

    /// Where a wandering enemy at `from` ends up for the next draw of `rng`.
    fn wander_target(rng: &mut crate::utils::Lcg, from: Position) -> Position {
        let (dx, dy) = Direction::CARDINAL[usize::from(rng.next_byte() % 4)].to_delta();
        from.offset(dx, dy).unwrap()
    }

    #[test]
    fn test_enemy_outside_player_room_wanders() {
        let mut game_state = arena();
        game_state.level.add_room(Room::new(14, 2, 8, 8));
        game_state.entities[0] = Entity::enemy(Position::new(7, 7), 1, 4);
        game_state.entities[1] = Entity::enemy(Position::new(17, 5), 1, 5);
        let mut expected_rng = game_state.rng;

        game_state.update_enemies();

        // Slot 0 shares the player's room and chases without a draw
        assert_eq!(game_state.entities[0].position, Position::new(6, 6));
        let wandered = wander_target(&mut expected_rng, Position::new(17, 5));
        assert_eq!(game_state.entities[1].position, wandered);
        assert_eq!(game_state.rng, expected_rng);
    }

    #[test]
    fn test_player_in_corridor_makes_everyone_wander() {
        let mut game_state = arena();
        game_state.level.set_tile(Position::new(10, 5), Tile::Door);
        game_state.level.set_tile(Position::new(11, 5), Tile::Floor);
        game_state.player.position = Position::new(11, 5);
        assert_eq!(game_state.level.room_at(game_state.player.position), None);

        game_state.entities[0] = Entity::enemy(Position::new(8, 5), 1, 4);
        game_state.entities[1] = Entity::enemy(Position::new(4, 4), 1, 5);
        let mut expected_rng = game_state.rng;

        game_state.update_enemies();

        let first = wander_target(&mut expected_rng, Position::new(8, 5));
        let second = wander_target(&mut expected_rng, Position::new(4, 4));
        assert_eq!(game_state.entities[0].position, first);
        assert_eq!(game_state.entities[1].position, second);
        assert_eq!(game_state.rng, expected_rng);
    }

    #[test]
    fn test_chasing_enemies_leave_stream_untouched() {
        let mut game_state = arena();
        game_state.entities[0] = Entity::enemy(Position::new(7, 7), 1, 4);
        game_state.entities[1] = Entity::enemy(Position::new(3, 8), 1, 5);
        let before = game_state.rng;

        game_state.update_enemies();

        assert_eq!(game_state.entities[0].position, Position::new(6, 6));
        assert_eq!(game_state.entities[1].position, Position::new(3, 7));
        assert_eq!(game_state.rng, before);
    }

    #[test]
    fn test_enemy_kills_player() {
        let mut game_state = arena();
        game_state.player.stats.hp = 1;
        game_state.entities[0] = Entity::enemy(Position::new(5, 3), 1, 4);

        game_state.move_player(1, 0);

        assert_eq!(game_state.player.stats.hp, 0);
        assert_eq!(game_state.mode, GameMode::GameOver);
    }

    #[test]
    fn test_starvation() {
        let mut game_state = arena();
        game_state.player.stats.hunger = 1;

        game_state.move_player(1, 0);
        assert_eq!(game_state.player.stats.hunger, 0);
        assert_eq!(game_state.player.stats.hp, 9);

        game_state.player.stats.hp = 1;
        game_state.move_player(-1, 0);
        assert_eq!(game_state.player.stats.hp, 0);
        assert!(game_state.is_game_over());
    }

    #[test]
    fn test_pickup_moves_item_into_inventory() {
        let mut game_state = arena();
        game_state.items[3] = Item {
            item_type: ItemType::Potion,
            value: 2,
            position: Position::new(3, 3),
            in_world: true,
            subtype: 0,
        };

        assert!(game_state.pickup_item());
        assert_eq!(game_state.inventory.get(0), Some(3));
        assert!(!game_state.items[3].in_world);
        assert!(!game_state.pickup_item());
    }

    #[test]
    fn test_pickup_with_full_inventory_leaves_item() {
        let mut game_state = arena();
        for _ in 0..crate::config::MAX_INVENTORY {
            game_state.inventory.insert(31);
        }
        game_state.items[0] = Item {
            item_type: ItemType::Food,
            value: 1,
            position: Position::new(3, 3),
            in_world: true,
            subtype: 0,
        };

        assert!(!game_state.pickup_item());
        assert!(game_state.items[0].in_world);
    }

    #[test]
    fn test_potion_heals_and_is_consumed() {
        let mut game_state = arena();
        game_state.player.stats.hp = 4;
        let slot = give(&mut game_state, ItemType::Potion, 3);

        assert!(game_state.use_item(slot));
        assert_eq!(game_state.player.stats.hp, 7);
        assert_eq!(game_state.inventory.get(slot), None);
    }

    #[test]
    fn test_potion_clamps_to_max_hp() {
        let mut game_state = arena();
        game_state.player.stats.hp = 9;
        let slot = give(&mut game_state, ItemType::Potion, 5);

        game_state.use_item(slot);
        assert_eq!(game_state.player.stats.hp, 10);
    }

    #[test]
    fn test_weapon_and_armor_overwrite_stats_and_stay() {
        let mut game_state = arena();
        game_state.player.stats.attack = 6;
        let slot = give(&mut game_state, ItemType::Weapon, 2);

        game_state.use_item(slot);
        assert_eq!(game_state.player.stats.attack, 2);
        assert!(game_state.inventory.get(slot).is_some());
    }

    #[test]
    fn test_food_restores_hunger() {
        let mut game_state = arena();
        game_state.player.stats.hunger = 50;
        let slot = give(&mut game_state, ItemType::Food, 2);

        game_state.use_item(slot);
        assert_eq!(game_state.player.stats.hunger, 70);
        assert!(game_state.inventory.is_empty());

        game_state.player.stats.hunger = 95;
        let slot = give(&mut game_state, ItemType::Food, 2);
        game_state.use_item(slot);
        assert_eq!(game_state.player.stats.hunger, 100);
    }

    #[test]
    fn test_scroll_hits_enemies_in_room_only() {
        let mut game_state = arena();
        game_state.level.add_room(Room::new(20, 2, 4, 4));
        game_state.entities[0] = Entity::enemy(Position::new(6, 6), 1, 4);
        game_state.entities[1] = Entity::enemy(Position::new(7, 7), 1, 5);
        game_state.entities[1].stats.hp = 9;
        game_state.entities[2] = Entity::enemy(Position::new(21, 3), 1, 6);
        let slot = give(&mut game_state, ItemType::Scroll, 3);

        game_state.use_item(slot);

        assert!(!game_state.entities[0].active);
        assert_eq!(game_state.entities[1].stats.hp, 6);
        assert_eq!(game_state.entities[2].stats.hp, 3);
        assert!(game_state.inventory.is_empty());
    }

    #[test]
    fn test_key_does_nothing() {
        let mut game_state = arena();
        let before = game_state.player;
        let slot = give(&mut game_state, ItemType::Key, 1);

        game_state.use_item(slot);
        assert_eq!(game_state.player, before);
        assert!(game_state.inventory.get(slot).is_some());
    }

    #[test]
    fn test_use_invalid_slot_is_noop() {
        let mut game_state = arena();
        assert!(!game_state.use_item(0));
        assert!(!game_state.use_item(200));
        assert_eq!(game_state.statistics.items_used, 0);
    }

    #[test]
    fn test_stairs_tile_is_walkable_target() {
        let game_state = arena();
        assert_eq!(game_state.level.tile(Position::new(9, 9)), Tile::Stairs);
        assert!(game_state.level.is_walkable(Position::new(9, 9)));
    }
}
