//! # Entities
//!
//! The player and enemies. Both share one record type; enemies live in a
//! fixed array of slots on [`GameState`](crate::GameState) and are only ever
//! deactivated, never removed.

use crate::config::{
    MAX_HUNGER, PLAYER_START_ATTACK, PLAYER_START_DEFENSE, PLAYER_START_HP,
};
use crate::game::{Direction, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    #[default]
    Enemy,
}

/// Combat and survival statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u8,
    pub max_hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub level: u8,
    pub experience: u16,
    /// 0 (starving) to 100 (full)
    pub hunger: u8,
}

impl Stats {
    /// Starting statistics of a fresh player.
    pub fn player_start() -> Self {
        Self {
            hp: PLAYER_START_HP,
            max_hp: PLAYER_START_HP,
            attack: PLAYER_START_ATTACK,
            defense: PLAYER_START_DEFENSE,
            level: 1,
            experience: 0,
            hunger: MAX_HUNGER,
        }
    }

    /// Statistics of an enemy spawned on floor `level_num`.
    ///
    /// # Examples
    ///
    /// ```
    /// use caverns::Stats;
    ///
    /// let stats = Stats::enemy_for_level(6);
    /// assert_eq!(stats.hp, 5);
    /// assert_eq!(stats.attack, 2);
    /// assert_eq!(stats.defense, 1);
    /// ```
    pub fn enemy_for_level(level_num: u8) -> Self {
        let hp = 3 + level_num / 3;
        Self {
            hp,
            max_hp: hp,
            attack: 1 + level_num / 4,
            defense: level_num / 5,
            level: level_num,
            experience: 0,
            hunger: MAX_HUNGER,
        }
    }

    /// Experience needed before the next level-up check succeeds.
    pub fn experience_for_next_level(&self) -> u16 {
        u16::from(self.level) * 20
    }
}

/// A player or enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub active: bool,
    pub position: Position,
    pub stats: Stats,
    pub facing: Direction,
    /// Tile-bank index used by the presentation layer
    pub sprite_idx: u8,
}

impl Entity {
    /// Creates the player at the origin; population moves it into room 0.
    pub fn player() -> Self {
        Self {
            kind: EntityKind::Player,
            active: true,
            position: Position::default(),
            stats: Stats::player_start(),
            facing: Direction::Down,
            sprite_idx: crate::rendering::SPRITE_PLAYER_DOWN,
        }
    }

    /// Creates an active enemy for floor `level_num`.
    pub fn enemy(position: Position, level_num: u8, sprite_idx: u8) -> Self {
        Self {
            kind: EntityKind::Enemy,
            active: true,
            position,
            stats: Stats::enemy_for_level(level_num),
            facing: Direction::Down,
            sprite_idx,
        }
    }

    /// An empty, inactive enemy slot.
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }

    pub fn is_enemy(&self) -> bool {
        self.kind == EntityKind::Enemy
    }

    /// Whether this entity is active and standing on `pos`.
    pub fn occupies(&self, pos: Position) -> bool {
        self.active && self.position == pos
    }

    /// Turns the entity to face `direction`, updating the player sprite.
    pub fn face(&mut self, direction: Direction) {
        self.facing = direction;
        if self.is_player() {
            self.sprite_idx = crate::rendering::player_sprite(direction);
        }
    }
}
