//! # Game State Module
//!
//! The aggregate of everything one game needs between turns, plus the mode
//! machine that routes input edges to the turn engine.
//!
//! All storage is fixed-capacity: enemies, items and inventory slots are
//! arrays indexed by slot, and the random stream is a plain value owned here
//! rather than a process-wide global.

use crate::config::{INITIAL_SEED, MAX_ENTITIES, MAX_INVENTORY, MAX_ITEMS};
use crate::game::{Entity, Inventory, Item, Level, Position};
use crate::generation::{place_entities, place_items, DungeonGenerator, GenerationConfig};
use crate::input::{ButtonMask, PlayerInput};
use crate::utils::Lcg;
use crate::{CavernsError, CavernsResult};
use log::{debug, info};
use serde::Serialize;

/// Coarse screen/mode of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum GameMode {
    #[default]
    Title,
    Playing,
    Inventory,
    GameOver,
}

/// Running totals for the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct GameStatistics {
    /// Player actions that consumed a turn (moves and attacks)
    pub turns_taken: u32,
    pub enemies_defeated: u32,
    pub items_collected: u32,
    pub items_used: u32,
    pub damage_dealt: u32,
    pub damage_taken: u32,
    /// Deepest floor reached
    pub max_depth_reached: u8,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Central game state.
///
/// Owned by the turn engine; presentation code only reads it.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub mode: GameMode,
    pub player: Entity,
    /// Enemy slots; inactive slots are kept and overwritten on the next floor
    pub entities: [Entity; MAX_ENTITIES],
    /// Item records; inventory slots index into this array
    pub items: [Item; MAX_ITEMS],
    pub inventory: Inventory,
    /// Selected slot on the inventory screen
    pub inventory_cursor: usize,
    pub level: Level,
    /// Seed the current floor was generated from
    pub seed: u32,
    /// Seed of floor 1; a restart after death reuses it
    pub initial_seed: u32,
    /// Stream shared by generation, population and enemy AI
    pub rng: Lcg,
    pub config: GenerationConfig,
    pub statistics: GameStatistics,
}

impl GameState {
    /// Creates a new game on the title screen, with floor 1 generated from
    /// the initial seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use caverns::{GameMode, GameState};
    ///
    /// let game_state = GameState::new();
    /// assert_eq!(game_state.mode, GameMode::Title);
    /// assert_eq!(game_state.level.level_num, 1);
    /// assert!(game_state.inventory.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_seed(INITIAL_SEED)
    }

    /// Creates a new game whose first floor is generated from `seed`.
    pub fn with_seed(seed: u32) -> Self {
        Self::with_config(seed, GenerationConfig::default())
    }

    /// Creates a new game with custom generation parameters.
    ///
    /// The configuration is assumed valid; see [`GenerationConfig::validate`].
    pub fn with_config(seed: u32, config: GenerationConfig) -> Self {
        let mut game_state = Self {
            mode: GameMode::Title,
            player: Entity::player(),
            entities: [Entity::inactive(); MAX_ENTITIES],
            items: [Item::default(); MAX_ITEMS],
            inventory: Inventory::new(),
            inventory_cursor: 0,
            level: Level::new(1),
            seed,
            initial_seed: seed,
            rng: Lcg::default(),
            config,
            statistics: GameStatistics::new(),
        };
        game_state.build_level(1);
        game_state
    }

    /// Regenerates the current floor from `self.seed` and repopulates it.
    ///
    /// Player stats and inventory survive; positions, enemies and in-world
    /// items are replaced.
    pub(crate) fn build_level(&mut self, level_num: u8) {
        let generator = DungeonGenerator::new(self.config);
        self.level = generator.generate_seeded(level_num, self.seed, &mut self.rng);

        place_entities(
            &self.level,
            &mut self.player,
            &mut self.entities,
            &mut self.rng,
        );
        place_items(
            &self.level,
            &self.player,
            &self.entities,
            &self.inventory,
            &mut self.items,
            &self.config,
            &mut self.rng,
        );

        self.statistics.max_depth_reached = self.statistics.max_depth_reached.max(level_num);
        debug!(
            "Floor {} ready: {} enemies, {} items, player at {:?}",
            level_num,
            self.active_enemy_count(),
            self.items.iter().filter(|item| item.in_world).count(),
            self.player.position
        );
    }

    /// Resolves one frame's worth of input edges.
    ///
    /// Commands are derived from the mode at the start of the call; each one
    /// is dropped if an earlier command in the same frame changed the mode.
    pub fn handle_input(&mut self, pressed: ButtonMask) {
        for command in PlayerInput::from_edges(pressed, self.mode) {
            self.apply(command);
        }
    }

    /// Executes a single command.
    pub fn apply(&mut self, command: PlayerInput) {
        match (self.mode, command) {
            (GameMode::Title, PlayerInput::StartGame) => {
                if self.player.stats.hp == 0 {
                    info!("Starting a fresh game");
                    *self = Self::with_config(self.initial_seed, self.config);
                }
                self.mode = GameMode::Playing;
            }
            (GameMode::Playing, PlayerInput::Move(direction)) => {
                self.player.face(direction);
                let (dx, dy) = direction.to_delta();
                self.move_player(dx, dy);
            }
            (GameMode::Playing, PlayerInput::PickUp) => {
                self.pickup_item();
            }
            (GameMode::Playing, PlayerInput::UseItem(slot)) => {
                self.use_item(slot);
            }
            (GameMode::Playing, PlayerInput::ToggleInventory) => {
                self.mode = GameMode::Inventory;
            }
            (GameMode::Inventory, PlayerInput::ToggleInventory) => {
                self.mode = GameMode::Playing;
            }
            (GameMode::Inventory, PlayerInput::CursorUp) => {
                self.inventory_cursor = self.inventory_cursor.saturating_sub(1);
            }
            (GameMode::Inventory, PlayerInput::CursorDown) => {
                self.inventory_cursor = (self.inventory_cursor + 1).min(MAX_INVENTORY - 1);
            }
            (GameMode::Inventory, PlayerInput::UseSelected) => {
                self.use_item(self.inventory_cursor);
            }
            (GameMode::GameOver, PlayerInput::ReturnToTitle) => {
                self.mode = GameMode::Title;
            }
            _ => {}
        }
    }

    /// Index of the first active enemy standing on `pos`.
    pub fn enemy_at(&self, pos: Position) -> Option<usize> {
        self.entities.iter().position(|entity| entity.occupies(pos))
    }

    pub fn active_enemy_count(&self) -> usize {
        self.entities.iter().filter(|entity| entity.active).count()
    }

    /// Item record held in inventory `slot`, if any.
    pub fn inventory_item(&self, slot: usize) -> Option<&Item> {
        self.inventory
            .get(slot)
            .map(|item_idx| &self.items[usize::from(item_idx)])
    }

    pub fn is_game_over(&self) -> bool {
        self.mode == GameMode::GameOver
    }

    /// Serializes the full state as pretty JSON for diagnostics.
    pub fn to_json(&self) -> CavernsResult<String> {
        serde_json::to_string_pretty(self).map_err(CavernsError::from)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
