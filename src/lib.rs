//! # Caverns
//!
//! The simulation core of a turn-based dungeon crawler.
//!
//! ## Architecture Overview
//!
//! Given a seed, the crate builds a grid-based level (rooms, corridors, doors,
//! stairs), populates it with enemies and items, and advances the world one
//! discrete turn per player action.
//!
//! - **Generation System**: seeded room-and-corridor levels plus population
//! - **Game State**: fixed-capacity storage for the level, player, enemies,
//!   items and inventory, owned by the turn engine between turns
//! - **Turn Engine**: movement, combat, enemy AI, item effects, hunger and
//!   level transitions
//! - **Input / Rendering**: thin capability traits; hardware drawing and
//!   controller reading live outside this crate
//!
//! ## Determinism
//!
//! A single [`Lcg`] stream feeds both generation and enemy AI. For a fixed seed
//! and a fixed sequence of input edges the whole game is reproducible.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use utils::*;

/// Core error type for the Caverns engine.
///
/// Gameplay itself never fails: rejected moves and invalid item slots are
/// silent no-ops. Errors only surface at the edges (configuration loading,
/// level validation, the command-line driver).
#[derive(thiserror::Error, Debug)]
pub enum CavernsError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Generation parameters cannot produce a valid level
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A generated level broke a structural invariant
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Caverns codebase.
pub type CavernsResult<T> = Result<T, CavernsError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
///
/// These values are gameplay-visible: changing any of them changes the levels
/// a given seed produces.
pub mod config {
    /// Level width in tiles
    pub const SCREEN_WIDTH: usize = 32;

    /// Level height in tiles
    pub const SCREEN_HEIGHT: usize = 30;

    /// Non-player entity slots
    pub const MAX_ENTITIES: usize = 16;

    /// Item slots per level
    pub const MAX_ITEMS: usize = 32;

    /// Inventory slots
    pub const MAX_INVENTORY: usize = 8;

    /// Room slots per level
    pub const MAX_ROOMS: usize = 10;

    pub const MIN_ROOM_WIDTH: u8 = 4;
    pub const MAX_ROOM_WIDTH: u8 = 8;
    pub const MIN_ROOM_HEIGHT: u8 = 4;
    pub const MAX_ROOM_HEIGHT: u8 = 8;

    /// Room placement attempts per level
    pub const ROOM_PLACEMENT_ATTEMPTS: u8 = 50;

    /// Attempts spent on a single item before its slot is left empty
    pub const ITEM_PLACEMENT_ATTEMPTS: u16 = 100;

    /// Seed of the first level
    pub const INITIAL_SEED: u32 = 0x1234_5678;

    /// Full hunger meter
    pub const MAX_HUNGER: u8 = 100;

    pub const PLAYER_START_HP: u8 = 10;
    pub const PLAYER_START_ATTACK: u8 = 2;
    pub const PLAYER_START_DEFENSE: u8 = 0;
}
