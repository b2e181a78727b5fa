//! # Generation Module
//!
//! Seeded content generation: dungeon layout, enemy placement and item
//! placement.
//!
//! Every generator draws from the caller's [`Lcg`] in a fixed order, so a
//! seed always reproduces the same floor, the same enemies and the same items.

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::config::{
    ITEM_PLACEMENT_ATTEMPTS, MAX_ROOMS, MAX_ROOM_HEIGHT, MAX_ROOM_WIDTH, MIN_ROOM_HEIGHT,
    MIN_ROOM_WIDTH, ROOM_PLACEMENT_ATTEMPTS, SCREEN_HEIGHT, SCREEN_WIDTH,
};
use crate::game::Position;
use crate::utils::Lcg;
use crate::{CavernsError, CavernsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for procedural generation.
///
/// The default reproduces the gameplay constants in [`crate::config`]; any
/// other value changes which floors a seed produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Minimum room interior width
    pub min_room_width: u8,
    /// Maximum room interior width
    pub max_room_width: u8,
    /// Minimum room interior height
    pub min_room_height: u8,
    /// Maximum room interior height
    pub max_room_height: u8,
    /// Rooms accepted per floor before placement stops
    pub max_rooms: u8,
    /// Room candidates drawn per floor, accepted or not
    pub room_placement_attempts: u8,
    /// Position draws allowed per item before its slot is left empty
    pub item_placement_attempts: u16,
}

impl GenerationConfig {
    /// Creates the default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use caverns::GenerationConfig;
    ///
    /// let config = GenerationConfig::new();
    /// assert_eq!(config.max_rooms, 10);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            min_room_width: MIN_ROOM_WIDTH,
            max_room_width: MAX_ROOM_WIDTH,
            min_room_height: MIN_ROOM_HEIGHT,
            max_room_height: MAX_ROOM_HEIGHT,
            max_rooms: MAX_ROOMS as u8,
            room_placement_attempts: ROOM_PLACEMENT_ATTEMPTS,
            item_placement_attempts: ITEM_PLACEMENT_ATTEMPTS,
        }
    }

    /// Loads a configuration from a JSON file. Missing fields take their
    /// default values. The result is validated before it is returned.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> CavernsResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the generator can always draw a room that fits the grid
    /// with a one-tile margin, and that every budget is usable.
    pub fn validate(&self) -> CavernsResult<()> {
        let max_width = (SCREEN_WIDTH - 2) as u8;
        let max_height = (SCREEN_HEIGHT - 2) as u8;

        if self.min_room_width == 0 || self.min_room_height == 0 {
            return Err(CavernsError::InvalidConfig(
                "room dimensions must be at least 1".to_string(),
            ));
        }
        if self.min_room_width > self.max_room_width {
            return Err(CavernsError::InvalidConfig(format!(
                "min_room_width {} exceeds max_room_width {}",
                self.min_room_width, self.max_room_width
            )));
        }
        if self.min_room_height > self.max_room_height {
            return Err(CavernsError::InvalidConfig(format!(
                "min_room_height {} exceeds max_room_height {}",
                self.min_room_height, self.max_room_height
            )));
        }
        if self.max_room_width > max_width || self.max_room_height > max_height {
            return Err(CavernsError::InvalidConfig(format!(
                "rooms up to {}x{} do not fit a {}x{} grid with walls",
                self.max_room_width, self.max_room_height, SCREEN_WIDTH, SCREEN_HEIGHT
            )));
        }
        if self.max_rooms == 0 || usize::from(self.max_rooms) > MAX_ROOMS {
            return Err(CavernsError::InvalidConfig(format!(
                "max_rooms must be in 1..={}, got {}",
                MAX_ROOMS, self.max_rooms
            )));
        }
        if self.room_placement_attempts == 0 || self.item_placement_attempts == 0 {
            return Err(CavernsError::InvalidConfig(
                "placement attempt budgets must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A rectangular room interior.
///
/// `x`/`y` is the top-left floor cell; the wall perimeter sits one tile
/// outside the rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Room {
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
    /// Set once a corridor links this room to the rest of the floor
    pub connected: bool,
}

impl Room {
    /// Creates a new, unconnected room.
    ///
    /// # Examples
    ///
    /// ```
    /// use caverns::{Position, Room};
    ///
    /// let room = Room::new(5, 5, 6, 4);
    /// assert!(room.contains(Position::new(10, 8)));
    /// assert!(!room.contains(Position::new(11, 8)));
    /// assert_eq!(room.center(), Position::new(8, 7));
    /// ```
    pub fn new(x: u8, y: u8, width: u8, height: u8) -> Self {
        Self {
            x,
            y,
            width,
            height,
            connected: false,
        }
    }

    /// Whether `pos` lies inside the interior.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x
            && pos.x < self.x + self.width
            && pos.y >= self.y
            && pos.y < self.y + self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Whether the two rooms come closer than a shared wall allows.
    ///
    /// Rooms may share a wall line; anything closer counts as overlap.
    pub fn overlaps_with_margin(&self, other: &Room) -> bool {
        let (x, y) = (u16::from(self.x), u16::from(self.y));
        let (w, h) = (u16::from(self.width), u16::from(self.height));
        let (ox, oy) = (u16::from(other.x), u16::from(other.y));
        let (ow, oh) = (u16::from(other.width), u16::from(other.height));

        x + w + 1 > ox && x < ox + ow + 1 && y + h + 1 > oy && y < oy + oh + 1
    }

    /// Draws a uniformly random interior cell, x first.
    pub fn random_point(&self, rng: &mut Lcg) -> Position {
        let x = rng.range(self.x, self.x + self.width - 1);
        let y = rng.range(self.y, self.y + self.height - 1);
        Position::new(x, y)
    }
}

/// Trait for procedural generators.
///
/// Generators draw from a caller-owned [`Lcg`] and never reseed it.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random stream.
    fn generate(&self, config: &GenerationConfig, rng: &mut Lcg) -> CavernsResult<T>;

    /// Validates that generated content meets its structural invariants.
    fn validate(&self, content: &T, config: &GenerationConfig) -> CavernsResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_constants() {
        let config = GenerationConfig::default();
        assert_eq!(config.min_room_width, 4);
        assert_eq!(config.max_room_width, 8);
        assert_eq!(config.min_room_height, 4);
        assert_eq!(config.max_room_height, 8);
        assert_eq!(config.max_rooms, 10);
        assert_eq!(config.room_placement_attempts, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_rejects_bad_values() {
        let inverted = GenerationConfig {
            min_room_width: 9,
            ..GenerationConfig::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(CavernsError::InvalidConfig(_))
        ));

        let too_tall = GenerationConfig {
            max_room_height: 29,
            ..GenerationConfig::default()
        };
        assert!(too_tall.validate().is_err());

        let too_many = GenerationConfig {
            max_rooms: 11,
            ..GenerationConfig::default()
        };
        assert!(too_many.validate().is_err());

        let no_attempts = GenerationConfig {
            room_placement_attempts: 0,
            ..GenerationConfig::default()
        };
        assert!(no_attempts.validate().is_err());

        let largest = GenerationConfig {
            max_room_width: 30,
            max_room_height: 28,
            ..GenerationConfig::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_config_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generation.json");
        std::fs::write(&path, r#"{ "max_rooms": 4, "max_room_width": 6 }"#).unwrap();

        let config = GenerationConfig::from_json_file(&path).unwrap();
        assert_eq!(config.max_rooms, 4);
        assert_eq!(config.max_room_width, 6);
        assert_eq!(config.min_room_width, 4);
    }

    #[test]
    fn test_config_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generation.json");

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            GenerationConfig::from_json_file(&path),
            Err(CavernsError::Serde(_))
        ));

        std::fs::write(&path, r#"{ "max_rooms": 0 }"#).unwrap();
        assert!(matches!(
            GenerationConfig::from_json_file(&path),
            Err(CavernsError::InvalidConfig(_))
        ));

        assert!(matches!(
            GenerationConfig::from_json_file(dir.path().join("missing.json")),
            Err(CavernsError::Io(_))
        ));
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(5, 5, 10, 8);
        assert_eq!(room.center(), Position::new(10, 9));
        assert!(room.contains(Position::new(5, 5)));
        assert!(room.contains(Position::new(14, 12)));
        assert!(!room.contains(Position::new(4, 5)));
        assert!(!room.contains(Position::new(15, 12)));
        assert!(!room.connected);
    }

    #[test]
    fn test_room_overlap_with_margin() {
        let room = Room::new(5, 5, 4, 4);

        // Shares the wall column at x = 9
        let shared_wall = Room::new(10, 5, 4, 4);
        assert!(!room.overlaps_with_margin(&shared_wall));
        assert!(!shared_wall.overlaps_with_margin(&room));

        // Interior would touch room's right wall
        let touching = Room::new(9, 5, 4, 4);
        assert!(room.overlaps_with_margin(&touching));
        assert!(touching.overlaps_with_margin(&room));

        let far = Room::new(20, 20, 4, 4);
        assert!(!room.overlaps_with_margin(&far));
    }

    #[test]
    fn test_random_point_stays_inside() {
        let room = Room::new(3, 7, 5, 4);
        let mut rng = Lcg::new(17);
        for _ in 0..200 {
            assert!(room.contains(room.random_point(&mut rng)));
        }
    }
}
