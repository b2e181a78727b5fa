//! # Rendering Module
//!
//! Presentation of a [`GameState`](crate::GameState) over a tile-and-text
//! [`Renderer`].
//!
//! The game state never draws anything itself; a front end calls
//! [`render_game_state`] after each frame with whatever renderer it owns.
//! [`AsciiRenderer`] is the text implementation used by the command-line
//! driver and the tests.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

use crate::game::{Direction, ItemType, Tile};

pub const SPRITE_PLAYER_DOWN: u8 = 0;
pub const SPRITE_PLAYER_UP: u8 = 1;
pub const SPRITE_PLAYER_RIGHT: u8 = 2;
pub const SPRITE_PLAYER_LEFT: u8 = 3;
/// First of the four enemy sprites, chosen by slot
pub const SPRITE_ENEMY_BASE: u8 = 4;
/// Item sprites are this plus the item type index
pub const SPRITE_ITEM_BASE: u8 = 16;
pub const SPRITE_WALL: u8 = 32;
pub const SPRITE_FLOOR: u8 = 33;
pub const SPRITE_DOOR: u8 = 34;
pub const SPRITE_STAIRS: u8 = 35;
pub const SPRITE_HUNGER_FULL: u8 = 254;
pub const SPRITE_HUNGER_EMPTY: u8 = 255;

/// Drawing capability of a front end.
///
/// Coordinates are grid cells on the 32x30 screen.
pub trait Renderer {
    fn clear_screen(&mut self);

    fn draw_tile(&mut self, x: u8, y: u8, sprite: u8);

    /// Draws `text` left to right starting at `(x, y)`.
    fn draw_string(&mut self, text: &str, x: u8, y: u8);
}

/// Player sprite for a facing. Diagonals use the sprite of their
/// horizontal component.
pub fn player_sprite(direction: Direction) -> u8 {
    match direction {
        Direction::Up => SPRITE_PLAYER_UP,
        Direction::Down => SPRITE_PLAYER_DOWN,
        Direction::Right | Direction::UpRight | Direction::DownRight => SPRITE_PLAYER_RIGHT,
        Direction::Left | Direction::UpLeft | Direction::DownLeft => SPRITE_PLAYER_LEFT,
    }
}

pub fn item_sprite(item_type: ItemType) -> u8 {
    SPRITE_ITEM_BASE + item_type.index()
}

/// Sprite for a level tile; empty cells are not drawn.
pub fn tile_sprite(tile: Tile) -> Option<u8> {
    match tile {
        Tile::Empty => None,
        Tile::Wall => Some(SPRITE_WALL),
        Tile::Floor => Some(SPRITE_FLOOR),
        Tile::Door => Some(SPRITE_DOOR),
        Tile::Stairs => Some(SPRITE_STAIRS),
    }
}
