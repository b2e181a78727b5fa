//! # Game Module
//!
//! Core data model and the turn engine.
//!
//! This module contains the fundamental building blocks of the crawler:
//! - World and level representation (tiles, rooms, stairs)
//! - Entities, items and the fixed-slot inventory
//! - Combat resolution and per-turn world updates
//! - The aggregate game state and its mode machine

pub mod combat;
pub mod entities;
pub mod inventory;
pub mod state;
pub mod turn;
pub mod world;

pub use combat::*;
pub use entities::*;
pub use inventory::*;
pub use state::*;
pub use world::*;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use serde::{Deserialize, Serialize};

/// A cell coordinate on the level grid.
///
/// Coordinates are unsigned bytes bounded by
/// `[0, SCREEN_WIDTH) x [0, SCREEN_HEIGHT)`.
///
/// # Examples
///
/// ```
/// use caverns::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// assert_eq!(pos.offset(-1, 1), Some(Position::new(9, 6)));
/// assert_eq!(Position::new(0, 0).offset(-1, 0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Whether the position lies on the level grid.
    pub fn in_bounds(self) -> bool {
        usize::from(self.x) < SCREEN_WIDTH && usize::from(self.y) < SCREEN_HEIGHT
    }

    /// Row-major index into a level-sized grid.
    pub fn index(self) -> usize {
        usize::from(self.y) * SCREEN_WIDTH + usize::from(self.x)
    }

    /// Returns the neighbouring cell `(dx, dy)` away, or `None` when it falls
    /// off the grid.
    pub fn offset(self, dx: i8, dy: i8) -> Option<Position> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let pos = Position::new(x, y);
        pos.in_bounds().then_some(pos)
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use caverns::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u16 {
        u16::from(self.x.abs_diff(other.x)) + u16::from(self.y.abs_diff(other.y))
    }

    /// Returns the on-grid cardinal neighbours (no diagonals).
    pub fn cardinal_neighbors(self) -> Vec<Position> {
        [(0, -1), (-1, 0), (1, 0), (0, 1)]
            .into_iter()
            .filter_map(|(dx, dy)| self.offset(dx, dy))
            .collect()
    }

    /// Unit step toward `target` on each axis independently.
    pub fn step_toward(self, target: Position) -> (i8, i8) {
        let axis = |from: u8, to: u8| match from.cmp(&to) {
            std::cmp::Ordering::Less => 1,
            std::cmp::Ordering::Greater => -1,
            std::cmp::Ordering::Equal => 0,
        };
        (axis(self.x, target.x), axis(self.y, target.y))
    }
}

/// Facing directions, including the four diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    #[default]
    Down,
    Left,
    UpRight,
    DownRight,
    DownLeft,
    UpLeft,
}

impl Direction {
    /// Converts a direction to a `(dx, dy)` step.
    ///
    /// # Examples
    ///
    /// ```
    /// use caverns::Direction;
    ///
    /// assert_eq!(Direction::Up.to_delta(), (0, -1));
    /// assert_eq!(Direction::DownLeft.to_delta(), (-1, 1));
    /// ```
    pub fn to_delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::UpRight => (1, -1),
            Direction::DownRight => (1, 1),
            Direction::DownLeft => (-1, 1),
            Direction::UpLeft => (-1, -1),
        }
    }

    /// Converts a step back to a direction.
    ///
    /// Returns None for `(0, 0)` and anything that is not a unit step.
    pub fn from_delta(dx: i8, dy: i8) -> Option<Direction> {
        match (dx, dy) {
            (0, -1) => Some(Direction::Up),
            (1, 0) => Some(Direction::Right),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, -1) => Some(Direction::UpRight),
            (1, 1) => Some(Direction::DownRight),
            (-1, 1) => Some(Direction::DownLeft),
            (-1, -1) => Some(Direction::UpLeft),
            _ => None,
        }
    }

    /// The four cardinal directions in enemy wander order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}
