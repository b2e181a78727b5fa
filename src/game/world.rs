//! # World Representation
//!
//! The tile grid of a single dungeon floor together with its rooms and stairs.

use crate::config::{MAX_ROOMS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::Position;
use crate::generation::Room;
use serde::{Deserialize, Serialize};

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Wall,
    Floor,
    Door,
    Stairs,
}

impl Tile {
    /// Whether actors can stand on this tile.
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor | Tile::Door | Tile::Stairs)
    }
}

/// One dungeon floor.
///
/// Levels are never patched between floors: generation rebuilds the whole
/// value, including the room list (kept in creation order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Row-major tile grid, indexed `[y][x]`
    pub tiles: [[Tile; SCREEN_WIDTH]; SCREEN_HEIGHT],
    rooms: [Room; MAX_ROOMS],
    num_rooms: u8,
    /// Floor number, starting at 1
    pub level_num: u8,
    /// Location of the single stairs tile
    pub stairs: Position,
}

impl Level {
    /// Creates an all-empty level with no rooms.
    ///
    /// # Examples
    ///
    /// ```
    /// use caverns::{Level, Position, Tile};
    ///
    /// let level = Level::new(1);
    /// assert_eq!(level.num_rooms(), 0);
    /// assert_eq!(level.tile(Position::new(3, 3)), Tile::Empty);
    /// ```
    pub fn new(level_num: u8) -> Self {
        Self {
            tiles: [[Tile::Empty; SCREEN_WIDTH]; SCREEN_HEIGHT],
            rooms: [Room::default(); MAX_ROOMS],
            num_rooms: 0,
            level_num,
            stairs: Position::default(),
        }
    }

    /// Tile at `pos`; off-grid positions read as `Empty`.
    pub fn tile(&self, pos: Position) -> Tile {
        if pos.in_bounds() {
            self.tiles[usize::from(pos.y)][usize::from(pos.x)]
        } else {
            Tile::Empty
        }
    }

    /// Overwrites the tile at `pos`. Off-grid writes are ignored.
    pub fn set_tile(&mut self, pos: Position, tile: Tile) {
        if pos.in_bounds() {
            self.tiles[usize::from(pos.y)][usize::from(pos.x)] = tile;
        }
    }

    /// Whether `pos` is on the grid and holds a walkable tile.
    pub fn is_walkable(&self, pos: Position) -> bool {
        pos.in_bounds() && self.tile(pos).is_walkable()
    }

    /// Rooms in creation order.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms[..usize::from(self.num_rooms)]
    }

    pub(crate) fn rooms_mut(&mut self) -> &mut [Room] {
        &mut self.rooms[..usize::from(self.num_rooms)]
    }

    pub fn num_rooms(&self) -> u8 {
        self.num_rooms
    }

    /// Stamps `room` onto the grid (floor interior, wall perimeter) and
    /// records it. Returns false when all room slots are taken.
    ///
    /// The room and its walls must fit the grid: `x` and `y` at least 1,
    /// and one free row and column past the far edges.
    pub fn add_room(&mut self, room: Room) -> bool {
        if usize::from(self.num_rooms) >= MAX_ROOMS {
            return false;
        }

        for y in room.y..room.y + room.height {
            for x in room.x..room.x + room.width {
                self.set_tile(Position::new(x, y), Tile::Floor);
            }
        }

        let left = room.x - 1;
        let right = room.x + room.width;
        let top = room.y - 1;
        let bottom = room.y + room.height;
        for x in left..=right {
            self.set_tile(Position::new(x, top), Tile::Wall);
            self.set_tile(Position::new(x, bottom), Tile::Wall);
        }
        for y in room.y..room.y + room.height {
            self.set_tile(Position::new(left, y), Tile::Wall);
            self.set_tile(Position::new(right, y), Tile::Wall);
        }

        self.rooms[usize::from(self.num_rooms)] = room;
        self.num_rooms += 1;
        true
    }

    /// Index of the room whose interior contains `pos`, or `None` in
    /// corridors. The first matching room wins.
    pub fn room_at(&self, pos: Position) -> Option<u8> {
        self.rooms()
            .iter()
            .position(|room| room.contains(pos))
            .map(|idx| idx as u8)
    }

    /// Places the stairs tile at `pos`.
    pub fn place_stairs(&mut self, pos: Position) {
        self.stairs = pos;
        self.set_tile(pos, Tile::Stairs);
    }

    /// Number of cells holding `tile`.
    pub fn count_tiles(&self, tile: Tile) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&t| t == tile)
            .count()
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::new(1)
    }
}
