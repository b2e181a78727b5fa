//! # Dungeon Generation
//!
//! Seeded room-and-corridor floors.
//!
//! A floor is built in four passes, each drawing from the same stream:
//! 1. Place up to `max_rooms` non-overlapping rooms within the attempt budget
//! 2. Chain rooms in creation order with L-shaped corridors
//! 3. Link any room left over to its nearest connected neighbour
//! 4. Put the stairs in a random room other than the first

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::{Level, Position, Tile};
use crate::generation::{GenerationConfig, Generator, Room};
use crate::utils::{reachable_positions, Lcg};
use crate::{CavernsError, CavernsResult};
use log::debug;

/// Room-and-corridor level generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DungeonGenerator {
    config: GenerationConfig,
    /// Floor number stamped on levels built through [`Generator::generate`]
    level_num: u8,
}

impl DungeonGenerator {
    /// Creates a generator for floor 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use caverns::{DungeonGenerator, GenerationConfig, Lcg, Tile};
    ///
    /// let generator = DungeonGenerator::new(GenerationConfig::default());
    /// let level = generator.generate_seeded(1, 0x1234_5678, &mut Lcg::default());
    /// assert!(level.num_rooms() >= 1);
    /// assert_eq!(level.count_tiles(Tile::Stairs), 1);
    /// ```
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            level_num: 1,
        }
    }

    /// Sets the floor number used by [`Generator::generate`].
    pub fn for_level(mut self, level_num: u8) -> Self {
        self.level_num = level_num;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Reseeds `rng` with `seed` and builds floor `level_num`.
    ///
    /// The level and the stream state afterwards depend only on the
    /// arguments and the configuration.
    pub fn generate_seeded(&self, level_num: u8, seed: u32, rng: &mut Lcg) -> Level {
        rng.seed(seed);
        self.build(level_num, &self.config, rng)
    }

    fn build(&self, level_num: u8, config: &GenerationConfig, rng: &mut Lcg) -> Level {
        let mut level = Level::new(level_num);

        let attempts = self.place_rooms(&mut level, config, rng);
        self.connect_rooms(&mut level, rng);
        self.place_stairs(&mut level, rng);

        debug!(
            "Generated floor {}: {} rooms in {} attempts, stairs at {:?}",
            level_num,
            level.num_rooms(),
            attempts,
            level.stairs
        );
        level
    }

    /// Draws room candidates until `max_rooms` are accepted or the attempt
    /// budget runs out. Returns the attempts used.
    fn place_rooms(&self, level: &mut Level, config: &GenerationConfig, rng: &mut Lcg) -> u8 {
        let grid_width = SCREEN_WIDTH as u8;
        let grid_height = SCREEN_HEIGHT as u8;
        let mut attempts = 0;

        while level.num_rooms() < config.max_rooms && attempts < config.room_placement_attempts {
            attempts += 1;

            let width = rng.range(config.min_room_width, config.max_room_width);
            let height = rng.range(config.min_room_height, config.max_room_height);
            let x = rng.range(1, grid_width - width - 1);
            let y = rng.range(1, grid_height - height - 1);
            let candidate = Room::new(x, y, width, height);

            if level
                .rooms()
                .iter()
                .any(|room| candidate.overlaps_with_margin(room))
            {
                continue;
            }
            level.add_room(candidate);
        }

        attempts
    }

    /// Chains rooms `(i, i + 1)` together, then links every room still
    /// unconnected to the nearest connected one by center distance.
    fn connect_rooms(&self, level: &mut Level, rng: &mut Lcg) {
        let num_rooms = level.rooms().len();

        for i in 0..num_rooms.saturating_sub(1) {
            let (from, to) = {
                let rooms = level.rooms_mut();
                rooms[i].connected = true;
                rooms[i + 1].connected = true;
                (rooms[i], rooms[i + 1])
            };
            let start = from.random_point(rng);
            let end = to.random_point(rng);
            carve_corridor(level, start, end);
        }

        for i in 0..num_rooms {
            if level.rooms()[i].connected {
                continue;
            }

            let nearest = nearest_connected_room(level.rooms(), i);
            level.rooms_mut()[i].connected = true;

            let from = level.rooms()[i];
            let to = level.rooms()[nearest];
            let start = from.random_point(rng);
            let end = to.random_point(rng);
            carve_corridor(level, start, end);
        }
    }

    fn place_stairs(&self, level: &mut Level, rng: &mut Lcg) {
        let num_rooms = level.num_rooms();
        if num_rooms == 0 {
            return;
        }

        let room_idx = if num_rooms > 1 {
            rng.range(1, num_rooms - 1)
        } else {
            0
        };
        let room = level.rooms()[usize::from(room_idx)];
        let pos = room.random_point(rng);
        level.place_stairs(pos);
    }

    /// Checks the structural invariants of a generated floor and reports the
    /// first violation.
    pub fn validate_level(&self, level: &Level) -> CavernsResult<()> {
        let rooms = level.rooms();

        if rooms.is_empty() || rooms.len() > usize::from(self.config.max_rooms) {
            return Err(CavernsError::GenerationFailed(format!(
                "floor {} has {} rooms (expected 1..={})",
                level.level_num,
                rooms.len(),
                self.config.max_rooms
            )));
        }

        for (i, room) in rooms.iter().enumerate() {
            if let Some(j) = rooms[i + 1..]
                .iter()
                .position(|other| room.overlaps_with_margin(other))
            {
                return Err(CavernsError::GenerationFailed(format!(
                    "rooms {} and {} overlap",
                    i,
                    i + 1 + j
                )));
            }
        }

        let stairs_count = level.count_tiles(Tile::Stairs);
        if stairs_count != 1 || level.tile(level.stairs) != Tile::Stairs {
            return Err(CavernsError::GenerationFailed(format!(
                "expected exactly one stairs tile at {:?}, found {}",
                level.stairs, stairs_count
            )));
        }

        match level.room_at(level.stairs) {
            None => {
                return Err(CavernsError::GenerationFailed(
                    "stairs are outside every room".to_string(),
                ))
            }
            Some(0) if rooms.len() > 1 => {
                return Err(CavernsError::GenerationFailed(
                    "stairs are in the starting room".to_string(),
                ))
            }
            Some(_) => {}
        }

        let reachable = reachable_positions(level, rooms[0].center());
        if let Some(idx) = rooms
            .iter()
            .position(|room| !reachable.contains(&room.center()))
        {
            return Err(CavernsError::GenerationFailed(format!(
                "room {} is not reachable from room 0",
                idx
            )));
        }

        Ok(())
    }
}

impl Default for DungeonGenerator {
    fn default() -> Self {
        Self::new(GenerationConfig::default())
    }
}

impl Generator<Level> for DungeonGenerator {
    /// Builds a floor from the current stream state without reseeding.
    fn generate(&self, config: &GenerationConfig, rng: &mut Lcg) -> CavernsResult<Level> {
        config.validate()?;
        let level = self.build(self.level_num, config, rng);
        DungeonGenerator::new(*config).validate_level(&level)?;
        Ok(level)
    }

    fn validate(&self, level: &Level, config: &GenerationConfig) -> CavernsResult<()> {
        DungeonGenerator::new(*config).validate_level(level)
    }

    fn generator_type(&self) -> &'static str {
        "DungeonGenerator"
    }
}

/// Index of the connected room nearest to `rooms[idx]` by Manhattan distance
/// between centers. Ties go to the lowest index; with no candidate, room 0.
fn nearest_connected_room(rooms: &[Room], idx: usize) -> usize {
    let center = rooms[idx].center();
    rooms
        .iter()
        .enumerate()
        .filter(|&(j, room)| j != idx && room.connected)
        .min_by_key(|&(j, room)| (room.center().manhattan_distance(center), j))
        .map_or(0, |(j, _)| j)
}

/// Carves an L-shaped corridor from `start` to `end`, horizontal leg first.
///
/// Walls crossed become doors. Empty cells become floor and get walls on
/// whichever sides are still empty. Existing floor is left alone.
pub fn carve_corridor(level: &mut Level, start: Position, end: Position) {
    let mut current = start;

    while current.x != end.x {
        current.x = if current.x < end.x {
            current.x + 1
        } else {
            current.x - 1
        };
        carve_cell(level, current, true);
    }

    while current.y != end.y {
        current.y = if current.y < end.y {
            current.y + 1
        } else {
            current.y - 1
        };
        carve_cell(level, current, false);
    }
}

fn carve_cell(level: &mut Level, pos: Position, horizontal: bool) {
    match level.tile(pos) {
        Tile::Wall => level.set_tile(pos, Tile::Door),
        Tile::Empty => {
            level.set_tile(pos, Tile::Floor);
            let sides = if horizontal {
                [pos.offset(0, -1), pos.offset(0, 1)]
            } else {
                [pos.offset(-1, 0), pos.offset(1, 0)]
            };
            for side in sides.into_iter().flatten() {
                if level.tile(side) == Tile::Empty {
                    level.set_tile(side, Tile::Wall);
                }
            }
        }
        _ => {}
    }
}
