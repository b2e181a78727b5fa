//! # Reachability
//!
//! Flood fills over walkable tiles, used to check that every room of a
//! generated level can be reached from the first one.

use crate::game::{Level, Position};
use ::pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Returns every position reachable from `start` by cardinal steps over
/// walkable tiles (floor, door, stairs).
///
/// The start position is always included, even when it is not walkable.
pub fn reachable_positions(level: &Level, start: Position) -> HashSet<Position> {
    bfs_reach(start, |&pos| {
        pos.cardinal_neighbors()
            .into_iter()
            .filter(|&next| level.is_walkable(next))
            .collect::<Vec<_>>()
    })
    .collect()
}

/// Checks whether `to` can be reached from `from` over walkable tiles.
pub fn is_reachable(level: &Level, from: Position, to: Position) -> bool {
    reachable_positions(level, from).contains(&to)
}
