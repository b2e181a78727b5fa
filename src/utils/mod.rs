//! # Utilities Module
//!
//! The deterministic random stream and reachability helpers shared by
//! generation and the turn engine.

pub mod pathfinding;
pub mod rng;

pub use self::pathfinding::*;
pub use rng::*;
