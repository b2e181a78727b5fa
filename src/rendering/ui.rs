//! # Status Bar
//!
//! The two-row HUD drawn over the bottom of the dungeon view.

use crate::config::MAX_HUNGER;
use crate::game::GameState;
use crate::rendering::{Renderer, SPRITE_HUNGER_EMPTY, SPRITE_HUNGER_FULL};

/// Row holding HP, player level and floor number
pub const STATUS_ROW: u8 = 28;
/// Row holding the hunger bar
pub const HUNGER_ROW: u8 = 29;
/// Cells in the hunger bar
pub const HUNGER_BAR_CELLS: u8 = 10;

/// Filled hunger-bar cells for a hunger value, one per ten points.
pub fn hunger_cells(hunger: u8) -> u8 {
    (hunger.min(MAX_HUNGER) / 10).min(HUNGER_BAR_CELLS)
}

/// Draws HP, level, floor and the hunger bar.
pub fn render_status_bar<R: Renderer>(game_state: &GameState, renderer: &mut R) {
    let stats = &game_state.player.stats;

    renderer.draw_string("HP:", 1, STATUS_ROW);
    renderer.draw_string(&format!("{:02}/{:02}", stats.hp, stats.max_hp), 4, STATUS_ROW);

    renderer.draw_string("LVL:", 11, STATUS_ROW);
    renderer.draw_string(&format!("{:02}", stats.level), 15, STATUS_ROW);

    renderer.draw_string("FLOOR:", 19, STATUS_ROW);
    renderer.draw_string(
        &format!("{:02}", game_state.level.level_num),
        25,
        STATUS_ROW,
    );

    renderer.draw_string("HUNGER:", 1, HUNGER_ROW);
    let filled = hunger_cells(stats.hunger);
    for i in 0..HUNGER_BAR_CELLS {
        let sprite = if i < filled {
            SPRITE_HUNGER_FULL
        } else {
            SPRITE_HUNGER_EMPTY
        };
        renderer.draw_tile(8 + i, HUNGER_ROW, sprite);
    }
}
