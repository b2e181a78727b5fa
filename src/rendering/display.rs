//! # Display Management
//!
//! Screen composition per game mode, and a character-grid renderer.

use crate::config::{MAX_INVENTORY, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::{GameMode, GameState, Position};
use crate::rendering::{
    item_sprite, render_status_bar, tile_sprite, Renderer, SPRITE_DOOR, SPRITE_ENEMY_BASE,
    SPRITE_FLOOR, SPRITE_HUNGER_EMPTY, SPRITE_HUNGER_FULL, SPRITE_ITEM_BASE,
    SPRITE_PLAYER_DOWN, SPRITE_PLAYER_LEFT, SPRITE_STAIRS, SPRITE_WALL,
};
use std::fmt;

/// Draws the full screen for the current mode.
///
/// The dungeon view layers tiles, in-world items, active enemies and the
/// player, then the status bar over the bottom two rows.
pub fn render_game_state<R: Renderer>(game_state: &GameState, renderer: &mut R) {
    renderer.clear_screen();

    match game_state.mode {
        GameMode::Title => {
            renderer.draw_string("CRAVEN CAVERNS", 9, 10);
            renderer.draw_string("A ROGUELIKE ADVENTURE", 5, 12);
            renderer.draw_string("PRESS START", 10, 16);
        }
        GameMode::Playing => render_dungeon(game_state, renderer),
        GameMode::Inventory => render_inventory(game_state, renderer),
        GameMode::GameOver => {
            renderer.draw_string("GAME OVER", 11, 10);
            renderer.draw_string("PRESS START TO CONTINUE", 4, 14);
        }
    }
}

fn render_dungeon<R: Renderer>(game_state: &GameState, renderer: &mut R) {
    for y in 0..SCREEN_HEIGHT as u8 {
        for x in 0..SCREEN_WIDTH as u8 {
            if let Some(sprite) = tile_sprite(game_state.level.tile(Position::new(x, y))) {
                renderer.draw_tile(x, y, sprite);
            }
        }
    }

    for item in game_state.items.iter().filter(|item| item.in_world) {
        renderer.draw_tile(item.position.x, item.position.y, item_sprite(item.item_type));
    }

    for enemy in game_state.entities.iter().filter(|entity| entity.active) {
        renderer.draw_tile(enemy.position.x, enemy.position.y, enemy.sprite_idx);
    }

    let player = &game_state.player;
    renderer.draw_tile(player.position.x, player.position.y, player.sprite_idx);

    render_status_bar(game_state, renderer);
}

fn render_inventory<R: Renderer>(game_state: &GameState, renderer: &mut R) {
    renderer.draw_string("INVENTORY", 11, 2);

    for slot in 0..MAX_INVENTORY {
        let row = 4 + slot as u8;
        let name = game_state
            .inventory_item(slot)
            .map_or("-", |item| item.name());
        renderer.draw_string(name, 5, row);
        if slot == game_state.inventory_cursor {
            renderer.draw_string(">", 3, row);
        }
    }

    renderer.draw_string("PRESS START TO RETURN", 5, 20);
}

/// Renders into a 32x30 grid of characters.
///
/// # Examples
///
/// ```
/// use caverns::{render_game_state, AsciiRenderer, GameState};
///
/// let game_state = GameState::new();
/// let mut renderer = AsciiRenderer::new();
/// render_game_state(&game_state, &mut renderer);
/// assert!(renderer.row(10).contains("CRAVEN CAVERNS"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiRenderer {
    cells: [[char; SCREEN_WIDTH]; SCREEN_HEIGHT],
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self {
            cells: [[' '; SCREEN_WIDTH]; SCREEN_HEIGHT],
        }
    }

    /// Character for a sprite id.
    pub fn glyph(sprite: u8) -> char {
        const ENEMIES: [char; 4] = ['g', 'o', 'k', 's'];
        const ITEMS: [char; 6] = [')', '[', '!', '?', '%', '~'];

        match sprite {
            SPRITE_PLAYER_DOWN..=SPRITE_PLAYER_LEFT => '@',
            s if (SPRITE_ENEMY_BASE..SPRITE_ITEM_BASE).contains(&s) => {
                ENEMIES[usize::from(s - SPRITE_ENEMY_BASE) % ENEMIES.len()]
            }
            s if (SPRITE_ITEM_BASE..SPRITE_WALL).contains(&s) => ITEMS
                .get(usize::from(s - SPRITE_ITEM_BASE))
                .copied()
                .unwrap_or('*'),
            SPRITE_WALL => '#',
            SPRITE_FLOOR => '.',
            SPRITE_DOOR => '+',
            SPRITE_STAIRS => '>',
            SPRITE_HUNGER_FULL => '=',
            SPRITE_HUNGER_EMPTY => '_',
            _ => '*',
        }
    }

    /// Character at `(x, y)`; off-screen cells read as blank.
    pub fn cell(&self, x: u8, y: u8) -> char {
        self.cells
            .get(usize::from(y))
            .and_then(|row| row.get(usize::from(x)))
            .copied()
            .unwrap_or(' ')
    }

    /// Row `y` as a string, trailing blanks removed.
    pub fn row(&self, y: u8) -> String {
        self.cells
            .get(usize::from(y))
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    fn put(&mut self, x: usize, y: usize, ch: char) {
        if let Some(cell) = self.cells.get_mut(y).and_then(|row| row.get_mut(x)) {
            *cell = ch;
        }
    }
}

impl Default for AsciiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for AsciiRenderer {
    fn clear_screen(&mut self) {
        self.cells = [[' '; SCREEN_WIDTH]; SCREEN_HEIGHT];
    }

    fn draw_tile(&mut self, x: u8, y: u8, sprite: u8) {
        self.put(usize::from(x), usize::from(y), Self::glyph(sprite));
    }

    fn draw_string(&mut self, text: &str, x: u8, y: u8) {
        for (offset, ch) in text.chars().enumerate() {
            self.put(usize::from(x) + offset, usize::from(y), ch);
        }
    }
}

impl fmt::Display for AsciiRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..SCREEN_HEIGHT as u8 {
            writeln!(f, "{}", self.row(y))?;
        }
        Ok(())
    }
}
