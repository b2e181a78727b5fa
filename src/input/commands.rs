//! # Command Definitions
//!
//! Controller buttons and the commands a frame of button edges maps to in
//! each game mode.

use crate::game::{Direction, GameMode};
use bitflags::bitflags;
use std::array;
use std::iter::Flatten;

bitflags! {
    /// Eight-button controller sample, one bit per button.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ButtonMask: u8 {
        const A = 0x01;
        const B = 0x02;
        const SELECT = 0x04;
        const START = 0x08;
        const UP = 0x10;
        const DOWN = 0x20;
        const LEFT = 0x40;
        const RIGHT = 0x80;
    }
}

impl ButtonMask {
    /// Buttons pressed since the previous sample: `current & !previous`.
    ///
    /// # Examples
    ///
    /// ```
    /// use caverns::ButtonMask;
    ///
    /// let previous = ButtonMask::A | ButtonMask::UP;
    /// let current = ButtonMask::A | ButtonMask::START;
    /// assert_eq!(ButtonMask::edges(current, previous), ButtonMask::START);
    /// ```
    pub fn edges(current: ButtonMask, previous: ButtonMask) -> ButtonMask {
        current.difference(previous)
    }

    /// Movement direction encoded by the directional bits.
    ///
    /// One vertical and one horizontal bit together give a diagonal. When
    /// both bits of an axis are set, up wins over down and left over right.
    pub fn direction(self) -> Option<Direction> {
        let dy = if self.contains(ButtonMask::UP) {
            -1
        } else if self.contains(ButtonMask::DOWN) {
            1
        } else {
            0
        };
        let dx = if self.contains(ButtonMask::LEFT) {
            -1
        } else if self.contains(ButtonMask::RIGHT) {
            1
        } else {
            0
        };
        Direction::from_delta(dx, dy)
    }
}

/// A single command for the turn engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// Leave the title screen
    StartGame,
    /// Move (or attack) one cell
    Move(Direction),
    /// Pick up the item under the player
    PickUp,
    /// Use the item in an inventory slot
    UseItem(usize),
    /// Open or close the inventory screen
    ToggleInventory,
    CursorUp,
    CursorDown,
    /// Use the item under the inventory cursor
    UseSelected,
    /// Leave the game-over screen
    ReturnToTitle,
}

/// Most commands one frame can produce: move, A, B and Start in the
/// dungeon view.
pub const MAX_FRAME_COMMANDS: usize = 4;

/// Commands produced by one frame, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameCommands {
    slots: [Option<PlayerInput>; MAX_FRAME_COMMANDS],
    len: usize,
}

impl FrameCommands {
    fn push(&mut self, command: PlayerInput) {
        if let Some(slot) = self.slots.get_mut(self.len) {
            *slot = Some(command);
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = PlayerInput> + '_ {
        self.slots.iter().flatten().copied()
    }
}

impl IntoIterator for FrameCommands {
    type Item = PlayerInput;
    type IntoIter = Flatten<array::IntoIter<Option<PlayerInput>, MAX_FRAME_COMMANDS>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter().flatten()
    }
}

impl<const N: usize> PartialEq<[PlayerInput; N]> for FrameCommands {
    fn eq(&self, other: &[PlayerInput; N]) -> bool {
        self.len == N && self.iter().eq(other.iter().copied())
    }
}

impl PlayerInput {
    /// Commands triggered by one frame of button edges in `mode`, in the
    /// order they are applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use caverns::{ButtonMask, Direction, GameMode, PlayerInput};
    ///
    /// let commands = PlayerInput::from_edges(ButtonMask::UP | ButtonMask::A, GameMode::Playing);
    /// assert_eq!(commands, [PlayerInput::Move(Direction::Up), PlayerInput::PickUp]);
    /// ```
    pub fn from_edges(pressed: ButtonMask, mode: GameMode) -> FrameCommands {
        let mut commands = FrameCommands::default();

        match mode {
            GameMode::Title => {
                if pressed.contains(ButtonMask::START) {
                    commands.push(PlayerInput::StartGame);
                }
            }
            GameMode::Playing => {
                if let Some(direction) = pressed.direction() {
                    commands.push(PlayerInput::Move(direction));
                }
                if pressed.contains(ButtonMask::A) {
                    commands.push(PlayerInput::PickUp);
                }
                if pressed.contains(ButtonMask::B) {
                    commands.push(PlayerInput::UseItem(0));
                }
                if pressed.contains(ButtonMask::START) {
                    commands.push(PlayerInput::ToggleInventory);
                }
            }
            GameMode::Inventory => {
                if pressed.contains(ButtonMask::START) {
                    commands.push(PlayerInput::ToggleInventory);
                }
                if pressed.contains(ButtonMask::A) {
                    commands.push(PlayerInput::UseSelected);
                }
                if pressed.contains(ButtonMask::UP) {
                    commands.push(PlayerInput::CursorUp);
                } else if pressed.contains(ButtonMask::DOWN) {
                    commands.push(PlayerInput::CursorDown);
                }
            }
            GameMode::GameOver => {
                if pressed.contains(ButtonMask::START) {
                    commands.push(PlayerInput::ReturnToTitle);
                }
            }
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_ignore_held_buttons() {
        let held = ButtonMask::RIGHT;
        assert_eq!(ButtonMask::edges(held, held), ButtonMask::empty());
        assert_eq!(
            ButtonMask::edges(ButtonMask::RIGHT | ButtonMask::B, held),
            ButtonMask::B
        );
    }

    #[test]
    fn test_cardinal_and_diagonal_directions() {
        assert_eq!(ButtonMask::UP.direction(), Some(Direction::Up));
        assert_eq!(ButtonMask::RIGHT.direction(), Some(Direction::Right));
        assert_eq!(
            (ButtonMask::UP | ButtonMask::RIGHT).direction(),
            Some(Direction::UpRight)
        );
        assert_eq!(
            (ButtonMask::DOWN | ButtonMask::LEFT).direction(),
            Some(Direction::DownLeft)
        );
        assert_eq!(ButtonMask::A.direction(), None);
        // Opposing bits: up and left take priority
        assert_eq!(
            (ButtonMask::UP | ButtonMask::DOWN).direction(),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_title_only_reacts_to_start() {
        let all = ButtonMask::all().difference(ButtonMask::START);
        assert!(PlayerInput::from_edges(all, GameMode::Title).is_empty());
        assert_eq!(
            PlayerInput::from_edges(ButtonMask::START, GameMode::Title),
            [PlayerInput::StartGame]
        );
    }

    #[test]
    fn test_playing_command_order() {
        let pressed = ButtonMask::DOWN | ButtonMask::A | ButtonMask::B | ButtonMask::START;
        assert_eq!(
            PlayerInput::from_edges(pressed, GameMode::Playing),
            [
                PlayerInput::Move(Direction::Down),
                PlayerInput::PickUp,
                PlayerInput::UseItem(0),
                PlayerInput::ToggleInventory,
            ]
        );
    }

    #[test]
    fn test_inventory_commands() {
        assert_eq!(
            PlayerInput::from_edges(ButtonMask::UP | ButtonMask::DOWN, GameMode::Inventory),
            [PlayerInput::CursorUp]
        );
        assert_eq!(
            PlayerInput::from_edges(ButtonMask::A, GameMode::Inventory),
            [PlayerInput::UseSelected]
        );
        assert!(PlayerInput::from_edges(ButtonMask::SELECT, GameMode::GameOver).is_empty());
    }

    #[test]
    fn test_every_button_fits_one_frame() {
        let commands = PlayerInput::from_edges(ButtonMask::all(), GameMode::Playing);
        assert_eq!(commands.len(), MAX_FRAME_COMMANDS);
        assert_eq!(commands.iter().next(), Some(PlayerInput::Move(Direction::UpLeft)));
        assert_eq!(commands.into_iter().last(), Some(PlayerInput::ToggleInventory));
    }
}
