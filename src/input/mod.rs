//! # Input Module
//!
//! Controller sampling and edge detection.
//!
//! The turn engine only ever sees button *edges*: buttons that went down
//! since the previous sample. [`InputHandler`] keeps the previous sample and
//! turns raw samples from any [`InputSource`] into edges.

pub mod commands;

pub use commands::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Anything that can be sampled once per frame for held buttons.
pub trait InputSource {
    /// Buttons held down right now.
    fn poll_buttons(&mut self) -> ButtonMask;
}

/// Edge detector over an [`InputSource`].
///
/// # Examples
///
/// ```
/// use caverns::{ButtonMask, InputHandler, ScriptedInput};
///
/// let source = ScriptedInput::new([ButtonMask::A, ButtonMask::A, ButtonMask::empty(), ButtonMask::A]);
/// let mut handler = InputHandler::new(source);
///
/// assert_eq!(handler.poll(), ButtonMask::A);
/// assert_eq!(handler.poll(), ButtonMask::empty());
/// assert_eq!(handler.poll(), ButtonMask::empty());
/// assert_eq!(handler.poll(), ButtonMask::A);
/// ```
#[derive(Debug, Clone)]
pub struct InputHandler<S> {
    source: S,
    previous: ButtonMask,
}

impl<S: InputSource> InputHandler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            previous: ButtonMask::empty(),
        }
    }

    /// Samples the source and returns the buttons pressed since the last
    /// call.
    pub fn poll(&mut self) -> ButtonMask {
        let current = self.source.poll_buttons();
        let pressed = ButtonMask::edges(current, self.previous);
        self.previous = current;
        pressed
    }

    /// The most recent raw sample.
    pub fn held(&self) -> ButtonMask {
        self.previous
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// Replays a fixed sequence of samples, then reports no buttons held.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    samples: VecDeque<ButtonMask>,
}

impl ScriptedInput {
    pub fn new<I: IntoIterator<Item = ButtonMask>>(samples: I) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }

    /// Samples still queued.
    pub fn remaining(&self) -> usize {
        self.samples.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll_buttons(&mut self) -> ButtonMask {
        self.samples.pop_front().unwrap_or_default()
    }
}

/// Mashes random buttons; every other sample is a release so each press
/// produces an edge.
#[derive(Debug, Clone)]
pub struct RandomInput {
    rng: StdRng,
    release_next: bool,
}

impl RandomInput {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            release_next: false,
        }
    }
}

impl InputSource for RandomInput {
    fn poll_buttons(&mut self) -> ButtonMask {
        self.release_next = !self.release_next;
        if !self.release_next {
            return ButtonMask::empty();
        }

        // Mostly movement, with the occasional action button
        match self.rng.gen_range(0..20usize) {
            0 => ButtonMask::A,
            1 => ButtonMask::B,
            2 => ButtonMask::START,
            3 => ButtonMask::UP | ButtonMask::RIGHT,
            4 => ButtonMask::DOWN | ButtonMask::LEFT,
            roll => [
                ButtonMask::UP,
                ButtonMask::DOWN,
                ButtonMask::LEFT,
                ButtonMask::RIGHT,
            ][roll % 4],
        }
    }
}
