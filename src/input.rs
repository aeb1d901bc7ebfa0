//! Input snapshot and key bindings.
//!
//! The app translates SDL events and keyboard state into one
//! [`InputSnapshot`] per frame; the simulation never touches SDL input
//! directly. Movement and attack are level-triggered (held), bombs and
//! restart are edge-triggered (pressed this frame).

use std::collections::HashMap;

use glam::IVec2;
use sdl2::keyboard::{KeyboardState, Scancode};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u8 {
        const UP      = 1 << 0;
        const DOWN    = 1 << 1;
        const LEFT    = 1 << 2;
        const RIGHT   = 1 << 3;
        const ATTACK  = 1 << 4;
        const BOMB    = 1 << 5;
        const RESTART = 1 << 6;
    }
}

/// Everything the simulation sees of the input for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// Buttons currently held down.
    pub held: Buttons,
    /// Buttons that went down this frame (no key repeat).
    pub pressed: Buttons,
    /// Screen coordinates of a click, if one happened this frame.
    pub click: Option<IVec2>,
}

impl InputSnapshot {
    /// Movement direction from the held flags, one of nine cases.
    pub fn direction(&self) -> IVec2 {
        let mut dir = IVec2::ZERO;
        if self.held.contains(Buttons::UP) {
            dir.y -= 1;
        }
        if self.held.contains(Buttons::DOWN) {
            dir.y += 1;
        }
        if self.held.contains(Buttons::LEFT) {
            dir.x -= 1;
        }
        if self.held.contains(Buttons::RIGHT) {
            dir.x += 1;
        }
        dir
    }
}

#[derive(Debug, Clone)]
pub struct Bindings {
    keys: HashMap<Scancode, Buttons>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut keys = HashMap::new();

        // Player movement
        keys.insert(Scancode::Up, Buttons::UP);
        keys.insert(Scancode::W, Buttons::UP);
        keys.insert(Scancode::Down, Buttons::DOWN);
        keys.insert(Scancode::S, Buttons::DOWN);
        keys.insert(Scancode::Left, Buttons::LEFT);
        keys.insert(Scancode::A, Buttons::LEFT);
        keys.insert(Scancode::Right, Buttons::RIGHT);
        keys.insert(Scancode::D, Buttons::RIGHT);

        // Actions
        keys.insert(Scancode::J, Buttons::ATTACK);
        keys.insert(Scancode::Space, Buttons::ATTACK);
        keys.insert(Scancode::K, Buttons::BOMB);
        keys.insert(Scancode::B, Buttons::BOMB);
        keys.insert(Scancode::R, Buttons::RESTART);

        Self { keys }
    }
}

impl Bindings {
    pub fn button(&self, scancode: Scancode) -> Option<Buttons> {
        self.keys.get(&scancode).copied()
    }

    /// Collapses the keyboard state into the held-button flags.
    pub fn held(&self, keyboard: &KeyboardState<'_>) -> Buttons {
        let mut held = Buttons::empty();
        for (scancode, button) in &self.keys {
            if keyboard.is_scancode_pressed(*scancode) {
                held |= *button;
            }
        }
        held
    }
}
