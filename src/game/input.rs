//! Input Frames
//!
//! The host's event plumbing (pointer listeners, key state) is outside the
//! core; what arrives here each tick is a small normalized frame: an
//! optional pointer position, a held-key direction set, and edge-triggered
//! action flags.

use serde::{Deserialize, Serialize};

use crate::agent::steering::SteeringAgent;
use crate::core::vec2::Vec2;

/// How far ahead of the head the keyboard target is projected.
const KEYBOARD_PROJECTION: f64 = 200.0;

/// Which device steers the player chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Pointer position is the steering target
    #[default]
    Pointer,
    /// Held direction keys compose a projected target
    Keyboard,
}

/// Normalized input state for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Pointer position in arena coordinates, if the host has one
    pub pointer: Option<Vec2>,
    /// Held direction keys (packed bits, see `KEY_*`)
    pub keys: u8,
    /// Edge-triggered action flags (packed bits, see `FLAG_*`)
    pub flags: u8,
}

impl InputFrame {
    /// Up key held
    pub const KEY_UP: u8 = 0x01;
    /// Down key held
    pub const KEY_DOWN: u8 = 0x02;
    /// Left key held
    pub const KEY_LEFT: u8 = 0x04;
    /// Right key held
    pub const KEY_RIGHT: u8 = 0x08;

    /// Dash pressed this tick
    pub const FLAG_DASH: u8 = 0x01;
    /// Pause toggled this tick
    pub const FLAG_PAUSE: u8 = 0x02;
    /// Cinematic skip requested this tick
    pub const FLAG_SKIP: u8 = 0x04;

    /// Create an idle frame.
    pub const fn new() -> Self {
        Self {
            pointer: None,
            keys: 0,
            flags: 0,
        }
    }

    /// Create a frame with a pointer target.
    pub const fn with_pointer(pointer: Vec2) -> Self {
        Self {
            pointer: Some(pointer),
            keys: 0,
            flags: 0,
        }
    }

    /// Create a frame with held keys.
    pub const fn with_keys(keys: u8) -> Self {
        Self {
            pointer: None,
            keys,
            flags: 0,
        }
    }

    /// Set or clear the dash flag.
    pub fn set_dash(&mut self, pressed: bool) {
        if pressed {
            self.flags |= Self::FLAG_DASH;
        } else {
            self.flags &= !Self::FLAG_DASH;
        }
    }

    /// Dash requested this tick.
    #[inline]
    pub fn dash_pressed(&self) -> bool {
        self.flags & Self::FLAG_DASH != 0
    }

    /// Pause toggle requested this tick.
    #[inline]
    pub fn pause_pressed(&self) -> bool {
        self.flags & Self::FLAG_PAUSE != 0
    }

    /// Cinematic skip requested this tick.
    #[inline]
    pub fn skip_pressed(&self) -> bool {
        self.flags & Self::FLAG_SKIP != 0
    }

    /// Direction composed from the held keys. Opposed keys cancel.
    pub fn key_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.keys & Self::KEY_UP != 0 {
            dir.y -= 1.0;
        }
        if self.keys & Self::KEY_DOWN != 0 {
            dir.y += 1.0;
        }
        if self.keys & Self::KEY_LEFT != 0 {
            dir.x -= 1.0;
        }
        if self.keys & Self::KEY_RIGHT != 0 {
            dir.x += 1.0;
        }
        dir
    }

    /// Resolve the steering target for the player head.
    ///
    /// Pointer scheme passes the pointer through; keyboard scheme projects
    /// a point ahead of the head along the composed direction. No input
    /// resolves to `None` and the chain drifts.
    pub fn target(&self, scheme: ControlScheme, head: &SteeringAgent) -> Option<Vec2> {
        match scheme {
            ControlScheme::Pointer => self.pointer,
            ControlScheme::Keyboard => {
                let dir = self.key_direction();
                if dir == Vec2::ZERO {
                    None
                } else {
                    Some(head.position + dir.normalize() * KEYBOARD_PROJECTION)
                }
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
