//! Game Events
//!
//! Discrete happenings emitted during simulation. An external layer maps
//! them to sound, UI, and persistence effects; the core never performs
//! those itself.

use serde::{Deserialize, Serialize};

use crate::boss::wyrm::WyrmState;
use crate::core::vec2::Vec2;

/// Event payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// The player ate a food pickup
    FoodEaten {
        /// Score after the pickup
        score: u32,
    },

    /// The player started a dash burst
    DashStarted,

    /// The player was hurt by a touch or projectile
    DamageTaken {
        /// Lives remaining after the hit
        lives_left: u32,
        /// Where the hit landed, for impact effects
        hit: Vec2,
    },

    /// The player ran out of lives (or hit something fatal)
    PlayerDied,

    /// The level timer expired
    TimeExpired,

    /// Level goal reached
    LevelComplete {
        /// Final score
        score: u32,
    },

    /// The boss changed combat state
    BossStateChanged {
        /// State left
        from: WyrmState,
        /// State entered
        to: WyrmState,
    },

    /// The boss took a point of damage
    BossHit {
        /// Health remaining
        health: u32,
    },

    /// The boss slammed the arena border mid-dash
    BossStunned,

    /// The boss health reached zero
    BossDefeated,

    /// The boss exhaled a fan of fireballs
    FireballVolley {
        /// Fireballs in the fan
        count: u32,
    },

    /// The boss released spines from its body
    SpineBurst,

    /// A falling boulder was spawned
    BoulderFalling,

    /// The player dash-launched a landed boulder at the boss
    BoulderLaunched,

    /// A cinematic dialogue line started
    IntroLine {
        /// The line of dialogue
        line: String,
    },
}

/// A tick-stamped game event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when the event occurred
    pub tick: u64,
    /// Event payload
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u64, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Create a food-eaten event.
    pub fn food_eaten(tick: u64, score: u32) -> Self {
        Self::new(tick, GameEventData::FoodEaten { score })
    }

    /// Create a damage-taken event.
    pub fn damage_taken(tick: u64, lives_left: u32, hit: Vec2) -> Self {
        Self::new(tick, GameEventData::DamageTaken { lives_left, hit })
    }

    /// Create a boss-hit event.
    pub fn boss_hit(tick: u64, health: u32) -> Self {
        Self::new(tick, GameEventData::BossHit { health })
    }

    /// Create a level-complete event.
    pub fn level_complete(tick: u64, score: u32) -> Self {
        Self::new(tick, GameEventData::LevelComplete { score })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_constructors() {
        let e = GameEvent::food_eaten(42, 7);
        assert_eq!(e.tick, 42);
        assert_eq!(e.data, GameEventData::FoodEaten { score: 7 });

        let e = GameEvent::boss_hit(100, 5);
        assert_eq!(e.data, GameEventData::BossHit { health: 5 });
    }

    #[test]
    fn test_event_serializes() {
        let e = GameEvent::damage_taken(3, 2, Vec2::new(1.0, 2.0));
        let json = serde_json::to_string(&e).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
