//! Food Pickups
//!
//! Food is never destroyed, only relocated: eating one teleports it to a
//! fresh random spot and restarts its spawn-in animation.

use serde::{Deserialize, Serialize};

use crate::core::rng::GameRng;
use crate::core::vec2::{Bounds, Vec2};

/// Margin kept between food and the arena edges.
const SPAWN_MARGIN: f64 = 50.0;

/// Spawn-in animation progress gained per tick.
const SPAWN_STEP: f64 = 0.05;

/// Cosmetic food variant; the render layer picks the sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum FoodKind {
    /// 🍎
    Apple = 0,
    /// 🍐
    Pear = 1,
    /// 🍒
    Cherry = 2,
    /// 🍌
    Banana = 3,
    /// 🍉
    Melon = 4,
    /// 🍊
    Orange = 5,
}

impl FoodKind {
    const ALL: [FoodKind; 6] = [
        FoodKind::Apple,
        FoodKind::Pear,
        FoodKind::Cherry,
        FoodKind::Banana,
        FoodKind::Melon,
        FoodKind::Orange,
    ];

    fn random(rng: &mut GameRng) -> Self {
        Self::ALL[rng.next_int(Self::ALL.len() as u32) as usize]
    }
}

/// A single food pickup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Food {
    /// Current position
    pub position: Vec2,
    /// Cosmetic variant
    pub kind: FoodKind,
    /// Spawn-in animation progress, 0..=1
    pub spawn_progress: f64,
}

impl Food {
    /// Spawn a food at a random position.
    pub fn new(rng: &mut GameRng, bounds: &Bounds) -> Self {
        Self {
            position: rng.point_in(bounds, SPAWN_MARGIN),
            kind: FoodKind::random(rng),
            spawn_progress: 0.0,
        }
    }

    /// Move to a fresh random position and restart the spawn animation.
    /// The new position is guaranteed to differ from the old one.
    pub fn relocate(&mut self, rng: &mut GameRng, bounds: &Bounds) {
        let old = self.position;
        loop {
            self.position = rng.point_in(bounds, SPAWN_MARGIN);
            if self.position != old {
                break;
            }
        }
        self.kind = FoodKind::random(rng);
        self.spawn_progress = 0.0;
    }

    /// Advance the spawn-in animation.
    pub fn tick(&mut self) {
        if self.spawn_progress < 1.0 {
            self.spawn_progress = (self.spawn_progress + SPAWN_STEP).min(1.0);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_within_margin() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut rng = GameRng::new(1);
        for _ in 0..50 {
            let food = Food::new(&mut rng, &bounds);
            assert!(food.position.x >= SPAWN_MARGIN && food.position.x <= 750.0);
            assert!(food.position.y >= SPAWN_MARGIN && food.position.y <= 550.0);
            assert_eq!(food.spawn_progress, 0.0);
        }
    }

    #[test]
    fn test_relocate_moves() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(2);
        let mut food = Food::new(&mut rng, &bounds);
        food.spawn_progress = 1.0;

        let old = food.position;
        food.relocate(&mut rng, &bounds);
        assert_ne!(food.position, old);
        assert_eq!(food.spawn_progress, 0.0);
    }

    #[test]
    fn test_spawn_progress_saturates() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(3);
        let mut food = Food::new(&mut rng, &bounds);
        for _ in 0..40 {
            food.tick();
        }
        assert_eq!(food.spawn_progress, 1.0);
    }
}
