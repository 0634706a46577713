//! Obstacles
//!
//! Static rocks the steering layer avoids and the collision layer tests
//! against. In sandbox mode they can also be spawned and dragged by direct
//! input. Arena generation takes its own RNG so a fixed seed reproduces
//! the same field.

use serde::{Deserialize, Serialize};

use crate::agent::steering::Circle;
use crate::core::rng::GameRng;
use crate::core::vec2::{Bounds, Vec2};

/// Minimum distance from the arena center kept free of obstacles, so the
/// player never spawns inside one.
const CENTER_EXCLUSION: f64 = 150.0;

/// Placement margin from the arena edges.
const PLACEMENT_MARGIN: f64 = 50.0;

/// Generated radius range.
const RADIUS_RANGE: (f64, f64) = (25.0, 40.0);

/// Cosmetic shape variant. `Oval` also widens the collision threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum ObstacleShape {
    /// Round boulder
    Round = 0,
    /// Jagged crag
    Crag = 1,
    /// Wide oval slab; collides 20% wider than its radius
    Oval = 2,
}

/// A static obstacle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Obstacle {
    /// Center position
    pub position: Vec2,
    /// Base radius
    pub radius: f64,
    /// Shape variant
    pub shape: ObstacleShape,
}

impl Obstacle {
    /// Create an obstacle.
    pub fn new(position: Vec2, radius: f64, shape: ObstacleShape) -> Self {
        Self {
            position,
            radius,
            shape,
        }
    }

    /// Create an obstacle with a random radius and shape, used by the
    /// sandbox spawn-at-pointer interaction.
    pub fn random_at(position: Vec2, rng: &mut GameRng) -> Self {
        let radius = rng.range(RADIUS_RANGE.0, RADIUS_RANGE.1);
        let shape = match rng.next_int(3) {
            0 => ObstacleShape::Round,
            1 => ObstacleShape::Crag,
            _ => ObstacleShape::Oval,
        };
        Self::new(position, radius, shape)
    }

    /// Radius used for collision tests. Ovals read visually wider than
    /// their base radius, so their threshold is widened to match.
    pub fn collision_radius(&self) -> f64 {
        match self.shape {
            ObstacleShape::Oval => self.radius * 1.2,
            _ => self.radius,
        }
    }

    /// The avoidance circle handed to the steering layer (base radius;
    /// the steering probe adds its own margin).
    pub fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }
}

/// Generate an obstacle field, keeping the arena center clear.
pub fn generate_field(count: u32, bounds: &Bounds, rng: &mut GameRng) -> Vec<Obstacle> {
    let center = bounds.center();
    let mut field = Vec::with_capacity(count as usize);

    for _ in 0..count {
        let mut position = rng.point_in(bounds, PLACEMENT_MARGIN);
        let mut attempts = 0;
        while position.distance(center) < CENTER_EXCLUSION && attempts < 100 {
            position = rng.point_in(bounds, PLACEMENT_MARGIN);
            attempts += 1;
        }
        field.push(Obstacle::random_at(position, rng));
    }

    field
}

/// Collect avoidance circles for a whole field.
pub fn circles(field: &[Obstacle]) -> Vec<Circle> {
    field.iter().map(|o| o.circle()).collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_field_respects_center() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut rng = GameRng::new(4242);
        let field = generate_field(15, &bounds, &mut rng);

        assert_eq!(field.len(), 15);
        for obstacle in &field {
            assert!(obstacle.position.distance(bounds.center()) >= CENTER_EXCLUSION);
            assert!((RADIUS_RANGE.0..RADIUS_RANGE.1).contains(&obstacle.radius));
        }
    }

    #[test]
    fn test_field_reproducible_from_seed() {
        let bounds = Bounds::default();
        let a = generate_field(10, &bounds, &mut GameRng::new(7));
        let b = generate_field(10, &bounds, &mut GameRng::new(7));
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.position, y.position);
            assert_eq!(x.radius, y.radius);
            assert_eq!(x.shape, y.shape);
        }
    }

    #[test]
    fn test_oval_widens_collision() {
        let round = Obstacle::new(Vec2::ZERO, 30.0, ObstacleShape::Round);
        let oval = Obstacle::new(Vec2::ZERO, 30.0, ObstacleShape::Oval);
        assert_eq!(round.collision_radius(), 30.0);
        assert_eq!(oval.collision_radius(), 36.0);
        // Avoidance always sees the base radius
        assert_eq!(oval.circle().radius, 30.0);
    }
}
