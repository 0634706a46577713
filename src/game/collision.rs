//! Collision Layer
//!
//! All collision in this game is radius-threshold proximity testing; there
//! is no continuous or swept detection. The chain-level queries live here
//! so every threshold constant is in one place.

use crate::agent::chain::SegmentChain;
use crate::core::vec2::Vec2;

use super::obstacle::Obstacle;

/// Collision radius of the player head.
pub const PLAYER_HEAD_RADIUS: f64 = 16.0;

/// Head-to-food distance that counts as eating.
pub const EAT_RANGE: f64 = 50.0;

/// Segments at the front of a chain exempt from self-collision; they
/// always overlap the head.
pub const SELF_COLLISION_GUARD: usize = 6;

/// Head-to-own-segment distance that counts as self-collision.
pub const SELF_COLLISION_RANGE: f64 = 15.0;

/// Head-to-hostile-segment distance that counts as a touch.
pub const HOSTILE_TOUCH_RANGE: f64 = 25.0;

/// Check if two circles overlap.
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f64, pos_b: Vec2, radius_b: f64) -> bool {
    let combined = radius_a + radius_b;
    pos_a.distance_squared(pos_b) < combined * combined
}

/// Head against an obstacle field (shape-aware thresholds).
pub fn head_hits_obstacles(head: Vec2, obstacles: &[Obstacle]) -> bool {
    obstacles
        .iter()
        .any(|o| circles_overlap(head, PLAYER_HEAD_RADIUS, o.position, o.collision_radius()))
}

/// Head against every segment of another chain.
pub fn head_hits_chain(head: Vec2, other: &SegmentChain, threshold: f64) -> bool {
    other.positions().any(|p| p.distance(head) < threshold)
}

// =============================================================================
// TESTS
// =============================================================================
