//! Stalker Snakes
//!
//! Hostile AI chains. Each head blends wander, pursuit of the player, and
//! obstacle avoidance; the pursue weight comes from the difficulty table
//! and the caps scale up with the player's score.

use crate::agent::chain::{AgentLimits, SegmentChain};
use crate::agent::steering::{Circle, SteeringAgent};
use crate::core::rng::GameRng;
use crate::core::vec2::{Bounds, Vec2};

use super::player::MAX_SEGMENT_GAP;

/// Body caps; stronger than any head so followers never detach.
const BODY_LIMITS: AgentLimits = AgentLimits::new(7.0, 0.5);

/// Starting body length behind the head.
const START_SEGMENTS: usize = 10;

/// Follower arrive stop distance; tighter than the player's so the body
/// holds together through sharp pursuit turns.
const FOLLOW_STOP: f64 = 10.0;

/// Difficulty scaling caps.
const SPEED_CEILING: f64 = 8.0;
const FORCE_CEILING: f64 = 0.4;

/// A hostile AI chain.
#[derive(Clone, Debug)]
pub struct StalkerSnake {
    chain: SegmentChain,
    base_max_speed: f64,
    base_max_force: f64,
    pursue_weight: f64,
}

impl StalkerSnake {
    /// Spawn a stalker. Head caps are sampled per individual so a pack
    /// doesn't move in lockstep.
    pub fn new(position: Vec2, pursue_weight: f64, rng: &mut GameRng) -> Self {
        let base_max_speed = rng.range(4.5, 5.5);
        let base_max_force = rng.range(0.15, 0.25);

        let head_limits = AgentLimits::new(base_max_speed, base_max_force);
        let mut chain = SegmentChain::new(position, head_limits, BODY_LIMITS, START_SEGMENTS);
        chain.head_mut().wander_angle = rng.angle();

        Self {
            chain,
            base_max_speed,
            base_max_force,
            pursue_weight,
        }
    }

    /// The underlying chain.
    pub fn chain(&self) -> &SegmentChain {
        &self.chain
    }

    /// The head agent.
    pub fn head(&self) -> &SteeringAgent {
        self.chain.head()
    }

    /// Scale the head caps with the player's score, up to the ceilings.
    pub fn set_difficulty(&mut self, score: u32) {
        let scale = 1.0 + score as f64 * 0.05;
        let head = self.chain.head_mut();
        head.max_speed = (self.base_max_speed * scale).clamp(0.0, SPEED_CEILING);
        head.max_force = (self.base_max_force * scale).clamp(0.0, FORCE_CEILING);
    }

    /// Advance one tick, hunting `player_head`.
    pub fn update(
        &mut self,
        player_head: &SteeringAgent,
        obstacles: &[Circle],
        bounds: &Bounds,
        rng: &mut GameRng,
    ) {
        let head = self.chain.head_mut();

        let wander = head.wander(rng);
        let pursue = head.pursue(player_head);
        let avoid = head.avoid(obstacles);

        head.apply_force(wander * (1.0 - self.pursue_weight));
        head.apply_force(pursue * self.pursue_weight);
        head.apply_force(avoid * 1.5);

        head.boundaries(40.0, bounds);
        head.update(bounds);

        self.chain
            .follow(40.0, FOLLOW_STOP, Some(MAX_SEGMENT_GAP), bounds);
    }
}

// =============================================================================
// TESTS
// =============================================================================
