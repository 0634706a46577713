//! Player Snake
//!
//! The player-controlled chain. Two steering modes: direct arrive-at-target
//! control, and a fully autonomous sandbox blend (wander + avoid + tail
//! separation + hostile evasion). A dash burst temporarily raises the head
//! caps; getting hurt briefly takes control away.

use crate::agent::chain::{AgentLimits, SegmentChain};
use crate::agent::steering::{Circle, SteeringAgent};
use crate::core::rng::GameRng;
use crate::core::vec2::{Bounds, Vec2};

use super::collision::{self, EAT_RANGE, SELF_COLLISION_GUARD, SELF_COLLISION_RANGE};
use super::food::Food;
use super::obstacle::Obstacle;
use super::stalker::StalkerSnake;

/// Head caps under direct control.
const HEAD_LIMITS: AgentLimits = AgentLimits::new(8.0, 0.8);

/// Body caps; faster than the head so followers never lag through turns.
const BODY_LIMITS: AgentLimits = AgentLimits::new(10.0, 0.6);

/// Head caps while dashing.
const DASH_LIMITS: AgentLimits = AgentLimits::new(22.0, 1.5);

/// Head caps in autonomous mode.
const AUTONOMOUS_LIMITS: AgentLimits = AgentLimits::new(6.0, 0.5);

/// Starting body length behind the head.
const START_SEGMENTS: usize = 3;

/// Dash burst duration in ticks.
const DASH_TICKS: u32 = 45;

/// Cooldown between dashes in ticks.
const DASH_COOLDOWN: u32 = 90;

/// Full length of the post-hit damage flash.
pub const DAMAGE_TICKS: u32 = 90;

/// While the damage timer is above this, steering input is ignored.
const STUN_THRESHOLD: u32 = 60;

/// Follower arrive slowing radius.
const FOLLOW_RANGE: f64 = 40.0;

/// Follower arrive stop distance; low enough that segments overlap.
const FOLLOW_STOP: f64 = 12.0;

/// Hard cap on the gap between adjacent segments.
pub const MAX_SEGMENT_GAP: f64 = 14.0;

/// Boundary steering margin.
const BOUNDARY_MARGIN: f64 = 40.0;

/// Hostiles inside this range trigger evasion in autonomous mode.
const EVADE_RANGE: f64 = 350.0;

/// Own tail segments from this index onward are separated from.
const TAIL_SEPARATION_START: usize = 8;

/// The player chain.
#[derive(Clone, Debug)]
pub struct PlayerSnake {
    chain: SegmentChain,
    /// Sandbox self-driving mode
    pub autonomous: bool,
    /// Ticks remaining in the current post-hit flash/stun
    pub damage_timer: u32,
    dash_timer: u32,
    dash_cooldown: u32,
}

impl PlayerSnake {
    /// Create the player chain at a position.
    pub fn new(position: Vec2) -> Self {
        Self {
            chain: SegmentChain::new(position, HEAD_LIMITS, BODY_LIMITS, START_SEGMENTS),
            autonomous: false,
            damage_timer: 0,
            dash_timer: 0,
            dash_cooldown: 0,
        }
    }

    /// The underlying chain.
    pub fn chain(&self) -> &SegmentChain {
        &self.chain
    }

    /// The underlying chain, mutable.
    pub fn chain_mut(&mut self) -> &mut SegmentChain {
        &mut self.chain
    }

    /// The head agent.
    pub fn head(&self) -> &SteeringAgent {
        self.chain.head()
    }

    /// The head agent, mutable.
    pub fn head_mut(&mut self) -> &mut SteeringAgent {
        self.chain.head_mut()
    }

    /// Try to start a dash. Fails while the cooldown is running.
    pub fn dash(&mut self) -> bool {
        if self.dash_cooldown == 0 {
            self.dash_timer = DASH_TICKS;
            self.dash_cooldown = DASH_COOLDOWN;
            true
        } else {
            false
        }
    }

    /// Whether a dash burst is currently active.
    pub fn is_dashing(&self) -> bool {
        self.dash_timer > 0
    }

    /// Register a hit: starts the damage flash and control-loss window.
    pub fn take_hit(&mut self) {
        self.damage_timer = DAMAGE_TICKS;
    }

    /// Advance one tick.
    ///
    /// `target` is the resolved steering target (pointer or keyboard
    /// projection); `None` lets the chain drift. Missing collaborators
    /// simply skip their force.
    pub fn update(
        &mut self,
        target: Option<Vec2>,
        obstacles: &[Circle],
        hostile_heads: &[&SteeringAgent],
        bounds: &Bounds,
        rng: &mut GameRng,
    ) {
        if self.damage_timer > 0 {
            self.damage_timer -= 1;
        }

        // Stunned: recent hits override the target with the head's own
        // position so the snake drifts instead of obeying input
        let target = if self.damage_timer > STUN_THRESHOLD {
            Some(self.chain.head().position)
        } else {
            target
        };

        if self.autonomous {
            self.update_autonomous(obstacles, hostile_heads, rng);
        } else {
            self.update_controlled(target);
        }

        let head = self.chain.head_mut();
        head.boundaries(BOUNDARY_MARGIN, bounds);
        head.update(bounds);

        self.chain
            .follow(FOLLOW_RANGE, FOLLOW_STOP, Some(MAX_SEGMENT_GAP), bounds);
    }

    fn update_controlled(&mut self, target: Option<Vec2>) {
        if self.dash_cooldown > 0 {
            self.dash_cooldown -= 1;
        }

        let limits = if self.dash_timer > 0 {
            self.dash_timer -= 1;
            DASH_LIMITS
        } else {
            HEAD_LIMITS
        };

        let head = self.chain.head_mut();
        head.max_speed = limits.max_speed;
        head.max_force = limits.max_force;

        if let Some(target) = target {
            let force = head.arrive(target, 100.0, 0.0);
            head.apply_force(force);
        }
    }

    fn update_autonomous(
        &mut self,
        obstacles: &[Circle],
        hostile_heads: &[&SteeringAgent],
        rng: &mut GameRng,
    ) {
        let tail_positions: Vec<Vec2> = self
            .chain
            .positions()
            .skip(TAIL_SEPARATION_START)
            .collect();

        let head = self.chain.head_mut();
        head.max_speed = AUTONOMOUS_LIMITS.max_speed;
        head.max_force = AUTONOMOUS_LIMITS.max_force;

        let wander = head.wander(rng);
        let avoid = head.avoid(obstacles);
        let separate = head.separate(&tail_positions, 60.0);

        let mut evade = Vec2::ZERO;
        for hostile in hostile_heads.iter().copied() {
            if head.position.distance(hostile.position) < EVADE_RANGE {
                evade += head.evade(hostile);
            }
        }

        // Priority weighting: survival forces dominate the stroll
        head.apply_force(wander * 1.5);
        head.apply_force(avoid * 6.0);
        head.apply_force(separate * 5.0);
        head.apply_force(evade * 4.0);
    }

    /// Try to eat a food pickup. On success the chain grows by one and the
    /// food relocates.
    pub fn eat(&mut self, food: &mut Food, rng: &mut GameRng, bounds: &Bounds) -> bool {
        if self.chain.head_within(food.position, EAT_RANGE) {
            self.chain.add_segment();
            food.relocate(rng, bounds);
            true
        } else {
            false
        }
    }

    /// Head against own tail, skipping the guard band.
    pub fn check_self_collision(&self) -> bool {
        self.chain
            .self_collision(SELF_COLLISION_GUARD, SELF_COLLISION_RANGE)
    }

    /// Head against the obstacle field.
    pub fn check_obstacle_collision(&self, obstacles: &[Obstacle]) -> bool {
        collision::head_hits_obstacles(self.chain.head().position, obstacles)
    }

    /// Head against every hostile segment.
    pub fn check_hostile_collision(&self, stalkers: &[StalkerSnake]) -> bool {
        let head = self.chain.head().position;
        stalkers
            .iter()
            .any(|s| collision::head_hits_chain(head, s.chain(), collision::HOSTILE_TOUCH_RANGE))
    }
}

// =============================================================================
// TESTS
// =============================================================================
