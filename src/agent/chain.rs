//! Segment Chain
//!
//! An ordered sequence of steering agents forming a snake-like body.
//! Index 0 is the head; every follower arrives at its predecessor. Chains
//! are non-empty by construction and only ever grow.

use crate::core::vec2::{Bounds, Vec2};

use super::steering::SteeringAgent;

/// Velocity damping applied when the hard distance clamp fires, so a
/// snapped-back segment does not oscillate.
const CLAMP_DAMPING: f64 = 0.9;

/// Speed and force caps for one class of segment.
///
/// Body segments are typically faster and stronger than the head so they
/// can keep up through sharp turns without opening gaps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentLimits {
    /// Speed cap
    pub max_speed: f64,
    /// Steering force cap
    pub max_force: f64,
}

impl AgentLimits {
    /// Create a limits pair.
    pub const fn new(max_speed: f64, max_force: f64) -> Self {
        Self {
            max_speed,
            max_force,
        }
    }
}

/// A snake body: head agent plus follower segments.
#[derive(Clone, Debug)]
pub struct SegmentChain {
    segments: Vec<SteeringAgent>,
    body_limits: AgentLimits,
}

impl SegmentChain {
    /// Create a chain with a head and `body_count` trailing segments, all
    /// stacked at `position`. The head always exists, so a zero-length
    /// chain is unrepresentable.
    pub fn new(
        position: Vec2,
        head_limits: AgentLimits,
        body_limits: AgentLimits,
        body_count: usize,
    ) -> Self {
        let mut chain = Self {
            segments: vec![SteeringAgent::new(
                position,
                head_limits.max_speed,
                head_limits.max_force,
            )],
            body_limits,
        };
        for _ in 0..body_count {
            chain.add_segment();
        }
        chain
    }

    /// Append a new segment at the current tail position.
    pub fn add_segment(&mut self) {
        let tail = self.segments.last().expect("chain is never empty");
        self.segments.push(SteeringAgent::new(
            tail.position,
            self.body_limits.max_speed,
            self.body_limits.max_force,
        ));
    }

    /// Number of segments including the head.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept for the conventional pairing with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The head agent.
    pub fn head(&self) -> &SteeringAgent {
        &self.segments[0]
    }

    /// The head agent, mutable.
    pub fn head_mut(&mut self) -> &mut SteeringAgent {
        &mut self.segments[0]
    }

    /// All segments, head first.
    pub fn segments(&self) -> &[SteeringAgent] {
        &self.segments
    }

    /// All segments, mutable.
    pub fn segments_mut(&mut self) -> &mut [SteeringAgent] {
        &mut self.segments
    }

    /// Segment positions, head first.
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.segments.iter().map(|s| s.position)
    }

    /// Run the follower pass: each segment arrives at its predecessor,
    /// integrates, then (when `max_dist` is given) gets hard-clamped back
    /// onto the connecting vector if it lagged too far behind.
    ///
    /// The clamp is a correction after integration, not a constraint
    /// solver; it is what keeps a fast-turning chain visually unbroken.
    pub fn follow(&mut self, range: f64, stop_distance: f64, max_dist: Option<f64>, bounds: &Bounds) {
        for i in 1..self.segments.len() {
            let prev_pos = self.segments[i - 1].position;
            let segment = &mut self.segments[i];

            let force = segment.arrive(prev_pos, range, stop_distance);
            segment.apply_force(force);
            segment.update(bounds);

            if let Some(max_dist) = max_dist {
                let d = segment.position.distance(prev_pos);
                if d > max_dist {
                    segment.position = prev_pos + (segment.position - prev_pos).with_magnitude(max_dist);
                    segment.velocity = segment.velocity * CLAMP_DAMPING;
                }
            }
        }
    }

    /// Run the tight positional follow used by the boss body: no steering,
    /// each segment is dragged directly to `spacing` behind its
    /// predecessor, and its velocity is set along the connecting vector so
    /// the render layer gets a facing direction.
    pub fn follow_tight(&mut self, spacing: f64) {
        for i in 1..self.segments.len() {
            let prev_pos = self.segments[i - 1].position;
            let delta = prev_pos - self.segments[i].position;
            let d = delta.length();
            if d > spacing {
                let pull = delta.with_magnitude(d - spacing);
                self.segments[i].position += pull;
            }
            self.segments[i].velocity = delta;
        }
    }

    /// Head-proximity test used for eating: true when the head is within
    /// `threshold` of `point`. The chain does not grow here; growth is the
    /// caller's decision.
    pub fn head_within(&self, point: Vec2, threshold: f64) -> bool {
        self.head().position.distance(point) < threshold
    }

    /// Self-collision test: head against every segment at index `guard`
    /// or beyond, circle threshold `threshold`. The guard band exists
    /// because the first few segments always overlap the head.
    pub fn self_collision(&self, guard: usize, threshold: f64) -> bool {
        let head_pos = self.head().position;
        self.segments
            .iter()
            .skip(guard)
            .any(|s| s.position.distance(head_pos) < threshold)
    }
}

// =============================================================================
// TESTS
// =============================================================================
