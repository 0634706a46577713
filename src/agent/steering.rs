//! Steering Agent
//!
//! A 2D point mass with speed and force caps, plus the steering behaviors
//! every moving entity composes. Behaviors return a bounded force; callers
//! weight and accumulate them with [`SteeringAgent::apply_force`] and then
//! integrate with [`SteeringAgent::update`]. Integration is explicit Euler
//! at a fixed tick, no sub-stepping.
//!
//! Degenerate geometry (zero-length desired vectors, coincident points)
//! always yields a zero force, never a NaN.

use crate::core::rng::GameRng;
use crate::core::vec2::{remap, Bounds, Vec2};

/// How many ticks ahead pursue/evade extrapolate the quarry's motion.
const PURSUE_LEAD_TICKS: f64 = 10.0;

/// Distance the wander circle sits ahead of the agent.
const WANDER_DISTANCE: f64 = 100.0;

/// Radius of the wander circle.
const WANDER_RADIUS: f64 = 50.0;

/// Per-call perturbation of the persistent wander angle (radians).
const WANDER_JITTER: f64 = 0.5;

/// Ticks of travel projected by the far avoidance probe.
const AVOID_LOOKAHEAD_TICKS: f64 = 30.0;

/// Safety margin added around an obstacle's radius when avoiding.
const AVOID_MARGIN: f64 = 20.0;

/// Boundary steering is allowed this multiple of the normal force cap.
const BOUNDARY_FORCE_MULT: f64 = 2.5;

/// A plain collision circle, the only view of an obstacle the steering
/// layer needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    /// Center position
    pub center: Vec2,
    /// Radius
    pub radius: f64,
}

impl Circle {
    /// Create a circle.
    pub const fn new(center: Vec2, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// A steerable 2D point mass.
#[derive(Clone, Debug)]
pub struct SteeringAgent {
    /// Current position
    pub position: Vec2,
    /// Current velocity
    pub velocity: Vec2,
    /// Force accumulator, cleared by `update`
    pub acceleration: Vec2,
    /// Speed cap enforced after integration
    pub max_speed: f64,
    /// Magnitude cap applied to every steering force
    pub max_force: f64,
    /// Persistent random-walk heading offset for `wander`
    pub wander_angle: f64,
}

impl SteeringAgent {
    /// Create an agent at rest.
    pub fn new(position: Vec2, max_speed: f64, max_force: f64) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            max_speed,
            max_force,
            wander_angle: 0.0,
        }
    }

    /// Accumulate a force. Takes effect at the next `update`.
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Integrate one tick and clamp the position into the arena.
    pub fn update(&mut self, bounds: &Bounds) {
        self.integrate();
        self.position = bounds.clamp(self.position);
    }

    /// Integrate one tick without the arena clamp.
    ///
    /// Used by entities that legitimately travel off-screen (boss
    /// entrances and dashes, decorative flocks crossing the arena).
    pub fn update_free(&mut self) {
        self.integrate();
    }

    fn integrate(&mut self) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;
    }

    /// Current facing angle, derived from velocity.
    #[inline]
    pub fn heading(&self) -> f64 {
        self.velocity.heading()
    }

    /// Steer toward `target` at full speed.
    pub fn seek(&self, target: Vec2) -> Vec2 {
        let desired = target - self.position;
        if desired == Vec2::ZERO {
            return Vec2::ZERO;
        }
        let steer = desired.with_magnitude(self.max_speed) - self.velocity;
        steer.limit(self.max_force)
    }

    /// Steer toward `target`, ramping the desired speed down from
    /// `max_speed` at `range` to zero at `stop_distance`.
    ///
    /// Inside `stop_distance` the agent halts outright: velocity is zeroed
    /// and a zero force is returned.
    pub fn arrive(&mut self, target: Vec2, range: f64, stop_distance: f64) -> Vec2 {
        let desired = target - self.position;
        let d = desired.length();
        if d < stop_distance {
            self.velocity = Vec2::ZERO;
            return Vec2::ZERO;
        }
        let speed = if d < range {
            remap(d, stop_distance, range, 0.0, self.max_speed)
        } else {
            self.max_speed
        };
        let steer = desired.with_magnitude(speed) - self.velocity;
        steer.limit(self.max_force)
    }

    /// Steer toward where `other` will be in a few ticks.
    pub fn pursue(&self, other: &SteeringAgent) -> Vec2 {
        self.seek(other.position + other.velocity * PURSUE_LEAD_TICKS)
    }

    /// Steer away from where `other` will be in a few ticks.
    pub fn evade(&self, other: &SteeringAgent) -> Vec2 {
        -self.pursue(other)
    }

    /// Autocorrelated random roaming.
    ///
    /// Projects a circle ahead of the agent, seeks a point on it selected
    /// by the persistent `wander_angle`, then jitters that angle. The
    /// persistence is the point: headings drift instead of jumping.
    pub fn wander(&mut self, rng: &mut GameRng) -> Vec2 {
        let mut wander_point = self.position + self.velocity.with_magnitude(WANDER_DISTANCE);
        let theta = self.wander_angle + self.heading();
        wander_point += Vec2::new(WANDER_RADIUS * theta.cos(), WANDER_RADIUS * theta.sin());

        let steer = self.seek(wander_point);
        self.wander_angle += rng.range(-WANDER_JITTER, WANDER_JITTER);
        steer
    }

    /// Steer around the single nearest obstacle.
    ///
    /// Two probe points are projected ahead along the velocity (30 and 15
    /// ticks of travel). If either lands within the obstacle's padded
    /// radius, the force pushes from the obstacle center out through the
    /// closer probe. Only the nearest obstacle is ever considered.
    pub fn avoid(&self, obstacles: &[Circle]) -> Vec2 {
        let nearest = obstacles.iter().min_by(|a, b| {
            let da = self.position.distance_squared(a.center);
            let db = self.position.distance_squared(b.center);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
        let Some(obstacle) = nearest else {
            return Vec2::ZERO;
        };

        let ahead = self.position + self.velocity * AVOID_LOOKAHEAD_TICKS;
        let ahead_near = self.position + self.velocity * (AVOID_LOOKAHEAD_TICKS * 0.5);

        let d_far = ahead.distance(obstacle.center);
        let d_near = ahead_near.distance(obstacle.center);

        if d_far.min(d_near) < obstacle.radius + AVOID_MARGIN {
            let probe = if d_far < d_near { ahead } else { ahead_near };
            let force = (probe - obstacle.center).with_magnitude(self.max_speed) - self.velocity;
            force.limit(self.max_force)
        } else {
            Vec2::ZERO
        }
    }

    /// Steer away from nearby points, each weighted by inverse distance.
    pub fn separate(&self, points: &[Vec2], radius: f64) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0u32;
        for &point in points {
            let diff = self.position - point;
            let d = diff.length();
            if d > 0.0 && d < radius {
                sum += diff.normalize() * (1.0 / d);
                count += 1;
            }
        }
        if count == 0 {
            return Vec2::ZERO;
        }
        let steer = (sum * (1.0 / count as f64)).with_magnitude(self.max_speed) - self.velocity;
        steer.limit(self.max_force)
    }

    /// Match the average velocity of neighbors within `radius`.
    pub fn align(&self, others: &[SteeringAgent], radius: f64) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0u32;
        for other in others {
            let d = self.position.distance(other.position);
            if d > 0.0 && d < radius {
                sum += other.velocity;
                count += 1;
            }
        }
        if count == 0 {
            return Vec2::ZERO;
        }
        let desired = (sum * (1.0 / count as f64)).with_magnitude(self.max_speed);
        (desired - self.velocity).limit(self.max_force)
    }

    /// Seek the average position of neighbors within `radius`.
    pub fn cohesion(&self, others: &[SteeringAgent], radius: f64) -> Vec2 {
        let mut sum = Vec2::ZERO;
        let mut count = 0u32;
        for other in others {
            let d = self.position.distance(other.position);
            if d > 0.0 && d < radius {
                sum += other.position;
                count += 1;
            }
        }
        if count == 0 {
            return Vec2::ZERO;
        }
        self.seek(sum * (1.0 / count as f64))
    }

    /// Push back toward the interior when within `margin` of an arena edge.
    ///
    /// Unlike the other behaviors this applies its force directly (at up to
    /// 2.5x the normal cap) instead of returning it. Call before `update`.
    pub fn boundaries(&mut self, margin: f64, bounds: &Bounds) {
        let mut desired = None;

        if self.position.x < margin {
            desired = Some(Vec2::new(self.max_speed, self.velocity.y));
        } else if self.position.x > bounds.width - margin {
            desired = Some(Vec2::new(-self.max_speed, self.velocity.y));
        }

        if self.position.y < margin {
            desired = Some(Vec2::new(self.velocity.x, self.max_speed));
        } else if self.position.y > bounds.height - margin {
            desired = Some(Vec2::new(self.velocity.x, -self.max_speed));
        }

        if let Some(desired) = desired {
            let steer = desired.with_magnitude(self.max_speed) - self.velocity;
            self.apply_force(steer.limit(self.max_force * BOUNDARY_FORCE_MULT));
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn agent_at(x: f64, y: f64) -> SteeringAgent {
        SteeringAgent::new(Vec2::new(x, y), 5.0, 0.25)
    }

    #[test]
    fn test_seek_points_at_target() {
        let agent = agent_at(100.0, 100.0);
        let force = agent.seek(Vec2::new(200.0, 100.0));
        assert!(force.x > 0.0);
        assert!(force.length() <= 0.25 + 1e-9);
    }

    #[test]
    fn test_seek_degenerate_target() {
        // target == position must not normalize a zero vector
        let agent = agent_at(100.0, 100.0);
        let force = agent.seek(Vec2::new(100.0, 100.0));
        assert_eq!(force, Vec2::ZERO);
    }

    #[test]
    fn test_arrive_hard_stop() {
        let mut agent = agent_at(100.0, 100.0);
        agent.velocity = Vec2::new(3.0, 0.0);

        let force = agent.arrive(Vec2::new(105.0, 100.0), 100.0, 10.0);
        assert_eq!(force, Vec2::ZERO);
        assert_eq!(agent.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_arrive_ramps_down() {
        // Generous force cap so the ramp is visible in the returned force
        let mut far = SteeringAgent::new(Vec2::ZERO, 5.0, 10.0);
        let far_force = far.arrive(Vec2::new(500.0, 0.0), 100.0, 0.0);

        let mut near = SteeringAgent::new(Vec2::ZERO, 5.0, 10.0);
        let near_force = near.arrive(Vec2::new(20.0, 0.0), 100.0, 0.0);

        // Inside the slowing radius the desired speed is lower
        assert!(near_force.length() < far_force.length());
    }

    #[test]
    fn test_pursue_leads_target() {
        let chaser = agent_at(0.0, 0.0);
        let mut quarry = agent_at(100.0, 0.0);
        quarry.velocity = Vec2::new(0.0, 4.0);

        let pursue = chaser.pursue(&quarry);
        let plain = chaser.seek(quarry.position);
        // Lead pulls the intercept toward +y compared to a plain seek
        assert!(pursue.y > plain.y);
        assert_eq!(chaser.evade(&quarry), -pursue);
    }

    #[test]
    fn test_wander_continuity() {
        // Heading offset drifts by at most the jitter bound per call
        let mut agent = agent_at(400.0, 300.0);
        agent.velocity = Vec2::new(2.0, 0.0);
        let mut rng = GameRng::new(9);

        let mut prev = agent.wander_angle;
        for _ in 0..500 {
            agent.wander(&mut rng);
            assert!((agent.wander_angle - prev).abs() <= WANDER_JITTER + 1e-12);
            prev = agent.wander_angle;
        }
    }

    #[test]
    fn test_avoid_obstacle_on_lookahead() {
        let mut agent = agent_at(100.0, 100.0);
        agent.velocity = Vec2::new(2.0, 0.0);

        // Obstacle parked exactly at the 30-tick probe point
        let probe = agent.position + agent.velocity * AVOID_LOOKAHEAD_TICKS;
        let obstacle = Circle::new(probe, 30.0);

        let force = agent.avoid(&[obstacle]);
        assert!(force != Vec2::ZERO);

        // Far-off obstacle produces no force
        let far = Circle::new(Vec2::new(5000.0, 5000.0), 30.0);
        assert_eq!(agent.avoid(&[far]), Vec2::ZERO);

        // No obstacles at all degrades to a no-op
        assert_eq!(agent.avoid(&[]), Vec2::ZERO);
    }

    #[test]
    fn test_avoid_picks_nearest_only() {
        let mut agent = agent_at(0.0, 0.0);
        agent.velocity = Vec2::new(2.0, 0.0);

        // Nearest obstacle sits off the travel line; the threatening one is
        // farther away. Only the nearest is considered, so the on-path
        // obstacle goes unnoticed.
        let nearest = Circle::new(Vec2::new(0.0, 55.0), 30.0);
        let on_path = Circle::new(agent.position + agent.velocity * AVOID_LOOKAHEAD_TICKS, 30.0);
        assert!(agent.position.distance(nearest.center) < agent.position.distance(on_path.center));

        assert_eq!(agent.avoid(&[nearest, on_path]), Vec2::ZERO);
    }

    #[test]
    fn test_separate() {
        let mut agent = agent_at(100.0, 100.0);
        agent.velocity = Vec2::ZERO;

        let crowd = [Vec2::new(110.0, 100.0)];
        let force = agent.separate(&crowd, 50.0);
        assert!(force.x < 0.0, "should push away from the neighbor");

        // Out of radius, and coincident points, produce nothing
        assert_eq!(agent.separate(&[Vec2::new(500.0, 100.0)], 50.0), Vec2::ZERO);
        assert_eq!(agent.separate(&[agent.position], 50.0), Vec2::ZERO);
    }

    #[test]
    fn test_align_and_cohesion() {
        let agent = agent_at(100.0, 100.0);
        let mut neighbor = agent_at(150.0, 100.0);
        neighbor.velocity = Vec2::new(0.0, 3.0);

        let ali = agent.align(std::slice::from_ref(&neighbor), 100.0);
        assert!(ali.y > 0.0, "should match neighbor velocity");

        let coh = agent.cohesion(std::slice::from_ref(&neighbor), 100.0);
        assert!(coh.x > 0.0, "should seek neighbor position");

        // Empty neighborhood
        assert_eq!(agent.align(&[], 100.0), Vec2::ZERO);
        assert_eq!(agent.cohesion(&[], 100.0), Vec2::ZERO);
    }

    #[test]
    fn test_boundaries_pushes_inward() {
        let bounds = Bounds::new(800.0, 600.0);

        let mut agent = agent_at(10.0, 300.0);
        agent.boundaries(40.0, &bounds);
        assert!(agent.acceleration.x > 0.0);

        let mut agent = agent_at(400.0, 595.0);
        agent.boundaries(40.0, &bounds);
        assert!(agent.acceleration.y < 0.0);

        // Comfortably inside: nothing applied
        let mut agent = agent_at(400.0, 300.0);
        agent.boundaries(40.0, &bounds);
        assert_eq!(agent.acceleration, Vec2::ZERO);
    }

    #[test]
    fn test_update_clears_acceleration() {
        let bounds = Bounds::default();
        let mut agent = agent_at(100.0, 100.0);
        agent.apply_force(Vec2::new(1.0, 0.0));
        agent.update(&bounds);
        assert_eq!(agent.acceleration, Vec2::ZERO);
        assert!(agent.velocity.x > 0.0);
    }

    proptest! {
        #[test]
        fn prop_speed_capped_after_update(
            px in 0.0..1280.0, py in 0.0..720.0,
            vx in -50.0..50.0, vy in -50.0..50.0,
            fx in -10.0..10.0, fy in -10.0..10.0,
        ) {
            let bounds = Bounds::default();
            let mut agent = agent_at(px, py);
            agent.velocity = Vec2::new(vx, vy);
            for _ in 0..10 {
                agent.apply_force(Vec2::new(fx, fy));
                agent.update(&bounds);
                prop_assert!(agent.velocity.length() <= agent.max_speed + 1e-9);
            }
        }

        #[test]
        fn prop_position_stays_in_bounds(
            px in -2000.0..2000.0, py in -2000.0..2000.0,
            fx in -10.0..10.0, fy in -10.0..10.0,
        ) {
            let bounds = Bounds::default();
            let mut agent = agent_at(px, py);
            for _ in 0..20 {
                agent.apply_force(Vec2::new(fx, fy));
                agent.update(&bounds);
                prop_assert!(bounds.contains(agent.position));
            }
        }
    }
}
