//! Decorative Flock
//!
//! A swarm of small agents that periodically pulses across the boss arena,
//! driven by the classic separation/alignment/cohesion blend. Rendering is
//! the host's business; the core only simulates positions.

use crate::agent::steering::SteeringAgent;
use crate::core::rng::GameRng;
use crate::core::vec2::{Bounds, Vec2};

/// Separation radius / weight.
const SEPARATE_RADIUS: f64 = 50.0;
const SEPARATE_WEIGHT: f64 = 1.5;

/// Alignment and cohesion radius / weights.
const NEIGHBOR_RADIUS: f64 = 100.0;
const ALIGN_WEIGHT: f64 = 1.0;
const COHESION_WEIGHT: f64 = 1.0;

/// Ticks between pulses (6-12 seconds at 60 Hz).
const PULSE_MIN_TICKS: u64 = 360;
const PULSE_MAX_TICKS: u64 = 720;

/// Agents per pulse.
const PULSE_MIN: i32 = 15;
const PULSE_MAX: i32 = 24;

/// Despawn margin past the arena edge.
const OFFSCREEN_MARGIN: f64 = 200.0;

/// Which edge a pulse crosses from.
#[derive(Clone, Copy)]
enum PulseEdge {
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

/// A pulsing decorative swarm.
#[derive(Clone, Debug, Default)]
pub struct Swarm {
    agents: Vec<SteeringAgent>,
    next_pulse_tick: u64,
}

impl Swarm {
    /// Create an empty swarm; the first pulse fires on the first update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Live agents, for the render layer.
    pub fn agents(&self) -> &[SteeringAgent] {
        &self.agents
    }

    /// Spawn a burst of agents crossing the arena from a random edge.
    pub fn trigger_pulse(&mut self, bounds: &Bounds, rng: &mut GameRng) {
        let edge = match rng.next_int(4) {
            0 => PulseEdge::LeftToRight,
            1 => PulseEdge::RightToLeft,
            2 => PulseEdge::TopToBottom,
            _ => PulseEdge::BottomToTop,
        };
        let count = rng.range_i32(PULSE_MIN, PULSE_MAX);

        for _ in 0..count {
            let spread = rng.range(0.0, 200.0);
            let (position, velocity) = match edge {
                PulseEdge::LeftToRight => (
                    Vec2::new(-100.0 - spread, rng.range(0.0, bounds.height)),
                    Vec2::new(rng.range(5.0, 8.0), rng.range(-1.0, 1.0)),
                ),
                PulseEdge::RightToLeft => (
                    Vec2::new(bounds.width + 100.0 + spread, rng.range(0.0, bounds.height)),
                    Vec2::new(rng.range(-8.0, -5.0), rng.range(-1.0, 1.0)),
                ),
                PulseEdge::TopToBottom => (
                    Vec2::new(rng.range(0.0, bounds.width), -100.0 - spread),
                    Vec2::new(rng.range(-1.0, 1.0), rng.range(5.0, 8.0)),
                ),
                PulseEdge::BottomToTop => (
                    Vec2::new(rng.range(0.0, bounds.width), bounds.height + 100.0 + spread),
                    Vec2::new(rng.range(-1.0, 1.0), rng.range(-8.0, -5.0)),
                ),
            };

            let mut agent = SteeringAgent::new(position, rng.range(3.0, 5.0), 0.2);
            agent.velocity = velocity;
            self.agents.push(agent);
        }
    }

    /// Advance one tick: maybe pulse, flock, integrate, cull.
    pub fn update(&mut self, tick: u64, bounds: &Bounds, rng: &mut GameRng) {
        if tick >= self.next_pulse_tick {
            self.trigger_pulse(bounds, rng);
            self.next_pulse_tick = tick + PULSE_MIN_TICKS + (rng.next_u64() % (PULSE_MAX_TICKS - PULSE_MIN_TICKS));
        }

        // Flock forces are computed against a snapshot, then applied, so
        // every agent sees the same neighborhood this tick
        let positions: Vec<Vec2> = self.agents.iter().map(|a| a.position).collect();
        let forces: Vec<Vec2> = self
            .agents
            .iter()
            .map(|agent| {
                let sep = agent.separate(&positions, SEPARATE_RADIUS);
                let ali = agent.align(&self.agents, NEIGHBOR_RADIUS);
                let coh = agent.cohesion(&self.agents, NEIGHBOR_RADIUS);
                sep * SEPARATE_WEIGHT + ali * ALIGN_WEIGHT + coh * COHESION_WEIGHT
            })
            .collect();

        for (agent, force) in self.agents.iter_mut().zip(forces) {
            agent.apply_force(force);
            agent.update_free();
        }

        self.agents
            .retain(|a| !bounds.is_far_outside(a.position, OFFSCREEN_MARGIN));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_spawns_offscreen() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(21);
        let mut swarm = Swarm::new();

        swarm.trigger_pulse(&bounds, &mut rng);
        assert!(!swarm.agents().is_empty());
        assert!(swarm.agents().len() >= PULSE_MIN as usize);
        for agent in swarm.agents() {
            assert!(!bounds.contains(agent.position));
            assert!(agent.velocity != Vec2::ZERO);
        }
    }

    #[test]
    fn test_agents_cross_and_despawn() {
        let bounds = Bounds::new(400.0, 300.0);
        let mut rng = GameRng::new(22);
        let mut swarm = Swarm::new();

        // First update triggers a pulse
        swarm.update(0, &bounds, &mut rng);
        assert!(!swarm.agents().is_empty());

        // Hold the clock below the next pulse; everyone crosses and goes
        for _ in 1..800 {
            swarm.update(PULSE_MIN_TICKS - 1, &bounds, &mut rng);
        }
        assert!(swarm.agents().is_empty());
    }

    #[test]
    fn test_flocking_aligns_headings() {
        let bounds = Bounds::new(4000.0, 4000.0);
        let mut rng = GameRng::new(23);
        let mut swarm = Swarm::new();
        swarm.trigger_pulse(&bounds, &mut rng);
        swarm.next_pulse_tick = u64::MAX;

        for t in 0..120 {
            swarm.update(t, &bounds, &mut rng);
        }

        // Neighbors that stayed together should share a rough heading
        if swarm.agents().len() >= 2 {
            let mean: Vec2 = swarm
                .agents()
                .iter()
                .fold(Vec2::ZERO, |acc, a| acc + a.velocity.normalize())
                * (1.0 / swarm.agents().len() as f64);
            assert!(mean.length() > 0.5, "flock should be roughly aligned");
        }
    }
}
