//! Steering engine.
//!
//! [`steering::SteeringAgent`] is a 2D point mass implementing the classic
//! steering-force vocabulary (seek, arrive, pursue, evade, wander, avoid,
//! separate, align, cohesion, boundary containment). [`chain::SegmentChain`]
//! strings agents together into a snake-like body. Every moving entity in
//! the game composes these two types.

pub mod chain;
pub mod steering;

pub use chain::{AgentLimits, SegmentChain};
pub use steering::{Circle, SteeringAgent};
