//! Simulation primitives.
//!
//! Vector math and seeded randomness shared by every moving entity.
//! Gameplay and arena generation each take their own [`rng::GameRng`]
//! so terrain stays reproducible while gameplay varies.

pub mod rng;
pub mod vec2;

pub use rng::GameRng;
pub use vec2::{Bounds, Vec2};
