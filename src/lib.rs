//! # Serpent Arena
//!
//! Headless simulation core for a steering-driven snake arena game.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      SERPENT ARENA                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Simulation primitives                     │
//! │  ├── vec2.rs     - 2D vector math, arena bounds              │
//! │  └── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │                                                              │
//! │  agent/          - Steering engine                           │
//! │  ├── steering.rs - Point-mass agent + behavior vocabulary    │
//! │  └── chain.rs    - Segment chains (snake bodies)             │
//! │                                                              │
//! │  game/           - Game director                             │
//! │  ├── config.rs   - Difficulty presets, level progression     │
//! │  ├── input.rs    - Per-tick input frames                     │
//! │  ├── session.rs  - Session context (score, lives, entities)  │
//! │  ├── tick.rs     - Per-tick orchestration                    │
//! │  └── ...         - food, obstacles, player, stalkers, flock  │
//! │                                                              │
//! │  boss/           - Boss encounter                            │
//! │  ├── wyrm.rs     - EmberWyrm combat state machine            │
//! │  └── attacks.rs  - Fireballs, spines, boulders, motes        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate never draws, plays audio, or touches the filesystem. A host
//! is expected to feed an [`game::input::InputFrame`] into
//! [`game::tick::tick`] once per rendered frame, then read entity
//! positions and drained [`game::events::GameEvent`]s back out.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod agent;
pub mod boss;
pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::rng::GameRng;
pub use crate::core::vec2::{Bounds, Vec2};
pub use agent::chain::SegmentChain;
pub use agent::steering::SteeringAgent;
pub use game::events::GameEvent;
pub use game::input::InputFrame;
pub use game::session::GameSession;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;
