//! Game director and entities.
//!
//! ## Module Structure
//!
//! - `config`: difficulty presets, level progression, progress flags
//! - `input`: per-tick input frames and target resolution
//! - `events`: event stream consumed by audio/UI collaborators
//! - `food` / `obstacle`: passive world entities
//! - `player` / `stalker`: the player chain and hostile AI chains
//! - `flock`: decorative swarm driven by the flocking behaviors
//! - `collision`: circle-circle proximity layer
//! - `session`: the per-run context object
//! - `tick`: per-tick orchestration

pub mod collision;
pub mod config;
pub mod events;
pub mod flock;
pub mod food;
pub mod input;
pub mod obstacle;
pub mod player;
pub mod session;
pub mod stalker;
pub mod tick;

pub use config::{Difficulty, LevelSpec, Progress};
pub use events::{GameEvent, GameEventData};
pub use input::{ControlScheme, InputFrame};
pub use session::{GameSession, SessionError, SessionPhase};
pub use tick::TickResult;
