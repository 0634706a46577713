//! Boss encounter.
//!
//! [`wyrm::EmberWyrm`] is the multi-phase boss: a long tapered segment
//! chain driven by a finite-state combat controller that sequences
//! movement modes and attack patterns. [`attacks`] holds the short-lived
//! sub-entities the controller spawns.

pub mod attacks;
pub mod wyrm;

pub use attacks::{Boulder, BoulderPhase, Fireball, InhaleMote, SpineShot};
pub use wyrm::{EmberWyrm, WyrmConfig, WyrmState};
