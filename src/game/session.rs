//! Game Session
//!
//! The per-run context object: score, lives, entity collections, RNG, and
//! the phase machine. Everything the original kept in globals lives here;
//! a session is created at game start, reset by creating a new one, and
//! dropped on exit to the menu.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::boss::wyrm::{EmberWyrm, WyrmConfig};
use crate::core::rng::GameRng;
use crate::core::vec2::{Bounds, Vec2};

use super::config::{levels, Difficulty, LevelSpec};
use super::events::{GameEvent, GameEventData};
use super::flock::Swarm;
use super::food::Food;
use super::input::ControlScheme;
use super::obstacle::{self, Obstacle};
use super::player::PlayerSnake;
use super::stalker::StalkerSnake;

/// Lives at the start of a boss encounter.
pub const STARTING_LIVES: u32 = 3;

/// Invulnerability window after each hit (~1.5 s).
pub const INVULNERABILITY_TICKS: u32 = 90;

/// Knockback impulse applied away from a hit point.
const KNOCKBACK: f64 = 15.0;

/// Ticks the win animation holds before the session ends.
const COMPLETING_HOLD: u32 = 240;

/// Ticks the death animation holds before the session ends.
const DYING_HOLD: u32 = 120;

/// Errors from session construction.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The requested level does not exist in the difficulty's table.
    #[error("difficulty {difficulty:?} has no level index {level}")]
    UnknownLevel {
        /// Requested difficulty
        difficulty: Difficulty,
        /// Requested level index
        level: usize,
    },
}

/// Coarse phase of a session. Pausing freezes the tick loop entirely;
/// re-entrant transitions are no-ops.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Scripted boss introduction
    Intro,
    /// Normal play
    Playing,
    /// Frozen; state is inert until resumed
    Paused,
    /// Win animation hold
    Completing,
    /// Death animation hold
    PlayerDying,
    /// Terminal
    Ended {
        /// Whether the level goal was met
        won: bool,
    },
}

/// Plain score/health snapshot for the persistence collaborator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Current score
    pub score: u32,
    /// Lives remaining
    pub lives: u32,
    /// Ticks simulated
    pub ticks: u64,
    /// Boss health, if a boss is present
    pub boss_health: Option<u32>,
    /// Outcome, once the session has ended
    pub won: Option<bool>,
}

/// One run of one level.
#[derive(Clone, Debug)]
pub struct GameSession {
    /// Arena rectangle
    pub bounds: Bounds,
    /// Selected difficulty tier
    pub difficulty: Difficulty,
    /// Index into the tier's level table
    pub level_index: usize,
    /// The level being played
    pub level: LevelSpec,
    /// Steering device
    pub control_scheme: ControlScheme,

    /// Current phase
    pub phase: SessionPhase,
    /// Ticks simulated since creation
    pub tick: u64,
    /// Ticks of actual play (drives the time limit)
    pub ticks_played: u64,
    /// Current score
    pub score: u32,
    /// Lives remaining (boss levels; elsewhere any hit is fatal)
    pub lives: u32,
    /// Post-hit invulnerability window
    pub invulnerable_timer: u32,
    /// Render-layer shake hint, decays every tick
    pub screen_shake: f64,
    /// Cinematic clock while in `Intro`
    pub cinematic_timer: u32,
    /// Countdown clock for the `Completing`/`PlayerDying` holds
    pub hold_timer: u32,

    /// The player chain
    pub player: PlayerSnake,
    /// Hostile chains
    pub stalkers: Vec<StalkerSnake>,
    /// Food pickups
    pub foods: Vec<Food>,
    /// Static obstacles
    pub obstacles: Vec<Obstacle>,
    /// The boss, on boss levels
    pub boss: Option<EmberWyrm>,
    /// Decorative swarm, on boss levels
    pub swarm: Option<Swarm>,

    /// Gameplay RNG
    pub rng: GameRng,
    /// Events generated this tick, drained by the tick loop
    pub pending_events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a session.
    ///
    /// `seed` drives gameplay randomness; `arena_seed` drives obstacle
    /// placement so a fixed arena seed reproduces the same field.
    pub fn new(
        difficulty: Difficulty,
        level_index: usize,
        seed: u64,
        arena_seed: u64,
        bounds: Bounds,
    ) -> Result<Self, SessionError> {
        let level = *levels(difficulty)
            .get(level_index)
            .ok_or(SessionError::UnknownLevel {
                difficulty,
                level: level_index,
            })?;

        let settings = difficulty.settings();
        let mut rng = GameRng::new(seed);
        let mut arena_rng = GameRng::new(arena_seed);

        let mut session = if level.boss.is_some() {
            // Boss arena: no food, obstacles, or stalkers; the player
            // enters from off-screen left and the wyrm descends from above
            let mut boss = EmberWyrm::new(
                Vec2::new(bounds.width * 0.8, -500.0),
                WyrmConfig::default(),
                &mut rng,
            );

            // The player enters from off-screen left either way; practice
            // skips the cinematic and starts with the wyrm pre-coiled
            let player_start = Vec2::new(-200.0, bounds.height / 2.0);
            let phase = if difficulty == Difficulty::Practice {
                boss.set_coiled_layout(bounds.center(), true);
                SessionPhase::Playing
            } else {
                SessionPhase::Intro
            };

            Self {
                bounds,
                difficulty,
                level_index,
                level,
                control_scheme: ControlScheme::default(),
                phase,
                tick: 0,
                ticks_played: 0,
                score: 0,
                lives: STARTING_LIVES,
                invulnerable_timer: 0,
                screen_shake: 0.0,
                cinematic_timer: 0,
                hold_timer: 0,
                player: PlayerSnake::new(player_start),
                stalkers: Vec::new(),
                foods: Vec::new(),
                obstacles: Vec::new(),
                boss: Some(boss),
                swarm: Some(Swarm::new()),
                rng,
                pending_events: Vec::new(),
            }
        } else {
            let obstacles = obstacle::generate_field(settings.obstacles, &bounds, &mut arena_rng);

            let mut foods = Vec::with_capacity(settings.food as usize);
            for _ in 0..settings.food {
                foods.push(Food::new(&mut rng, &bounds));
            }

            let mut stalkers = Vec::with_capacity(settings.stalkers as usize);
            for _ in 0..settings.stalkers {
                let position = Vec2::new(
                    rng.range(0.0, bounds.width),
                    rng.range(0.0, bounds.height),
                );
                stalkers.push(StalkerSnake::new(position, settings.pursuit, &mut rng));
            }

            Self {
                bounds,
                difficulty,
                level_index,
                level,
                control_scheme: ControlScheme::default(),
                phase: SessionPhase::Playing,
                tick: 0,
                ticks_played: 0,
                score: 0,
                lives: STARTING_LIVES,
                invulnerable_timer: 0,
                screen_shake: 0.0,
                cinematic_timer: 0,
                hold_timer: 0,
                player: PlayerSnake::new(bounds.center()),
                stalkers,
                foods,
                obstacles,
                boss: None,
                swarm: None,
                rng,
                pending_events: Vec::new(),
            }
        };

        if difficulty == Difficulty::Sandbox {
            session.player.autonomous = true;
        }

        info!(
            level = session.level.name,
            ?difficulty,
            boss = session.boss.is_some(),
            "session started"
        );
        Ok(session)
    }

    /// Whether this run hosts a boss encounter.
    pub fn is_boss_level(&self) -> bool {
        self.boss.is_some()
    }

    /// Level time limit in ticks; 0 means untimed.
    pub fn time_limit_ticks(&self) -> u64 {
        self.level.time_limit_secs as u64 * crate::TICK_RATE as u64
    }

    /// Freeze the tick loop. No-op outside `Playing`.
    pub fn pause(&mut self) {
        if self.phase == SessionPhase::Playing {
            self.phase = SessionPhase::Paused;
        }
    }

    /// Resume from pause. No-op outside `Paused`.
    pub fn resume(&mut self) {
        if self.phase == SessionPhase::Paused {
            self.phase = SessionPhase::Playing;
        }
    }

    /// Jump the intro cinematic to its end. Skipping before the dialogue
    /// snaps the wyrm into its arena position.
    pub fn skip_cinematic(&mut self) {
        if self.phase != SessionPhase::Intro {
            return;
        }
        if self.cinematic_timer < 450 {
            let center = self.bounds.center();
            if let Some(boss) = &mut self.boss {
                boss.snap_to(center);
            }
        }
        self.cinematic_timer = 600;
    }

    /// Dialogue line currently on screen during the intro.
    pub fn intro_dialogue(&self) -> Option<&'static str> {
        if self.phase != SessionPhase::Intro {
            return None;
        }
        match self.cinematic_timer {
            240..=449 => Some("You disturb my slumber... little worm?"),
            450..=599 => Some("NOW... BURN!"),
            _ => None,
        }
    }

    /// Hurt the player: one life, knockback, invulnerability window.
    /// Ignored while the window is open.
    pub fn take_damage(&mut self, hit: Vec2) {
        if self.invulnerable_timer > 0 {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        self.invulnerable_timer = INVULNERABILITY_TICKS;
        self.player.take_hit();

        // Shove the head away from whatever connected
        let head = self.player.head_mut();
        let push = (head.position - hit).with_magnitude(KNOCKBACK);
        head.velocity += push;
        head.position += push;

        self.push_event(GameEventData::DamageTaken {
            lives_left: self.lives,
            hit,
        });

        if self.lives == 0 {
            self.start_death();
        }
    }

    /// Enter the death animation hold.
    pub fn start_death(&mut self) {
        if matches!(self.phase, SessionPhase::PlayerDying | SessionPhase::Ended { .. }) {
            return;
        }
        info!(score = self.score, "player died");
        self.phase = SessionPhase::PlayerDying;
        self.hold_timer = DYING_HOLD;
        self.screen_shake = 30.0;
        self.push_event(GameEventData::PlayerDied);
    }

    /// Enter the win animation hold.
    pub fn complete_level(&mut self) {
        if matches!(self.phase, SessionPhase::Completing | SessionPhase::Ended { .. }) {
            return;
        }
        info!(score = self.score, "level complete");
        self.phase = SessionPhase::Completing;
        self.hold_timer = COMPLETING_HOLD;
        self.push_event(GameEventData::LevelComplete { score: self.score });
    }

    /// Advance the hold timers for the `Completing`/`PlayerDying` phases.
    /// Returns true when the hold just finished.
    pub(crate) fn advance_hold(&mut self) -> bool {
        if self.hold_timer > 0 {
            self.hold_timer -= 1;
            self.hold_timer == 0
        } else {
            true
        }
    }

    /// Stamp and queue an event.
    pub fn push_event(&mut self, data: GameEventData) {
        self.pending_events.push(GameEvent::new(self.tick, data));
    }

    /// Drain pending events.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Sandbox interaction: drop a new obstacle at a point.
    pub fn spawn_obstacle(&mut self, position: Vec2) {
        let obstacle = Obstacle::random_at(position, &mut self.rng);
        self.obstacles.push(obstacle);
    }

    /// Sandbox interaction: move an obstacle. Returns false for a bad index.
    pub fn drag_obstacle(&mut self, index: usize, position: Vec2) -> bool {
        match self.obstacles.get_mut(index) {
            Some(obstacle) => {
                obstacle.position = position;
                true
            }
            None => false,
        }
    }

    /// Score/health snapshot for the persistence layer.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score,
            lives: self.lives,
            ticks: self.tick,
            boss_health: self.boss.as_ref().map(|b| b.health()),
            won: match self.phase {
                SessionPhase::Ended { won } => Some(won),
                _ => None,
            },
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
