//! Boss Attack Sub-Entities
//!
//! Fireballs, spines, falling boulders, and the inhale telegraph motes.
//! Each has an independent position/velocity/lifetime and is removed from
//! its owning collection when the lifetime runs out or a hit consumes it.

use serde::{Deserialize, Serialize};

use crate::core::rng::GameRng;
use crate::core::vec2::{Bounds, Vec2};

// =============================================================================
// FIREBALL
// =============================================================================

/// Default fireball flight speed.
pub const FIREBALL_SPEED: f64 = 7.0;

/// Default fireball diameter.
pub const FIREBALL_SIZE: f64 = 40.0;

/// Fireball lifetime in ticks (3 seconds).
const FIREBALL_LIFE: u32 = 180;

/// A projectile breathed by the wyrm.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Fireball {
    /// Current position
    pub position: Vec2,
    /// Flight velocity
    pub velocity: Vec2,
    /// Diameter, also drives the collision radius
    pub size: f64,
    /// Remaining lifetime in ticks
    pub life: u32,
    /// Cleared when expired or consumed by a hit
    pub alive: bool,
}

impl Fireball {
    /// Launch a fireball along `angle`.
    pub fn new(position: Vec2, angle: f64, speed: f64, size: f64) -> Self {
        Self {
            position,
            velocity: Vec2::from_angle(angle) * speed,
            size,
            life: FIREBALL_LIFE,
            alive: true,
        }
    }

    /// Advance one tick.
    pub fn tick(&mut self) {
        self.position += self.velocity;
        self.life = self.life.saturating_sub(1);
        if self.life == 0 {
            self.alive = false;
        }
    }

    /// Collision radius against the player head.
    pub fn hit_radius(&self) -> f64 {
        self.size * 0.5
    }
}

// =============================================================================
// SPINE SHOT
// =============================================================================

/// Spine flight speed.
const SPINE_SPEED: f64 = 14.0;

/// Spine size.
const SPINE_SIZE: f64 = 25.0;

/// Spine lifetime in ticks.
const SPINE_LIFE: u32 = 120;

/// A spine flung sideways from the wyrm's body segments.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpineShot {
    /// Current position
    pub position: Vec2,
    /// Flight velocity
    pub velocity: Vec2,
    /// Size, also the collision radius
    pub size: f64,
    /// Remaining lifetime in ticks
    pub life: u32,
    /// Cleared when expired or consumed by a hit
    pub alive: bool,
}

impl SpineShot {
    /// Launch a spine along `angle`.
    pub fn new(position: Vec2, angle: f64) -> Self {
        Self {
            position,
            velocity: Vec2::from_angle(angle) * SPINE_SPEED,
            size: SPINE_SIZE,
            life: SPINE_LIFE,
            alive: true,
        }
    }

    /// Advance one tick.
    pub fn tick(&mut self) {
        self.position += self.velocity;
        self.life = self.life.saturating_sub(1);
        if self.life == 0 {
            self.alive = false;
        }
    }
}

// =============================================================================
// BOULDER
// =============================================================================

/// Boulder size class, rolled at spawn: 20% small, 60% mid, 20% big.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoulderClass {
    /// Smallest rocks, 1 damage when launched back
    Small,
    /// Mid rocks, 2 damage
    Mid,
    /// Big rocks, 3 damage
    Big,
}

impl BoulderClass {
    /// Damage dealt to the boss by a launched boulder of this class.
    pub fn damage(self) -> u32 {
        match self {
            BoulderClass::Small => 1,
            BoulderClass::Mid => 2,
            BoulderClass::Big => 3,
        }
    }
}

/// Boulder lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoulderPhase {
    /// Dropping in from above (depth shrinking toward 0)
    Falling,
    /// Resting on the ground, launchable by a player dash
    Landed,
    /// Flying at the boss after a dash launch
    Launched,
}

/// Depth lost per tick while falling.
const FALL_STEP: f64 = 0.015;

/// Lifetime granted when a boulder lands.
const LANDED_LIFE: u32 = 600;

/// Lifetime granted when a boulder is launched.
const LAUNCHED_LIFE: u32 = 180;

/// Launch flight speed.
const LAUNCH_SPEED: f64 = 20.0;

/// Per-tick velocity retention after launch.
const LAUNCH_FRICTION: f64 = 0.97;

/// A rock shaken loose by the wyrm's dash.
///
/// Three-phase lifecycle: falling (pseudo-3D depth scalar shrinks to 0) →
/// landed → optionally launched back at the boss.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Boulder {
    /// Current position (y is the visual position while falling)
    pub position: Vec2,
    /// Ground position the fall ends at
    pub target_y: f64,
    /// Depth scalar: 1.0 far overhead, 0.0 on the ground
    pub depth: f64,
    /// Size class rolled at spawn
    pub class: BoulderClass,
    /// Base diameter before depth scaling
    pub base_size: f64,
    /// Lifecycle phase
    pub phase: BoulderPhase,
    /// Remaining lifetime in ticks
    pub life: u32,
    /// Flight velocity after launch
    pub launch_velocity: Vec2,
    /// Spin angle after launch (render hint)
    pub rotation: f64,
    /// Spin rate after launch
    pub rotation_speed: f64,
    /// Cleared when expired, out of bounds, or consumed
    pub alive: bool,
}

impl Boulder {
    /// Spawn a boulder overhead at a random drop column.
    pub fn spawn(rng: &mut GameRng, bounds: &Bounds) -> Self {
        let roll = rng.next_f64();
        let (class, base_size) = if roll < 0.2 {
            (BoulderClass::Small, rng.range(30.0, 45.0))
        } else if roll < 0.8 {
            (BoulderClass::Mid, rng.range(50.0, 70.0))
        } else {
            (BoulderClass::Big, rng.range(75.0, 100.0))
        };

        Self {
            position: Vec2::new(rng.range(100.0, bounds.width - 100.0), -50.0),
            target_y: rng.range(bounds.height * 0.3, bounds.height * 0.8),
            depth: 1.0,
            class,
            base_size,
            phase: BoulderPhase::Falling,
            life: 300,
            launch_velocity: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            alive: true,
        }
    }

    /// Diameter as rendered/collided at the current depth.
    pub fn visual_size(&self) -> f64 {
        self.base_size * (1.0 - self.depth * 0.7)
    }

    /// Advance one tick.
    pub fn tick(&mut self, bounds: &Bounds) {
        self.life = self.life.saturating_sub(1);
        if self.life == 0 {
            self.alive = false;
        }

        match self.phase {
            BoulderPhase::Falling => {
                self.depth -= FALL_STEP;
                self.position.y = -50.0 + (self.target_y + 50.0) * (1.0 - self.depth);
                if self.depth <= 0.0 {
                    self.depth = 0.0;
                    self.position.y = self.target_y;
                    self.phase = BoulderPhase::Landed;
                    self.life = LANDED_LIFE;
                }
            }
            BoulderPhase::Landed => {}
            BoulderPhase::Launched => {
                self.position += self.launch_velocity;
                self.rotation += self.rotation_speed;
                self.launch_velocity = self.launch_velocity * LAUNCH_FRICTION;

                if bounds.is_far_outside(self.position, 100.0) {
                    self.alive = false;
                }
            }
        }
    }

    /// Fling a landed boulder along `direction`. No-op in other phases.
    pub fn launch(&mut self, direction: Vec2, rng: &mut GameRng) {
        if self.phase != BoulderPhase::Landed {
            return;
        }
        self.phase = BoulderPhase::Launched;
        self.launch_velocity = direction.with_magnitude(LAUNCH_SPEED);
        self.rotation_speed = rng.range(-0.3, 0.3);
        self.life = LAUNCHED_LIFE;
    }

    /// Does a falling boulder squash the player head?
    pub fn hits_player(&self, head: Vec2) -> bool {
        self.phase == BoulderPhase::Falling
            && head.distance(self.position) < self.visual_size() * 0.4 + 15.0
    }

    /// Does a launched boulder strike the boss head? Consumes the boulder
    /// and returns its damage on impact.
    pub fn strike_boss(&mut self, boss_head: Vec2) -> Option<u32> {
        if self.phase != BoulderPhase::Launched || !self.alive {
            return None;
        }
        if boss_head.distance(self.position) < self.visual_size() * 0.4 + 50.0 {
            self.alive = false;
            Some(self.class.damage())
        } else {
            None
        }
    }

    /// Is this a landed boulder within dash-launch range of `point`?
    pub fn launchable_from(&self, point: Vec2, range: f64) -> bool {
        self.phase == BoulderPhase::Landed && point.distance(self.position) < range
    }
}

// =============================================================================
// INHALE MOTE
// =============================================================================

/// Mote lifetime decay per tick.
const MOTE_FADE: f64 = 5.0;

/// Acceleration toward the mouth per tick.
const MOTE_PULL: f64 = 0.5;

/// Mote speed cap.
const MOTE_MAX_SPEED: f64 = 10.0;

/// A particle drawn toward the wyrm's mouth during the inhale telegraph.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InhaleMote {
    /// Current position
    pub position: Vec2,
    /// Current velocity
    pub velocity: Vec2,
    /// Remaining life, 0..=255 (doubles as render alpha)
    pub life: f64,
}

impl InhaleMote {
    /// Spawn a mote at a cone position.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            life: 255.0,
        }
    }

    /// Accelerate toward `mouth` one tick. Returns false once the mote
    /// expires or reaches the mouth.
    pub fn tick(&mut self, mouth: Vec2) -> bool {
        let to_mouth = mouth - self.position;
        let distance = to_mouth.length();

        self.velocity = (self.velocity + to_mouth.with_magnitude(MOTE_PULL)).limit(MOTE_MAX_SPEED);
        self.position += self.velocity;
        self.life -= MOTE_FADE;

        self.life > 0.0 && distance >= 10.0
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fireball_flies_and_expires() {
        let mut fb = Fireball::new(Vec2::ZERO, 0.0, FIREBALL_SPEED, FIREBALL_SIZE);
        fb.tick();
        assert!(fb.position.x > 0.0);
        assert!((fb.position.x - FIREBALL_SPEED).abs() < 1e-9);

        for _ in 0..FIREBALL_LIFE {
            fb.tick();
        }
        assert!(!fb.alive);
    }

    #[test]
    fn test_spine_expires() {
        let mut spine = SpineShot::new(Vec2::ZERO, std::f64::consts::FRAC_PI_2);
        for _ in 0..SPINE_LIFE {
            spine.tick();
        }
        assert!(!spine.alive);
        assert!(spine.position.y > 0.0);
    }

    #[test]
    fn test_boulder_lands() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(31);
        let mut boulder = Boulder::spawn(&mut rng, &bounds);
        assert_eq!(boulder.phase, BoulderPhase::Falling);

        // 1.0 / 0.015 ≈ 67 ticks to land
        for _ in 0..80 {
            boulder.tick(&bounds);
        }
        assert_eq!(boulder.phase, BoulderPhase::Landed);
        assert_eq!(boulder.position.y, boulder.target_y);
        assert_eq!(boulder.depth, 0.0);
        assert!(boulder.alive);
    }

    #[test]
    fn test_boulder_launch_only_when_landed() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(32);
        let mut boulder = Boulder::spawn(&mut rng, &bounds);

        // Launching mid-fall is refused
        boulder.launch(Vec2::new(1.0, 0.0), &mut rng);
        assert_eq!(boulder.phase, BoulderPhase::Falling);

        while boulder.phase == BoulderPhase::Falling {
            boulder.tick(&bounds);
        }
        boulder.launch(Vec2::new(1.0, 0.0), &mut rng);
        assert_eq!(boulder.phase, BoulderPhase::Launched);
        assert!((boulder.launch_velocity.length() - LAUNCH_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_launched_boulder_strikes_boss() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(33);
        let mut boulder = Boulder::spawn(&mut rng, &bounds);
        while boulder.phase == BoulderPhase::Falling {
            boulder.tick(&bounds);
        }
        boulder.launch(Vec2::new(1.0, 0.0), &mut rng);

        let damage = boulder.strike_boss(boulder.position).unwrap();
        assert_eq!(damage, boulder.class.damage());
        assert!(!boulder.alive);

        // Already consumed: no double hit
        assert!(boulder.strike_boss(boulder.position).is_none());
    }

    #[test]
    fn test_falling_boulder_hits_player_only_while_falling() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(34);
        let mut boulder = Boulder::spawn(&mut rng, &bounds);

        // Mid-fall: a head directly under the rock is hit
        for _ in 0..40 {
            boulder.tick(&bounds);
        }
        assert!(boulder.hits_player(boulder.position));

        while boulder.phase == BoulderPhase::Falling {
            boulder.tick(&bounds);
        }
        assert!(!boulder.hits_player(boulder.position));
    }

    #[test]
    fn test_mote_reaches_mouth() {
        let mouth = Vec2::new(100.0, 100.0);
        let mut mote = InhaleMote::new(Vec2::new(500.0, 100.0));

        let mut reached = false;
        for _ in 0..60 {
            if !mote.tick(mouth) {
                reached = true;
                break;
            }
        }
        assert!(reached, "mote should expire or arrive within its lifetime");
    }
}
