//! Ember Wyrm
//!
//! The multi-phase boss: a long tapered chain whose head is driven by a
//! finite-state combat controller. Movement states steer the head and drag
//! the body behind it; attack states freeze the body and only rotate the
//! head (the attack tell), spawning projectile sub-entities on transition.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agent::chain::{AgentLimits, SegmentChain};
use crate::agent::steering::Circle;
use crate::core::rng::GameRng;
use crate::core::vec2::{Bounds, Vec2};
use crate::game::events::GameEventData;

use super::attacks::{Boulder, Fireball, InhaleMote, SpineShot, FIREBALL_SIZE, FIREBALL_SPEED};

/// Combat state of the wyrm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WyrmState {
    /// Roaming the arena, occasionally lobbing pot-shots
    Wandering,
    /// Direct approach to a point, used by the cinematic director
    Seeking,
    /// Body frozen, head aiming at the target
    Tracking,
    /// Drawing breath: motes stream into the mouth, suction pulls the player
    Inhaling,
    /// Cooldown right after the fireball fan
    Exhaling,
    /// Chasing the target to line up a dash
    DashPrep,
    /// Charging along the locked direction, shaking boulders loose
    Dashing,
    /// Slammed the arena border mid-dash; vulnerable to headbutts
    Stunned,
    /// Terminal death animation
    Dying,
}

/// Tuning for the wyrm. Defaults match the live encounter.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WyrmConfig {
    /// Body length including the head
    pub segments: usize,
    /// Base segment diameter before tapering
    pub segment_size: f64,
    /// Starting (and maximum) health
    pub max_health: u32,
    /// Ticks spent aiming before each inhale
    pub tracking_ticks: u32,
    /// Ticks spent inhaling before the fireball fan
    pub inhale_ticks: u32,
    /// Ticks of cooldown after the fan
    pub exhale_ticks: u32,
    /// Ticks spent lining up before a dash
    pub dash_prep_ticks: u32,
    /// Ticks the dash lasts
    pub dash_duration: u32,
    /// Dash speed in units per tick
    pub dash_speed: f64,
    /// Ticks spent stunned after slamming the border
    pub stun_ticks: u32,
    /// Wandering dwell time range before a dash cycle
    pub wander_ticks: (u32, u32),
    /// Ticks of death animation before the carcass is done
    pub death_ticks: u32,
}

impl Default for WyrmConfig {
    fn default() -> Self {
        Self {
            segments: 75,
            segment_size: 95.0,
            max_health: 6,
            tracking_ticks: 60,
            inhale_ticks: 150,
            exhale_ticks: 60,
            dash_prep_ticks: 120,
            dash_duration: 50,
            dash_speed: 25.0,
            stun_ticks: 120,
            wander_ticks: (1200, 1500),
            death_ticks: 180,
        }
    }
}

/// Segment caps at rest; movement states adjust the head's `max_speed`.
const HEAD_LIMITS: AgentLimits = AgentLimits::new(5.0, 0.25);

/// Body spacing as a fraction of the segment size.
const BODY_SPACING_FACTOR: f64 = 0.4;

/// Fraction of the tapered segment size used as collision radius.
const COLLISION_FACTOR: f64 = 0.7;

/// Buffer added to every body collision test for the player head.
const COLLISION_BUFFER: f64 = 15.0;

/// Half-angle of the inhale spawn cone (60 degrees total).
const INHALE_CONE_HALF: f64 = std::f64::consts::PI / 6.0;

/// Fireball fan total spread (30 degrees).
const FAN_SPREAD: f64 = std::f64::consts::PI / 6.0;

/// Dash range within which a landed boulder can be kicked at the boss.
const BOULDER_LAUNCH_RANGE: f64 = 80.0;

/// The boss entity.
#[derive(Clone, Debug)]
pub struct EmberWyrm {
    chain: SegmentChain,
    config: WyrmConfig,
    state: WyrmState,
    state_timer: u32,
    health: u32,
    /// When set, head facing bypasses velocity-heading
    head_rotation_override: Option<f64>,
    fireballs: Vec<Fireball>,
    spines: Vec<SpineShot>,
    boulders: Vec<Boulder>,
    motes: Vec<InhaleMote>,
    combo_count: u32,
    max_combos: u32,
    dash_direction: Option<Vec2>,
    wander_deadline: u32,
    dead: bool,
    pending_events: Vec<GameEventData>,
}

impl EmberWyrm {
    /// Create the wyrm at a position (off-screen for entrances).
    pub fn new(position: Vec2, config: WyrmConfig, rng: &mut GameRng) -> Self {
        let mut chain = SegmentChain::new(
            position,
            HEAD_LIMITS,
            HEAD_LIMITS,
            config.segments.saturating_sub(1),
        );
        chain.head_mut().wander_angle = rng.angle();

        Self {
            chain,
            config,
            state: WyrmState::Tracking,
            state_timer: 0,
            health: config.max_health,
            head_rotation_override: None,
            fireballs: Vec::new(),
            spines: Vec::new(),
            boulders: Vec::new(),
            motes: Vec::new(),
            combo_count: 0,
            max_combos: rng.range_i32(1, 4) as u32,
            dash_direction: None,
            wander_deadline: rng.range(config.wander_ticks.0 as f64, config.wander_ticks.1 as f64)
                as u32,
            dead: false,
            pending_events: Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The body chain.
    pub fn chain(&self) -> &SegmentChain {
        &self.chain
    }

    /// Current combat state.
    pub fn state(&self) -> WyrmState {
        self.state
    }

    /// Ticks since the last state transition.
    pub fn state_timer(&self) -> u32 {
        self.state_timer
    }

    /// Remaining health.
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Maximum health.
    pub fn max_health(&self) -> u32 {
        self.config.max_health
    }

    /// Live fireballs.
    pub fn fireballs(&self) -> &[Fireball] {
        &self.fireballs
    }

    /// Live spines.
    pub fn spines(&self) -> &[SpineShot] {
        &self.spines
    }

    /// Live boulders.
    pub fn boulders(&self) -> &[Boulder] {
        &self.boulders
    }

    /// Live inhale motes.
    pub fn motes(&self) -> &[InhaleMote] {
        &self.motes
    }

    /// Head facing angle: the rotation override when set (attack states),
    /// otherwise the velocity heading.
    pub fn head_rotation(&self) -> f64 {
        self.head_rotation_override
            .unwrap_or_else(|| self.chain.head().heading())
    }

    /// Whether a player headbutt currently registers damage.
    pub fn is_vulnerable(&self) -> bool {
        self.state == WyrmState::Stunned
    }

    /// Whether the death animation has finished.
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Drain events generated since the last drain.
    pub fn take_events(&mut self) -> Vec<GameEventData> {
        std::mem::take(&mut self.pending_events)
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Taper factor along the body: 1.2 at the head, ramping to 1.0 by
    /// index 5, then down to 0.4 at the tail.
    pub fn taper(&self, index: usize) -> f64 {
        let n = self.chain.len() as f64;
        if index == 0 {
            1.2
        } else if index < 5 {
            1.2 + (index as f64 / 5.0) * (1.0 - 1.2)
        } else {
            1.0 + ((index as f64 - 5.0) / (n - 5.0)) * (0.4 - 1.0)
        }
    }

    /// Collision radius of a body segment.
    pub fn collision_radius(&self, index: usize) -> f64 {
        self.config.segment_size * self.taper(index) * COLLISION_FACTOR
    }

    /// Teleport the whole body to one point (cinematic skip). The next
    /// follower pass unfolds it naturally.
    pub fn snap_to(&mut self, position: Vec2) {
        for segment in self.chain.segments_mut() {
            segment.position = position;
            segment.velocity = Vec2::ZERO;
        }
    }

    /// Arrange the body into a tight spiral, for intros and the practice
    /// arena. `instant` snaps; otherwise positions ease toward the coil.
    pub fn set_coiled_layout(&mut self, center: Vec2, instant: bool) {
        let spacing = self.config.segment_size * 0.08;
        for (i, segment) in self.chain.segments_mut().iter_mut().enumerate() {
            let angle = i as f64 * 0.35;
            let radius = i as f64 * spacing;
            let target = center + Vec2::new(angle.cos() * radius, angle.sin() * radius);

            if instant {
                segment.position = target;
            } else {
                segment.position = segment.position.lerp(target, 0.15);
            }

            let next_angle = (i + 1) as f64 * 0.35;
            segment.velocity = Vec2::new(
                next_angle.cos() - angle.cos(),
                next_angle.sin() - angle.sin(),
            );
        }
    }

    // -------------------------------------------------------------------------
    // State machine
    // -------------------------------------------------------------------------

    /// Request a state transition. Re-entering the current state is a
    /// no-op; the timer resets on every real transition.
    pub fn set_state(&mut self, next: WyrmState) {
        if self.state == next {
            return;
        }
        debug!(from = ?self.state, to = ?next, "wyrm state transition");
        self.pending_events.push(GameEventData::BossStateChanged {
            from: self.state,
            to: next,
        });

        self.state = next;
        self.state_timer = 0;

        match next {
            WyrmState::Wandering => {
                self.head_rotation_override = None;
            }
            WyrmState::Dashing => {
                // Fresh rockfall: sweep the leftovers of the last one
                self.clear_landed_boulders();
            }
            _ => {}
        }
    }

    /// Apply damage. Health is saturating; hitting zero enters Dying
    /// exactly once.
    pub fn take_damage(&mut self, amount: u32) {
        if self.state == WyrmState::Dying {
            return;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.set_state(WyrmState::Dying);
        }
    }

    /// Advance one tick.
    ///
    /// `target` is the player head position when known; every state
    /// degrades to holding position or skipping its aim when it is absent.
    pub fn update(
        &mut self,
        target: Option<Vec2>,
        obstacles: &[Circle],
        bounds: &Bounds,
        rng: &mut GameRng,
    ) {
        self.state_timer += 1;

        match self.state {
            WyrmState::Wandering => self.update_wandering(target, rng),
            WyrmState::Seeking => self.update_seeking(target, obstacles, bounds),
            WyrmState::Tracking => self.update_tracking(target),
            WyrmState::Inhaling => self.update_inhaling(target, rng),
            WyrmState::Exhaling => self.update_exhaling(),
            WyrmState::DashPrep => self.update_dash_prep(target, bounds),
            WyrmState::Dashing => self.update_dashing(bounds, rng),
            WyrmState::Stunned => self.update_stunned(),
            WyrmState::Dying => self.update_dying(),
        }

        // Attack states freeze the body so only the head rotates; that
        // stillness is the player's tell
        if !matches!(
            self.state,
            WyrmState::Tracking | WyrmState::Inhaling | WyrmState::Exhaling
        ) {
            self.chain
                .follow_tight(self.config.segment_size * BODY_SPACING_FACTOR);
        }

        let mouth = self.chain.head().position;
        self.motes.retain_mut(|m| m.tick(mouth));

        self.fireballs.retain_mut(|f| {
            f.tick();
            f.alive
        });
        self.spines.retain_mut(|s| {
            s.tick();
            s.alive
        });
        self.boulders.retain_mut(|b| {
            b.tick(bounds);
            b.alive
        });
    }

    fn update_wandering(&mut self, target: Option<Vec2>, rng: &mut GameRng) {
        // Sometimes home toward the player, usually just roam
        let chase = target.filter(|_| rng.chance(0.3));

        let head = self.chain.head_mut();
        let force = if let Some(point) = chase {
            head.max_speed = 5.0;
            head.seek(point)
        } else {
            head.max_speed = 6.0;
            head.wander(rng)
        };
        head.apply_force(force);
        // Free integration: the wyrm may drift past the walls
        head.update_free();

        // Pot-shots while roaming
        if self.state_timer > 40 && self.state_timer % 60 == 0 {
            let roll = rng.next_f64();
            if roll < 0.2 {
                self.shoot_big_fireball();
            } else if roll < 0.45 {
                self.release_spines();
            }
        }

        if self.state_timer > self.wander_deadline {
            // Re-roll the dwell time for the next wandering phase
            self.wander_deadline = rng.range(
                self.config.wander_ticks.0 as f64,
                self.config.wander_ticks.1 as f64,
            ) as u32;
            self.set_state(WyrmState::DashPrep);
        }
    }

    fn update_seeking(&mut self, target: Option<Vec2>, obstacles: &[Circle], bounds: &Bounds) {
        let head = self.chain.head_mut();
        if let Some(point) = target {
            let force = head.seek(point);
            head.apply_force(force);
        }
        let avoid = head.avoid(obstacles);
        head.apply_force(avoid * 2.0);
        head.update(bounds);
    }

    fn update_tracking(&mut self, target: Option<Vec2>) {
        self.aim_at(target);
        if self.state_timer > self.config.tracking_ticks {
            self.set_state(WyrmState::Inhaling);
        }
    }

    fn update_inhaling(&mut self, target: Option<Vec2>, rng: &mut GameRng) {
        // Motes stream into the mouth from a cone in front of the head
        if self.state_timer % 2 == 0 {
            let head = self.chain.head();
            let facing = self.head_rotation_override.unwrap_or_else(|| head.heading());
            let spawn_angle = facing + rng.range(-INHALE_CONE_HALF, INHALE_CONE_HALF);
            let distance = rng.range(400.0, 700.0);
            let position = head.position + Vec2::from_angle(spawn_angle) * distance;
            self.motes.push(InhaleMote::new(position));
        }

        self.aim_at(target);

        if self.state_timer > self.config.inhale_ticks {
            self.set_state(WyrmState::Exhaling);
            self.shoot_fireball_fan(rng);
        }
    }

    fn update_exhaling(&mut self) {
        if self.state_timer > self.config.exhale_ticks {
            self.combo_count += 1;
            if self.combo_count >= self.max_combos {
                self.set_state(WyrmState::Wandering);
            } else {
                self.set_state(WyrmState::Tracking);
            }
        }
    }

    fn update_dash_prep(&mut self, target: Option<Vec2>, bounds: &Bounds) {
        let head = self.chain.head_mut();
        if let Some(point) = target {
            head.max_speed = 7.0;
            let force = head.seek(point);
            head.apply_force(force * 1.5);
        }
        head.update(bounds);

        if self.state_timer > self.config.dash_prep_ticks {
            let head_pos = self.chain.head().position;
            let locked = target
                .map(|t| (t - head_pos).normalize())
                .filter(|d| *d != Vec2::ZERO)
                .unwrap_or_else(|| self.chain.head().velocity.normalize());
            self.dash_direction = Some(locked);
            self.set_state(WyrmState::Dashing);
        }
    }

    fn update_dashing(&mut self, bounds: &Bounds, rng: &mut GameRng) {
        let direction = self
            .dash_direction
            .unwrap_or_else(|| Vec2::from_angle(self.chain.head().heading()));

        let head = self.chain.head_mut();
        head.velocity = direction * self.config.dash_speed;
        head.position += head.velocity;

        // Each dash shakes rocks loose
        if self.state_timer % 6 == 0 {
            self.boulders.push(Boulder::spawn(rng, bounds));
            self.pending_events.push(GameEventData::BoulderFalling);
        }

        let head_pos = self.chain.head().position;
        if !bounds.contains(head_pos) {
            // Slammed the wall: clamp back in and leave the wyrm dazed
            self.chain.head_mut().position = bounds.clamp(head_pos);
            self.chain.head_mut().velocity = Vec2::ZERO;
            self.pending_events.push(GameEventData::BossStunned);
            self.set_state(WyrmState::Stunned);
            return;
        }

        if self.state_timer > self.config.dash_duration {
            self.set_state(WyrmState::Tracking);
            self.combo_count = 0;
            self.max_combos = rng.range_i32(1, 4) as u32;
        }
    }

    fn update_stunned(&mut self) {
        // Body goes limp where it fell
        let head = self.chain.head_mut();
        head.velocity = head.velocity * 0.9;

        if self.state_timer > self.config.stun_ticks {
            self.set_state(WyrmState::Tracking);
        }
    }

    fn update_dying(&mut self) {
        if self.state_timer > self.config.death_ticks {
            self.dead = true;
        }
    }

    /// Point the head override at the target; without one, keep the last
    /// facing (safe no-op).
    fn aim_at(&mut self, target: Option<Vec2>) {
        if let Some(point) = target {
            let head_pos = self.chain.head().position;
            self.head_rotation_override = Some((point.y - head_pos.y).atan2(point.x - head_pos.x));
        }
    }

    // -------------------------------------------------------------------------
    // Attacks
    // -------------------------------------------------------------------------

    fn shoot_big_fireball(&mut self) {
        let head = self.chain.head();
        self.fireballs
            .push(Fireball::new(head.position, head.heading(), 9.0, 80.0));
        self.pending_events
            .push(GameEventData::FireballVolley { count: 1 });
    }

    fn release_spines(&mut self) {
        let mut spawned = Vec::new();
        for (i, segment) in self.chain.segments().iter().enumerate().skip(5) {
            if (i - 5) % 10 != 0 {
                continue;
            }
            // Perpendicular pair out of the flanks
            let angle = segment.heading() + std::f64::consts::FRAC_PI_2;
            spawned.push(SpineShot::new(segment.position, angle));
            spawned.push(SpineShot::new(segment.position, angle + std::f64::consts::PI));
        }
        if !spawned.is_empty() {
            self.spines.extend(spawned);
            self.pending_events.push(GameEventData::SpineBurst);
        }
    }

    fn shoot_fireball_fan(&mut self, rng: &mut GameRng) {
        let head = self.chain.head();
        let base = self.head_rotation_override.unwrap_or_else(|| head.heading());
        let position = head.position;

        let count = rng.range_i32(3, 4);
        for i in 0..count {
            let t = if count > 1 {
                i as f64 / (count - 1) as f64
            } else {
                0.5
            };
            let angle = base - FAN_SPREAD / 2.0 + t * FAN_SPREAD;
            self.fireballs
                .push(Fireball::new(position, angle, FIREBALL_SPEED, FIREBALL_SIZE));
        }
        self.pending_events.push(GameEventData::FireballVolley {
            count: count as u32,
        });
    }

    // -------------------------------------------------------------------------
    // Collision and damage queries
    // -------------------------------------------------------------------------

    /// Player head against the tapered body. Returns the hit segment
    /// position for knockback effects.
    pub fn check_body_collision(&self, player_head: Vec2) -> Option<Vec2> {
        for (i, segment) in self.chain.segments().iter().enumerate() {
            let radius = self.collision_radius(i) + COLLISION_BUFFER;
            if player_head.distance(segment.position) < radius {
                return Some(segment.position);
            }
        }
        None
    }

    /// Player head against fireballs, spines, and falling boulders.
    /// The projectile that connects is consumed; returns the hit point.
    pub fn check_projectile_collisions(&mut self, player_head: Vec2) -> Option<Vec2> {
        for fireball in &mut self.fireballs {
            if player_head.distance(fireball.position) < fireball.hit_radius() + COLLISION_BUFFER {
                fireball.alive = false;
                return Some(fireball.position);
            }
        }

        for spine in &mut self.spines {
            if player_head.distance(spine.position) < spine.size + COLLISION_BUFFER {
                spine.alive = false;
                return Some(spine.position);
            }
        }

        for boulder in &mut self.boulders {
            if boulder.hits_player(player_head) {
                boulder.alive = false;
                return Some(boulder.position);
            }
        }

        None
    }

    /// Headbutt test: is `point` within the boss head's collision circle?
    pub fn head_hit(&self, point: Vec2) -> bool {
        point.distance(self.chain.head().position) < self.collision_radius(0) + COLLISION_BUFFER
    }

    /// Launch every landed boulder within dash range of `point` at the
    /// boss head. Returns how many were launched.
    pub fn launch_boulders_near(&mut self, point: Vec2, rng: &mut GameRng) -> u32 {
        let boss_head = self.chain.head().position;
        let mut launched = 0;
        for boulder in &mut self.boulders {
            if boulder.launchable_from(point, BOULDER_LAUNCH_RANGE) {
                boulder.launch(boss_head - boulder.position, rng);
                self.pending_events.push(GameEventData::BoulderLaunched);
                launched += 1;
            }
        }
        launched
    }

    /// Apply damage from launched boulders striking the boss head.
    /// Returns the total damage dealt this tick.
    pub fn apply_boulder_damage(&mut self) -> u32 {
        let boss_head = self.chain.head().position;
        let mut total = 0;
        for boulder in &mut self.boulders {
            if let Some(damage) = boulder.strike_boss(boss_head) {
                total += damage;
            }
        }
        if total > 0 {
            self.take_damage(total);
        }
        total
    }

    /// Drop every landed boulder (called when a fresh rockfall starts).
    pub fn clear_landed_boulders(&mut self) {
        self.boulders
            .retain(|b| b.phase != super::attacks::BoulderPhase::Landed);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::GameEventData;

    fn wyrm(rng: &mut GameRng) -> EmberWyrm {
        EmberWyrm::new(Vec2::new(640.0, 360.0), WyrmConfig::default(), rng)
    }

    fn small_wyrm(rng: &mut GameRng) -> EmberWyrm {
        let config = WyrmConfig {
            segments: 20,
            ..WyrmConfig::default()
        };
        EmberWyrm::new(Vec2::new(640.0, 360.0), config, rng)
    }

    #[test]
    fn test_taper_profile() {
        let mut rng = GameRng::new(40);
        let boss = wyrm(&mut rng);

        assert_eq!(boss.taper(0), 1.2);
        // Ramp down to 1.0 by index 5
        assert!(boss.taper(1) < 1.2 && boss.taper(1) > 1.0);
        assert!((boss.taper(5) - 1.0).abs() < 1e-9);
        // Then down toward 0.4 at the tail
        let n = boss.chain().len();
        assert!(boss.taper(n / 2) < 1.0);
        assert!((boss.taper(n) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_reenter_state_is_noop() {
        let mut rng = GameRng::new(41);
        let mut boss = wyrm(&mut rng);
        boss.set_state(WyrmState::Wandering);
        boss.state_timer = 500;
        boss.take_events();

        boss.set_state(WyrmState::Wandering);
        assert_eq!(boss.state_timer(), 500, "re-entry must not reset the timer");
        assert!(boss.take_events().is_empty());
    }

    #[test]
    fn test_wandering_reaches_dash_prep() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(42);
        let mut boss = small_wyrm(&mut rng);
        boss.set_state(WyrmState::Wandering);

        let mut reached = false;
        for _ in 0..1500 {
            boss.update(Some(Vec2::new(300.0, 300.0)), &[], &bounds, &mut rng);
            if boss.state() == WyrmState::DashPrep {
                reached = true;
                break;
            }
        }
        assert!(reached, "wandering must cycle into DashPrep within 1500 ticks");
    }

    #[test]
    fn test_dash_prep_locks_and_dashes() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(43);
        let mut boss = small_wyrm(&mut rng);
        boss.set_state(WyrmState::DashPrep);

        // Target far beyond the wall so the chase never overshoots it
        let target = Vec2::new(5000.0, 360.0);
        for _ in 0..=WyrmConfig::default().dash_prep_ticks {
            boss.update(Some(target), &[], &bounds, &mut rng);
        }
        assert_eq!(boss.state(), WyrmState::Dashing);
        // Direction locked toward the last known target
        let dir = boss.dash_direction.unwrap();
        assert!(dir.x > 0.0);
        assert!((dir.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_dash_spawns_boulders_then_tracks() {
        let bounds = Bounds::new(20_000.0, 20_000.0);
        let mut rng = GameRng::new(44);
        let mut boss = small_wyrm(&mut rng);
        boss.chain.head_mut().position = Vec2::new(10_000.0, 10_000.0);
        boss.dash_direction = Some(Vec2::new(1.0, 0.0));
        boss.set_state(WyrmState::Dashing);

        for _ in 0..=WyrmConfig::default().dash_duration {
            boss.update(None, &[], &bounds, &mut rng);
        }
        assert_eq!(boss.state(), WyrmState::Tracking);
        assert!(!boss.boulders().is_empty());
        assert_eq!(boss.combo_count, 0);
    }

    #[test]
    fn test_dash_into_border_stuns() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(45);
        let mut boss = small_wyrm(&mut rng);
        boss.chain.head_mut().position = Vec2::new(100.0, 360.0);
        boss.dash_direction = Some(Vec2::new(-1.0, 0.0));
        boss.set_state(WyrmState::Dashing);

        for _ in 0..20 {
            boss.update(None, &[], &bounds, &mut rng);
            if boss.state() == WyrmState::Stunned {
                break;
            }
        }
        assert_eq!(boss.state(), WyrmState::Stunned);
        assert!(boss.is_vulnerable());
        assert!(bounds.contains(boss.chain().head().position));

        // Stun wears off into Tracking
        for _ in 0..=WyrmConfig::default().stun_ticks {
            boss.update(None, &[], &bounds, &mut rng);
        }
        assert_eq!(boss.state(), WyrmState::Tracking);
        assert!(!boss.is_vulnerable());
    }

    #[test]
    fn test_attack_cycle_tracking_to_exhaling() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(46);
        let mut boss = small_wyrm(&mut rng);
        let config = WyrmConfig::default();
        let target = Some(Vec2::new(200.0, 200.0));

        assert_eq!(boss.state(), WyrmState::Tracking);
        let body_before: Vec<Vec2> = boss.chain().positions().skip(1).collect();

        for _ in 0..=config.tracking_ticks {
            boss.update(target, &[], &bounds, &mut rng);
        }
        assert_eq!(boss.state(), WyrmState::Inhaling);

        for _ in 0..=config.inhale_ticks {
            boss.update(target, &[], &bounds, &mut rng);
        }
        assert_eq!(boss.state(), WyrmState::Exhaling);
        // The fan fired on the transition
        assert!(!boss.fireballs().is_empty());

        // The body never moved during the whole tell
        let body_after: Vec<Vec2> = boss.chain().positions().skip(1).collect();
        assert_eq!(body_before, body_after);

        // Head aimed at the target the whole time
        let facing = boss.head_rotation();
        let head_pos = boss.chain().head().position;
        let expected = (200.0 - head_pos.y).atan2(200.0 - head_pos.x);
        assert!((facing - expected).abs() < 1e-9);
    }

    #[test]
    fn test_combo_counter_returns_to_wandering() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(47);
        let mut boss = small_wyrm(&mut rng);
        boss.max_combos = 1;
        let config = WyrmConfig::default();

        // One full Tracking -> Inhaling -> Exhaling pass
        let total = config.tracking_ticks + config.inhale_ticks + config.exhale_ticks + 10;
        for _ in 0..total {
            boss.update(None, &[], &bounds, &mut rng);
        }
        assert_eq!(boss.state(), WyrmState::Wandering);
    }

    #[test]
    fn test_inhale_spawns_motes_in_cone() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(48);
        let mut boss = small_wyrm(&mut rng);
        boss.set_state(WyrmState::Inhaling);

        let target = Vec2::new(1200.0, 360.0); // straight right of the head
        for _ in 0..20 {
            boss.update(Some(target), &[], &bounds, &mut rng);
        }
        assert!(!boss.motes().is_empty());

        // Every mote spawned in front of the mouth, inside the cone reach
        let head = boss.chain().head().position;
        for mote in boss.motes() {
            let offset = mote.position - head;
            assert!(offset.x > 0.0, "mote behind the facing direction");
            assert!(offset.length() <= 700.0 + 60.0);
        }
    }

    #[test]
    fn test_health_monotone_and_dying_once() {
        let mut rng = GameRng::new(49);
        let mut boss = small_wyrm(&mut rng);
        boss.take_events();

        boss.take_damage(1);
        assert_eq!(boss.health(), 5);

        boss.take_damage(10);
        assert_eq!(boss.health(), 0, "health saturates at zero");
        assert_eq!(boss.state(), WyrmState::Dying);

        let transitions = boss
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEventData::BossStateChanged { to: WyrmState::Dying, .. }))
            .count();
        assert_eq!(transitions, 1);

        // Further damage is ignored in the terminal state
        boss.take_damage(1);
        assert_eq!(boss.health(), 0);
        assert_eq!(boss.state(), WyrmState::Dying);
    }

    #[test]
    fn test_dying_finishes() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(50);
        let mut boss = small_wyrm(&mut rng);
        boss.take_damage(boss.health());

        assert!(!boss.is_dead());
        for _ in 0..=WyrmConfig::default().death_ticks {
            boss.update(None, &[], &bounds, &mut rng);
        }
        assert!(boss.is_dead());
    }

    #[test]
    fn test_body_collision_uses_taper() {
        let mut rng = GameRng::new(51);
        let mut boss = small_wyrm(&mut rng);
        boss.set_coiled_layout(Vec2::new(640.0, 360.0), true);

        let head_pos = boss.chain().head().position;
        // Just inside the head's tapered radius
        let graze = head_pos + Vec2::new(boss.collision_radius(0) + COLLISION_BUFFER - 1.0, 0.0);
        assert!(boss.check_body_collision(graze).is_some());

        // Far away: clean miss
        assert!(boss.check_body_collision(Vec2::new(-500.0, -500.0)).is_none());
    }

    #[test]
    fn test_projectile_hit_consumes() {
        let mut rng = GameRng::new(52);
        let mut boss = small_wyrm(&mut rng);
        boss.fireballs
            .push(Fireball::new(Vec2::new(100.0, 100.0), 0.0, FIREBALL_SPEED, FIREBALL_SIZE));

        let hit = boss.check_projectile_collisions(Vec2::new(100.0, 100.0));
        assert!(hit.is_some());
        assert!(!boss.fireballs[0].alive);

        // Missing by a wide margin leaves everything alone
        assert!(boss.check_projectile_collisions(Vec2::new(900.0, 900.0)).is_none());
    }

    #[test]
    fn test_no_target_degrades_gracefully() {
        let bounds = Bounds::default();
        let mut rng = GameRng::new(53);
        let mut boss = small_wyrm(&mut rng);

        // Tick every state with no player reference; nothing may panic
        // and positions must stay finite
        for state in [
            WyrmState::Wandering,
            WyrmState::Seeking,
            WyrmState::Tracking,
            WyrmState::Inhaling,
            WyrmState::DashPrep,
        ] {
            boss.set_state(state);
            for _ in 0..30 {
                boss.update(None, &[], &bounds, &mut rng);
            }
            let p = boss.chain().head().position;
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }
}
