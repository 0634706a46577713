//! Simulation Tick
//!
//! One `tick` call advances the whole game by one frame: input, steering,
//! integration, collision, boss logic, events. The call is synchronous and
//! atomic; pausing simply returns without touching state.

use tracing::debug;

use crate::agent::steering::{Circle, SteeringAgent};
use crate::boss::wyrm::WyrmState;
use crate::core::vec2::{remap, Vec2};

use super::config::Difficulty;
use super::events::{GameEvent, GameEventData};
use super::input::InputFrame;
use super::obstacle;
use super::session::{GameSession, SessionPhase};

/// Range of the boss inhale suction cone.
const SUCTION_RANGE: f64 = 700.0;

/// Half-angle of the suction cone (30 degrees each side).
const SUCTION_CONE_HALF: f64 = std::f64::consts::PI / 6.0;

/// Stalkers inside this range trigger reflexive evasion.
const STALKER_EVADE_RANGE: f64 = 150.0;

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick
    pub events: Vec<GameEvent>,
    /// Whether the session reached a terminal phase
    pub ended: bool,
    /// Outcome, once ended
    pub won: Option<bool>,
}

/// Run one simulation tick.
///
/// The session mutates in place; the host reads entity positions straight
/// off it afterwards. Rendering must not read mid-call: the tick is the
/// critical section.
pub fn tick(session: &mut GameSession, input: &InputFrame) -> TickResult {
    // Pause is a hard freeze: toggle first, then bail if frozen
    if input.pause_pressed() {
        match session.phase {
            SessionPhase::Playing => session.pause(),
            SessionPhase::Paused => session.resume(),
            _ => {}
        }
    }

    match session.phase {
        SessionPhase::Paused => {
            return TickResult::default();
        }
        SessionPhase::Ended { won } => {
            return TickResult {
                events: session.take_events(),
                ended: true,
                won: Some(won),
            };
        }
        _ => {}
    }

    session.tick += 1;

    match session.phase {
        SessionPhase::Intro => advance_intro(session, input),
        SessionPhase::Playing => play_tick(session, input),
        SessionPhase::Completing => {
            if session.advance_hold() {
                session.phase = SessionPhase::Ended { won: true };
            }
        }
        SessionPhase::PlayerDying => {
            if session.advance_hold() {
                session.phase = SessionPhase::Ended { won: false };
            }
        }
        SessionPhase::Paused | SessionPhase::Ended { .. } => unreachable!("handled above"),
    }

    // Shake always bleeds off
    session.screen_shake *= 0.9;
    if session.screen_shake < 0.1 {
        session.screen_shake = 0.0;
    }

    let (ended, won) = match session.phase {
        SessionPhase::Ended { won } => (true, Some(won)),
        _ => (false, None),
    };
    TickResult {
        events: session.take_events(),
        ended,
        won,
    }
}

/// One tick of normal play.
fn play_tick(session: &mut GameSession, input: &InputFrame) {
    session.ticks_played += 1;

    // 1. Resolve the steering target
    let target = input.target(session.control_scheme, session.player.head());

    // 2. Discrete actions
    if input.dash_pressed() && session.player.dash() {
        session.push_event(GameEventData::DashStarted);
    }

    // 3. Food: spawn animation + eating
    for food in &mut session.foods {
        food.tick();
    }
    let mut eaten = 0;
    for food in &mut session.foods {
        if session.player.eat(food, &mut session.rng, &session.bounds) {
            eaten += 1;
        }
    }
    for _ in 0..eaten {
        session.score += 1;
        let score = session.score;
        session.push_event(GameEventData::FoodEaten { score });
    }
    if eaten > 0 && session.score >= session.level.target_score {
        session.complete_level();
        return;
    }

    // 4. Proactive collision checks, before any movement this tick
    if session.difficulty != Difficulty::Sandbox && check_player_collisions(session) {
        return;
    }

    // 5. Timers
    if session.invulnerable_timer > 0 {
        session.invulnerable_timer -= 1;
    }
    let limit = session.time_limit_ticks();
    if limit > 0 && session.ticks_played >= limit {
        session.push_event(GameEventData::TimeExpired);
        if session.score >= session.level.target_score {
            session.complete_level();
        } else {
            session.start_death();
        }
        return;
    }

    // 6. Environmental forces on the player head
    let circles = obstacle::circles(&session.obstacles);
    let avoid = session.player.head().avoid(&circles);
    session.player.head_mut().apply_force(avoid);
    apply_inhale_suction(session);

    // 7. Hostiles hunt, player reflexively evades the close ones
    for stalker in &mut session.stalkers {
        stalker.set_difficulty(session.score);
    }
    for stalker in &mut session.stalkers {
        stalker.update(session.player.head(), &circles, &session.bounds, &mut session.rng);
    }
    let mut evade = Vec2::ZERO;
    for stalker in &session.stalkers {
        let head = session.player.head();
        if head.position.distance(stalker.head().position) < STALKER_EVADE_RANGE {
            evade += head.evade(stalker.head());
        }
    }
    session.player.head_mut().apply_force(evade * 0.8);

    // 8. Player chain
    let threats: Vec<&SteeringAgent> = session.stalkers.iter().map(|s| s.head()).collect();
    session
        .player
        .update(target, &circles, &threats, &session.bounds, &mut session.rng);

    // 9. Boss
    if session.boss.is_some() {
        boss_tick(session, &circles);
    }

    // 10. Decorative swarm
    let now = session.tick;
    if let Some(swarm) = &mut session.swarm {
        swarm.update(now, &session.bounds, &mut session.rng);
    }
}

/// Pairwise proximity checks for the player head. Returns true when the
/// tick should stop early (death or damage already applied).
fn check_player_collisions(session: &mut GameSession) -> bool {
    let head_pos = session.player.head().position;

    if session.is_boss_level() {
        // Boss fights run on the lives model; self-collision is off here
        let body_hit = session
            .boss
            .as_ref()
            .and_then(|b| b.check_body_collision(head_pos));
        let projectile_hit = session
            .boss
            .as_mut()
            .and_then(|b| b.check_projectile_collisions(head_pos));

        if let Some(hit) = body_hit.or(projectile_hit) {
            session.take_damage(hit);
        }
        matches!(session.phase, SessionPhase::PlayerDying)
    } else {
        // Standard levels: any touch is fatal
        let fatal = session.player.check_self_collision()
            || session.player.check_obstacle_collision(&session.obstacles)
            || session.player.check_hostile_collision(&session.stalkers);
        if fatal {
            session.start_death();
        }
        fatal
    }
}

/// While the boss inhales, a player head inside the facing cone is dragged
/// toward the mouth, harder the closer it gets.
fn apply_inhale_suction(session: &mut GameSession) {
    let Some(boss) = &session.boss else { return };
    if boss.state() != WyrmState::Inhaling {
        return;
    }

    let mouth = boss.chain().head().position;
    let head_pos = session.player.head().position;
    let to_player = head_pos - mouth;
    let distance = to_player.length();
    if distance >= SUCTION_RANGE {
        return;
    }

    // Directional gate: only inside the 60-degree scope
    let facing = boss.head_rotation();
    let mut angle_diff = (facing - to_player.heading()).abs();
    if angle_diff > std::f64::consts::PI {
        angle_diff = std::f64::consts::TAU - angle_diff;
    }
    if angle_diff >= SUCTION_CONE_HALF {
        return;
    }

    let strength = remap(distance, 0.0, SUCTION_RANGE, 1.8, 0.4);
    let pull = (mouth - head_pos).with_magnitude(strength);
    session.player.head_mut().apply_force(pull);
    session.screen_shake = session.screen_shake.max(1.5);
}

/// Boss update plus all the player-boss interplay for one tick.
fn boss_tick(session: &mut GameSession, circles: &[Circle]) {
    let player_pos = session.player.head().position;
    let player_dashing = session.player.is_dashing();

    let mut boss_events = Vec::new();
    let mut headbutt_health = None;
    let mut boulder_damage = 0;
    let mut dashing_shake = false;
    let mut defeated = false;

    if let Some(boss) = &mut session.boss {
        boss.update(Some(player_pos), circles, &session.bounds, &mut session.rng);

        // Headbutt: a dash connecting with the head of a stunned wyrm.
        // The recoil ends the stun, so each stun window yields one hit.
        if player_dashing && boss.is_vulnerable() && boss.head_hit(player_pos) {
            boss.take_damage(1);
            headbutt_health = Some(boss.health());
            if boss.state() != WyrmState::Dying {
                boss.set_state(WyrmState::Tracking);
            }
        }

        // A dash near landed boulders kicks them at the wyrm
        if player_dashing {
            boss.launch_boulders_near(player_pos, &mut session.rng);
        }
        boulder_damage = boss.apply_boulder_damage();

        dashing_shake = boss.state() == WyrmState::Dashing;
        defeated = boss.state() == WyrmState::Dying && boss.is_dead();
        boss_events = boss.take_events();

        if boulder_damage > 0 {
            boss_events.push(GameEventData::BossHit {
                health: boss.health(),
            });
        }
    }

    for data in boss_events {
        session.push_event(data);
    }
    if let Some(health) = headbutt_health {
        debug!(health, "boss headbutted");
        session.screen_shake = session.screen_shake.max(8.0);
        session.push_event(GameEventData::BossHit { health });
    }
    if boulder_damage > 0 {
        session.screen_shake = session.screen_shake.max(5.0);
    }
    if dashing_shake {
        session.screen_shake = session.screen_shake.max(8.0);
    }

    if defeated {
        session.score = session.score.max(session.level.target_score);
        session.push_event(GameEventData::BossDefeated);
        session.complete_level();
    }
}

/// Scripted boss introduction: player entry, wyrm descent, two dialogue
/// beats, then combat.
fn advance_intro(session: &mut GameSession, input: &InputFrame) {
    if input.skip_pressed() {
        session.skip_cinematic();
    }
    session.cinematic_timer += 1;
    let t = session.cinematic_timer;
    let center = session.bounds.center();

    match t {
        // Player swims in from off-screen
        0..=99 => {
            let entry = Vec2::new(session.bounds.width / 4.0, session.bounds.height / 2.0);
            session
                .player
                .update(Some(entry), &[], &[], &session.bounds, &mut session.rng);
        }
        // The wyrm descends toward center, shaking harder as it comes
        100..=239 => {
            hold_player(session);
            session.screen_shake = remap(t as f64, 100.0, 240.0, 0.0, 10.0);
            if let Some(boss) = &mut session.boss {
                boss.set_state(WyrmState::Seeking);
                boss.update(Some(center), &[], &session.bounds, &mut session.rng);
            }
        }
        // Dialogue beats; the wyrm holds still and glares
        240..=599 => {
            hold_player(session);
            session.screen_shake = if t < 450 { 1.0 } else { 5.0 };

            if t == 240 || t == 450 {
                if let Some(line) = session.intro_dialogue() {
                    let line = line.to_string();
                    session.push_event(GameEventData::IntroLine { line });
                }
            }

            let player_pos = session.player.head().position;
            if let Some(boss) = &mut session.boss {
                boss.set_state(WyrmState::Tracking);
                boss.update(Some(player_pos), &[], &session.bounds, &mut session.rng);
            }
        }
        // Fight
        _ => {
            session.phase = SessionPhase::Playing;
            session.screen_shake = 0.0;
            if let Some(boss) = &mut session.boss {
                boss.set_state(WyrmState::Tracking);
            }
        }
    }
}

/// Park the player on its own head position so it drifts in place.
fn hold_player(session: &mut GameSession) {
    let hold = session.player.head().position;
    session
        .player
        .update(Some(hold), &[], &[], &session.bounds, &mut session.rng);
}

// =============================================================================
// TESTS
// =============================================================================
