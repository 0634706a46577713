//! Serpent Arena headless demo
//!
//! Runs scripted sessions without a renderer: a standard food-hunt level
//! followed by the boss encounter, logging notable events and finishing
//! with a JSON summary a host could persist.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use serpent_arena::core::vec2::{Bounds, Vec2};
use serpent_arena::game::config::Difficulty;
use serpent_arena::game::events::GameEventData;
use serpent_arena::game::session::{GameSession, SessionPhase};
use serpent_arena::game::tick::tick;
use serpent_arena::InputFrame;
use serpent_arena::{TICK_RATE, VERSION};

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Serpent Arena v{}", VERSION);
    info!("Tick rate: {} Hz", TICK_RATE);

    demo_hunt()?;
    demo_boss()?;

    Ok(())
}

/// A standard level: the pointer sweeps the arena hoovering up food.
fn demo_hunt() -> Result<()> {
    info!("=== Demo: food hunt (Moderate 1) ===");

    let bounds = Bounds::default();
    let mut session = GameSession::new(Difficulty::Moderate, 0, 12345, 99, bounds)?;

    let center = bounds.center();
    let mut total_events = 0usize;

    for t in 0..6_000u64 {
        // Sweep the pointer in a slow spiral so the snake tours the arena
        let angle = t as f64 * 0.02;
        let radius = 150.0 + 150.0 * (t as f64 * 0.004).sin();
        let target = center + Vec2::from_angle(angle) * radius;

        let result = tick(&mut session, &InputFrame::with_pointer(target));
        total_events += result.events.len();
        for event in &result.events {
            match &event.data {
                GameEventData::FoodEaten { score } => info!(tick = event.tick, score, "food eaten"),
                GameEventData::PlayerDied => info!(tick = event.tick, "player died"),
                GameEventData::LevelComplete { score } => {
                    info!(tick = event.tick, score, "level complete")
                }
                _ => {}
            }
        }
        if result.ended {
            info!(won = ?result.won, "session over");
            break;
        }
    }

    info!(total_events, "hunt finished");
    println!("{}", serde_json::to_string_pretty(&session.summary())?);
    Ok(())
}

/// The boss encounter: skip the cinematic, orbit the arena, report how the
/// fight went.
fn demo_boss() -> Result<()> {
    info!("=== Demo: boss encounter (Expert) ===");

    let bounds = Bounds::default();
    let mut session = GameSession::new(Difficulty::Expert, 0, 777, 99, bounds)?;

    // Skip the intro on the first frame
    let mut skip = InputFrame::new();
    skip.flags |= InputFrame::FLAG_SKIP;
    tick(&mut session, &skip);

    let center = bounds.center();
    for t in 0..20_000u64 {
        let angle = t as f64 * 0.015;
        let target = center + Vec2::from_angle(angle) * 280.0;

        let mut frame = InputFrame::with_pointer(target);
        // Dash on a loose cadence; some of these connect with stun windows
        if t % 180 == 0 {
            frame.set_dash(true);
        }

        let result = tick(&mut session, &frame);
        for event in &result.events {
            match &event.data {
                GameEventData::BossStateChanged { from, to } => {
                    info!(tick = event.tick, ?from, ?to, "boss state")
                }
                GameEventData::BossHit { health } => info!(tick = event.tick, health, "boss hit"),
                GameEventData::BossStunned => info!(tick = event.tick, "boss stunned"),
                GameEventData::DamageTaken { lives_left, .. } => {
                    info!(tick = event.tick, lives_left, "player hurt")
                }
                GameEventData::BossDefeated => info!(tick = event.tick, "boss defeated"),
                _ => {}
            }
        }
        if result.ended {
            info!(won = ?result.won, "session over");
            break;
        }
    }

    if session.phase == SessionPhase::Playing {
        info!("time box elapsed with the fight still running");
    }
    println!("{}", serde_json::to_string_pretty(&session.summary())?);
    Ok(())
}
