//! Simulation hot-path benchmarks: chain following under a moving target,
//! and full boss-encounter ticks.

use criterion::{criterion_group, criterion_main, Criterion};

use serpent_arena::core::vec2::{Bounds, Vec2};
use serpent_arena::game::config::Difficulty;
use serpent_arena::game::session::GameSession;
use serpent_arena::game::tick::tick;
use serpent_arena::InputFrame;

fn bench_hunt_tick(c: &mut Criterion) {
    let bounds = Bounds::default();
    let mut session = GameSession::new(Difficulty::Expert, 0, 1, 1, bounds).unwrap();

    // Get past the cinematic so the boss chain is live
    let mut skip = InputFrame::new();
    skip.flags |= InputFrame::FLAG_SKIP;
    tick(&mut session, &skip);

    let center = bounds.center();
    let mut t = 0u64;

    c.bench_function("boss_encounter_tick", |b| {
        b.iter(|| {
            t += 1;
            let target = center + Vec2::from_angle(t as f64 * 0.01) * 250.0;
            let result = tick(&mut session, &InputFrame::with_pointer(target));
            if result.ended {
                session = GameSession::new(Difficulty::Expert, 0, 1, 1, bounds).unwrap();
                tick(&mut session, &skip);
            }
            result
        })
    });
}

fn bench_stalker_pack(c: &mut Criterion) {
    let bounds = Bounds::default();
    let mut session = GameSession::new(Difficulty::Hard, 0, 2, 2, bounds).unwrap();
    let center = bounds.center();
    let mut t = 0u64;

    c.bench_function("stalker_pack_tick", |b| {
        b.iter(|| {
            t += 1;
            let target = center + Vec2::from_angle(t as f64 * 0.02) * 200.0;
            let result = tick(&mut session, &InputFrame::with_pointer(target));
            if result.ended {
                session = GameSession::new(Difficulty::Hard, 0, 2, 2, bounds).unwrap();
            }
            result
        })
    });
}

criterion_group!(benches, bench_hunt_tick, bench_stalker_pack);
criterion_main!(benches);
