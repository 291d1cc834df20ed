//! Criterion benchmarks for OpenerLab hot paths.
//!
//! Benchmarks:
//! 1. Outcome derivation (nine probabilities + expected runs)
//! 2. Weighted outcome draw
//! 3. Full game under each rotation policy

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use openerlab_core::domain::{Lineup, PitchingStaff, Player, RateProfile, RawRates};
use openerlab_core::engine::{simulate_game, Strategy};
use openerlab_core::outcome::OutcomeProbabilities;

// ── Helpers ──────────────────────────────────────────────────────────

fn profile(k_pct: f64, hr_pct: f64) -> RateProfile {
    RateProfile::new(RawRates {
        k_pct,
        bb_pct: 0.08,
        single_pct: 0.15,
        double_pct: 0.05,
        triple_pct: 0.005,
        hr_pct,
        hbp_pct: 0.01,
    })
    .unwrap()
}

fn make_lineup() -> Lineup {
    Lineup::new(std::array::from_fn(|i| {
        let spread = i as f64 * 0.005;
        Player::new(format!("h{}", i + 1), profile(0.18 + spread, 0.04 - spread / 2.0))
    }))
}

fn make_staff() -> PitchingStaff {
    PitchingStaff::new(
        Player::new("opener", profile(0.28, 0.028)),
        Player::new("starter", profile(0.23, 0.032)),
        Player::new("bullpen", profile(0.25, 0.030)),
    )
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_outcome(c: &mut Criterion) {
    let hitter = profile(0.20, 0.03);
    let pitcher = profile(0.24, 0.031);

    c.bench_function("outcome_derive", |b| {
        b.iter(|| {
            OutcomeProbabilities::derive(black_box(&hitter), black_box(&pitcher)).expected_runs()
        })
    });

    let probabilities = OutcomeProbabilities::derive(&hitter, &pitcher);
    let mut rng = StdRng::seed_from_u64(42);
    c.bench_function("outcome_draw", |b| {
        b.iter(|| black_box(&probabilities).draw(&mut rng).unwrap())
    });
}

fn bench_game(c: &mut Criterion) {
    let staff = make_staff();
    let lineup = make_lineup();
    let mut group = c.benchmark_group("simulate_game");

    for strategy in Strategy::ALL {
        let rotation = strategy.rotation();
        let mut rng = StdRng::seed_from_u64(7);
        group.bench_with_input(
            BenchmarkId::from_parameter(strategy.label()),
            &strategy,
            |b, _| {
                b.iter(|| {
                    simulate_game(
                        black_box(&staff),
                        black_box(&lineup),
                        rotation.as_ref(),
                        &mut rng,
                    )
                    .unwrap()
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_outcome, bench_game);
criterion_main!(benches);
