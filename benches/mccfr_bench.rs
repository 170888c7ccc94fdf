//! Benchmarks for the MCCFR engine.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mccfr_solver::games::clairvoyance::ClairvoyanceGame;
use mccfr_solver::mccfr::MonteCarloCFR;

fn clairvoyance_100_iterations_benchmark(c: &mut Criterion) {
    let tree = ClairvoyanceGame::new().build_game_tree().unwrap();
    let mut engine = MonteCarloCFR::new(&tree).unwrap();

    c.bench_function("clairvoyance_100_iterations", |b| {
        b.iter(|| {
            let result = engine.run(black_box(100), Some(42)).unwrap();
            black_box(result.iterations())
        })
    });
}

fn clairvoyance_10_000_iterations_benchmark(c: &mut Criterion) {
    c.bench_function("clairvoyance_10_000_iterations", |b| {
        b.iter(|| {
            let tree = ClairvoyanceGame::new().build_game_tree().unwrap();
            let mut engine = MonteCarloCFR::new(&tree).unwrap();
            let result = engine.run(black_box(10_000), Some(42)).unwrap();
            black_box(result.expected_value().unwrap())
        })
    });
}

criterion_group!(
    benches,
    clairvoyance_100_iterations_benchmark,
    clairvoyance_10_000_iterations_benchmark
);
criterion_main!(benches);
