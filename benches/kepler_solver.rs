use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use kepler_lessons::orbits::{kepler_orbit, solve_kepler};
use std::hint::black_box;

const POLL_ITERS: u64 = 1024;
const MULTIPLIER: f64 = std::f64::consts::TAU / POLL_ITERS as f64;

#[inline(always)]
fn poll_solver(eccentricity: f64) {
    for i in 0..POLL_ITERS {
        let angle = i as f64 * MULTIPLIER;
        let _ = black_box(solve_kepler(black_box(angle), black_box(eccentricity)));
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("eccentric_anomaly@mean_anomaly");
    group.throughput(Throughput::Elements(POLL_ITERS));

    for eccentricity in [0.0, 0.1, 0.5, 0.9, 0.99] {
        group.bench_function(format!("e = {eccentricity}"), |b| {
            b.iter(|| poll_solver(eccentricity))
        });
    }
    group.finish();

    let mut group = c.benchmark_group("kepler_orbit");
    group.throughput(Throughput::Elements(100));
    group.bench_function("100 frames e = 0.7", |b| {
        b.iter(|| kepler_orbit(black_box(0.7), black_box(1.0), black_box(100)))
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
