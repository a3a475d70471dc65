//! Benchmarks for decay-weight computation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use one_pole::dsp::coefficient::{decay_weight, Approximation};

pub fn bench_coefficient(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/coefficient");
    let tau = 159_154.94f32;

    // Dense (linear branch of hybrid) and sparse (exponential branch) steps.
    for &dt in &[1_000u32, 100_000] {
        for policy in [
            Approximation::Exponential,
            Approximation::Linear,
            Approximation::Hybrid,
        ] {
            group.bench_with_input(BenchmarkId::new(policy.name(), dt), &dt, |b, &dt| {
                b.iter(|| decay_weight(black_box(policy), black_box(tau), black_box(dt)))
            });
        }
    }

    group.finish();
}
