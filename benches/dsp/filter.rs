//! Benchmarks for the single-pole filter update.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use one_pole::{Approximation, FilterConfig, FilterKind, ManualClock, OnePole};

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp sampled with a little timing jitter.
        let samples: Vec<(u32, f32)> = (0..size)
            .map(|i| {
                let t = 1_000 * (i as u32 + 1) + (i as u32 * 37) % 200;
                (t, (i as f32 / size as f32) * 2.0 - 1.0)
            })
            .collect();

        for kind in [
            FilterKind::LowPass,
            FilterKind::HighPass,
            FilterKind::Integrator,
            FilterKind::Differentiator,
        ] {
            let config = FilterConfig::default().kind(kind).cutoff_hz(10.0);
            let mut filter = OnePole::from_config(&config, ManualClock::new(0)).unwrap();
            group.bench_with_input(BenchmarkId::new(kind.name(), size), &size, |b, _| {
                b.iter(|| {
                    filter.reset(0.0).unwrap();
                    for &(t, x) in &samples {
                        black_box(filter.update_at(black_box(x), t));
                    }
                })
            });
        }

        for policy in [Approximation::Exponential, Approximation::Linear] {
            let config = FilterConfig::default().cutoff_hz(10.0).approximation(policy);
            let mut filter = OnePole::from_config(&config, ManualClock::new(0)).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("low-pass/{}", policy.name()), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        filter.reset(0.0).unwrap();
                        for &(t, x) in &samples {
                            black_box(filter.update_at(black_box(x), t));
                        }
                    })
                },
            );
        }
    }

    group.finish();
}
