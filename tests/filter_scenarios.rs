use std::cell::Cell;

use one_pole::{
    dsp::coefficient::{decay_weight, PRECISE_RATIO_THRESHOLD},
    Approximation, Clock, FilterConfig, FilterKind, ManualClock, OnePole,
};

const ONE_HZ_TAU: u32 = 159_155;

fn config(kind: FilterKind, approximation: Approximation) -> FilterConfig {
    FilterConfig::default()
        .kind(kind)
        .cutoff_hz(1.0)
        .initial_value(0.0)
        .approximation(approximation)
}

#[test]
fn lowpass_end_to_end_scenario() {
    let clock = ManualClock::new(0);
    let mut filter =
        OnePole::from_config(&config(FilterKind::LowPass, Approximation::Linear), clock).unwrap();

    assert!((filter.time_constant() - 159_155.0).abs() < 1.0);
    assert_eq!(filter.update_at(10.0, 0), 0.0);

    let out = filter.update_at(10.0, ONE_HZ_TAU);
    assert!((out - 5.0).abs() < 1e-3, "got {}", out);
}

#[test]
fn highpass_end_to_end_scenario() {
    let clock = ManualClock::new(0);
    let mut filter =
        OnePole::from_config(&config(FilterKind::HighPass, Approximation::Linear), clock).unwrap();

    filter.update_at(10.0, 0);
    let first = filter.update_at(10.0, ONE_HZ_TAU);
    assert!((first - 5.0).abs() < 1e-3, "got {}", first);

    let mut t = ONE_HZ_TAU;
    let mut last = first;
    for _ in 0..10 {
        t += ONE_HZ_TAU;
        let out = filter.update_at(10.0, t);
        assert!(out < last);
        last = out;
    }
    assert!(last < 0.01);
}

#[test]
fn lowpass_step_converges_monotonically() {
    for approximation in [
        Approximation::Exponential,
        Approximation::Linear,
        Approximation::Hybrid,
    ] {
        let mut filter = OnePole::from_config(
            &config(FilterKind::LowPass, approximation),
            ManualClock::new(0),
        )
        .unwrap();

        let dt = 1_000u32; // Δt ≪ τ
        let mut last = filter.output();
        for i in 1..=3_000u32 {
            let out = filter.update_at(4.0, i * dt);
            assert!(out >= last - 1e-6, "{:?}: {} < {}", approximation, out, last);
            assert!(out <= 4.0 + 1e-5);
            last = out;
        }
        assert!((last - 4.0).abs() < 1e-3, "{:?}: {}", approximation, last);
    }
}

#[test]
fn cutoff_setter_round_trips() {
    let mut filter = OnePole::lowpass(1.0, 0.0, ManualClock::new(0)).unwrap();
    for cutoff in [0.001, 0.5, 1.0, 37.5, 1_000.0, 20_000.0] {
        assert_eq!(filter.set_cutoff_frequency(cutoff).unwrap(), cutoff);
        assert_eq!(filter.cutoff_frequency(), cutoff);
        assert_eq!(filter.cutoff_frequency(), filter.cutoff_frequency());
    }
}

#[test]
fn repeated_timestamp_holds_output() {
    for kind in [
        FilterKind::LowPass,
        FilterKind::HighPass,
        FilterKind::Integrator,
        FilterKind::Differentiator,
    ] {
        let mut filter =
            OnePole::from_config(&config(kind, Approximation::Hybrid), ManualClock::new(0))
                .unwrap();
        let out = filter.update_at(1.0, 5_000);
        assert_eq!(filter.update_at(-7.0, 5_000), out, "{:?}", kind);
        assert!(out.is_finite());
    }
}

#[test]
fn linear_matches_exponential_when_samples_are_dense() {
    let tau = 159_154.94f32;
    for dt in [1u32, 50, 500, 2_000, 7_000] {
        assert!(tau / dt as f32 > PRECISE_RATIO_THRESHOLD);
        let linear = decay_weight(Approximation::Linear, tau, dt);
        let exact = decay_weight(Approximation::Exponential, tau, dt);
        assert!(((linear - exact) / exact).abs() < 0.001);
    }
}

#[test]
fn closure_clock_drives_update() {
    let now = Cell::new(0u32);
    let mut filter = OnePole::from_config(
        &config(FilterKind::LowPass, Approximation::Linear),
        || now.get(),
    )
    .unwrap();

    now.set(ONE_HZ_TAU);
    let out = filter.update(10.0);
    assert!((out - 5.0).abs() < 1e-3);
    assert_eq!(filter.clock().micros(), ONE_HZ_TAU);
}

#[test]
fn filters_sharing_a_clock_see_the_same_time() {
    let clock = ManualClock::new(0);
    let mut lowpass = OnePole::lowpass(2.0, 0.0, clock.clone()).unwrap();
    let mut highpass = OnePole::highpass(2.0, 0.0, clock.clone()).unwrap();

    for _ in 0..100 {
        clock.advance(1_000);
        let lp = lowpass.update(1.0);
        let hp = highpass.update(1.0);
        // 0 → 1 step: both responses stay inside the input range.
        assert!((0.0..=1.0).contains(&lp));
        assert!((0.0..=1.0).contains(&hp));
    }
    assert_eq!(lowpass.last_sample_time(), highpass.last_sample_time());
}

#[test]
fn clock_rollover_mid_stream() {
    let clock = ManualClock::new(u32::MAX - 5_000);
    let mut filter = OnePole::lowpass(1.0, 0.0, clock.clone()).unwrap();
    let mut reference = OnePole::lowpass(1.0, 0.0, ManualClock::new(0)).unwrap();

    for i in 1..=10u32 {
        clock.advance(1_000);
        let out = filter.update(3.0);
        let expected = reference.update_at(3.0, i * 1_000);
        assert_eq!(out, expected);
    }
}
