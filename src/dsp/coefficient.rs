/*
Smoothing Coefficients
======================

Every filter in this crate blends the new sample against its history with a
single weight. For a first-order section with time constant τ, sampled Δt
after the previous sample, the exact decay weight is

    β = e^(−Δt/τ)

Calling exp() on every sample is expensive on small cores, so while Δt is
short compared to τ we use the first-order approximation

    β ≈ τ / (τ + Δt)

How wrong is the approximation?
-------------------------------

    τ/Δt     relative error
    ----     --------------
      1          ~36%
      7          < 1%
     22          < 0.1%

The hybrid policy uses the cheap form above τ/Δt = 7 and falls back to exp()
when samples arrive sparsely relative to τ. The ratio test is evaluated on
every call, so two calls with the same (τ, Δt) always get the same weight.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Above this τ/Δt ratio the linear approximation is within 1% of the exact weight.
pub const LINEAR_RATIO_THRESHOLD: f32 = 7.0;

/// Above this τ/Δt ratio the linear approximation is within 0.1% of the exact weight.
pub const PRECISE_RATIO_THRESHOLD: f32 = 22.0;

/// How the decay weight is derived from the elapsed time and the time constant.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Approximation {
    /// Always `e^(−Δt/τ)`.
    Exponential,
    /// Always `τ/(τ+Δt)`.
    Linear,
    /// `τ/(τ+Δt)` while `τ/Δt > 7`, `e^(−Δt/τ)` otherwise.
    #[default]
    Hybrid,
}

impl Approximation {
    /// Cycles through the policies, used by interactive front-ends.
    pub fn next(self) -> Self {
        match self {
            Approximation::Hybrid => Approximation::Linear,
            Approximation::Linear => Approximation::Exponential,
            Approximation::Exponential => Approximation::Hybrid,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Approximation::Exponential => "exponential",
            Approximation::Linear => "linear",
            Approximation::Hybrid => "hybrid",
        }
    }
}

#[inline]
fn exact(tau_micros: f32, delta_micros: f32) -> f32 {
    (-delta_micros / tau_micros).exp()
}

#[inline]
fn linear(tau_micros: f32, delta_micros: f32) -> f32 {
    tau_micros / (tau_micros + delta_micros)
}

/// Weight given to the previous output (`β`), in `[0, 1]`.
///
/// `delta_micros == 0` yields `1.0`: nothing has elapsed, so nothing of the
/// new sample should leak through. At the other end, `exp()` underflows to
/// exactly `0.0` once Δt passes roughly 104 τ.
#[inline]
pub fn decay_weight(policy: Approximation, tau_micros: f32, delta_micros: u32) -> f32 {
    if delta_micros == 0 {
        return 1.0;
    }

    let dt = delta_micros as f32;
    match policy {
        Approximation::Exponential => exact(tau_micros, dt),
        Approximation::Linear => linear(tau_micros, dt),
        Approximation::Hybrid => {
            if tau_micros / dt > LINEAR_RATIO_THRESHOLD {
                linear(tau_micros, dt)
            } else {
                exact(tau_micros, dt)
            }
        }
    }
}

/// Weight given to the new sample (`1 − β`).
#[inline]
pub fn smoothing_factor(policy: Approximation, tau_micros: f32, delta_micros: u32) -> f32 {
    1.0 - decay_weight(policy, tau_micros, delta_micros)
}
