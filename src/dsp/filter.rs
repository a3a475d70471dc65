use std::f32::consts::TAU;

use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    config::FilterConfig,
    dsp::coefficient::{decay_weight, Approximation},
    error::{check_cutoff, check_initial_value, FilterError},
    io::clock::Clock,
};

/*
Single-Pole Filters on a Wall Clock
===================================

A one-pole IIR filter keeps one sample of history and blends each new sample
into it. Audio filters can assume a fixed sample rate; sensor loops cannot.
Samples arrive whenever the control loop gets around to reading them, so
every update is stamped with a microsecond timestamp and the blend weight is
recomputed from the gap since the previous sample.

Vocabulary
----------

  cutoff      Corner frequency in Hz. Content beyond it (above for low-pass,
              below for high-pass) is attenuated by more than ~3 dB.

  τ (tau)     Time constant, 1 / (2π · cutoff). Stored in microseconds so it
              can be compared directly with timestamp deltas.

  Δt          Microseconds since the previous update, taken with wrapping
              subtraction so a rolled-over u32 counter still works.

  β (beta)    Decay weight given to the history, see `coefficient`.


The Recurrences
---------------

    low-pass        y[i] = (1 − β) · x[i] + β · y[i−1]
    high-pass       y[i] = β · (x[i] − x[i−1]) + β · y[i−1]
    integrator      low-pass state × τ   (τ in seconds)
    differentiator  high-pass state ÷ τ  (τ in seconds)

The integrator and differentiator keep the unscaled low-pass/high-pass state
as their history and only scale what they report, so the scaling never feeds
back into the recurrence. For a ramp of slope r (units per second) the
differentiator settles at r; for a constant input V the integrator settles
at V · τ.


Edge Cases
----------

  Δt == 0     Two updates with the same timestamp. Nothing has elapsed, so
              the previous output is returned and the input history is left
              alone; the next real step still sees the old x[i−1].

  rollover    Handled by wrapping subtraction. A clock that runs backwards
              looks like a very long Δt and the filter snaps to the input.

  bypass      The input comes straight back out. Timing and input history
              keep advancing, and the recurrence state is held at its
              steady state for the current input (the input itself for
              low-pass/integrator, zero for high-pass/differentiator), so
              leaving bypass does not kick off a transient.
*/

/// Which difference equation a filter applies. Fixed at construction.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterKind {
    #[default]
    LowPass,
    HighPass,
    Integrator,
    Differentiator,
}

impl FilterKind {
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::LowPass => "low-pass",
            FilterKind::HighPass => "high-pass",
            FilterKind::Integrator => "integrator",
            FilterKind::Differentiator => "differentiator",
        }
    }
}

/// Time constant in microseconds for a cutoff in Hz.
#[inline]
pub fn time_constant_micros(cutoff_hz: f32) -> f32 {
    1.0e6 / (TAU * cutoff_hz)
}

/// A single-pole filter advanced one timestamped sample at a time.
///
/// The clock is only consulted by [`OnePole::update`] and [`OnePole::reset`];
/// [`OnePole::update_at`] takes the timestamp from the caller.
#[derive(Debug, Clone)]
pub struct OnePole<C: Clock> {
    kind: FilterKind,
    approximation: Approximation,
    bypass: bool,

    cutoff_hz: f32,
    tau_micros: f32,

    last_sample_time: u32,
    last_input: f32,
    state: f32,  // unscaled low-pass/high-pass history
    output: f32, // what the caller sees

    clock: C,
}

impl<C: Clock> OnePole<C> {
    pub fn new(
        kind: FilterKind,
        cutoff_hz: f32,
        initial_value: f32,
        clock: C,
    ) -> Result<Self, FilterError> {
        let config = FilterConfig::default()
            .kind(kind)
            .cutoff_hz(cutoff_hz)
            .initial_value(initial_value);
        Self::from_config(&config, clock)
    }

    pub fn from_config(config: &FilterConfig, clock: C) -> Result<Self, FilterError> {
        let cutoff_hz = check_cutoff(config.cutoff_hz)?;
        let initial_value = check_initial_value(config.initial_value)?;
        let last_sample_time = clock.micros();

        debug!(
            "new {} filter: cutoff={} Hz, initial={}, approximation={}",
            config.kind.name(),
            cutoff_hz,
            initial_value,
            config.approximation.name()
        );

        Ok(Self {
            kind: config.kind,
            approximation: config.approximation,
            bypass: config.bypass,
            cutoff_hz,
            tau_micros: time_constant_micros(cutoff_hz),
            last_sample_time,
            last_input: initial_value,
            state: initial_value,
            output: initial_value,
            clock,
        })
    }

    pub fn lowpass(cutoff_hz: f32, initial_value: f32, clock: C) -> Result<Self, FilterError> {
        Self::new(FilterKind::LowPass, cutoff_hz, initial_value, clock)
    }

    pub fn highpass(cutoff_hz: f32, initial_value: f32, clock: C) -> Result<Self, FilterError> {
        Self::new(FilterKind::HighPass, cutoff_hz, initial_value, clock)
    }

    pub fn integrator(cutoff_hz: f32, initial_value: f32, clock: C) -> Result<Self, FilterError> {
        Self::new(FilterKind::Integrator, cutoff_hz, initial_value, clock)
    }

    pub fn differentiator(
        cutoff_hz: f32,
        initial_value: f32,
        clock: C,
    ) -> Result<Self, FilterError> {
        Self::new(FilterKind::Differentiator, cutoff_hz, initial_value, clock)
    }

    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    pub fn cutoff_frequency(&self) -> f32 {
        self.cutoff_hz
    }

    /// Changes the cutoff and recomputes τ. The current output is not touched;
    /// the new cutoff takes effect from the next update.
    pub fn set_cutoff_frequency(&mut self, cutoff_hz: f32) -> Result<f32, FilterError> {
        let cutoff_hz = check_cutoff(cutoff_hz)?;
        self.cutoff_hz = cutoff_hz;
        self.tau_micros = time_constant_micros(cutoff_hz);
        debug!(
            "{} cutoff set to {} Hz (tau={} us)",
            self.kind.name(),
            cutoff_hz,
            self.tau_micros
        );
        Ok(self.cutoff_hz)
    }

    /// τ in microseconds.
    pub fn time_constant(&self) -> f32 {
        self.tau_micros
    }

    pub fn approximation(&self) -> Approximation {
        self.approximation
    }

    pub fn set_approximation(&mut self, approximation: Approximation) {
        self.approximation = approximation;
    }

    pub fn is_bypassed(&self) -> bool {
        self.bypass
    }

    /// While bypassed, updates return their input unchanged.
    pub fn set_bypass(&mut self, bypass: bool) {
        if bypass != self.bypass {
            debug!("{} bypass {}", self.kind.name(), if bypass { "on" } else { "off" });
        }
        self.bypass = bypass;
    }

    /// Latest result, without advancing the filter.
    pub fn output(&self) -> f32 {
        self.output
    }

    pub fn last_input(&self) -> f32 {
        self.last_input
    }

    pub fn last_sample_time(&self) -> u32 {
        self.last_sample_time
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Feeds a sample stamped with the injected clock's current time.
    #[inline]
    pub fn update(&mut self, value: f32) -> f32 {
        let now = self.clock.micros();
        self.update_at(value, now)
    }

    /// Feeds a sample taken at `timestamp` (microseconds, same time base as
    /// the clock) and returns the new output.
    pub fn update_at(&mut self, value: f32, timestamp: u32) -> f32 {
        let delta_micros = timestamp.wrapping_sub(self.last_sample_time);
        self.last_sample_time = timestamp;

        if self.bypass {
            self.last_input = value;
            self.state = match self.kind {
                FilterKind::LowPass | FilterKind::Integrator => value,
                FilterKind::HighPass | FilterKind::Differentiator => 0.0,
            };
            self.output = value;
            return self.output;
        }

        if delta_micros == 0 {
            trace!("{} update with zero timestep at {}", self.kind.name(), timestamp);
            return self.output;
        }

        let prev_input = self.last_input;
        let prev_state = self.state;
        self.last_input = value;

        let beta = decay_weight(self.approximation, self.tau_micros, delta_micros);

        self.state = match self.kind {
            FilterKind::LowPass | FilterKind::Integrator => {
                (1.0 - beta) * value + beta * prev_state
            }
            FilterKind::HighPass | FilterKind::Differentiator => {
                beta * (value - prev_input) + beta * prev_state
            }
        };

        let tau_seconds = self.tau_micros * 1.0e-6;
        self.output = match self.kind {
            FilterKind::LowPass | FilterKind::HighPass => self.state,
            FilterKind::Integrator => self.state * tau_seconds,
            FilterKind::Differentiator => self.state / tau_seconds,
        };

        self.output
    }

    /// Re-seeds all history with `value` and restarts timing from the clock's
    /// current reading.
    pub fn reset(&mut self, value: f32) -> Result<(), FilterError> {
        let value = check_initial_value(value)?;
        self.last_input = value;
        self.state = value;
        self.output = value;
        self.last_sample_time = self.clock.micros();
        debug!("{} reset to {}", self.kind.name(), value);
        Ok(())
    }
}
