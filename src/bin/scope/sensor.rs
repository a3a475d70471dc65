//! Simulated analog sensor
//!
//! Produces a slow sine with a DC offset, uniform noise and the occasional
//! spike, read at a jittered interval like a cooperative control loop would.

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info};
use one_pole::{Clock, MonotonicClock};
use rand_core::{RngCore, SeedableRng};
use rand_xorshift::XorShiftRng;
use rtrb::{Producer, PushError};

/// One timestamped reading (Copy, no allocations)
#[derive(Clone, Copy, Debug)]
pub struct SensorSample {
    /// Microseconds, same time base as the filters' clock
    pub timestamp: u32,
    pub value: f32,
}

/// Shape of the simulated signal and its sampling cadence
#[derive(Clone, Copy, Debug)]
pub struct SensorConfig {
    /// Frequency of the underlying sine (Hz)
    pub signal_hz: f32,
    pub amplitude: f32,
    pub offset: f32,
    /// Peak amplitude of the uniform noise
    pub noise: f32,
    /// Chance per reading of a spike, 0.0 - 1.0
    pub spike_chance: f32,
    pub spike_height: f32,
    /// Nominal time between readings
    pub period_micros: u32,
    /// Extra random delay added to each reading, up to this many µs
    pub jitter_micros: u32,
    pub seed: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            signal_hz: 1.0,
            amplitude: 1.0,
            offset: 0.0,
            noise: 0.2,
            spike_chance: 0.002,
            spike_height: 3.0,
            period_micros: 1_000,
            jitter_micros: 400,
            seed: 0x5EED,
        }
    }
}

impl SensorConfig {
    /// Average readings per second, accounting for the mean jitter.
    pub fn mean_rate_hz(&self) -> f32 {
        1.0e6 / (self.period_micros as f32 + self.jitter_micros as f32 / 2.0)
    }
}

/// Uniform in [-1, 1]
fn bipolar(rng: &mut XorShiftRng) -> f32 {
    (rng.next_u32() as f32 / u32::MAX as f32) * 2.0 - 1.0
}

/// Start the sensor thread. It runs until `running` is cleared.
///
/// Readings are dropped, not queued, when the ring is full.
pub fn spawn(
    config: SensorConfig,
    clock: MonotonicClock,
    mut tx: Producer<SensorSample>,
    running: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut rng = XorShiftRng::seed_from_u64(config.seed);
        let mut dropped = 0u64;

        info!(
            "sensor: {} Hz sine, period {} us (+{} us jitter)",
            config.signal_hz, config.period_micros, config.jitter_micros
        );

        while running.load(Ordering::Relaxed) {
            let jitter = rng.next_u32() % (config.jitter_micros + 1);
            thread::sleep(Duration::from_micros(
                (config.period_micros + jitter) as u64,
            ));

            let timestamp = clock.micros();
            let t = timestamp as f32 * 1.0e-6;
            let mut value = config.offset
                + config.amplitude * (TAU * config.signal_hz * t).sin()
                + config.noise * bipolar(&mut rng);
            if (rng.next_u32() as f32 / u32::MAX as f32) < config.spike_chance {
                value += config.spike_height * bipolar(&mut rng).signum();
            }

            if let Err(PushError::Full(_)) = tx.push(SensorSample { timestamp, value }) {
                dropped += 1;
            }
            if tx.is_abandoned() {
                break;
            }
        }

        debug!("sensor stopped, {} readings dropped", dropped);
    })
}
