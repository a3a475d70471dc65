//! Scope - application builder and runner

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use color_eyre::eyre::{eyre, Result as EyreResult};
use one_pole::{Approximation, MonotonicClock};
use rtrb::RingBuffer;

use super::sensor::{self, SensorConfig, SensorSample};
use super::ui::ScopeUi;

/// Capacity of the sensor → UI ring. ~1 s of readings at the default rate.
const SAMPLE_RING_LEN: usize = 1024;

/// Main application builder
pub struct Scope {
    cutoff_hz: f32,
    approximation: Approximation,
    sensor: SensorConfig,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            cutoff_hz: 1.0,
            approximation: Approximation::Hybrid,
            sensor: SensorConfig::default(),
        }
    }

    /// Starting cutoff for every filter (Hz)
    pub fn cutoff_hz(mut self, cutoff_hz: f32) -> Self {
        self.cutoff_hz = cutoff_hz;
        self
    }

    pub fn approximation(mut self, approximation: Approximation) -> Self {
        self.approximation = approximation;
        self
    }

    pub fn sensor(mut self, sensor: SensorConfig) -> Self {
        self.sensor = sensor;
        self
    }

    /// Run the application (takes over the terminal until quit)
    pub fn run(self) -> EyreResult<()> {
        let clock = MonotonicClock::new();
        let (tx, rx) = RingBuffer::<SensorSample>::new(SAMPLE_RING_LEN);

        let mut ui = ScopeUi::new(rx, clock, self.cutoff_hz, self.approximation, self.sensor)?;

        let running = Arc::new(AtomicBool::new(true));
        let sensor_thread = sensor::spawn(self.sensor, clock, tx, running.clone());

        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        running.store(false, Ordering::Relaxed);
        sensor_thread
            .join()
            .map_err(|_| eyre!("sensor thread panicked"))?;

        result
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
