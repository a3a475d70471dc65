//! TUI module for scope
//!
//! Drains sensor readings, runs them through one filter of each kind and
//! draws raw vs. filtered traces plus a spectrum comparison.

mod spectrum;
mod status;
mod traces;

use std::collections::VecDeque;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use log::info;
use one_pole::{Approximation, FilterConfig, FilterKind, MonotonicClock, OnePole};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::Consumer;

use super::sensor::{SensorConfig, SensorSample};
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::{render_status, ScopeStats};
use traces::{render_traces, Trace};

/// Readings kept for plotting and for the FFT
const HISTORY_LEN: usize = 1024;

const MIN_CUTOFF_HZ: f32 = 0.05;
const MAX_CUTOFF_HZ: f32 = 200.0;
const CUTOFF_STEP: f32 = 1.25;

const KINDS: [FilterKind; 4] = [
    FilterKind::LowPass,
    FilterKind::HighPass,
    FilterKind::Integrator,
    FilterKind::Differentiator,
];

/// UI application state
pub struct ScopeUi {
    /// Ring buffer receiver for sensor readings
    samples_rx: Consumer<SensorSample>,
    /// One filter per kind, same order as `KINDS`
    filters: Vec<OnePole<MonotonicClock>>,
    cutoff_hz: f32,
    approximation: Approximation,
    bypass: bool,
    raw: VecDeque<f32>,
    filtered: [VecDeque<f32>; 4],
    spectrum_raw: SpectrumAnalyzer,
    spectrum_lowpass: SpectrumAnalyzer,
    sensor: SensorConfig,
    received: u64,
    should_quit: bool,
}

impl ScopeUi {
    pub fn new(
        samples_rx: Consumer<SensorSample>,
        clock: MonotonicClock,
        cutoff_hz: f32,
        approximation: Approximation,
        sensor: SensorConfig,
    ) -> EyreResult<Self> {
        let filters = KINDS
            .iter()
            .map(|&kind| {
                let config = FilterConfig::default()
                    .kind(kind)
                    .cutoff_hz(cutoff_hz)
                    .approximation(approximation);
                OnePole::from_config(&config, clock)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let rate = sensor.mean_rate_hz();

        Ok(Self {
            samples_rx,
            filters,
            cutoff_hz,
            approximation,
            bypass: false,
            raw: VecDeque::with_capacity(HISTORY_LEN),
            filtered: std::array::from_fn(|_| VecDeque::with_capacity(HISTORY_LEN)),
            spectrum_raw: SpectrumAnalyzer::new(HISTORY_LEN, rate),
            spectrum_lowpass: SpectrumAnalyzer::new(HISTORY_LEN, rate),
            sensor,
            received: 0,
            should_quit: false,
        })
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_samples();
            self.update_spectra();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Feed every pending reading through the filters
    fn poll_samples(&mut self) {
        while let Ok(sample) = self.samples_rx.pop() {
            self.received += 1;
            push_bounded(&mut self.raw, sample.value);
            for (filter, trace) in self.filters.iter_mut().zip(self.filtered.iter_mut()) {
                let out = filter.update_at(sample.value, sample.timestamp);
                push_bounded(trace, out);
            }
        }
    }

    fn update_spectra(&mut self) {
        if self.raw.len() < HISTORY_LEN {
            return;
        }
        self.spectrum_raw.update(self.raw.make_contiguous());
        self.spectrum_lowpass.update(self.filtered[0].make_contiguous());
    }

    fn handle_key(&mut self, key: KeyCode) -> EyreResult<()> {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                self.set_cutoff((self.cutoff_hz * CUTOFF_STEP).min(MAX_CUTOFF_HZ))?;
            }
            KeyCode::Char('-') | KeyCode::Down => {
                self.set_cutoff((self.cutoff_hz / CUTOFF_STEP).max(MIN_CUTOFF_HZ))?;
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.approximation = self.approximation.next();
                for filter in &mut self.filters {
                    filter.set_approximation(self.approximation);
                }
                info!("approximation: {}", self.approximation.name());
            }
            KeyCode::Char('b') | KeyCode::Char('B') => {
                self.bypass = !self.bypass;
                for filter in &mut self.filters {
                    filter.set_bypass(self.bypass);
                }
                info!("bypass: {}", self.bypass);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let seed = self.raw.back().copied().unwrap_or(0.0);
                for filter in &mut self.filters {
                    filter.reset(seed)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn set_cutoff(&mut self, cutoff_hz: f32) -> EyreResult<()> {
        for filter in &mut self.filters {
            self.cutoff_hz = filter.set_cutoff_frequency(cutoff_hz)?;
        }
        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),      // Status bar
                Constraint::Percentage(45), // Low-pass / high-pass traces
                Constraint::Min(8),         // Integrator, differentiator, spectrum
                Constraint::Length(1),      // Help bar
            ])
            .split(area);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(33),
                Constraint::Percentage(34),
            ])
            .split(chunks[2]);

        let stats = ScopeStats {
            cutoff_hz: self.cutoff_hz,
            tau_micros: self.filters[0].time_constant(),
            approximation: self.approximation,
            bypass: self.bypass,
            received: self.received,
            sample_rate_hz: self.sensor.mean_rate_hz(),
            signal_hz: self.sensor.signal_hz,
        };
        render_status(frame, chunks[0], &stats);

        let raw = self.raw.make_contiguous();
        let [lowpass, highpass, integrator, differentiator] = &mut self.filtered;

        render_traces(
            frame,
            chunks[1],
            " Raw / low-pass / high-pass ",
            &[
                Trace::new("raw", raw, Color::DarkGray),
                Trace::new("low-pass", lowpass.make_contiguous(), Color::Cyan),
                Trace::new("high-pass", highpass.make_contiguous(), Color::Magenta),
            ],
        );
        render_traces(
            frame,
            bottom[0],
            " Integrator ",
            &[Trace::new("integrator", integrator.make_contiguous(), Color::Yellow)],
        );
        render_traces(
            frame,
            bottom[1],
            " Differentiator ",
            &[Trace::new(
                "differentiator",
                differentiator.make_contiguous(),
                Color::LightRed,
            )],
        );
        render_spectrum(
            frame,
            bottom[2],
            self.spectrum_raw.data(),
            self.spectrum_lowpass.data(),
        );

        let help = Paragraph::new(" [Q] Quit  [+/-] Cutoff  [A] Approximation  [B] Bypass  [R] Reset")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}

fn push_bounded(buffer: &mut VecDeque<f32>, value: f32) {
    if buffer.len() == HISTORY_LEN {
        buffer.pop_front();
    }
    buffer.push_back(value);
}
