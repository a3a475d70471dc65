//! Spectrum widget
//!
//! FFT magnitudes of the raw and low-passed readings at log-spaced
//! frequencies, so the roll-off above the cutoff is visible.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Number of frequency bins to display
const SPECTRUM_BINS: usize = 32;

/// Lowest frequency shown (Hz). Sensor signals live well below audio rates.
const MIN_FREQ_HZ: f32 = 0.2;

const FLOOR_DB: f64 = -80.0;

/// Spectrum analyzer with FFT processing
pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    /// FFT bin index for each displayed frequency
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (log10 frequency, magnitude dB)
    spectrum: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    /// # Arguments
    /// * `buffer_len` - FFT size (should match the history length)
    /// * `sample_rate` - Mean readings per second
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        // Hann window - reduces spectral leakage
        let window: Vec<f32> = (0..buffer_len)
            .map(|i| {
                if buffer_len > 1 {
                    let denom = (buffer_len - 1) as f32;
                    0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos())
                } else {
                    1.0
                }
            })
            .collect();

        let max_freq = (sample_rate / 2.0).max(MIN_FREQ_HZ * 2.0);
        let ratio = (max_freq / MIN_FREQ_HZ) as f64;
        let half = (buffer_len / 2).max(1);

        let mut bin_indices = Vec::with_capacity(SPECTRUM_BINS);
        let mut spectrum = Vec::with_capacity(SPECTRUM_BINS);
        for i in 0..SPECTRUM_BINS {
            let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = MIN_FREQ_HZ as f64 * ratio.powf(t);
            let index = ((freq * buffer_len as f64 / sample_rate as f64).round() as usize)
                .min(half.saturating_sub(1))
                .max(1);
            bin_indices.push(index);
            spectrum.push((freq.log10(), FLOOR_DB));
        }

        Self {
            window,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
        }
    }

    /// Recompute from a full history buffer. Other lengths are ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        // Remove DC so the offset does not swamp the low bins.
        let mean = buffer.iter().sum::<f32>() / buffer.len() as f32;
        for (i, sample) in buffer.iter().enumerate() {
            self.scratch[i] = Complex::new((*sample - mean) * self.window[i], 0.0);
        }

        self.fft.process(&mut self.scratch);

        for (point, &index) in self.spectrum.iter_mut().zip(self.bin_indices.iter()) {
            let bin = self.scratch[index];
            let power = (bin.re * bin.re + bin.im * bin.im).max(1e-12);
            point.1 = (10.0 * (power as f64).log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }
}

/// Render raw and low-passed spectra on a log-frequency axis
pub fn render_spectrum(frame: &mut Frame, area: Rect, raw: &[(f64, f64)], lowpass: &[(f64, f64)]) {
    let block = Block::default()
        .title(" Spectrum (log Hz) ")
        .borders(Borders::ALL);

    let datasets = vec![
        Dataset::default()
            .name("raw")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(raw),
        Dataset::default()
            .name("low-pass")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(lowpass),
    ];

    let (min_x, max_x) = raw
        .first()
        .zip(raw.last())
        .map(|(a, b)| (a.0, b.0))
        .unwrap_or((0.0, 1.0));
    let max_db = raw
        .iter()
        .chain(lowpass.iter())
        .map(|(_, db)| *db)
        .fold(FLOOR_DB, f64::max);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([min_x, max_x])
                .labels(vec![
                    format!("{:.1}", 10f64.powf(min_x)),
                    format!("{:.0}", 10f64.powf(max_x)),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db + 10.0])
                .labels(vec!["-80", "-40", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
