//! Trace oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// One named line on a chart
pub struct Trace<'a> {
    pub name: &'static str,
    pub samples: &'a [f32],
    pub color: Color,
}

impl<'a> Trace<'a> {
    pub fn new(name: &'static str, samples: &'a [f32], color: Color) -> Self {
        Self {
            name,
            samples,
            color,
        }
    }
}

/// Symmetric-ish y bounds covering every trace, with a little headroom.
fn y_bounds(traces: &[Trace]) -> [f64; 2] {
    let (lo, hi) = traces
        .iter()
        .flat_map(|t| t.samples.iter())
        .filter(|s| s.is_finite())
        .fold((f32::MAX, f32::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));

    if lo > hi {
        return [-1.0, 1.0];
    }
    let pad = ((hi - lo) * 0.1).max(1e-3);
    [(lo - pad) as f64, (hi + pad) as f64]
}

/// Render traces over a shared time axis (newest sample on the right)
pub fn render_traces(frame: &mut Frame, area: Rect, title: &str, traces: &[Trace]) {
    let block = Block::default().title(title).borders(Borders::ALL);

    // Convert samples to chart data points
    let data: Vec<Vec<(f64, f64)>> = traces
        .iter()
        .map(|trace| {
            let len = trace.samples.len().max(1) as f64;
            trace
                .samples
                .iter()
                .enumerate()
                .map(|(i, &sample)| (i as f64 / len, sample as f64))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = traces
        .iter()
        .zip(data.iter())
        .map(|(trace, points)| {
            Dataset::default()
                .name(trace.name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(trace.color))
                .data(points)
        })
        .collect();

    let [lo, hi] = y_bounds(traces);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([lo, hi])
                .labels(vec![format!("{lo:.2}"), format!("{hi:.2}")])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
