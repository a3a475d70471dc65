//! Status bar widget - shows cutoff, time constant, policy and sensor stats

use one_pole::Approximation;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Values shown in the status bar
pub struct ScopeStats {
    pub cutoff_hz: f32,
    pub tau_micros: f32,
    pub approximation: Approximation,
    pub bypass: bool,
    pub received: u64,
    pub sample_rate_hz: f32,
    pub signal_hz: f32,
}

/// Render the status bar
pub fn render_status(frame: &mut Frame, area: Rect, stats: &ScopeStats) {
    let block = Block::default().title(" scope ").borders(Borders::ALL);

    let line = Line::from(vec![
        Span::styled(
            format!(" Cutoff: {:.2} Hz  ", stats.cutoff_hz),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("τ: {:.1} ms  ", stats.tau_micros / 1_000.0),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("Coefficient: {}  ", stats.approximation.name()),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            if stats.bypass { "BYPASS  " } else { "" },
            Style::default().fg(Color::LightRed),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Signal: {:.1} Hz  ", stats.signal_hz),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("~{:.0} readings/s  ", stats.sample_rate_hz),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Received: {}", stats.received),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
