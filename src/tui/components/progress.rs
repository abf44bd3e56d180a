use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use std::time::{Duration, Instant};

/// Gauge that fills linearly over a fixed duration once started.
pub struct ProgressBar {
    pub progress: f64,
    pub message: String,
    duration: Duration,
    started: Option<Instant>,
}

impl ProgressBar {
    pub fn new(duration: Duration) -> Self {
        Self {
            progress: 0.0,
            message: String::new(),
            duration,
            started: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        if self.started.is_none() {
            self.started = Some(now);
            self.progress = 0.0;
        }
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn tick(&mut self, now: Instant) {
        let Some(started) = self.started else {
            return;
        };

        if self.duration.is_zero() {
            self.set_progress(1.0);
            return;
        }

        let elapsed = now.saturating_duration_since(started);
        self.set_progress(elapsed.as_secs_f64() / self.duration.as_secs_f64());
    }

    pub fn set_progress(&mut self, progress: f64) {
        self.progress = progress.clamp(0.0, 1.0);
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status
                Constraint::Length(3), // Gauge
            ])
            .split(area);

        let status = Paragraph::new(self.message.as_str()).style(Style::default().fg(Color::White));
        f.render_widget(status, chunks[0]);

        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::LightMagenta))
            .percent((self.progress * 100.0) as u16);
        f.render_widget(gauge, chunks[1]);
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.started = None;
    }
}
