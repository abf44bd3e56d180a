use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Quit,
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next_event(&self) -> crate::error::Result<AppEvent> {
        if !event::poll(self.tick_rate)? {
            return Ok(AppEvent::Tick);
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => Ok(classify_key(key)),
            _ => Ok(AppEvent::Tick),
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(100))
    }
}

fn classify_key(key: KeyEvent) -> AppEvent {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppEvent::Quit,
        _ => AppEvent::Key(key),
    }
}
