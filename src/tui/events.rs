//! Terminal events.
//!
//! Crossterm is polled on the blocking pool so the async loop is never
//! stuck inside `event::poll`.

use crossterm::event::{self, Event as CrosstermEvent, KeyEventKind};
use eyre::Result;
use std::time::Duration;

use super::input::KeyEvent;

/// Unified event type for the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Key press (releases and repeats are filtered out)
    Key(KeyEvent),
    /// Poll timed out with nothing to report
    Tick,
    Resize(u16, u16),
}

impl Event {
    fn from_crossterm(event: CrosstermEvent) -> Self {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key.into()),
            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
            _ => Event::Tick,
        }
    }
}

/// Waits for the next terminal event, or a tick after `tick_rate`.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub async fn next(&self) -> Result<Event> {
        let tick_rate = self.tick_rate;

        tokio::task::spawn_blocking(move || -> Result<Event> {
            if event::poll(tick_rate)? {
                Ok(Event::from_crossterm(event::read()?))
            } else {
                Ok(Event::Tick)
            }
        })
        .await?
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}
