//! Terminal user interface for aitodo.
//!
//! Two panes side by side:
//! - **Tasks**: visible top-level tasks with their completion checkbox
//! - **Details**: the selected task's text and timestamps, then its subtasks
//!
//! A single line at the bottom doubles as text input and notification area.

mod events;
mod input;
mod runner;
mod state;
mod views;

pub use events::{Event, EventHandler};
pub use input::{KeyAction, KeyEvent, TextInput};
pub use runner::TuiRunner;
pub use state::{AppState, InputPurpose, InteractionMode, Notification, NotificationLevel, Pane};

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eyre::Result;
use log::error;
use ratatui::prelude::*;
use std::io::{Stdout, stdout};

use crate::commands::AppContext;
use crate::llm::CompletionClient;

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode.
///
/// Enables raw mode and switches to the alternate screen.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the interactive UI until the user quits.
///
/// The terminal is restored whether the loop ends normally or with an error.
pub async fn run<C: CompletionClient>(context: AppContext<C>) -> Result<()> {
    let terminal = init_terminal()?;
    let mut runner = TuiRunner::new(terminal, context);
    let result = runner.run().await;

    if let Err(e) = restore_terminal() {
        error!("Failed to restore terminal: {}", e);
    }
    result
}

/// Palette shared by the views.
pub mod colors {
    use ratatui::style::Color;

    pub const COMPLETE: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const PENDING: Color = Color::Rgb(255, 215, 0); // Gold
    pub const WARNING: Color = Color::Rgb(255, 165, 0); // Orange
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255);
    pub const SELECTED: Color = Color::DarkGray;
    pub const DIM: Color = Color::DarkGray;
}
