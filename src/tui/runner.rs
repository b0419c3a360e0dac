//! TUI Runner - main event loop.
//!
//! Render, wait for a key, turn it into a `Command`, dispatch it, repeat.
//! Dispatch happens inline: while a generation request is in flight the
//! loop does nothing else.

use eyre::Result;
use log::{error, info, warn};

use super::Tui;
use super::events::{Event, EventHandler};
use super::state::{AppState, Notification};
use super::views::render;
use crate::commands::{AppContext, Command};
use crate::llm::CompletionClient;

/// Owns the terminal, the UI state and the application context.
pub struct TuiRunner<C: CompletionClient> {
    terminal: Tui,
    state: AppState,
    events: EventHandler,
    context: AppContext<C>,
}

impl<C: CompletionClient> TuiRunner<C> {
    pub fn new(terminal: Tui, context: AppContext<C>) -> Self {
        Self {
            terminal,
            state: AppState::new(),
            events: EventHandler::default(),
            context,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Starting TUI main loop");

        while !self.state.should_quit {
            self.draw()?;

            match self.events.next().await? {
                Event::Key(key) => {
                    let command = self.state.handle_key(&key, self.context.store());
                    if let Some(command) = command {
                        self.execute(command).await?;
                    }
                }
                Event::Tick | Event::Resize(_, _) => {}
            }
        }

        info!("TUI main loop ended");
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let state = &self.state;
        let store = self.context.store();
        self.terminal.draw(|f| render(f, state, store))?;
        Ok(())
    }

    /// Dispatch one command and report the result on the notification line.
    async fn execute(&mut self, command: Command) -> Result<()> {
        if let Command::GenerateSubtasks { parent: Some(_) } = command {
            self.state.notification = Some(Notification::info("Generating…"));
            self.draw()?;
        }

        match self.context.dispatch(command).await {
            Ok(outcome) => self.state.apply_outcome(&outcome, self.context.store()),
            Err(e) => {
                if e.is_user_facing() {
                    warn!("{}", e);
                } else {
                    error!("{}", e);
                }
                self.state.apply_error(&e);
            }
        }
        Ok(())
    }
}
