//! Application state for the TUI.
//!
//! `AppState` holds only UI concerns: focus, cursors, the input buffer and
//! the notification line. Task data is always read from the `TaskStore`,
//! and every change to it leaves this module as a `Command`.

use crossterm::event::KeyCode;

use super::input::{KeyAction, KeyEvent, TextInput};
use crate::commands::{Command, Outcome};
use crate::error::TodoError;
use crate::store::{TaskId, TaskStore};

/// Which list has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Tasks,
    Subtasks,
}

impl Pane {
    pub fn next(self) -> Self {
        match self {
            Pane::Tasks => Pane::Subtasks,
            Pane::Subtasks => Pane::Tasks,
        }
    }
}

/// What the text being typed will become.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPurpose {
    AddTask,
    AddSubtask,
    Edit(TaskId),
}

impl InputPurpose {
    pub fn prompt(self) -> &'static str {
        match self {
            InputPurpose::AddTask => "New task",
            InputPurpose::AddSubtask => "New subtask",
            InputPurpose::Edit(_) => "Edit",
        }
    }
}

/// Current interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Normal,
    Input(InputPurpose),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
}

/// Message shown on the bottom line until the next action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Missing selection is a warning, everything else an error.
    pub fn from_error(error: &TodoError) -> Self {
        match error {
            TodoError::NoSelection => Self::warning(error.to_string()),
            _ => Self::error(error.to_string()),
        }
    }
}

/// The primary UI state.
#[derive(Debug, Default)]
pub struct AppState {
    pub focus: Pane,
    /// Index into the visible tasks
    pub task_cursor: usize,
    /// Index into the selected task's visible subtasks
    pub subtask_cursor: usize,
    pub mode: InteractionMode,
    pub input: TextInput,
    pub notification: Option<Notification>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_task_id(&self, store: &TaskStore) -> Option<TaskId> {
        store.visible_tasks().nth(self.task_cursor).map(|t| t.id)
    }

    pub fn selected_subtask_id(&self, store: &TaskStore) -> Option<TaskId> {
        let parent = self.selected_task_id(store)?;
        store.task(parent)?.visible_subtasks().nth(self.subtask_cursor).map(|s| s.id)
    }

    /// Record the focused pane's selection applies to.
    pub fn target_id(&self, store: &TaskStore) -> Option<TaskId> {
        match self.focus {
            Pane::Tasks => self.selected_task_id(store),
            Pane::Subtasks => self.selected_subtask_id(store),
        }
    }

    /// Focused record and its current text, for pre-filling the editor.
    fn edit_target(&self, store: &TaskStore) -> Option<(TaskId, String)> {
        let id = self.target_id(store)?;
        store.find(id).map(|record| (id, record.text().to_string()))
    }

    fn subtask_count(&self, store: &TaskStore) -> usize {
        self.selected_task_id(store)
            .and_then(|id| store.task(id))
            .map_or(0, |t| t.visible_subtasks().count())
    }

    /// Keep both cursors inside their lists after the store changed.
    pub fn clamp(&mut self, store: &TaskStore) {
        let tasks = store.visible_tasks().count();
        self.task_cursor = self.task_cursor.min(tasks.saturating_sub(1));

        let subtasks = self.subtask_count(store);
        self.subtask_cursor = self.subtask_cursor.min(subtasks.saturating_sub(1));
    }

    fn move_cursor(&mut self, store: &TaskStore, down: bool) {
        match self.focus {
            Pane::Tasks => {
                let len = store.visible_tasks().count();
                let next = step(self.task_cursor, len, down);
                if next != self.task_cursor {
                    self.task_cursor = next;
                    self.subtask_cursor = 0;
                }
            }
            Pane::Subtasks => {
                self.subtask_cursor = step(self.subtask_cursor, self.subtask_count(store), down);
            }
        }
    }

    fn start_input(&mut self, purpose: InputPurpose, initial: &str) {
        self.input = TextInput::with_content(initial);
        self.mode = InteractionMode::Input(purpose);
    }

    fn warn_no_selection(&mut self) {
        self.notification = Some(Notification::from_error(&TodoError::NoSelection));
    }

    /// Interpret a key press. Returns the command to dispatch, if any.
    pub fn handle_key(&mut self, key: &KeyEvent, store: &TaskStore) -> Option<Command> {
        match self.mode {
            InteractionMode::Normal => self.handle_normal_key(key, store),
            InteractionMode::Input(purpose) => self.handle_input_key(key, purpose, store),
        }
    }

    fn handle_normal_key(&mut self, key: &KeyEvent, store: &TaskStore) -> Option<Command> {
        match KeyAction::from_key(key) {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Up => self.move_cursor(store, false),
            KeyAction::Down => self.move_cursor(store, true),
            KeyAction::SwitchPane => self.focus = self.focus.next(),
            KeyAction::AddTask => self.start_input(InputPurpose::AddTask, ""),
            KeyAction::AddSubtask => match self.selected_task_id(store) {
                Some(_) => self.start_input(InputPurpose::AddSubtask, ""),
                None => self.warn_no_selection(),
            },
            KeyAction::Edit => match self.edit_target(store) {
                Some((id, text)) => self.start_input(InputPurpose::Edit(id), &text),
                None => self.warn_no_selection(),
            },
            KeyAction::ToggleStatus => match self.target_id(store) {
                Some(id) => return Some(Command::ToggleStatus { id }),
                None => self.warn_no_selection(),
            },
            KeyAction::Hide => match self.target_id(store) {
                Some(id) => return Some(Command::HideTask { id }),
                None => self.warn_no_selection(),
            },
            KeyAction::Generate => {
                return Some(Command::GenerateSubtasks {
                    parent: self.selected_task_id(store),
                });
            }
            KeyAction::Dismiss => self.notification = None,
            KeyAction::None => {}
        }
        None
    }

    fn handle_input_key(&mut self, key: &KeyEvent, purpose: InputPurpose, store: &TaskStore) -> Option<Command> {
        if key.is_ctrl_c() {
            self.should_quit = true;
            return None;
        }

        match key.code {
            KeyCode::Esc => {
                self.input.take();
                self.mode = InteractionMode::Normal;
                None
            }
            KeyCode::Enter => {
                let text = self.input.take();
                self.mode = InteractionMode::Normal;
                Some(match purpose {
                    InputPurpose::AddTask => Command::AddTask { text },
                    InputPurpose::AddSubtask => Command::AddSubtask {
                        parent: self.selected_task_id(store),
                        text,
                    },
                    InputPurpose::Edit(id) => Command::EditTask { id, text },
                })
            }
            _ => {
                self.input.handle_key(key);
                None
            }
        }
    }

    /// Update cursors and the notification line after a successful command.
    pub fn apply_outcome(&mut self, outcome: &Outcome, store: &TaskStore) {
        match outcome {
            Outcome::Added(id) => {
                if let Some(index) = store.visible_tasks().position(|t| t.id == *id) {
                    self.task_cursor = index;
                    self.subtask_cursor = 0;
                    self.notification = Some(Notification::info(format!("Added task {}", id)));
                } else {
                    self.notification = Some(Notification::info(format!("Added subtask {}", id)));
                }
            }
            Outcome::Hidden(id) => {
                self.notification = Some(Notification::info(format!("Deleted task {}", id)));
            }
            Outcome::Generated { count, .. } => {
                self.notification = Some(Notification::info(format!("Generated {} subtask(s)", count)));
            }
            Outcome::Updated(_) | Outcome::Ignored => self.notification = None,
        }
        self.clamp(store);
    }

    pub fn apply_error(&mut self, error: &TodoError) {
        self.notification = Some(Notification::from_error(error));
    }
}

/// Move one step within `0..len`, stopping at the ends.
fn step(cursor: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        0
    } else if down {
        (cursor + 1).min(len - 1)
    } else {
        cursor.saturating_sub(1)
    }
}
