//! Command dispatch
//!
//! Every user action, from the terminal UI or the command line, is expressed
//! as a `Command` and applied to the one `AppContext` that owns the store and
//! the generator.

use log::{debug, info};

use crate::error::{Result, TodoError};
use crate::generator::SubtaskGenerator;
use crate::llm::CompletionClient;
use crate::store::{TaskId, TaskStore};

/// A single user action against the task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddTask { text: String },
    EditTask { id: TaskId, text: String },
    ToggleStatus { id: TaskId },
    SetStatus { id: TaskId, completed: bool },
    HideTask { id: TaskId },
    /// `parent` is the current selection, if any
    AddSubtask { parent: Option<TaskId>, text: String },
    GenerateSubtasks { parent: Option<TaskId> },
}

impl Command {
    /// Short name used in log lines
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddTask { .. } => "add-task",
            Command::EditTask { .. } => "edit-task",
            Command::ToggleStatus { .. } => "toggle-status",
            Command::SetStatus { .. } => "set-status",
            Command::HideTask { .. } => "hide-task",
            Command::AddSubtask { .. } => "add-subtask",
            Command::GenerateSubtasks { .. } => "generate-subtasks",
        }
    }
}

/// What a dispatched command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A task or subtask was created
    Added(TaskId),
    /// Text or status changed
    Updated(TaskId),
    Hidden(TaskId),
    Generated { parent: TaskId, count: usize },
    /// Blank input; nothing changed
    Ignored,
}

/// Application state: the store plus the generator that feeds it.
pub struct AppContext<C: CompletionClient> {
    store: TaskStore,
    generator: SubtaskGenerator<C>,
}

impl<C: CompletionClient> AppContext<C> {
    pub fn new(store: TaskStore, client: C) -> Self {
        Self {
            store,
            generator: SubtaskGenerator::new(client),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn generator(&self) -> &SubtaskGenerator<C> {
        &self.generator
    }

    /// Apply one command. The store is saved after every change.
    pub async fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        debug!("Dispatching {}", command.name());

        match command {
            Command::AddTask { text } => Ok(self.store.add_task(&text)?.map_or(Outcome::Ignored, Outcome::Added)),
            Command::EditTask { id, text } => {
                if self.store.edit_task(id, &text)? {
                    Ok(Outcome::Updated(id))
                } else {
                    Ok(Outcome::Ignored)
                }
            }
            Command::ToggleStatus { id } => {
                self.store.toggle_completed(id)?;
                Ok(Outcome::Updated(id))
            }
            Command::SetStatus { id, completed } => {
                self.store.set_completed(id, completed)?;
                Ok(Outcome::Updated(id))
            }
            Command::HideTask { id } => {
                self.store.hide(id)?;
                Ok(Outcome::Hidden(id))
            }
            Command::AddSubtask { parent, text } => {
                let parent = parent.ok_or(TodoError::NoSelection)?;
                Ok(self
                    .store
                    .add_subtask(parent, &text)?
                    .map_or(Outcome::Ignored, Outcome::Added))
            }
            Command::GenerateSubtasks { parent } => {
                let parent = parent.ok_or(TodoError::NoSelection)?;
                self.generate_subtasks(parent).await
            }
        }
    }

    /// Generate subtasks for `parent`; all or nothing.
    async fn generate_subtasks(&mut self, parent: TaskId) -> Result<Outcome> {
        let (text, existing) = self.store.subtask_context(parent)?;
        let before = existing.len();

        // Work on a copy of the allocator so a failure consumes no IDs
        let mut ids = self.store.ids().clone();
        let merged = self.generator.generate(&text, &existing, &mut ids).await?;
        let count = merged.len() - before;

        *self.store.ids_mut() = ids;
        self.store.replace_subtasks(parent, merged)?;

        info!("Generated {} subtask(s) for task {}", count, parent);
        Ok(Outcome::Generated { parent, count })
    }
}
