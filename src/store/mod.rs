//! Storage layer for aitodo.
//!
//! All tasks live in one JSON file (`tasks.json` by default):
//!
//! ```text
//! { "tasks": [ { "id", "text", "completed", "hidden",
//!                "created_at", "updated_at", "subtasks": [ ... ] } ] }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use aitodo::store::TaskStore;
//!
//! let mut store = TaskStore::load("tasks.json")?;
//! let id = store.add_task("buy milk")?.expect("non-empty text");
//! store.set_completed(id, true)?;
//! store.hide(id)?;
//! ```

mod records;
mod task_store;

pub use records::{LoadedFile, StoredSubtask, StoredTask, Subtask, SubtaskSlot, Task, TaskFile, TaskId};
pub use task_store::{DEFAULT_TASKS_FILE, TaskLocation, TaskRef, TaskStore};
