//! ID allocation and timestamps for aitodo
//!
//! Tasks and subtasks share one integer ID namespace. The counter itself is
//! never persisted: it is recomputed from the highest ID present in the
//! loaded store, hidden records included.

use chrono::Local;

use crate::error::{Result, TodoError};
use crate::store::{Task, TaskId};

/// Format of every `created_at` / `updated_at` value
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time as `YYYY-MM-DD HH:MM:SS`
pub fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Hands out strictly increasing IDs.
///
/// Once `u64::MAX` has been issued (or is already in the file) the
/// allocator is exhausted and every further request fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: Option<TaskId>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdAllocator {
    /// Allocator for an empty store; first ID is 1.
    pub fn new() -> Self {
        Self { next: Some(1) }
    }

    /// Allocator whose first ID is `max + 1`.
    pub fn starting_after(max: TaskId) -> Self {
        Self { next: max.checked_add(1) }
    }

    /// Seed from every ID in `tasks`, nested and hidden ones included.
    pub fn seeded_from(tasks: &[Task]) -> Self {
        match tasks.iter().flat_map(Task::all_ids).max() {
            Some(max) => Self::starting_after(max),
            None => Self::new(),
        }
    }

    /// Return the current value and advance.
    pub fn next_id(&mut self) -> Result<TaskId> {
        let id = self.next.ok_or(TodoError::IdExhausted)?;
        self.next = id.checked_add(1);
        Ok(id)
    }

    /// The value the next call to `next_id` will return, `None` when exhausted.
    pub fn peek(&self) -> Option<TaskId> {
        self.next
    }
}
