//! Task record types.
//!
//! Two shapes live here:
//! - the in-memory shape (`Task`, `Subtask`, `SubtaskSlot`) which is lenient
//!   about what it accepts from disk, and
//! - the canonical persisted shape (`TaskFile`, `StoredTask`, `StoredSubtask`)
//!   which is the only thing ever written back.

use serde::{Deserialize, Serialize};

/// Identifier shared by tasks and subtasks.
pub type TaskId = u64;

/// A top-level task as held in memory.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Task {
    pub id: TaskId,

    pub text: String,

    #[serde(default)]
    pub completed: bool,

    /// Soft-delete flag
    #[serde(default)]
    pub hidden: bool,

    /// `YYYY-MM-DD HH:MM:SS`, filled with "now" at save time when absent
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    /// Display order = insertion order = persisted order
    #[serde(default)]
    pub subtasks: Vec<SubtaskSlot>,
}

impl Task {
    /// Create a fresh, incomplete, visible task.
    pub fn new(id: TaskId, text: impl Into<String>, now: &str) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            hidden: false,
            created_at: Some(now.to_string()),
            updated_at: Some(now.to_string()),
            subtasks: Vec::new(),
        }
    }

    /// Refresh `updated_at`.
    pub fn touch(&mut self, now: &str) {
        self.updated_at = Some(now.to_string());
    }

    /// Well-formed subtasks, hidden included.
    pub fn subtasks(&self) -> impl Iterator<Item = &Subtask> {
        self.subtasks.iter().filter_map(SubtaskSlot::as_subtask)
    }

    pub fn subtasks_mut(&mut self) -> impl Iterator<Item = &mut Subtask> {
        self.subtasks.iter_mut().filter_map(SubtaskSlot::as_subtask_mut)
    }

    /// Well-formed subtasks that are not hidden.
    pub fn visible_subtasks(&self) -> impl Iterator<Item = &Subtask> {
        self.subtasks().filter(|s| !s.hidden)
    }

    /// Every ID this task owns, including IDs found in malformed entries.
    pub fn all_ids(&self) -> impl Iterator<Item = TaskId> + '_ {
        std::iter::once(self.id).chain(self.subtasks.iter().filter_map(SubtaskSlot::id))
    }

    /// Convert to the canonical persisted shape.
    ///
    /// Malformed subtask entries are dropped; absent timestamps become `now`.
    pub fn to_stored(&self, now: &str) -> StoredTask {
        StoredTask {
            id: self.id,
            text: self.text.clone(),
            completed: self.completed,
            hidden: self.hidden,
            created_at: self.created_at.clone().unwrap_or_else(|| now.to_string()),
            updated_at: self.updated_at.clone().unwrap_or_else(|| now.to_string()),
            subtasks: self.subtasks().map(|s| s.to_stored(now)).collect(),
        }
    }
}

/// A subtask as held in memory. Never carries subtasks of its own.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Subtask {
    pub id: TaskId,

    pub text: String,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub hidden: bool,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Subtask {
    pub fn new(id: TaskId, text: impl Into<String>, now: &str) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            hidden: false,
            created_at: Some(now.to_string()),
            updated_at: Some(now.to_string()),
        }
    }

    pub fn touch(&mut self, now: &str) {
        self.updated_at = Some(now.to_string());
    }

    pub fn to_stored(&self, now: &str) -> StoredSubtask {
        StoredSubtask {
            id: self.id,
            text: self.text.clone(),
            completed: self.completed,
            hidden: self.hidden,
            created_at: self.created_at.clone().unwrap_or_else(|| now.to_string()),
            updated_at: self.updated_at.clone().unwrap_or_else(|| now.to_string()),
        }
    }
}

/// One entry of a task's `subtasks` array as found on disk.
///
/// Anything that does not parse as a `Subtask` is kept verbatim as
/// `Malformed` so that loading never fails on it; it is dropped on save.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SubtaskSlot {
    Valid(Subtask),
    Malformed(serde_json::Value),
}

impl SubtaskSlot {
    pub fn as_subtask(&self) -> Option<&Subtask> {
        match self {
            SubtaskSlot::Valid(s) => Some(s),
            SubtaskSlot::Malformed(_) => None,
        }
    }

    pub fn as_subtask_mut(&mut self) -> Option<&mut Subtask> {
        match self {
            SubtaskSlot::Valid(s) => Some(s),
            SubtaskSlot::Malformed(_) => None,
        }
    }

    /// The numeric ID of this entry, if it has one.
    pub fn id(&self) -> Option<TaskId> {
        match self {
            SubtaskSlot::Valid(s) => Some(s.id),
            SubtaskSlot::Malformed(value) => value.get("id").and_then(serde_json::Value::as_u64),
        }
    }
}

impl From<Subtask> for SubtaskSlot {
    fn from(subtask: Subtask) -> Self {
        SubtaskSlot::Valid(subtask)
    }
}

/// Root object of the task file as read from disk.
#[derive(Debug, Default, Deserialize)]
pub struct LoadedFile {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Root object of the task file as written to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskFile {
    pub tasks: Vec<StoredTask>,
}

/// Canonical persisted task. Field order is the on-disk key order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredTask {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub hidden: bool,
    pub created_at: String,
    pub updated_at: String,
    pub subtasks: Vec<StoredSubtask>,
}

/// Canonical persisted subtask.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredSubtask {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub hidden: bool,
    pub created_at: String,
    pub updated_at: String,
}
