//! TaskStore implementation backed by a single JSON file.
//!
//! The whole store is held in memory and rewritten to disk after every
//! mutation (write-through, no batching). Writes go through a temp file in
//! the same directory followed by a rename, so a crash mid-write leaves the
//! previous file intact.

use crate::error::{Result, TodoError};
use crate::id::{IdAllocator, now_timestamp};
use crate::store::records::{LoadedFile, Subtask, SubtaskSlot, Task, TaskFile, TaskId};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default task file name, relative to the working directory.
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// Where a record lives inside the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskLocation {
    /// Index into the top-level task list
    Top(usize),
    /// Index of the parent task and index into its `subtasks` array
    Sub { parent: usize, index: usize },
}

/// Read-only view of a record found by ID.
#[derive(Debug, Clone, Copy)]
pub enum TaskRef<'a> {
    Task(&'a Task),
    Subtask { parent: &'a Task, subtask: &'a Subtask },
}

impl TaskRef<'_> {
    pub fn text(&self) -> &str {
        match self {
            TaskRef::Task(t) => &t.text,
            TaskRef::Subtask { subtask, .. } => &subtask.text,
        }
    }
}

/// Mutable handle handed to the mutation closures.
enum RecordMut<'a> {
    Task(&'a mut Task),
    Subtask(&'a mut Subtask),
}

impl RecordMut<'_> {
    fn set_text(&mut self, text: &str) {
        match self {
            RecordMut::Task(t) => t.text = text.to_string(),
            RecordMut::Subtask(s) => s.text = text.to_string(),
        }
    }

    fn completed(&self) -> bool {
        match self {
            RecordMut::Task(t) => t.completed,
            RecordMut::Subtask(s) => s.completed,
        }
    }

    fn set_completed(&mut self, completed: bool) {
        match self {
            RecordMut::Task(t) => t.completed = completed,
            RecordMut::Subtask(s) => s.completed = completed,
        }
    }

    fn hide(&mut self) {
        match self {
            RecordMut::Task(t) => t.hidden = true,
            RecordMut::Subtask(s) => s.hidden = true,
        }
    }
}

/// The task store: top-level tasks, their subtasks, and the ID allocator.
#[derive(Debug)]
pub struct TaskStore {
    /// Backing JSON file
    path: PathBuf,

    /// Top-level tasks in display order
    tasks: Vec<Task>,

    /// Shared ID namespace for tasks and subtasks
    ids: IdAllocator,
}

impl TaskStore {
    /// Load the store from `path`.
    ///
    /// A missing file yields an empty store. Any other read or parse failure
    /// is returned to the caller.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("No task file at {}, starting empty", path.display());
                return Ok(Self::empty(path));
            }
            Err(e) => return Err(e.into()),
        };

        let loaded: LoadedFile = serde_json::from_str(&content)?;
        let ids = IdAllocator::seeded_from(&loaded.tasks);

        match ids.peek() {
            Some(next) => info!("Loaded {} task(s) from {}, next id {}", loaded.tasks.len(), path.display(), next),
            None => warn!(
                "Loaded {} task(s) from {}, no IDs left to allocate",
                loaded.tasks.len(),
                path.display()
            ),
        }

        Ok(Self {
            path,
            tasks: loaded.tasks,
            ids,
        })
    }

    /// An empty store that will persist to `path`.
    pub fn empty(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            tasks: Vec::new(),
            ids: IdAllocator::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every top-level task, hidden included.
    pub fn all_tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Top-level tasks that are not hidden, in display order.
    pub fn visible_tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.hidden)
    }

    /// Top-level task by ID.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Non-hidden subtasks of a top-level task.
    pub fn visible_subtasks(&self, parent_id: TaskId) -> Result<Vec<&Subtask>> {
        let index = self.top_index(parent_id)?;
        Ok(self.tasks[index].visible_subtasks().collect())
    }

    /// The allocator, for callers that create records outside the store.
    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// Locate a record: top-level tasks first, then each task's subtasks.
    ///
    /// IDs are unique under normal use. If a hand-edited file contains
    /// duplicates, the first match in that order is returned.
    pub fn locate(&self, id: TaskId) -> Option<TaskLocation> {
        if let Some(index) = self.tasks.iter().position(|t| t.id == id) {
            return Some(TaskLocation::Top(index));
        }

        self.tasks.iter().enumerate().find_map(|(parent, task)| {
            task.subtasks
                .iter()
                .position(|slot| slot.as_subtask().is_some_and(|s| s.id == id))
                .map(|index| TaskLocation::Sub { parent, index })
        })
    }

    /// Find a task or subtask by ID.
    pub fn find(&self, id: TaskId) -> Option<TaskRef<'_>> {
        match self.locate(id)? {
            TaskLocation::Top(index) => Some(TaskRef::Task(&self.tasks[index])),
            TaskLocation::Sub { parent, index } => {
                let parent = &self.tasks[parent];
                parent.subtasks[index]
                    .as_subtask()
                    .map(|subtask| TaskRef::Subtask { parent, subtask })
            }
        }
    }

    /// Normalized copy of the store in its canonical on-disk shape.
    ///
    /// Missing timestamps become "now", malformed subtask entries are
    /// dropped and unknown fields never make it into the output.
    pub fn clean_for_save(&self) -> TaskFile {
        let now = now_timestamp();
        TaskFile {
            tasks: self.tasks.iter().map(|t| t.to_stored(&now)).collect(),
        }
    }

    /// Write the cleaned store to the backing file as indented UTF-8 JSON.
    pub fn save(&self) -> Result<()> {
        let file = self.clean_for_save();
        let json = serde_json::to_string_pretty(&file)?;
        atomic_write(&self.path, json.as_bytes())
            .map_err(|e| TodoError::Storage(format!("Failed to write {}: {}", self.path.display(), e)))?;
        debug!("Saved {} task(s) to {}", file.tasks.len(), self.path.display());
        Ok(())
    }

    /// Append a new top-level task.
    ///
    /// Empty or whitespace-only text is ignored and returns `Ok(None)`.
    pub fn add_task(&mut self, text: &str) -> Result<Option<TaskId>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let id = self.ids.next_id()?;
        self.tasks.push(Task::new(id, text, &now_timestamp()));
        info!("Added task {}", id);
        self.save()?;
        Ok(Some(id))
    }

    /// Replace the text of a task or subtask.
    ///
    /// Returns `false` without touching anything when `text` is blank.
    pub fn edit_task(&mut self, id: TaskId, text: &str) -> Result<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }

        self.mutate(id, |mut record| record.set_text(text))?;
        info!("Edited task {}", id);
        Ok(true)
    }

    /// Set the completion flag of a task or subtask.
    pub fn set_completed(&mut self, id: TaskId, completed: bool) -> Result<()> {
        self.mutate(id, |mut record| record.set_completed(completed))?;
        info!("Task {} completed={}", id, completed);
        Ok(())
    }

    /// Flip the completion flag and return the new value.
    pub fn toggle_completed(&mut self, id: TaskId) -> Result<bool> {
        let completed = self.mutate(id, |mut record| {
            let completed = !record.completed();
            record.set_completed(completed);
            completed
        })?;
        info!("Task {} completed={}", id, completed);
        Ok(completed)
    }

    /// Soft delete: mark hidden, keep in the file.
    pub fn hide(&mut self, id: TaskId) -> Result<()> {
        self.mutate(id, |mut record| record.hide())?;
        info!("Hid task {}", id);
        Ok(())
    }

    /// Append a subtask to a top-level task.
    ///
    /// Empty or whitespace-only text is ignored and returns `Ok(None)`.
    pub fn add_subtask(&mut self, parent_id: TaskId, text: &str) -> Result<Option<TaskId>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let index = self.top_index(parent_id)?;
        let now = now_timestamp();
        let id = self.ids.next_id()?;

        let parent = &mut self.tasks[index];
        parent.subtasks.push(Subtask::new(id, text, &now).into());
        parent.touch(&now);

        info!("Added subtask {} to task {}", id, parent_id);
        self.save()?;
        Ok(Some(id))
    }

    /// Parent text and a copy of its well-formed subtasks, for generation.
    pub fn subtask_context(&self, parent_id: TaskId) -> Result<(String, Vec<Subtask>)> {
        let task = &self.tasks[self.top_index(parent_id)?];
        Ok((task.text.clone(), task.subtasks().cloned().collect()))
    }

    /// Replace a task's subtask list in one step and refresh the parent.
    pub fn replace_subtasks(&mut self, parent_id: TaskId, subtasks: Vec<Subtask>) -> Result<()> {
        let index = self.top_index(parent_id)?;
        let parent = &mut self.tasks[index];
        parent.subtasks = subtasks.into_iter().map(SubtaskSlot::from).collect();
        parent.touch(&now_timestamp());

        info!("Task {} now has {} subtask(s)", parent_id, parent.subtasks.len());
        self.save()
    }

    /// Index of a top-level task, distinguishing "unknown" from "nested".
    fn top_index(&self, id: TaskId) -> Result<usize> {
        match self.locate(id) {
            Some(TaskLocation::Top(index)) => Ok(index),
            Some(TaskLocation::Sub { .. }) => Err(TodoError::NotATopLevelTask(id)),
            None => Err(TodoError::TaskNotFound(id)),
        }
    }

    /// Apply `f` to the record with `id`, refresh timestamps, then save.
    ///
    /// For a subtask both the subtask and its parent get a new `updated_at`.
    fn mutate<T>(&mut self, id: TaskId, f: impl FnOnce(RecordMut<'_>) -> T) -> Result<T> {
        let now = now_timestamp();
        let location = self.locate(id).ok_or(TodoError::TaskNotFound(id))?;

        let out = match location {
            TaskLocation::Top(index) => {
                let task = &mut self.tasks[index];
                let out = f(RecordMut::Task(&mut *task));
                task.touch(&now);
                out
            }
            TaskLocation::Sub { parent, index } => {
                let task = &mut self.tasks[parent];
                let subtask = task.subtasks[index]
                    .as_subtask_mut()
                    .ok_or(TodoError::TaskNotFound(id))?;
                let out = f(RecordMut::Subtask(&mut *subtask));
                subtask.touch(&now);
                task.touch(&now);
                out
            }
        };

        self.save()?;
        Ok(out)
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    // Temp files are created 0600; keep whatever mode the target had
    if let Ok(meta) = fs::metadata(path) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoredTask;
    use serde_json::json;
    use tempfile::TempDir;

    const OLD: &str = "2000-01-01 00:00:00";

    fn create_test_store() -> (TaskStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = TaskStore::load(temp_dir.path().join(DEFAULT_TASKS_FILE)).unwrap();
        (store, temp_dir)
    }

    fn read_raw(store: &TaskStore) -> serde_json::Value {
        let content = fs::read_to_string(store.path()).unwrap();
        serde_json::from_str(&content).unwrap()
    }

    /// Push all timestamps into the past so refreshes are observable.
    fn age(store: &mut TaskStore) {
        for task in &mut store.tasks {
            task.created_at = Some(OLD.to_string());
            task.updated_at = Some(OLD.to_string());
            for subtask in task.subtasks_mut() {
                subtask.created_at = Some(OLD.to_string());
                subtask.updated_at = Some(OLD.to_string());
            }
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let (store, _temp) = create_test_store();
        assert!(store.all_tasks().is_empty());
        assert_eq!(store.ids().peek(), Some(1));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_TASKS_FILE);
        fs::write(&path, "{ not json").unwrap();

        let result = TaskStore::load(&path);
        assert!(matches!(result, Err(TodoError::Json(_))));
    }

    #[test]
    fn test_add_task_assigns_ids_and_saves() {
        let (mut store, _temp) = create_test_store();

        let first = store.add_task("buy milk").unwrap();
        let second = store.add_task("  walk dog  ").unwrap();

        assert_eq!(first, Some(1));
        assert_eq!(second, Some(2));
        assert_eq!(store.all_tasks()[1].text, "walk dog");

        let raw = read_raw(&store);
        assert_eq!(raw["tasks"].as_array().unwrap().len(), 2);
        assert_eq!(raw["tasks"][0]["completed"], json!(false));
        assert_eq!(raw["tasks"][0]["subtasks"], json!([]));
    }

    #[test]
    fn test_add_task_rejects_blank_text() {
        let (mut store, _temp) = create_test_store();

        assert_eq!(store.add_task("").unwrap(), None);
        assert_eq!(store.add_task("   ").unwrap(), None);
        assert!(store.all_tasks().is_empty());
        assert_eq!(store.ids().peek(), Some(1));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_edit_task_updates_text_and_timestamp() {
        let (mut store, _temp) = create_test_store();
        let id = store.add_task("draft").unwrap().unwrap();
        age(&mut store);

        assert!(store.edit_task(id, "final").unwrap());

        let task = store.task(id).unwrap();
        assert_eq!(task.text, "final");
        assert_eq!(task.created_at.as_deref(), Some(OLD));
        assert!(task.updated_at.as_deref().unwrap() > OLD);
    }

    #[test]
    fn test_edit_task_trims_like_add() {
        let (mut store, _temp) = create_test_store();
        let parent = store.add_task("draft").unwrap().unwrap();
        let child = store.add_subtask(parent, "step").unwrap().unwrap();

        assert!(store.edit_task(parent, "  final  ").unwrap());
        assert!(store.edit_task(child, "\tfirst step\n").unwrap());

        assert_eq!(store.find(parent).unwrap().text(), "final");
        assert_eq!(store.find(child).unwrap().text(), "first step");
        assert_eq!(read_raw(&store)["tasks"][0]["text"], json!("final"));
    }

    #[test]
    fn test_edit_task_blank_is_noop() {
        let (mut store, _temp) = create_test_store();
        let id = store.add_task("keep me").unwrap().unwrap();
        age(&mut store);

        assert!(!store.edit_task(id, "  ").unwrap());
        let task = store.task(id).unwrap();
        assert_eq!(task.text, "keep me");
        assert_eq!(task.updated_at.as_deref(), Some(OLD));
    }

    #[test]
    fn test_edit_unknown_id() {
        let (mut store, _temp) = create_test_store();
        let result = store.edit_task(99, "nothing");
        assert!(matches!(result, Err(TodoError::TaskNotFound(99))));
    }

    #[test]
    fn test_set_completed_on_subtask_refreshes_parent() {
        let (mut store, _temp) = create_test_store();
        let parent = store.add_task("parent").unwrap().unwrap();
        let child = store.add_subtask(parent, "child").unwrap().unwrap();
        age(&mut store);

        store.set_completed(child, true).unwrap();

        match store.find(child).unwrap() {
            TaskRef::Subtask { parent: p, subtask } => {
                assert!(subtask.completed);
                assert!(subtask.updated_at.as_deref().unwrap() > OLD);
                assert!(p.updated_at.as_deref().unwrap() > OLD);
                assert_eq!(p.created_at.as_deref(), Some(OLD));
            }
            other => panic!("expected subtask, got {:?}", other),
        }
    }

    #[test]
    fn test_toggle_completed() {
        let (mut store, _temp) = create_test_store();
        let id = store.add_task("flip").unwrap().unwrap();

        assert!(store.toggle_completed(id).unwrap());
        assert!(store.task(id).unwrap().completed);
        assert!(!store.toggle_completed(id).unwrap());
        assert!(!store.task(id).unwrap().completed);
    }

    #[test]
    fn test_hide_keeps_record_on_disk() {
        let (mut store, _temp) = create_test_store();
        let keep = store.add_task("keep").unwrap().unwrap();
        let gone = store.add_task("gone").unwrap().unwrap();

        store.hide(gone).unwrap();

        let visible: Vec<TaskId> = store.visible_tasks().map(|t| t.id).collect();
        assert_eq!(visible, vec![keep]);

        let raw = read_raw(&store);
        assert_eq!(raw["tasks"][1]["id"], json!(gone));
        assert_eq!(raw["tasks"][1]["hidden"], json!(true));
    }

    #[test]
    fn test_hide_subtask() {
        let (mut store, _temp) = create_test_store();
        let parent = store.add_task("parent").unwrap().unwrap();
        let a = store.add_subtask(parent, "a").unwrap().unwrap();
        let b = store.add_subtask(parent, "b").unwrap().unwrap();

        store.hide(a).unwrap();

        let visible: Vec<TaskId> = store.visible_subtasks(parent).unwrap().iter().map(|s| s.id).collect();
        assert_eq!(visible, vec![b]);
        assert_eq!(store.task(parent).unwrap().subtasks().count(), 2);
    }

    #[test]
    fn test_add_subtask_rules() {
        let (mut store, _temp) = create_test_store();
        let parent = store.add_task("parent").unwrap().unwrap();

        assert_eq!(store.add_subtask(parent, " ").unwrap(), None);
        assert!(matches!(store.add_subtask(42, "x"), Err(TodoError::TaskNotFound(42))));

        let child = store.add_subtask(parent, "child").unwrap().unwrap();
        assert!(matches!(
            store.add_subtask(child, "grandchild"),
            Err(TodoError::NotATopLevelTask(_))
        ));

        let raw = read_raw(&store);
        assert!(raw["tasks"][0]["subtasks"][0].get("subtasks").is_none());
    }

    #[test]
    fn test_ids_unique_across_levels() {
        let (mut store, _temp) = create_test_store();
        let mut seen = Vec::new();

        for i in 0..5 {
            let parent = store.add_task(&format!("task {}", i)).unwrap().unwrap();
            seen.push(parent);
            for j in 0..3 {
                seen.push(store.add_subtask(parent, &format!("sub {}", j)).unwrap().unwrap());
            }
        }

        let mut deduped = seen.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), seen.len());
    }

    #[test]
    fn test_lookup_prefers_top_level_on_collision() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_TASKS_FILE);
        fs::write(
            &path,
            json!({
                "tasks": [
                    { "id": 1, "text": "first", "subtasks": [ { "id": 2, "text": "nested two" } ] },
                    { "id": 2, "text": "top two" }
                ]
            })
            .to_string(),
        )
        .unwrap();

        let store = TaskStore::load(&path).unwrap();
        let found = store.find(2).unwrap();
        assert!(matches!(found, TaskRef::Task(_)));
        assert_eq!(found.text(), "top two");
    }

    #[test]
    fn test_clean_for_save_normalizes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_TASKS_FILE);
        fs::write(
            &path,
            json!({
                "tasks": [{
                    "id": 5,
                    "text": "legacy",
                    "color": "red",
                    "subtasks": [
                        { "id": 6, "text": "ok", "priority": 3 },
                        { "text": "no id" },
                        "oops"
                    ]
                }]
            })
            .to_string(),
        )
        .unwrap();

        let store = TaskStore::load(&path).unwrap();
        let file = store.clean_for_save();
        let task: &StoredTask = &file.tasks[0];

        assert!(!task.completed);
        assert!(!task.hidden);
        assert_eq!(task.created_at.len(), 19);
        assert_eq!(task.subtasks.len(), 1);
        assert_eq!(task.subtasks[0].id, 6);

        let value = serde_json::to_value(&file).unwrap();
        assert!(value["tasks"][0].get("color").is_none());
        assert!(value["tasks"][0]["subtasks"][0].get("priority").is_none());
    }

    #[test]
    fn test_replace_subtasks() {
        let (mut store, _temp) = create_test_store();
        let parent = store.add_task("parent").unwrap().unwrap();
        store.add_subtask(parent, "a").unwrap();
        age(&mut store);

        let (text, mut existing) = store.subtask_context(parent).unwrap();
        assert_eq!(text, "parent");
        let id = store.ids_mut().next_id().unwrap();
        existing.push(Subtask::new(id, "b", OLD));

        store.replace_subtasks(parent, existing).unwrap();

        let task = store.task(parent).unwrap();
        let texts: Vec<&str> = task.subtasks().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert!(task.updated_at.as_deref().unwrap() > OLD);
    }

    #[test]
    fn test_save_is_pretty_utf8() {
        let (mut store, _temp) = create_test_store();
        store.add_task("买牛奶").unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("买牛奶"));
        assert!(content.contains("\n  \"tasks\""));
    }

    #[test]
    fn test_max_id_in_file_exhausts_allocation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_TASKS_FILE);
        fs::write(&path, r#"{"tasks":[{"id":18446744073709551615,"text":"big"}]}"#).unwrap();

        let mut store = TaskStore::load(&path).unwrap();
        assert_eq!(store.ids().peek(), None);
        let before = fs::read_to_string(&path).unwrap();

        assert!(matches!(store.add_task("next"), Err(TodoError::IdExhausted)));
        assert!(matches!(store.add_subtask(u64::MAX, "child"), Err(TodoError::IdExhausted)));

        assert_eq!(store.all_tasks().len(), 1);
        assert_eq!(store.task(u64::MAX).unwrap().subtasks().count(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);

        // Records already in the file are still editable
        store.set_completed(u64::MAX, true).unwrap();
        assert!(store.task(u64::MAX).unwrap().completed);
    }

    #[test]
    fn test_last_id_is_issued_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_TASKS_FILE);
        fs::write(&path, json!({ "tasks": [{ "id": u64::MAX - 1, "text": "almost" }] }).to_string()).unwrap();

        let mut store = TaskStore::load(&path).unwrap();
        assert_eq!(store.add_task("last").unwrap(), Some(u64::MAX));
        assert!(matches!(store.add_task("one more"), Err(TodoError::IdExhausted)));

        let ids: Vec<TaskId> = store.all_tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![u64::MAX - 1, u64::MAX]);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (mut store, _temp) = create_test_store();
        store.add_task("first").unwrap();
        fs::set_permissions(store.path(), fs::Permissions::from_mode(0o644)).unwrap();

        store.add_task("second").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        assert_eq!(read_raw(&store)["tasks"].as_array().unwrap().len(), 2);
    }
}
