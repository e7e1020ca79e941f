use super::types::Task;
use crate::shared::errors::StorageError;
use crate::shared::paths::ensure_dir;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Authoritative read/write access to the persisted task list.
///
/// Every call works on the whole list: there are no incremental updates.
pub trait TaskStore: Send + Sync {
    fn load(&self) -> Result<Vec<Task>, StorageError>;
    fn save(&self, tasks: &[Task]) -> Result<(), StorageError>;
}

impl<S: TaskStore + ?Sized> TaskStore for Arc<S> {
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        (**self).load()
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        (**self).save(tasks)
    }
}

// ============================================================================
// JSON File Store
// ============================================================================

/// Stores the task list as one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the new document is staged in before the rename.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "todos.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TaskStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    target: "tasks::storage",
                    path = %self.path.display(),
                    "Task document missing, starting empty"
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::read(&self.path, e)),
        };

        let tasks: Vec<Task> = serde_json::from_slice(&bytes)?;
        Ok(tasks)
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(tasks)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            ensure_dir(dir).map_err(|e| StorageError::write(&self.path, e))?;
        }

        // Stage then rename so readers never observe a half-written document.
        let staging = self.staging_path();
        std::fs::write(&staging, &content).map_err(|e| StorageError::write(&staging, e))?;
        if let Err(e) = std::fs::rename(&staging, &self.path) {
            let _ = std::fs::remove_file(&staging);
            return Err(StorageError::write(&self.path, e));
        }

        tracing::trace!(
            target: "tasks::storage",
            path = %self.path.display(),
            count = tasks.len(),
            "Saved task document"
        );
        Ok(())
    }
}

// ============================================================================
// In-Memory Store
// ============================================================================

/// Test double that keeps the list in memory and counts saves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: Mutex<Vec<Task>>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            saves: Mutex::new(0),
        }
    }

    /// Number of `save` calls seen so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TaskStore for MemoryStore {
    fn load(&self) -> Result<Vec<Task>, StorageError> {
        Ok(self.snapshot())
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        *self.tasks.lock().unwrap_or_else(PoisonError::into_inner) = tasks.to_vec();
        *self.saves.lock().unwrap_or_else(PoisonError::into_inner) += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, text: &str, is_done: bool, due_date: Option<&str>) -> Task {
        Task {
            id,
            task: text.to_string(),
            is_done,
            due_date: due_date.map(str::to_string),
        }
    }

    #[test]
    fn test_load_missing_document_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp.path().join("todos.json"));

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_all_fields() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp.path().join("todos.json"));
        let tasks = vec![
            task(1, "Buy milk", false, Some("2024-05-01")),
            task(2, "Pay rent", true, None),
        ];

        store.save(&tasks).unwrap();
        assert_eq!(store.load().unwrap(), tasks);
    }

    #[test]
    fn test_save_writes_null_due_date_and_pretty_json() {
        let temp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(temp.path().join("todos.json"));

        store.save(&[task(2, "Pay rent", true, None)]).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"due_date\": null"));
        assert!(raw.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"id": 2, "task": "Pay rent", "is_done": true, "due_date": null}])
        );
    }

    #[test]
    fn test_load_accepts_absent_due_date() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("todos.json");
        std::fs::write(&path, r#"[{"id": 4, "task": "Water plants", "is_done": false}]"#).unwrap();

        let tasks = JsonFileStore::new(&path).load().unwrap();
        assert_eq!(tasks, vec![task(4, "Water plants", false, None)]);
    }

    #[test]
    fn test_load_invalid_json_is_format_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("todos.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::FormatError(_)));
    }

    #[test]
    fn test_load_non_list_is_format_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("todos.json");
        std::fs::write(&path, "null").unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::FormatError(_)));
    }

    #[test]
    fn test_load_invalid_utf8_is_format_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("todos.json");
        let mut raw = br#"[{"id": 1, "task": ""#.to_vec();
        raw.extend_from_slice(b"\xff\xfe");
        raw.extend_from_slice(br#"", "is_done": false}]"#);
        std::fs::write(&path, raw).unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::FormatError(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_load_under_non_directory_is_read_error() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        // ENOTDIR rather than NotFound: only a truly missing file reads as empty.
        let err = JsonFileStore::new(blocker.join("todos.json"))
            .load()
            .unwrap_err();
        assert!(matches!(err, StorageError::ReadError { .. }));
    }

    #[test]
    fn test_load_unreadable_is_read_error() {
        let temp = tempfile::tempdir().unwrap();
        // A directory exists at the path but cannot be read as a file.
        let path = temp.path().join("todos.json");
        std::fs::create_dir(&path).unwrap();

        let err = JsonFileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::ReadError { .. }));
    }

    #[test]
    fn test_save_into_file_parent_is_write_error() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let store = JsonFileStore::new(blocker.join("todos.json"));
        let err = store.save(&[task(1, "x", false, None)]).unwrap_err();
        assert!(matches!(err, StorageError::WriteError { .. }));
    }

    #[test]
    fn test_save_creates_parent_dirs_and_leaves_no_staging_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("todos.json");
        let store = JsonFileStore::new(&path);

        store.save(&[task(1, "x", false, None)]).unwrap();

        assert!(path.is_file());
        assert!(!temp.path().join("nested").join("todos.json.tmp").exists());
    }

    #[test]
    fn test_memory_store_counts_saves() {
        let store = MemoryStore::with_tasks(vec![task(1, "a", false, None)]);
        assert_eq!(store.save_count(), 0);

        store.save(&[]).unwrap();
        assert_eq!(store.save_count(), 1);
        assert!(store.load().unwrap().is_empty());
    }
}
