pub mod commands;
pub mod errors;
pub mod helpers;
pub mod storage;
pub mod types;

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};
use storage::{JsonFileStore, TaskStore};

/// Task operations over an injectable store.
///
/// Nothing is cached: each operation reloads the list. Mutations hold
/// `write_lock` for the whole load-modify-save cycle so two requests served by
/// this process cannot overwrite each other. Other processes writing the same
/// file are not coordinated.
pub struct TasksService {
    store: Box<dyn TaskStore>,
    write_lock: Mutex<()>,
}

impl TasksService {
    pub fn new(store: impl TaskStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &dyn TaskStore {
        self.store.as_ref()
    }

    /// Exclusive scope for one load-modify-save cycle.
    pub(crate) fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Initialize the task service backed by the JSON document at `data_file`.
pub fn init_tasks_service(data_file: PathBuf) -> TasksService {
    tracing::info!(
        target: "tasks",
        path = %data_file.display(),
        exists = data_file.exists(),
        "Tasks service initialized"
    );
    TasksService::new(JsonFileStore::new(data_file))
}
