use crate::shared::errors::StorageError;
use thiserror::Error;

/// Errors returned by task operations.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Task not found: {0}")]
    NotFound(u64),
    #[error("Task text cannot be empty")]
    EmptyText,
    #[error("No task id left to assign")]
    IdsExhausted,
}
