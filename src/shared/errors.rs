use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures of the JSON task document.
///
/// A missing document is not an error: the store reports it as an empty list.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read {}: {source}", .path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse data: {0}")]
    FormatError(#[from] serde_json::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        StorageError::ReadError {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        StorageError::WriteError {
            path: path.to_path_buf(),
            source,
        }
    }
}
