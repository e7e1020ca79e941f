use serde::{Deserialize, Serialize};

/// One to-do item as persisted in the task document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub task: String,
    #[serde(default)]
    pub is_done: bool,
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Completion filter for the read path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Done,
    Pending,
}

impl StatusFilter {
    /// Parses a query-string value. Anything other than `done` or `pending`
    /// means "no status filter".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "done" => Some(StatusFilter::Done),
            "pending" => Some(StatusFilter::Pending),
            _ => None,
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::Done => task.is_done,
            StatusFilter::Pending => !task.is_done,
        }
    }
}

/// Search and status narrowing applied when listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub status: Option<StatusFilter>,
}

impl ListQuery {
    pub fn new(search: impl Into<String>, status: Option<StatusFilter>) -> Self {
        Self {
            search: search.into(),
            status,
        }
    }
}

/// Result of a delete, which succeeds whether or not the id existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub removed: bool,
}
