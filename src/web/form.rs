//! Mapping of the task form onto one task action.
//!
//! The form posts the same fields for every action; the submit button that was
//! pressed (`add`, `delete`, `toggle` or `update`) is present as a key and
//! selects the action.

use serde::Deserialize;
use thiserror::Error;

/// Raw form body as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionForm {
    pub add: Option<String>,
    pub delete: Option<String>,
    pub toggle: Option<String>,
    pub update: Option<String>,
    pub id: Option<String>,
    pub task: Option<String>,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add {
        task: String,
        due_date: Option<String>,
    },
    Delete {
        id: u64,
    },
    Toggle {
        id: u64,
    },
    Update {
        id: u64,
        task: String,
        due_date: Option<String>,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Add { .. } => "add",
            Action::Delete { .. } => "delete",
            Action::Toggle { .. } => "toggle",
            Action::Update { .. } => "update",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("No action selected")]
    UnknownAction,
}

/// Missing or non-numeric ids become 0, which never matches a task.
fn parse_id(raw: Option<&str>) -> u64 {
    raw.and_then(|id| id.trim().parse().ok()).unwrap_or(0)
}

impl TryFrom<ActionForm> for Action {
    type Error = ActionError;

    fn try_from(form: ActionForm) -> Result<Self, Self::Error> {
        let task = form.task.unwrap_or_default();
        let id = parse_id(form.id.as_deref());

        if form.add.is_some() {
            Ok(Action::Add {
                task,
                due_date: form.due_date,
            })
        } else if form.delete.is_some() {
            Ok(Action::Delete { id })
        } else if form.toggle.is_some() {
            Ok(Action::Toggle { id })
        } else if form.update.is_some() {
            Ok(Action::Update {
                id,
                task,
                due_date: form.due_date,
            })
        } else {
            Err(ActionError::UnknownAction)
        }
    }
}
