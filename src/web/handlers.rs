use super::error::ApiErrorResponse;
use super::form::{Action, ActionForm};
use super::AppState;
use crate::tasks::commands::{task_add, task_delete, task_get, task_list, task_toggle, task_update};
use crate::tasks::errors::TaskError;
use crate::tasks::types::{ListQuery, StatusFilter, Task};
use crate::tasks::TasksService;
use axum::extract::{Path, Query, State};
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub filter: Option<String>,
}

impl From<ListParams> for ListQuery {
    fn from(params: ListParams) -> Self {
        ListQuery::new(
            params.search.unwrap_or_default(),
            params.filter.as_deref().and_then(StatusFilter::parse),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub action: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Task>>, ApiErrorResponse> {
    let query: ListQuery = params.into();
    let tasks = run_blocking(&state, move |tasks| task_list(tasks, &query)).await?;
    Ok(Json(tasks))
}

pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Task>, ApiErrorResponse> {
    let task = run_blocking(&state, move |tasks| task_get(tasks, id)).await?;
    Ok(Json(task))
}

pub async fn submit_action(
    State(state): State<AppState>,
    Form(form): Form<ActionForm>,
) -> Result<Json<ActionResponse>, ApiErrorResponse> {
    let action = Action::try_from(form)?;
    tracing::debug!(target: "http", action = action.name(), "Dispatching form action");
    let response = run_blocking(&state, move |tasks| dispatch(tasks, action)).await?;
    Ok(Json(response))
}

/// Runs a task operation on the blocking pool; file I/O and the write lock
/// stay off the async workers.
async fn run_blocking<T, F>(state: &AppState, op: F) -> Result<T, ApiErrorResponse>
where
    T: Send + 'static,
    F: FnOnce(&TasksService) -> Result<T, TaskError> + Send + 'static,
{
    let tasks = Arc::clone(&state.tasks);
    let result = tokio::task::spawn_blocking(move || op(&tasks))
        .await
        .map_err(|e| {
            tracing::error!(target: "http", error = %e, "Task operation did not complete");
            ApiErrorResponse::internal_error()
        })?;
    Ok(result?)
}

/// Runs exactly one task operation for the submitted action.
pub fn dispatch(tasks: &TasksService, action: Action) -> Result<ActionResponse, TaskError> {
    let name = action.name();
    let response = match action {
        Action::Add { task, due_date } => ActionResponse {
            action: name,
            task: Some(task_add(tasks, &task, due_date.as_deref())?),
            removed: None,
        },
        Action::Delete { id } => ActionResponse {
            action: name,
            task: None,
            removed: Some(task_delete(tasks, id)?.removed),
        },
        Action::Toggle { id } => ActionResponse {
            action: name,
            task: Some(task_toggle(tasks, id)?),
            removed: None,
        },
        Action::Update { id, task, due_date } => ActionResponse {
            action: name,
            task: Some(task_update(tasks, id, &task, due_date.as_deref())?),
            removed: None,
        },
    };
    Ok(response)
}
