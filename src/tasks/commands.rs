use super::errors::TaskError;
use super::helpers::{
    filter_tasks, find_task, find_task_mut, next_id, normalize_due_date, sanitize_text,
};
use super::types::{DeleteOutcome, ListQuery, Task};
use super::TasksService;

fn clean_text(text: &str) -> Result<String, TaskError> {
    let text = sanitize_text(text);
    if text.is_empty() {
        return Err(TaskError::EmptyText);
    }
    Ok(text)
}

/// Appends a new pending task and returns it.
pub fn task_add(
    service: &TasksService,
    text: &str,
    due_date: Option<&str>,
) -> Result<Task, TaskError> {
    let text = clean_text(text)?;
    let due_date = normalize_due_date(due_date);

    let _guard = service.lock();
    let mut tasks = service.store().load()?;

    let task = Task {
        id: next_id(&tasks).ok_or(TaskError::IdsExhausted)?,
        task: text,
        is_done: false,
        due_date,
    };

    tasks.push(task.clone());
    service.store().save(&tasks)?;

    tracing::info!(target: "tasks", id = task.id, "Task added");
    Ok(task)
}

/// Removes the task with `id`. An unknown id still rewrites the list unchanged.
pub fn task_delete(service: &TasksService, id: u64) -> Result<DeleteOutcome, TaskError> {
    let _guard = service.lock();
    let mut tasks = service.store().load()?;

    let before = tasks.len();
    tasks.retain(|task| task.id != id);
    let removed = tasks.len() != before;

    service.store().save(&tasks)?;

    if removed {
        tracing::info!(target: "tasks", id, "Task deleted");
    } else {
        tracing::debug!(target: "tasks", id, "Delete matched no task");
    }
    Ok(DeleteOutcome { removed })
}

/// Flips completion of the task with `id`.
pub fn task_toggle(service: &TasksService, id: u64) -> Result<Task, TaskError> {
    let _guard = service.lock();
    let mut tasks = service.store().load()?;

    let task = find_task_mut(&mut tasks, id).ok_or(TaskError::NotFound(id))?;
    task.is_done = !task.is_done;
    let updated = task.clone();

    service.store().save(&tasks)?;

    tracing::info!(target: "tasks", id, is_done = updated.is_done, "Task toggled");
    Ok(updated)
}

/// Replaces the text and due date of the task with `id`, keeping its status.
pub fn task_update(
    service: &TasksService,
    id: u64,
    text: &str,
    due_date: Option<&str>,
) -> Result<Task, TaskError> {
    let text = clean_text(text)?;
    let due_date = normalize_due_date(due_date);

    let _guard = service.lock();
    let mut tasks = service.store().load()?;

    let task = find_task_mut(&mut tasks, id).ok_or(TaskError::NotFound(id))?;
    task.task = text;
    task.due_date = due_date;
    let updated = task.clone();

    service.store().save(&tasks)?;

    tracing::info!(target: "tasks", id, "Task updated");
    Ok(updated)
}

/// Loads the list and narrows it for display.
pub fn task_list(service: &TasksService, query: &ListQuery) -> Result<Vec<Task>, TaskError> {
    let tasks = service.store().load()?;
    Ok(filter_tasks(tasks, query))
}

/// Fetches one task, e.g. to prefill an edit form.
pub fn task_get(service: &TasksService, id: u64) -> Result<Task, TaskError> {
    let tasks = service.store().load()?;
    find_task(&tasks, id).cloned().ok_or(TaskError::NotFound(id))
}
