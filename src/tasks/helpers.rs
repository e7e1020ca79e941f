use super::types::{ListQuery, Task};

pub fn find_task(tasks: &[Task], id: u64) -> Option<&Task> {
    tasks.iter().find(|task| task.id == id)
}

pub fn find_task_mut(tasks: &mut [Task], id: u64) -> Option<&mut Task> {
    tasks.iter_mut().find(|task| task.id == id)
}

/// Next id to assign: one past the largest existing id, or 1 for an empty list.
///
/// Returns `None` once the largest id is `u64::MAX`.
pub fn next_id(tasks: &[Task]) -> Option<u64> {
    tasks.iter().map(|task| task.id).max().unwrap_or(0).checked_add(1)
}

/// Trims the text and neutralizes characters that are unsafe inside markup.
pub fn sanitize_text(input: &str) -> String {
    let trimmed = input.trim();
    let mut out = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Blank due dates (an empty date input) are stored as no due date.
pub fn normalize_due_date(due_date: Option<&str>) -> Option<String> {
    due_date
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
}

/// Applies the text search and status filter. Never touches storage.
pub fn filter_tasks(tasks: Vec<Task>, query: &ListQuery) -> Vec<Task> {
    let needle = query.search.to_lowercase();

    tasks
        .into_iter()
        .filter(|task| needle.is_empty() || task.task.to_lowercase().contains(&needle))
        .filter(|task| query.status.map_or(true, |status| status.matches(task)))
        .collect()
}
