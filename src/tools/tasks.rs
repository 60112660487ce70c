/// Tools for the to-do list
///
/// Implements task_add, task_toggle, task_update, task_delete and task_list.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{parse_calendar_date, TaskPriority, TaskRecord};
use crate::storage::PlannerStorage;
use crate::tools::{parse_task_id, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddTaskParams {
    /// What needs to be done
    pub title: String,
    /// low, medium or high (defaults to medium)
    pub priority: Option<String>,
}

/// Response for tools that act on a single task
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task: TaskRecord,
    pub message: String,
}

fn parse_priority(raw: Option<&str>) -> Result<Option<TaskPriority>, ToolError> {
    raw.map(|p| p.parse::<TaskPriority>()).transpose().map_err(ToolError::from)
}

pub fn add_task<S: PlannerStorage>(
    storage: &S,
    params: AddTaskParams,
) -> Result<TaskResponse, ToolError> {
    let priority = parse_priority(params.priority.as_deref())?.unwrap_or_default();
    let task = TaskRecord::new(params.title, priority)?;
    storage.create_task(&task)?;

    let message = format!("📝 Added task '{}' ({} priority)\nTask ID: {}", task.title, task.priority, task.id);
    Ok(TaskResponse { task, message })
}

/// Parameters naming a single task
#[derive(Debug, Deserialize, JsonSchema)]
pub struct TaskIdParams {
    /// ID of the task
    pub task_id: String,
}

pub fn toggle_task<S: PlannerStorage>(
    storage: &S,
    params: TaskIdParams,
) -> Result<TaskResponse, ToolError> {
    let task_id = parse_task_id(&params.task_id)?;
    let task = storage.toggle_task(&task_id)?;

    let message = if task.completed {
        format!("✅ Completed task '{}'", task.title)
    } else {
        format!("↩️ Reopened task '{}'", task.title)
    };
    Ok(TaskResponse { task, message })
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateTaskParams {
    /// ID of the task
    pub task_id: String,
    /// New title
    pub title: Option<String>,
    /// New priority: low, medium or high
    pub priority: Option<String>,
    /// New due date (YYYY-MM-DD); an empty string clears it
    pub due_date: Option<String>,
}

pub fn update_task<S: PlannerStorage>(
    storage: &S,
    params: UpdateTaskParams,
) -> Result<TaskResponse, ToolError> {
    let task_id = parse_task_id(&params.task_id)?;
    let priority = parse_priority(params.priority.as_deref())?;
    let due_date = match params.due_date.as_deref().map(str::trim) {
        None => None,
        Some("") => Some(None),
        Some(raw) => Some(Some(parse_calendar_date(raw)?)),
    };

    let mut task = storage.get_task(&task_id)?;
    task.update(params.title, priority, due_date)?;
    storage.update_task(&task)?;

    let message = format!("✏️ Updated task '{}'", task.title);
    Ok(TaskResponse { task, message })
}

#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    pub message: String,
}

pub fn delete_task<S: PlannerStorage>(
    storage: &S,
    params: TaskIdParams,
) -> Result<DeleteTaskResponse, ToolError> {
    let task_id = parse_task_id(&params.task_id)?;
    let task = storage.get_task(&task_id)?;
    storage.delete_task(&task_id)?;

    Ok(DeleteTaskResponse {
        message: format!("🗑️ Deleted task '{}'", task.title),
    })
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListTasksParams {}

#[derive(Debug, Serialize)]
pub struct ListTasksResponse {
    pub tasks: Vec<TaskRecord>,
    pub message: String,
}

pub fn list_tasks<S: PlannerStorage>(
    storage: &S,
    _params: ListTasksParams,
) -> Result<ListTasksResponse, ToolError> {
    let tasks = storage.list_tasks()?;

    let message = if tasks.is_empty() {
        "No tasks yet. Add one to get started!".to_string()
    } else {
        tasks
            .iter()
            .map(|t| {
                format!(
                    "{} {} [{}]{} ({})",
                    if t.completed { "☑" } else { "☐" },
                    t.title,
                    t.priority,
                    t.due_date.map(|d| format!(" due {}", d)).unwrap_or_default(),
                    t.id
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(ListTasksResponse { tasks, message })
}
