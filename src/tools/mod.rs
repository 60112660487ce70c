/// MCP tools for habits, tasks and statistics
///
/// This module contains the tools that MCP clients can call. Each tool loads
/// the snapshot it needs from storage and, where statistics are involved,
/// hands it to the statistics engine together with the caller's `today`.

pub mod habits;
pub mod tasks;
pub mod stats;

// Re-export tool functions for easy access
pub use habits::*;
pub use tasks::*;
pub use stats::*;

use thiserror::Error;
use crate::domain::{DomainError, HabitId, TaskId};
use crate::storage::StorageError;

/// Errors returned by tool calls
#[derive(Error, Debug)]
pub enum ToolError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub(crate) fn parse_habit_id(raw: &str) -> Result<HabitId, ToolError> {
    HabitId::from_string(raw)
        .map_err(|_| ToolError::InvalidArgument(format!("'{}' is not a valid habit ID", raw)))
}

pub(crate) fn parse_task_id(raw: &str) -> Result<TaskId, ToolError> {
    TaskId::from_string(raw)
        .map_err(|_| ToolError::InvalidArgument(format!("'{}' is not a valid task ID", raw)))
}
