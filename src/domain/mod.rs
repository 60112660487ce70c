/// Domain module containing the core entities and their validation rules
///
/// This module defines habits, habit completion records and tasks. These are
/// the snapshot types the statistics engine reads and the store persists.

pub mod habit;
pub mod completion;
pub mod task;
pub mod types;

// Re-export public types for easy access
pub use habit::*;
pub use completion::*;
pub use task::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid habit name: {0}")]
    InvalidHabitName(String),

    #[error("Invalid task title: {0}")]
    InvalidTaskTitle(String),

    #[error("Invalid target days: {0}")]
    InvalidTargetDays(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),
}
