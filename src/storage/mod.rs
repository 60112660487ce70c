/// Storage layer for persisting habits, habit logs and tasks
///
/// This module handles all database operations using SQLite. The statistics
/// engine never calls it; tools load snapshots from here and hand them over.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDate;
use thiserror::Error;
use crate::domain::{CompletionRecord, Habit, HabitId, LogId, TaskId, TaskRecord};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Habit not found: {habit_id}")]
    HabitNotFound { habit_id: String },

    #[error("Task not found: {task_id}")]
    TaskNotFound { task_id: String },

    #[error("Corrupt row in {table}: {message}")]
    CorruptRow { table: &'static str, message: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Result of toggling a habit for a day
#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    /// No record existed; this one was created
    Completed(CompletionRecord),
    /// The existing record with this ID was removed
    Cleared(LogId),
}

impl ToggleOutcome {
    /// Whether the habit is done on that day after the toggle
    pub fn is_completed(&self) -> bool {
        matches!(self, ToggleOutcome::Completed(_))
    }
}

/// Trait defining the storage interface for the planner
///
/// This trait keeps tools independent of SQLite so they can run against any
/// backend holding the same three collections.
pub trait PlannerStorage {
    /// Create a new habit
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError>;

    /// Get a habit by ID
    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError>;

    /// List all habits, newest first
    fn list_habits(&self) -> Result<Vec<Habit>, StorageError>;

    /// Delete a habit together with its logs
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError>;

    /// Get every completion record
    fn list_logs(&self) -> Result<Vec<CompletionRecord>, StorageError>;

    /// Get completion records for one habit
    fn list_logs_for_habit(&self, habit_id: &HabitId) -> Result<Vec<CompletionRecord>, StorageError>;

    /// Mark a habit done on a day, or undo it if it already is
    fn toggle_log(&self, habit_id: &HabitId, date: NaiveDate) -> Result<ToggleOutcome, StorageError>;

    /// Create a new task
    fn create_task(&self, task: &TaskRecord) -> Result<(), StorageError>;

    /// Get a task by ID
    fn get_task(&self, task_id: &TaskId) -> Result<TaskRecord, StorageError>;

    /// List all tasks, newest first
    fn list_tasks(&self) -> Result<Vec<TaskRecord>, StorageError>;

    /// Flip a task's completion and return the updated task
    fn toggle_task(&self, task_id: &TaskId) -> Result<TaskRecord, StorageError>;

    /// Persist changes to an existing task
    fn update_task(&self, task: &TaskRecord) -> Result<(), StorageError>;

    /// Delete a task
    fn delete_task(&self, task_id: &TaskId) -> Result<(), StorageError>;
}
