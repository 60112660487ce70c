/// Task entity for the to-do list
///
/// Tasks feed the completion-rate statistic. They carry a priority and an
/// optional due date, and flip between open and completed.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{TaskId, TaskPriority, DomainError};

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Create a new, open task with validation
    pub fn new(title: String, priority: TaskPriority) -> Result<Self, DomainError> {
        let title = title.trim().to_string();
        Self::validate_title(&title)?;

        let now = Utc::now();
        Ok(Self {
            id: TaskId::new(),
            title,
            completed: false,
            priority,
            due_date: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Create a task from existing data (used when loading from database)
    pub fn from_existing(
        id: TaskId,
        title: String,
        completed: bool,
        priority: TaskPriority,
        due_date: Option<NaiveDate>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            completed,
            priority,
            due_date,
            created_at,
            updated_at,
        }
    }

    /// Apply a partial update, validating the new title if one is given
    ///
    /// `due_date: Some(None)` clears the due date.
    pub fn update(
        &mut self,
        title: Option<String>,
        priority: Option<TaskPriority>,
        due_date: Option<Option<NaiveDate>>,
    ) -> Result<(), DomainError> {
        if let Some(new_title) = title {
            let new_title = new_title.trim().to_string();
            Self::validate_title(&new_title)?;
            self.title = new_title;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if let Some(new_due_date) = due_date {
            self.due_date = new_due_date;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Flip between open and completed
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
        self.updated_at = Utc::now();
    }

    fn validate_title(title: &str) -> Result<(), DomainError> {
        if title.is_empty() {
            return Err(DomainError::InvalidTaskTitle(
                "Task title cannot be empty".to_string()
            ));
        }
        if title.chars().count() > 200 {
            return Err(DomainError::InvalidTaskTitle(
                "Task title cannot be longer than 200 characters".to_string()
            ));
        }
        Ok(())
    }
}
