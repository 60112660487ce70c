/// CompletionRecord entity for tracking habit completions
///
/// A completion record is the fact that a habit was marked done on a given
/// calendar day. There is at most one record per habit and day.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use crate::domain::{HabitId, LogId};

/// A record of completing a habit on a specific calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Unique identifier for this record
    pub id: LogId,
    /// Which habit this record is for
    pub habit_id: HabitId,
    /// The calendar day the habit was done on (no time of day)
    pub completed_date: NaiveDate,
    /// When this record was created
    pub created_at: DateTime<Utc>,
}

impl CompletionRecord {
    /// Create a new record for a habit on a given day
    ///
    /// Any day is accepted, including future ones; the statistics engine
    /// has defined behavior for every date.
    pub fn new(habit_id: HabitId, completed_date: NaiveDate) -> Self {
        Self {
            id: LogId::new(),
            habit_id,
            completed_date,
            created_at: Utc::now(),
        }
    }

    /// Create a record from existing data (used when loading from database)
    pub fn from_existing(
        id: LogId,
        habit_id: HabitId,
        completed_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            habit_id,
            completed_date,
            created_at,
        }
    }

    /// Whether this record marks `habit_id` as done on `date`
    pub fn matches(&self, habit_id: &HabitId, date: NaiveDate) -> bool {
        self.habit_id == *habit_id && self.completed_date == date
    }
}
