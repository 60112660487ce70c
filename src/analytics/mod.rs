/// Statistics engine for habits and tasks
///
/// Every function here is a pure computation over a caller-supplied snapshot
/// and an explicit `today`. Nothing reads the clock or touches storage.

pub mod streak;
pub mod weekly;

pub use streak::current_streak;
pub use weekly::{
    is_completed_on, weekly_completion_count, weekly_progress, weekly_summary,
    HabitWeekSummary, WEEK_DAYS,
};

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{CompletionRecord, Habit, HabitId, TaskRecord};

/// Percentage of tasks that are completed, in `[0, 100]`
///
/// An empty task list has a rate of 0.
pub fn task_completion_rate(tasks: &[TaskRecord]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    let completed = tasks.iter().filter(|task| task.completed).count();
    completed as f64 / tasks.len() as f64 * 100.0
}

/// Everything the statistics screen shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatisticsSummary {
    pub completed_tasks: usize,
    pub total_tasks: usize,
    /// Percentage in `[0, 100]`
    pub task_completion_rate: f64,
    /// Completion records inside the trailing 7-day window
    pub weekly_completions: usize,
    /// Consecutive days with any habit completed
    pub current_streak: u32,
    pub active_habits: usize,
    pub total_logs: usize,
}

/// Habit statistics engine
///
/// Stateless; methods delegate to the free functions of this module so the
/// engine can be held by the server like any other collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct HabitStatisticsEngine;

impl HabitStatisticsEngine {
    /// Create a new statistics engine
    pub fn new() -> Self {
        Self
    }

    pub fn weekly_progress(
        &self,
        habit_id: &HabitId,
        records: &[CompletionRecord],
        today: NaiveDate,
    ) -> [bool; WEEK_DAYS] {
        weekly_progress(habit_id, records, today)
    }

    pub fn is_completed_on(
        &self,
        habit_id: &HabitId,
        date: NaiveDate,
        records: &[CompletionRecord],
    ) -> bool {
        is_completed_on(habit_id, date, records)
    }

    pub fn weekly_completion_count(&self, records: &[CompletionRecord], today: NaiveDate) -> usize {
        weekly_completion_count(records, today)
    }

    pub fn current_streak(&self, records: &[CompletionRecord], today: NaiveDate) -> u32 {
        current_streak(records, today)
    }

    pub fn task_completion_rate(&self, tasks: &[TaskRecord]) -> f64 {
        task_completion_rate(tasks)
    }

    pub fn weekly_summary(
        &self,
        habit: &Habit,
        records: &[CompletionRecord],
        today: NaiveDate,
    ) -> HabitWeekSummary {
        weekly_summary(habit, records, today)
    }

    /// Compute the full statistics screen from one snapshot
    pub fn summary(
        &self,
        habits: &[Habit],
        records: &[CompletionRecord],
        tasks: &[TaskRecord],
        today: NaiveDate,
    ) -> StatisticsSummary {
        StatisticsSummary {
            completed_tasks: tasks.iter().filter(|task| task.completed).count(),
            total_tasks: tasks.len(),
            task_completion_rate: task_completion_rate(tasks),
            weekly_completions: weekly_completion_count(records, today),
            current_streak: current_streak(records, today),
            active_habits: habits.len(),
            total_logs: records.len(),
        }
    }
}
