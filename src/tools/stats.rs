/// Tool for the statistics overview
///
/// Implements stats_summary: loads the full snapshot and runs the statistics
/// engine over it.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{HabitStatisticsEngine, StatisticsSummary};
use crate::storage::PlannerStorage;
use crate::tools::ToolError;

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct StatsSummaryParams {}

#[derive(Debug, Serialize)]
pub struct StatsSummaryResponse {
    pub summary: StatisticsSummary,
    pub message: String,
}

pub fn stats_summary<S: PlannerStorage>(
    storage: &S,
    _params: StatsSummaryParams,
    today: NaiveDate,
) -> Result<StatsSummaryResponse, ToolError> {
    let habits = storage.list_habits()?;
    let records = storage.list_logs()?;
    let tasks = storage.list_tasks()?;

    let summary = HabitStatisticsEngine::new().summary(&habits, &records, &tasks, today);
    tracing::debug!(
        "Computed statistics for {}: {} habits, {} logs, {} tasks",
        today, summary.active_habits, summary.total_logs, summary.total_tasks
    );

    let message = format!(
        "📊 Statistics for {}\n\
         ✅ Task completion: {:.0}% ({} of {} tasks done)\n\
         📈 Habit completions in the last 7 days: {}\n\
         🔥 Current streak: {} day{}\n\n\
         Total tasks: {} | Active habits: {} | Habit logs: {}",
        today,
        summary.task_completion_rate,
        summary.completed_tasks,
        summary.total_tasks,
        summary.weekly_completions,
        summary.current_streak,
        if summary.current_streak == 1 { "" } else { "s" },
        summary.total_tasks,
        summary.active_habits,
        summary.total_logs,
    );

    Ok(StatsSummaryResponse { summary, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use crate::domain::{Habit, TaskPriority, TaskRecord};
    use crate::storage::SqliteStorage;

    #[test]
    fn test_empty_store() {
        let storage = SqliteStorage::in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        let response = stats_summary(&storage, StatsSummaryParams::default(), today).unwrap();
        assert_eq!(response.summary.task_completion_rate, 0.0);
        assert_eq!(response.summary.current_streak, 0);
        assert!(response.message.contains("0 days"));
    }

    #[test]
    fn test_summary_over_seeded_store() {
        let storage = SqliteStorage::in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();

        let habit = Habit::new("Read".to_string(), None, None, None).unwrap();
        storage.create_habit(&habit).unwrap();
        for days_back in 0..3 {
            storage.toggle_log(&habit.id, today - Duration::days(days_back)).unwrap();
        }

        let done = TaskRecord::new("Done".to_string(), TaskPriority::Low).unwrap();
        storage.create_task(&done).unwrap();
        storage.toggle_task(&done.id).unwrap();
        storage.create_task(&TaskRecord::new("Open".to_string(), TaskPriority::Low).unwrap()).unwrap();

        let response = stats_summary(&storage, StatsSummaryParams::default(), today).unwrap();
        assert_eq!(response.summary.current_streak, 3);
        assert_eq!(response.summary.weekly_completions, 3);
        assert_eq!(response.summary.task_completion_rate, 50.0);
        assert!(response.message.contains("Current streak: 3 days"));
        assert!(response.message.contains("50%"));
    }
}
