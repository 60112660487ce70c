/// End-to-end tests of the tools over a SQLite file
use chrono::{Duration, NaiveDate};
use habit_planner_mcp::tools::*;
use habit_planner_mcp::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod storage_workflow_tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
    }

    fn create(storage: &SqliteStorage, name: &str) -> String {
        create_habit(storage, CreateHabitParams {
            name: name.to_string(),
            icon: None,
            color: None,
            target_days: None,
        })
        .unwrap()
        .habit_id
    }

    fn toggle(storage: &SqliteStorage, habit_id: &str, date: Option<&str>) -> ToggleHabitResponse {
        toggle_habit(storage, ToggleHabitParams {
            habit_id: habit_id.to_string(),
            date: date.map(str::to_string),
        }, today())
        .unwrap()
    }

    #[tokio::test]
    async fn test_server_opens_database_file() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = PlannerServer::new(temp_file.path().to_path_buf()).await.unwrap();
        assert!(server.storage().list_habits().unwrap().is_empty());
    }

    #[test]
    fn test_data_survives_reopen() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let habit_id = {
            let storage = SqliteStorage::new(temp_file.path().to_path_buf()).unwrap();
            let habit_id = create(&storage, "Journal");
            toggle(&storage, &habit_id, None);
            habit_id
        };

        let storage = SqliteStorage::new(temp_file.path().to_path_buf()).unwrap();
        let listed = list_habits(&storage, ListHabitsParams::default(), today()).unwrap();
        assert_eq!(listed.habits.len(), 1);
        assert_eq!(listed.habits[0].habit_id, habit_id);
        assert!(listed.habits[0].week.completed_today);
    }

    #[test]
    fn test_toggling_twice_restores_logs() {
        let storage = SqliteStorage::in_memory().unwrap();
        let habit_id = create(&storage, "Floss");
        toggle(&storage, &habit_id, Some("2024-01-01"));
        let before = storage.list_logs().unwrap();

        let first = toggle(&storage, &habit_id, Some("2024-01-02T21:15:00Z"));
        assert!(first.completed);
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());

        let second = toggle(&storage, &habit_id, Some("2024-01-02"));
        assert!(!second.completed);
        assert_eq!(storage.list_logs().unwrap(), before);
    }

    #[test]
    fn test_deleting_habit_removes_its_logs() {
        let storage = SqliteStorage::in_memory().unwrap();
        let kept = create(&storage, "Read");
        let removed = create(&storage, "Run");
        toggle(&storage, &kept, None);
        toggle(&storage, &removed, None);
        toggle(&storage, &removed, Some("2024-01-02"));

        delete_habit(&storage, HabitIdParams { habit_id: removed.clone() }).unwrap();

        let logs = storage.list_logs().unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].habit_id.to_string(), kept);

        let missing = toggle_habit(&storage, ToggleHabitParams { habit_id: removed, date: None }, today());
        assert!(matches!(missing, Err(ToolError::Storage(StorageError::HabitNotFound { .. }))));
    }

    #[test]
    fn test_stats_summary_matches_engine() {
        let storage = SqliteStorage::in_memory().unwrap();
        let read = create(&storage, "Read");
        let walk = create(&storage, "Walk");
        for days_back in [0, 1, 2, 9] {
            let date = (today() - Duration::days(days_back)).to_string();
            toggle(&storage, &read, Some(date.as_str()));
        }
        toggle(&storage, &walk, Some("2024-01-03"));

        for (title, done) in [("Call mom", true), ("Laundry", false), ("Groceries", false)] {
            let task = add_task(&storage, AddTaskParams { title: title.to_string(), priority: None }).unwrap();
            if done {
                toggle_task(&storage, TaskIdParams { task_id: task.task.id.to_string() }).unwrap();
            }
        }

        let response = stats_summary(&storage, StatsSummaryParams::default(), today()).unwrap();
        let expected = HabitStatisticsEngine::new().summary(
            &storage.list_habits().unwrap(),
            &storage.list_logs().unwrap(),
            &storage.list_tasks().unwrap(),
            today(),
        );

        assert_eq!(response.summary, expected);
        assert_eq!(response.summary.current_streak, 3);
        assert_eq!(response.summary.weekly_completions, 4);
        assert_eq!(response.summary.total_logs, 5);
        assert!((response.summary.task_completion_rate - 100.0 / 3.0).abs() < 1e-9);
    }
}
