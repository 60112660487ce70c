/// Statistics engine tests through the public API
use chrono::{Duration, NaiveDate};
use habit_planner_mcp::*;

#[cfg(test)]
mod statistics_tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
    }

    fn days_ago(n: i64) -> NaiveDate {
        today() - Duration::days(n)
    }

    fn logs(habit_id: &HabitId, days_back: &[i64]) -> Vec<CompletionRecord> {
        days_back
            .iter()
            .map(|n| CompletionRecord::new(habit_id.clone(), days_ago(*n)))
            .collect()
    }

    fn task(completed: bool) -> TaskRecord {
        let mut task = TaskRecord::new("Task".to_string(), TaskPriority::Medium).unwrap();
        if completed {
            task.toggle();
        }
        task
    }

    #[test]
    fn test_weekly_progress_ends_with_today() {
        let engine = HabitStatisticsEngine::new();
        let habit_id = HabitId::new();
        let collections = [
            Vec::new(),
            logs(&habit_id, &[0]),
            logs(&habit_id, &[1, 3, 9]),
            logs(&HabitId::new(), &[0, 1, 2]),
        ];

        for records in &collections {
            let progress = engine.weekly_progress(&habit_id, records, today());
            assert_eq!(progress.len(), 7);
            assert_eq!(progress[6], engine.is_completed_on(&habit_id, today(), records));
        }
    }

    #[test]
    fn test_insert_then_remove_leaves_predicate_unchanged() {
        let engine = HabitStatisticsEngine::new();
        let habit_id = HabitId::new();
        let mut records = logs(&habit_id, &[2]);
        let before = engine.is_completed_on(&habit_id, days_ago(1), &records);

        records.push(CompletionRecord::new(habit_id.clone(), days_ago(1)));
        assert!(engine.is_completed_on(&habit_id, days_ago(1), &records));
        records.retain(|r| !r.matches(&habit_id, days_ago(1)));

        assert_eq!(engine.is_completed_on(&habit_id, days_ago(1), &records), before);
    }

    #[test]
    fn test_streak_cases() {
        let engine = HabitStatisticsEngine::new();
        let habit_id = HabitId::new();

        assert_eq!(engine.current_streak(&[], today()), 0);
        assert_eq!(engine.current_streak(&logs(&habit_id, &[0, 1, 2]), today()), 3);
        assert_eq!(engine.current_streak(&logs(&habit_id, &[2, 3]), today()), 0);
        assert_eq!(engine.current_streak(&logs(&habit_id, &[1, 2, 4]), today()), 2);
    }

    #[test]
    fn test_streak_counts_a_day_once() {
        let engine = HabitStatisticsEngine::new();
        let habit_id = HabitId::new();
        let records = logs(&habit_id, &[0, 0, 1, 1]);
        assert_eq!(engine.current_streak(&records, today()), 2);
    }

    #[test]
    fn test_streak_spans_habits() {
        let engine = HabitStatisticsEngine::new();
        let mut records = logs(&HabitId::new(), &[0]);
        records.extend(logs(&HabitId::new(), &[1]));
        assert_eq!(engine.current_streak(&records, today()), 2);
    }

    #[test]
    fn test_task_completion_rate() {
        let engine = HabitStatisticsEngine::new();
        assert_eq!(engine.task_completion_rate(&[]), 0.0);
        assert_eq!(engine.task_completion_rate(&[task(true), task(false)]), 50.0);
    }

    #[test]
    fn test_weekly_count_window_edges() {
        let engine = HabitStatisticsEngine::new();
        let habit_id = HabitId::new();
        assert_eq!(engine.weekly_completion_count(&logs(&habit_id, &[7]), today()), 1);
        assert_eq!(engine.weekly_completion_count(&logs(&habit_id, &[8]), today()), 0);
    }

    #[test]
    fn test_summary_combines_all_statistics() {
        let engine = HabitStatisticsEngine::new();
        let habit = Habit::new("Stretch".to_string(), None, None, Some(3)).unwrap();
        let records = logs(&habit.id, &[0, 1, 10]);
        let tasks = vec![task(true), task(false), task(false), task(true)];

        let summary = engine.summary(&[habit], &records, &tasks, today());
        assert_eq!(summary.completed_tasks, 2);
        assert_eq!(summary.total_tasks, 4);
        assert_eq!(summary.task_completion_rate, 50.0);
        assert_eq!(summary.weekly_completions, 2);
        assert_eq!(summary.current_streak, 2);
        assert_eq!(summary.active_habits, 1);
        assert_eq!(summary.total_logs, 3);
    }

    #[test]
    fn test_week_summary_target() {
        let engine = HabitStatisticsEngine::new();
        let habit = Habit::new("Run".to_string(), None, None, Some(2)).unwrap();
        let records = logs(&habit.id, &[0, 5]);

        let week = engine.weekly_summary(&habit, &records, today());
        assert_eq!(week.progress, [false, true, false, false, false, false, true]);
        assert_eq!(week.completed_days, 2);
        assert!(week.completed_today);
        assert!(week.target_met);
    }
}
