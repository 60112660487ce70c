/// Domain validation tests through the public API
use chrono::NaiveDate;
use habit_planner_mcp::*;

#[cfg(test)]
mod domain_tests {
    use super::*;

    #[test]
    fn test_habit_defaults() {
        let habit = Habit::new("Meditate".to_string(), None, None, None).unwrap();
        assert_eq!(habit.icon, DEFAULT_ICON);
        assert_eq!(habit.color, DEFAULT_COLOR);
        assert_eq!(habit.target_days, DEFAULT_TARGET_DAYS);
    }

    #[test]
    fn test_habit_validation() {
        assert!(matches!(
            Habit::new("  ".to_string(), None, None, None),
            Err(DomainError::InvalidHabitName(_))
        ));
        assert!(matches!(
            Habit::new("Walk".to_string(), None, None, Some(8)),
            Err(DomainError::InvalidTargetDays(_))
        ));
        assert!(matches!(
            Habit::new("Walk".to_string(), None, Some("blue".to_string()), None),
            Err(DomainError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_calendar_dates_drop_time_of_day() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(parse_calendar_date("2024-05-01").unwrap(), expected);
        assert_eq!(parse_calendar_date("2024-05-01T23:59:59Z").unwrap(), expected);
        assert_eq!(parse_calendar_date("2024-05-01T08:30:00").unwrap(), expected);
        assert!(matches!(parse_calendar_date("May 1st"), Err(DomainError::InvalidDate(_))));
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("high".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert!("urgent".parse::<TaskPriority>().is_err());
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn test_ids_parse_back() {
        let id = TaskId::new();
        assert_eq!(TaskId::from_string(&id.to_string()).unwrap(), id);
        assert!(HabitId::from_string("not-a-uuid").is_err());
    }
}
