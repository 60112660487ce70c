/// Seven-day views over the completion log
///
/// Per-habit day-by-day progress for the trailing week, plus the trailing
/// window count shown on the statistics screen.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::domain::{CompletionRecord, Habit, HabitId};

/// Number of days shown in a habit's weekly progress row
pub const WEEK_DAYS: usize = 7;

const SECONDS_PER_DAY: i64 = 86_400;

/// Whether `habit_id` has a completion record on `date`
pub fn is_completed_on(habit_id: &HabitId, date: NaiveDate, records: &[CompletionRecord]) -> bool {
    records.iter().any(|record| record.matches(habit_id, date))
}

/// Completion flags for the 7 days ending at `today`, oldest first
///
/// The last entry is always `today`.
pub fn weekly_progress(
    habit_id: &HabitId,
    records: &[CompletionRecord],
    today: NaiveDate,
) -> [bool; WEEK_DAYS] {
    let mut progress = [false; WEEK_DAYS];

    for days_back in (0..WEEK_DAYS).rev() {
        let date = today - Duration::days(days_back as i64);
        progress[WEEK_DAYS - 1 - days_back] = is_completed_on(habit_id, date, records);
    }

    progress
}

/// Count records inside the trailing window ending at `today`
///
/// A record is in the window when the ceiling of its day difference to
/// `today` is at most 7: `today - 7` is counted, `today - 8` is not. Records
/// dated after `today` have a negative difference and are counted as well.
pub fn weekly_completion_count(records: &[CompletionRecord], today: NaiveDate) -> usize {
    records
        .iter()
        .filter(|record| ceil_day_difference(today, record.completed_date) <= WEEK_DAYS as i64)
        .count()
}

/// `ceil((later - earlier) / 1 day)`
fn ceil_day_difference(later: NaiveDate, earlier: NaiveDate) -> i64 {
    let seconds = (later - earlier).num_seconds();
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    if seconds.rem_euclid(SECONDS_PER_DAY) == 0 { days } else { days + 1 }
}

/// What a habit card shows for the current week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HabitWeekSummary {
    pub progress: [bool; WEEK_DAYS],
    pub completed_days: u8,
    pub target_days: u8,
    pub completed_today: bool,
    pub target_met: bool,
}

/// Build the weekly summary for one habit
pub fn weekly_summary(habit: &Habit, records: &[CompletionRecord], today: NaiveDate) -> HabitWeekSummary {
    let progress = weekly_progress(&habit.id, records, today);
    let completed_days = progress.iter().filter(|done| **done).count() as u8;

    HabitWeekSummary {
        progress,
        completed_days,
        target_days: habit.target_days,
        completed_today: progress[WEEK_DAYS - 1],
        target_met: completed_days >= habit.target_days,
    }
}
