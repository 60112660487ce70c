/// Activity streak over the combined completion log
///
/// The streak counts consecutive calendar days with at least one completion
/// of any habit, ending today or yesterday.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::domain::CompletionRecord;

const SECONDS_PER_DAY: i64 = 86_400;

/// Current consecutive-day streak across all habits
///
/// Walks the distinct completion dates from newest to oldest. Each date must
/// be the cursor day or the day before it; the cursor then moves to that
/// date. Starting the cursor at `today` lets a streak that ended yesterday
/// survive until today is logged.
pub fn current_streak(records: &[CompletionRecord], today: NaiveDate) -> u32 {
    let distinct_dates: BTreeSet<NaiveDate> = records
        .iter()
        .map(|record| record.completed_date)
        .collect();

    let mut streak = 0;
    let mut cursor = today;

    for date in distinct_dates.into_iter().rev() {
        match floor_day_difference(cursor, date) {
            0 | 1 => {
                streak += 1;
                cursor = date;
            }
            _ => break,
        }
    }

    streak
}

/// `floor((later - earlier) / 1 day)`
fn floor_day_difference(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_seconds().div_euclid(SECONDS_PER_DAY)
}
