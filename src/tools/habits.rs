/// Tools for managing habits and their daily completions
///
/// Implements habit_create, habit_delete, habit_toggle and habit_list.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analytics::{HabitStatisticsEngine, HabitWeekSummary};
use crate::domain::{parse_calendar_date, Habit};
use crate::storage::PlannerStorage;
use crate::tools::{parse_habit_id, ToolError};

/// Parameters for creating a new habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHabitParams {
    /// Name of the habit
    pub name: String,
    /// Icon name (defaults to "check")
    pub icon: Option<String>,
    /// Accent color as #rrggbb (defaults to #3b82f6)
    pub color: Option<String>,
    /// Target completions per week, 1-7 (defaults to 7)
    pub target_days: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct CreateHabitResponse {
    pub habit_id: String,
    pub message: String,
}

pub fn create_habit<S: PlannerStorage>(
    storage: &S,
    params: CreateHabitParams,
) -> Result<CreateHabitResponse, ToolError> {
    let habit = Habit::new(params.name, params.icon, params.color, params.target_days)?;
    storage.create_habit(&habit)?;

    Ok(CreateHabitResponse {
        habit_id: habit.id.to_string(),
        message: format!(
            "✅ Created habit '{}' (target {}/7 days)\nHabit ID: {}",
            habit.name, habit.target_days, habit.id
        ),
    })
}

/// Parameters naming a single habit
#[derive(Debug, Deserialize, JsonSchema)]
pub struct HabitIdParams {
    /// ID of the habit
    pub habit_id: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteHabitResponse {
    pub message: String,
}

/// Delete a habit; its completion history is removed with it
pub fn delete_habit<S: PlannerStorage>(
    storage: &S,
    params: HabitIdParams,
) -> Result<DeleteHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let habit = storage.get_habit(&habit_id)?;
    storage.delete_habit(&habit_id)?;

    Ok(DeleteHabitResponse {
        message: format!("🗑️ Deleted habit '{}' and its history", habit.name),
    })
}

/// Parameters for toggling a habit on a day
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ToggleHabitParams {
    /// ID of the habit
    pub habit_id: String,
    /// Day to toggle (YYYY-MM-DD, defaults to today)
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ToggleHabitResponse {
    pub completed: bool,
    pub date: NaiveDate,
    pub week: HabitWeekSummary,
    pub message: String,
}

/// Mark a habit done for a day, or undo an existing completion
pub fn toggle_habit<S: PlannerStorage>(
    storage: &S,
    params: ToggleHabitParams,
    today: NaiveDate,
) -> Result<ToggleHabitResponse, ToolError> {
    let habit_id = parse_habit_id(&params.habit_id)?;
    let date = match params.date.as_deref() {
        Some(raw) => parse_calendar_date(raw)?,
        None => today,
    };

    let habit = storage.get_habit(&habit_id)?;
    let outcome = storage.toggle_log(&habit_id, date)?;
    let records = storage.list_logs_for_habit(&habit_id)?;
    let week = HabitStatisticsEngine::new().weekly_summary(&habit, &records, today);

    let message = if outcome.is_completed() {
        format!(
            "🔥 Marked '{}' done for {} ({}/{} days this week)",
            habit.name, date, week.completed_days, week.target_days
        )
    } else {
        format!(
            "↩️ Unmarked '{}' for {} ({}/{} days this week)",
            habit.name, date, week.completed_days, week.target_days
        )
    };

    Ok(ToggleHabitResponse {
        completed: outcome.is_completed(),
        date,
        week,
        message,
    })
}

/// Parameters for listing habits (none)
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ListHabitsParams {}

/// A habit together with its current week
#[derive(Debug, Serialize)]
pub struct HabitOverview {
    pub habit_id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub week: HabitWeekSummary,
}

#[derive(Debug, Serialize)]
pub struct ListHabitsResponse {
    pub habits: Vec<HabitOverview>,
    pub message: String,
}

pub fn list_habits<S: PlannerStorage>(
    storage: &S,
    _params: ListHabitsParams,
    today: NaiveDate,
) -> Result<ListHabitsResponse, ToolError> {
    let engine = HabitStatisticsEngine::new();
    let habits = storage.list_habits()?;
    let records = storage.list_logs()?;

    let overviews: Vec<HabitOverview> = habits
        .into_iter()
        .map(|habit| {
            let week = engine.weekly_summary(&habit, &records, today);
            HabitOverview {
                habit_id: habit.id.to_string(),
                name: habit.name,
                icon: habit.icon,
                color: habit.color,
                week,
            }
        })
        .collect();

    let message = if overviews.is_empty() {
        "No habits yet. Create your first habit to get started!".to_string()
    } else {
        overviews
            .iter()
            .map(|h| {
                let row: String = h.week.progress
                    .iter()
                    .map(|done| if *done { '●' } else { '○' })
                    .collect();
                format!(
                    "🎯 {} ({})\n   {} {}/{} days this week{}",
                    h.name,
                    h.habit_id,
                    row,
                    h.week.completed_days,
                    h.week.target_days,
                    if h.week.completed_today { " | done today" } else { "" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    Ok(ListHabitsResponse {
        habits: overviews,
        message,
    })
}
