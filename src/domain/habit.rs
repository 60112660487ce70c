/// Habit entity and related functionality
///
/// This module defines the Habit struct that represents something the user
/// wants to do several days a week, along with its validation rules.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::domain::{HabitId, DomainError};

pub const DEFAULT_ICON: &str = "check";
pub const DEFAULT_COLOR: &str = "#3b82f6";
pub const DEFAULT_TARGET_DAYS: u8 = 7;

/// A habit the user marks done on individual calendar days
///
/// Completions live in separate `CompletionRecord`s keyed by the habit ID.
/// `target_days` is how many days per week the user aims for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Unique identifier for this habit
    pub id: HabitId,
    /// Display name (e.g., "Drink water", "Read 20 pages")
    pub name: String,
    /// Icon name shown next to the habit
    pub icon: String,
    /// Accent color as `#rrggbb`
    pub color: String,
    /// Target number of completions per week (1-7)
    pub target_days: u8,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a new habit with validation
    ///
    /// Missing icon and color fall back to the defaults used by the app.
    pub fn new(
        name: String,
        icon: Option<String>,
        color: Option<String>,
        target_days: Option<u8>,
    ) -> Result<Self, DomainError> {
        let name = name.trim().to_string();
        let icon = icon
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| DEFAULT_ICON.to_string());
        let color = color
            .map(|c| c.trim().to_lowercase())
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());
        let target_days = target_days.unwrap_or(DEFAULT_TARGET_DAYS);

        Self::validate_name(&name)?;
        Self::validate_color(&color)?;
        Self::validate_target_days(target_days)?;

        Ok(Self {
            id: HabitId::new(),
            name,
            icon,
            color,
            target_days,
            created_at: Utc::now(),
        })
    }

    /// Create a habit from existing data (used when loading from database)
    ///
    /// This constructor assumes data is already validated.
    pub fn from_existing(
        id: HabitId,
        name: String,
        icon: String,
        color: String,
        target_days: u8,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            icon,
            color,
            target_days,
            created_at,
        }
    }

    /// First letter of the name, upper-cased, used as the badge text
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }

    // Validation helper methods

    fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be empty".to_string()
            ));
        }

        if name.chars().count() > 100 {
            return Err(DomainError::InvalidHabitName(
                "Habit name cannot be longer than 100 characters".to_string()
            ));
        }

        Ok(())
    }

    /// Colors are stored as `#rrggbb`
    fn validate_color(color: &str) -> Result<(), DomainError> {
        let valid = color.len() == 7
            && color.starts_with('#')
            && color[1..].chars().all(|c| c.is_ascii_hexdigit());

        if !valid {
            return Err(DomainError::InvalidColor(format!(
                "Color must look like #3b82f6, got '{}'",
                color
            )));
        }
        Ok(())
    }

    fn validate_target_days(target_days: u8) -> Result<(), DomainError> {
        if target_days == 0 || target_days > 7 {
            return Err(DomainError::InvalidTargetDays(format!(
                "Target must be 1-7 days per week, got {}",
                target_days
            )));
        }
        Ok(())
    }
}
