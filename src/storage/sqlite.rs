/// SQLite implementation of the planner storage interface
///
/// This module provides the concrete SQLite implementation for storing
/// and retrieving habits, habit logs and tasks. It handles all SQL queries
/// and row conversion.

use std::path::PathBuf;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{
    parse_calendar_date, CompletionRecord, Habit, HabitId, LogId, TaskId, TaskPriority, TaskRecord,
};
use crate::storage::{migrations, PlannerStorage, StorageError, ToggleOutcome};

const HABIT_COLUMNS: &str = "id, name, icon, color, target_days, created_at";
const LOG_COLUMNS: &str = "id, habit_id, completed_date, created_at";
const TASK_COLUMNS: &str = "id, title, completed, priority, due_date, created_at, updated_at";

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the PlannerStorage trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        let storage = Self::from_connection(conn)?;
        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(storage)
    }

    /// Open a private in-memory database (used by tests)
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, StorageError> {
        // Needed for ON DELETE CASCADE on habit_logs
        conn.execute("PRAGMA foreign_keys = ON", [])
            .map_err(|e| StorageError::Connection(format!("Failed to enable foreign keys: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    fn habit_exists(&self, habit_id: &HabitId) -> Result<bool, StorageError> {
        let found = self.conn
            .query_row(
                "SELECT 1 FROM habits WHERE id = ?1",
                params![habit_id.to_string()],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

// Row conversion helpers

fn conversion_error<E>(column: usize, error: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(error))
}

fn timestamp_column(row: &Row, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|e| conversion_error(column, e))
}

fn date_column(row: &Row, column: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(column)?;
    parse_calendar_date(&raw).map_err(|e| conversion_error(column, e))
}

fn habit_from_row(row: &Row) -> rusqlite::Result<Habit> {
    let id_str: String = row.get(0)?;
    let id = HabitId::from_string(&id_str).map_err(|e| conversion_error(0, e))?;

    Ok(Habit::from_existing(
        id,
        row.get(1)?, // name
        row.get(2)?, // icon
        row.get(3)?, // color
        row.get(4)?, // target_days
        timestamp_column(row, 5)?,
    ))
}

fn log_from_row(row: &Row) -> rusqlite::Result<CompletionRecord> {
    let id_str: String = row.get(0)?;
    let id = LogId::from_string(&id_str).map_err(|e| conversion_error(0, e))?;

    let habit_id_str: String = row.get(1)?;
    let habit_id = HabitId::from_string(&habit_id_str).map_err(|e| conversion_error(1, e))?;

    Ok(CompletionRecord::from_existing(
        id,
        habit_id,
        date_column(row, 2)?,
        timestamp_column(row, 3)?,
    ))
}

fn task_from_row(row: &Row) -> rusqlite::Result<TaskRecord> {
    let id_str: String = row.get(0)?;
    let id = TaskId::from_string(&id_str).map_err(|e| conversion_error(0, e))?;

    let priority_str: String = row.get(3)?;
    let priority: TaskPriority = priority_str.parse().map_err(|e| conversion_error(3, e))?;

    let due_date = match row.get::<_, Option<String>>(4)? {
        Some(raw) => Some(parse_calendar_date(&raw).map_err(|e| conversion_error(4, e))?),
        None => None,
    };

    Ok(TaskRecord::from_existing(
        id,
        row.get(1)?, // title
        row.get(2)?, // completed
        priority,
        due_date,
        timestamp_column(row, 5)?,
        timestamp_column(row, 6)?,
    ))
}

fn date_to_sql(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl PlannerStorage for SqliteStorage {
    fn create_habit(&self, habit: &Habit) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO habits (id, name, icon, color, target_days, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                habit.id.to_string(),
                habit.name,
                habit.icon,
                habit.color,
                habit.target_days,
                habit.created_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Created habit: {} ({})", habit.name, habit.id);
        Ok(())
    }

    fn get_habit(&self, habit_id: &HabitId) -> Result<Habit, StorageError> {
        let sql = format!("SELECT {} FROM habits WHERE id = ?1", HABIT_COLUMNS);

        self.conn
            .query_row(&sql, params![habit_id.to_string()], habit_from_row)
            .optional()?
            .ok_or_else(|| StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            })
    }

    fn list_habits(&self) -> Result<Vec<Habit>, StorageError> {
        let sql = format!(
            "SELECT {} FROM habits ORDER BY created_at DESC, rowid DESC",
            HABIT_COLUMNS
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let habits = stmt
            .query_map([], habit_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(habits)
    }

    /// Hard delete; logs go with the habit through the foreign key cascade
    fn delete_habit(&self, habit_id: &HabitId) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "DELETE FROM habits WHERE id = ?1",
            params![habit_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }

        tracing::debug!("Deleted habit: {}", habit_id);
        Ok(())
    }

    fn list_logs(&self) -> Result<Vec<CompletionRecord>, StorageError> {
        let sql = format!(
            "SELECT {} FROM habit_logs ORDER BY completed_date DESC, rowid DESC",
            LOG_COLUMNS
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let logs = stmt
            .query_map([], log_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(logs)
    }

    fn list_logs_for_habit(&self, habit_id: &HabitId) -> Result<Vec<CompletionRecord>, StorageError> {
        let sql = format!(
            "SELECT {} FROM habit_logs WHERE habit_id = ?1
             ORDER BY completed_date DESC, rowid DESC",
            LOG_COLUMNS
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let logs = stmt
            .query_map(params![habit_id.to_string()], log_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(logs)
    }

    fn toggle_log(&self, habit_id: &HabitId, date: NaiveDate) -> Result<ToggleOutcome, StorageError> {
        if !self.habit_exists(habit_id)? {
            return Err(StorageError::HabitNotFound {
                habit_id: habit_id.to_string(),
            });
        }

        let tx = self.conn.unchecked_transaction()?;

        let existing: Option<String> = tx
            .query_row(
                "SELECT id FROM habit_logs WHERE habit_id = ?1 AND completed_date = ?2",
                params![habit_id.to_string(), date_to_sql(date)],
                |row| row.get(0),
            )
            .optional()?;

        let outcome = match existing {
            Some(id_str) => {
                let log_id = LogId::from_string(&id_str).map_err(|e| StorageError::CorruptRow {
                    table: "habit_logs",
                    message: e.to_string(),
                })?;
                tx.execute("DELETE FROM habit_logs WHERE id = ?1", params![id_str])?;
                tracing::debug!("Cleared habit {} on {}", habit_id, date);
                ToggleOutcome::Cleared(log_id)
            }
            None => {
                let record = CompletionRecord::new(habit_id.clone(), date);
                tx.execute(
                    "INSERT INTO habit_logs (id, habit_id, completed_date, created_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        record.id.to_string(),
                        record.habit_id.to_string(),
                        date_to_sql(record.completed_date),
                        record.created_at.to_rfc3339(),
                    ],
                )?;
                tracing::debug!("Completed habit {} on {}", habit_id, date);
                ToggleOutcome::Completed(record)
            }
        };

        tx.commit()?;
        Ok(outcome)
    }

    fn create_task(&self, task: &TaskRecord) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO tasks (id, title, completed, priority, due_date, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                task.id.to_string(),
                task.title,
                task.completed,
                task.priority.as_str(),
                task.due_date.map(date_to_sql),
                task.created_at.to_rfc3339(),
                task.updated_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Created task: {} ({})", task.title, task.id);
        Ok(())
    }

    fn get_task(&self, task_id: &TaskId) -> Result<TaskRecord, StorageError> {
        let sql = format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS);

        self.conn
            .query_row(&sql, params![task_id.to_string()], task_from_row)
            .optional()?
            .ok_or_else(|| StorageError::TaskNotFound {
                task_id: task_id.to_string(),
            })
    }

    fn list_tasks(&self) -> Result<Vec<TaskRecord>, StorageError> {
        let sql = format!(
            "SELECT {} FROM tasks ORDER BY created_at DESC, rowid DESC",
            TASK_COLUMNS
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    fn toggle_task(&self, task_id: &TaskId) -> Result<TaskRecord, StorageError> {
        let mut task = self.get_task(task_id)?;
        task.toggle();
        self.update_task(&task)?;
        Ok(task)
    }

    fn update_task(&self, task: &TaskRecord) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "UPDATE tasks SET
                title = ?2,
                completed = ?3,
                priority = ?4,
                due_date = ?5,
                updated_at = ?6
             WHERE id = ?1",
            params![
                task.id.to_string(),
                task.title,
                task.completed,
                task.priority.as_str(),
                task.due_date.map(date_to_sql),
                task.updated_at.to_rfc3339(),
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::TaskNotFound {
                task_id: task.id.to_string(),
            });
        }

        tracing::debug!("Updated task: {} ({})", task.title, task.id);
        Ok(())
    }

    fn delete_task(&self, task_id: &TaskId) -> Result<(), StorageError> {
        let rows_affected = self.conn.execute(
            "DELETE FROM tasks WHERE id = ?1",
            params![task_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::TaskNotFound {
                task_id: task_id.to_string(),
            });
        }

        tracing::debug!("Deleted task: {}", task_id);
        Ok(())
    }
}
