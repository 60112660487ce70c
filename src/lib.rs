/// Public library interface for the Habit Planner MCP server
///
/// This module exports the server, the statistics engine and the public
/// types that other applications or tests can use.

use std::path::PathBuf;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;

pub mod analytics;
pub mod mcp;
pub mod tools;

// Re-export public modules and types
pub use analytics::{HabitStatisticsEngine, HabitWeekSummary, StatisticsSummary};
pub use domain::*;
pub use storage::{PlannerStorage, SqliteStorage, StorageError, ToggleOutcome};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Habit planner server that implements the MCP protocol
///
/// Holds the SQLite store the tools read from and write to.
pub struct PlannerServer {
    storage: SqliteStorage,
}

impl PlannerServer {
    /// Create a new planner server with the specified database path
    ///
    /// This will initialize the SQLite database with the required schema
    /// if it doesn't already exist.
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Habit Planner server with database: {:?}", db_path);

        let storage = SqliteStorage::new(db_path)?;
        Ok(Self { storage })
    }

    /// Create a server backed by a throwaway in-memory database
    pub fn in_memory() -> Result<Self, ServerError> {
        Ok(Self {
            storage: SqliteStorage::in_memory()?,
        })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// Returns once stdin is closed or an I/O error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        let habits = self.storage.list_habits()?;
        let tasks = self.storage.list_tasks()?;
        tracing::info!(
            "Server started successfully, found {} habits and {} tasks",
            habits.len(),
            tasks.len()
        );

        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }
}
