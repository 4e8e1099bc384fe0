// ABOUTME: SQLite persistence for users and workout sessions
// ABOUTME: Owns the connection pool and runs idempotent schema migrations at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! A single [`Database`] handle wraps the `SQLite` pool. Query methods are
//! split by table into submodules that extend `impl Database`.

mod users;
mod workout_sessions;

use crate::config::DatabaseUrl;
use chrono::{DateTime, SecondsFormat, Utc};
use fitcoach_core::errors::{AppError, AppResult};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use tracing::info;

/// Database manager for user and workout session storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect to the database and run migrations
    pub async fn new(database_url: &DatabaseUrl) -> AppResult<Self> {
        let pool = match database_url {
            // Every connection to :memory: is a separate database
            DatabaseUrl::Memory => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect(&database_url.to_connection_string())
                    .await?
            }
            DatabaseUrl::SQLite { path } => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                // Ensure SQLite creates the database file if it doesn't exist
                let connection_options = format!("{}?mode=rwc", database_url.to_connection_string());
                SqlitePoolOptions::new().connect(&connection_options).await?
            }
        };

        let db = Self { pool };
        db.migrate().await?;

        info!("Database ready at {}", database_url);
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_workout_sessions().await?;
        Ok(())
    }

    /// Round-trip a trivial query to prove the pool is usable
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Timestamps are stored as fixed-width RFC 3339 text so that string order is
/// chronological order
fn encode_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid stored timestamp '{raw}': {e}")))
}

fn decode_uuid(raw: &str) -> AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(raw)
        .map_err(|e| AppError::database(format!("Invalid stored id '{raw}': {e}")))
}
