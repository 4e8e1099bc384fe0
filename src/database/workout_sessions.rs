// ABOUTME: Workout session database operations
// ABOUTME: Sessions are insert-only; reads are always scoped to the owning user

use super::{decode_timestamp, decode_uuid, encode_timestamp, Database};
use crate::constants::limits::WORKOUT_HISTORY_LIMIT;
use fitcoach_core::errors::AppResult;
use fitcoach_core::models::{Plan, WorkoutSession};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the workout sessions table and its history index
    pub(super) async fn migrate_workout_sessions(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                morphology TEXT NOT NULL,
                height REAL NOT NULL,
                weight REAL NOT NULL,
                photo_url TEXT,
                workout_plan TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_sessions_user_created ON workout_sessions(user_id, created_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Persist a generated session
    pub async fn create_workout_session(&self, session: &WorkoutSession) -> AppResult<Uuid> {
        let plan_json = serde_json::to_string(&session.workout_plan)?;

        sqlx::query(
            r"
            INSERT INTO workout_sessions
                (id, user_id, morphology, height, weight, photo_url, workout_plan, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(session.id.to_string())
        .bind(session.user_id.to_string())
        .bind(&session.morphology)
        .bind(session.height)
        .bind(session.weight)
        .bind(&session.photo_url)
        .bind(plan_json)
        .bind(encode_timestamp(&session.created_at))
        .execute(&self.pool)
        .await?;

        Ok(session.id)
    }

    /// Get a session only if it belongs to `user_id`
    pub async fn get_workout_session_for_user(
        &self,
        session_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<WorkoutSession>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, morphology, height, weight, photo_url, workout_plan, created_at
            FROM workout_sessions WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(session_id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_session).transpose()
    }

    /// Most recent sessions of a user, newest first
    pub async fn list_workout_sessions(&self, user_id: Uuid) -> AppResult<Vec<WorkoutSession>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, morphology, height, weight, photo_url, workout_plan, created_at
            FROM workout_sessions WHERE user_id = $1
            ORDER BY created_at DESC, rowid DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(WORKOUT_HISTORY_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_session).collect()
    }

    fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> AppResult<WorkoutSession> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let plan_json: String = row.try_get("workout_plan")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(WorkoutSession {
            id: decode_uuid(&id)?,
            user_id: decode_uuid(&user_id)?,
            morphology: row.try_get("morphology")?,
            height: row.try_get("height")?,
            weight: row.try_get("weight")?,
            photo_url: row.try_get("photo_url")?,
            workout_plan: serde_json::from_str::<Plan>(&plan_json)?,
            created_at: decode_timestamp(&created_at)?,
        })
    }
}
