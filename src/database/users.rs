// ABOUTME: User management database operations
// ABOUTME: Handles account creation, lookup by id or email, and profile updates

use super::{decode_timestamp, decode_uuid, encode_timestamp, Database};
use fitcoach_core::errors::{AppError, AppResult};
use fitcoach_core::models::{Gender, ProfileUpdate, User};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the users table
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                name TEXT NOT NULL,
                gender TEXT NOT NULL CHECK (gender IN ('male', 'female')),
                age INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a new user
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the email is already registered
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        let result = sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, name, gender, age, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.gender.as_str())
        .bind(i64::from(user.age))
        .bind(encode_timestamp(&user.created_at))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user.id),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::already_exists("Cet email est déjà utilisé"))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Get a user by ID
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        self.get_user_impl("id", &user_id.to_string()).await
    }

    /// Get a user by (already normalized) email
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.get_user_impl("email", email).await
    }

    /// Apply a partial profile update and return the stored result
    ///
    /// Returns `None` when the user does not exist.
    pub async fn update_user_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> AppResult<Option<User>> {
        let Some(mut user) = self.get_user(user_id).await? else {
            return Ok(None);
        };
        if update.is_empty() {
            return Ok(Some(user));
        }

        update.apply_to(&mut user);
        sqlx::query("UPDATE users SET name = $2, gender = $3, age = $4 WHERE id = $1")
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(user.gender.as_str())
            .bind(i64::from(user.age))
            .execute(&self.pool)
            .await?;

        Ok(Some(user))
    }

    async fn get_user_impl(&self, field: &str, value: &str) -> AppResult<Option<User>> {
        let query = format!(
            r"
            SELECT id, email, password_hash, name, gender, age, created_at
            FROM users WHERE {field} = $1
            "
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    /// Convert a database row to a User struct
    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> AppResult<User> {
        let id: String = row.try_get("id")?;
        let gender: String = row.try_get("gender")?;
        let age: i64 = row.try_get("age")?;
        let created_at: String = row.try_get("created_at")?;

        Ok(User {
            id: decode_uuid(&id)?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            name: row.try_get("name")?,
            gender: gender.parse::<Gender>().map_err(AppError::database)?,
            age: u32::try_from(age)
                .map_err(|_| AppError::database(format!("Invalid stored age {age}")))?,
            created_at: decode_timestamp(&created_at)?,
        })
    }
}
