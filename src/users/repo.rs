use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::ApiError;

/// User record in the store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 PHC string, never exposed in JSON
    pub phone: String,
    pub role: String,
    pub created_at: OffsetDateTime,
}

impl User {
    /// Find a user by email. Exact, case-sensitive match.
    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, phone, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await
    }

    /// Insert a new user. A single statement; the store's unique constraint
    /// on email is the only duplicate check.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        phone: &str,
        role: &str,
    ) -> Result<User, ApiError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, phone, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, phone, role, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(phone)
        .bind(role)
        .fetch_one(db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                ApiError::DuplicateAccount { email: email.to_string() }
            }
            _ => ApiError::StoreWriteFailed(e),
        })
    }

    pub async fn list(db: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, phone, role, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(db)
        .await
    }

    /// Delete by email, returning how many rows matched. Zero is not an
    /// error; the operation is idempotent.
    pub async fn delete_by_email(db: &PgPool, email: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(r#"DELETE FROM users WHERE email = $1"#)
            .bind(email)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
