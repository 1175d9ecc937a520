//! Users repository implementation

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

/// A row from the `users` table
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub user_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Repository for user data
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, user_id: Uuid) -> Result<UserRow, DatabaseError> {
        sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, name, role, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("User", user_id))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, DatabaseError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, name, role, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn insert(&self, user: &UserRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, email, name, role, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.user_id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.role)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
