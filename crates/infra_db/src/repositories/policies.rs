//! Policies repository implementation

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

/// A row from the `policies` table
#[derive(Debug, Clone, FromRow)]
pub struct PolicyRow {
    pub policy_id: Uuid,
    pub policy_number: String,
    pub holder_id: Uuid,
    pub insurer_id: Uuid,
    pub coverage_start: NaiveDate,
    pub coverage_end: Option<NaiveDate>,
    pub status: String,
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

const POLICY_COLUMNS: &str = r#"
    policy_id, policy_number, holder_id, insurer_id,
    coverage_start, coverage_end, status, details,
    created_at, updated_at
"#;

/// Repository for policy data
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, policy_id: Uuid) -> Result<PolicyRow, DatabaseError> {
        sqlx::query_as::<_, PolicyRow>(&format!(
            "SELECT {POLICY_COLUMNS} FROM policies WHERE policy_id = $1"
        ))
        .bind(policy_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Policy", policy_id))
    }

    pub async fn find_by_holder(&self, holder_id: Uuid) -> Result<Vec<PolicyRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PolicyRow>(&format!(
            "SELECT {POLICY_COLUMNS} FROM policies WHERE holder_id = $1 ORDER BY created_at"
        ))
        .bind(holder_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert(&self, policy: &PolicyRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO policies (
                policy_id, policy_number, holder_id, insurer_id,
                coverage_start, coverage_end, status, details,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(policy.policy_id)
        .bind(&policy.policy_number)
        .bind(policy.holder_id)
        .bind(policy.insurer_id)
        .bind(policy.coverage_start)
        .bind(policy.coverage_end)
        .bind(&policy.status)
        .bind(&policy.details)
        .bind(policy.created_at)
        .bind(policy.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
