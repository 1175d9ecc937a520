//! Claims repository implementation
//!
//! Covers the claim aggregate's table group: claims, documents, notes,
//! the append-only decision log, and the escalation work items.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::DatabaseError;

/// A row from the `claims` table
#[derive(Debug, Clone, FromRow)]
pub struct ClaimRow {
    pub claim_id: Uuid,
    pub claim_number: String,
    pub policy_id: Uuid,
    pub claimant_id: Uuid,
    pub adjuster_id: Option<Uuid>,
    pub status: String,
    pub incident_date: Option<NaiveDate>,
    pub incident_location: Option<String>,
    pub description: Option<String>,
    pub transcript_text: Option<String>,
    pub estimated_amount: Option<Decimal>,
    /// Flag observations serialized as a JSON array
    pub fraud_flags: serde_json::Value,
    pub risk_score: i16,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row from the `claim_documents` table
#[derive(Debug, Clone, FromRow)]
pub struct DocumentRow {
    pub document_id: Uuid,
    pub claim_id: Uuid,
    pub kind: String,
    pub file_path: String,
    pub file_name: String,
    pub file_size: i64,
    pub uploaded_by: Uuid,
    pub content_hash: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// A row from the `claim_notes` table
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub note_id: Uuid,
    pub claim_id: Uuid,
    pub author_id: Uuid,
    pub note_text: String,
    pub created_at: DateTime<Utc>,
}

/// A row from the `claim_decisions` table
#[derive(Debug, Clone, FromRow)]
pub struct DecisionRow {
    pub decision_id: Uuid,
    pub claim_id: Uuid,
    pub kind: String,
    pub decided_by: Uuid,
    pub reason: Option<String>,
    pub risk_score_at_decision: i16,
    pub decided_at: DateTime<Utc>,
}

/// A row from the `investigations` table
#[derive(Debug, Clone, FromRow)]
pub struct InvestigationRow {
    pub investigation_id: Uuid,
    pub claim_id: Uuid,
    pub investigator_id: Uuid,
    pub assigned_by: Uuid,
    pub status: String,
    pub findings: Option<String>,
    pub report_id: Option<Uuid>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// A row from the `legal_cases` table
#[derive(Debug, Clone, FromRow)]
pub struct LegalCaseRow {
    pub legal_case_id: Uuid,
    pub claim_id: Uuid,
    pub escalated_by: Uuid,
    pub legal_officer_id: Option<Uuid>,
    pub status: String,
    pub notes: Option<String>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

const CLAIM_COLUMNS: &str = r#"
    claim_id, claim_number, policy_id, claimant_id, adjuster_id,
    status, incident_date, incident_location, description, transcript_text,
    estimated_amount, fraud_flags, risk_score, version, created_at, updated_at
"#;

/// Repository for the claims table group
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // -- claims -----------------------------------------------------------

    pub async fn get_by_id(&self, claim_id: Uuid) -> Result<ClaimRow, DatabaseError> {
        sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE claim_id = $1"
        ))
        .bind(claim_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Claim", claim_id))
    }

    pub async fn find_by_policy(&self, policy_id: Uuid) -> Result<Vec<ClaimRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE policy_id = $1 ORDER BY created_at"
        ))
        .bind(policy_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_status(&self, status: &str) -> Result<Vec<ClaimRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimRow>(&format!(
            "SELECT {CLAIM_COLUMNS} FROM claims WHERE status = $1 ORDER BY created_at"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert(&self, claim: &ClaimRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO claims (
                claim_id, claim_number, policy_id, claimant_id, adjuster_id,
                status, incident_date, incident_location, description, transcript_text,
                estimated_amount, fraud_flags, risk_score, version, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(claim.claim_id)
        .bind(&claim.claim_number)
        .bind(claim.policy_id)
        .bind(claim.claimant_id)
        .bind(claim.adjuster_id)
        .bind(&claim.status)
        .bind(claim.incident_date)
        .bind(&claim.incident_location)
        .bind(&claim.description)
        .bind(&claim.transcript_text)
        .bind(claim.estimated_amount)
        .bind(&claim.fraud_flags)
        .bind(claim.risk_score)
        .bind(claim.version)
        .bind(claim.created_at)
        .bind(claim.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Updates a claim if its stored version still matches `expected_version`
    ///
    /// Returns the new version on success. A missing row is reported as
    /// `NotFound`; a version mismatch as `StaleVersion`.
    pub async fn update_with_version(
        &self,
        claim: &ClaimRow,
        expected_version: i32,
    ) -> Result<i32, DatabaseError> {
        let new_version: Option<(i32,)> = sqlx::query_as(
            r#"
            UPDATE claims SET
                adjuster_id = $2,
                status = $3,
                incident_date = $4,
                incident_location = $5,
                description = $6,
                transcript_text = $7,
                estimated_amount = $8,
                fraud_flags = $9,
                risk_score = $10,
                version = version + 1,
                updated_at = $11
            WHERE claim_id = $1 AND version = $12
            RETURNING version
            "#,
        )
        .bind(claim.claim_id)
        .bind(claim.adjuster_id)
        .bind(&claim.status)
        .bind(claim.incident_date)
        .bind(&claim.incident_location)
        .bind(&claim.description)
        .bind(&claim.transcript_text)
        .bind(claim.estimated_amount)
        .bind(&claim.fraud_flags)
        .bind(claim.risk_score)
        .bind(claim.updated_at)
        .bind(expected_version)
        .fetch_optional(&self.pool)
        .await?;

        match new_version {
            Some((version,)) => Ok(version),
            None => {
                // Distinguish a missing claim from a lost race.
                self.get_by_id(claim.claim_id).await?;
                Err(DatabaseError::stale_version(
                    "Claim",
                    claim.claim_id,
                    expected_version as u32,
                ))
            }
        }
    }

    // -- documents and notes ----------------------------------------------

    /// Inserts a document; replays of already stored documents are no-ops
    pub async fn upsert_document(&self, doc: &DocumentRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO claim_documents (
                document_id, claim_id, kind, file_path, file_name,
                file_size, uploaded_by, content_hash, uploaded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (document_id) DO NOTHING
            "#,
        )
        .bind(doc.document_id)
        .bind(doc.claim_id)
        .bind(&doc.kind)
        .bind(&doc.file_path)
        .bind(&doc.file_name)
        .bind(doc.file_size)
        .bind(doc.uploaded_by)
        .bind(&doc.content_hash)
        .bind(doc.uploaded_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_documents(&self, claim_id: Uuid) -> Result<Vec<DocumentRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT document_id, claim_id, kind, file_path, file_name,
                   file_size, uploaded_by, content_hash, uploaded_at
            FROM claim_documents
            WHERE claim_id = $1
            ORDER BY uploaded_at
            "#,
        )
        .bind(claim_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Inserts a note; replays of already stored notes are no-ops
    pub async fn upsert_note(&self, note: &NoteRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO claim_notes (note_id, claim_id, author_id, note_text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (note_id) DO NOTHING
            "#,
        )
        .bind(note.note_id)
        .bind(note.claim_id)
        .bind(note.author_id)
        .bind(&note.note_text)
        .bind(note.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn find_notes(&self, claim_id: Uuid) -> Result<Vec<NoteRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, NoteRow>(
            r#"
            SELECT note_id, claim_id, author_id, note_text, created_at
            FROM claim_notes
            WHERE claim_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(claim_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // -- decision log -----------------------------------------------------

    /// Appends a decision; a retried append of the same id is a no-op
    pub async fn insert_decision(&self, decision: &DecisionRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO claim_decisions (
                decision_id, claim_id, kind, decided_by, reason,
                risk_score_at_decision, decided_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (decision_id) DO NOTHING
            "#,
        )
        .bind(decision.decision_id)
        .bind(decision.claim_id)
        .bind(&decision.kind)
        .bind(decision.decided_by)
        .bind(&decision.reason)
        .bind(decision.risk_score_at_decision)
        .bind(decision.decided_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Decisions in insertion order
    pub async fn find_decisions(&self, claim_id: Uuid) -> Result<Vec<DecisionRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, DecisionRow>(
            r#"
            SELECT decision_id, claim_id, kind, decided_by, reason,
                   risk_score_at_decision, decided_at
            FROM claim_decisions
            WHERE claim_id = $1
            ORDER BY seq
            "#,
        )
        .bind(claim_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // -- investigations ---------------------------------------------------

    pub async fn insert_investigation(
        &self,
        row: &InvestigationRow,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO investigations (
                investigation_id, claim_id, investigator_id, assigned_by,
                status, findings, report_id, opened_at, closed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(row.investigation_id)
        .bind(row.claim_id)
        .bind(row.investigator_id)
        .bind(row.assigned_by)
        .bind(&row.status)
        .bind(&row.findings)
        .bind(row.report_id)
        .bind(row.opened_at)
        .bind(row.closed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_investigation(
        &self,
        investigation_id: Uuid,
    ) -> Result<InvestigationRow, DatabaseError> {
        sqlx::query_as::<_, InvestigationRow>(
            r#"
            SELECT investigation_id, claim_id, investigator_id, assigned_by,
                   status, findings, report_id, opened_at, closed_at
            FROM investigations
            WHERE investigation_id = $1
            "#,
        )
        .bind(investigation_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Investigation", investigation_id))
    }

    pub async fn update_investigation(
        &self,
        row: &InvestigationRow,
    ) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE investigations
            SET status = $2, findings = $3, report_id = $4, closed_at = $5
            WHERE investigation_id = $1
            "#,
        )
        .bind(row.investigation_id)
        .bind(&row.status)
        .bind(&row.findings)
        .bind(row.report_id)
        .bind(row.closed_at)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(
                "Investigation",
                row.investigation_id,
            ));
        }
        Ok(())
    }

    pub async fn find_investigations(
        &self,
        claim_id: Uuid,
    ) -> Result<Vec<InvestigationRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, InvestigationRow>(
            r#"
            SELECT investigation_id, claim_id, investigator_id, assigned_by,
                   status, findings, report_id, opened_at, closed_at
            FROM investigations
            WHERE claim_id = $1
            ORDER BY opened_at
            "#,
        )
        .bind(claim_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // -- legal cases ------------------------------------------------------

    pub async fn insert_legal_case(&self, row: &LegalCaseRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO legal_cases (
                legal_case_id, claim_id, escalated_by, legal_officer_id,
                status, notes, opened_at, closed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(row.legal_case_id)
        .bind(row.claim_id)
        .bind(row.escalated_by)
        .bind(row.legal_officer_id)
        .bind(&row.status)
        .bind(&row.notes)
        .bind(row.opened_at)
        .bind(row.closed_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_legal_case(&self, legal_case_id: Uuid) -> Result<LegalCaseRow, DatabaseError> {
        sqlx::query_as::<_, LegalCaseRow>(
            r#"
            SELECT legal_case_id, claim_id, escalated_by, legal_officer_id,
                   status, notes, opened_at, closed_at
            FROM legal_cases
            WHERE legal_case_id = $1
            "#,
        )
        .bind(legal_case_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("LegalCase", legal_case_id))
    }

    pub async fn update_legal_case(&self, row: &LegalCaseRow) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            r#"
            UPDATE legal_cases
            SET status = $2, notes = $3, closed_at = $4
            WHERE legal_case_id = $1
            "#,
        )
        .bind(row.legal_case_id)
        .bind(&row.status)
        .bind(&row.notes)
        .bind(row.closed_at)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("LegalCase", row.legal_case_id));
        }
        Ok(())
    }

    pub async fn find_legal_cases(
        &self,
        claim_id: Uuid,
    ) -> Result<Vec<LegalCaseRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, LegalCaseRow>(
            r#"
            SELECT legal_case_id, claim_id, escalated_by, legal_officer_id,
                   status, notes, opened_at, closed_at
            FROM legal_cases
            WHERE claim_id = $1
            ORDER BY opened_at
            "#,
        )
        .bind(claim_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
