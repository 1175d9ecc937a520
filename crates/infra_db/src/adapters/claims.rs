//! PostgreSQL Claims Adapter
//!
//! Implements the `ClaimsPort` trait over the claims, policies, and users
//! repositories. The adapter owns all row-to-domain translation and maps
//! database failures into the port error vocabulary.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{
    ClaimId, CoveragePeriod, DomainPort, InvestigationId, LegalCaseId, PolicyId, PortError, UserId,
};
use domain_claims::{
    Claim, ClaimNote, ClaimStatus, ClaimsPort, Decision, DecisionKind, Document, DocumentKind,
    FlagObservation, Investigation, InvestigationStatus, LegalCase, LegalCaseStatus,
};
use domain_party::{User, UserRole};
use domain_policy::{Policy, PolicyStatus};

use crate::error::DatabaseError;
use crate::repositories::{
    ClaimRow, ClaimsRepository, DecisionRow, DocumentRow, InvestigationRow, LegalCaseRow, NoteRow,
    PolicyRepository, UserRepository,
};

/// PostgreSQL-backed implementation of the `ClaimsPort` trait
#[derive(Debug, Clone)]
pub struct PostgresClaimsAdapter {
    claims: ClaimsRepository,
    policies: PolicyRepository,
    users: UserRepository,
}

impl PostgresClaimsAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            claims: ClaimsRepository::new(pool.clone()),
            policies: PolicyRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }

    /// Loads the full aggregate: claim row plus documents and notes
    async fn load_claim(&self, id: ClaimId) -> Result<Claim, PortError> {
        let row = self.claims.get_by_id(*id.as_uuid()).await?;
        let documents = self.claims.find_documents(*id.as_uuid()).await?;
        let notes = self.claims.find_notes(*id.as_uuid()).await?;
        claim_from_rows(row, documents, notes)
    }
}

impl DomainPort for PostgresClaimsAdapter {}

#[async_trait]
impl ClaimsPort for PostgresClaimsAdapter {
    #[instrument(skip(self, claim), fields(claim_id = %claim.id))]
    async fn insert_claim(&self, claim: &Claim) -> Result<(), PortError> {
        self.claims.insert(&claim_to_row(claim)?).await?;
        for doc in &claim.documents {
            self.claims.upsert_document(&document_to_row(doc)).await?;
        }
        for note in &claim.notes {
            self.claims.upsert_note(&note_to_row(note)).await?;
        }
        Ok(())
    }

    async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError> {
        self.load_claim(id).await
    }

    #[instrument(skip(self, claim), fields(claim_id = %claim.id))]
    async fn update_claim(&self, claim: &Claim, expected_version: u32) -> Result<u32, PortError> {
        let row = claim_to_row(claim)?;
        let new_version = self
            .claims
            .update_with_version(&row, expected_version as i32)
            .await?;
        // Documents and notes are append-only; replays are no-ops.
        for doc in &claim.documents {
            self.claims.upsert_document(&document_to_row(doc)).await?;
        }
        for note in &claim.notes {
            self.claims.upsert_note(&note_to_row(note)).await?;
        }
        Ok(new_version as u32)
    }

    async fn list_claims_for_policy(&self, policy_id: PolicyId) -> Result<Vec<Claim>, PortError> {
        let rows = self.claims.find_by_policy(*policy_id.as_uuid()).await?;
        let mut claims = Vec::with_capacity(rows.len());
        for row in rows {
            claims.push(self.load_claim(ClaimId::from_uuid(row.claim_id)).await?);
        }
        Ok(claims)
    }

    async fn list_claims_by_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, PortError> {
        let rows = self.claims.find_by_status(status.as_str()).await?;
        let mut claims = Vec::with_capacity(rows.len());
        for row in rows {
            claims.push(self.load_claim(ClaimId::from_uuid(row.claim_id)).await?);
        }
        Ok(claims)
    }

    async fn get_policy(&self, id: PolicyId) -> Result<Policy, PortError> {
        let row = self.policies.get_by_id(*id.as_uuid()).await?;
        policy_from_row(row)
    }

    async fn get_user(&self, id: UserId) -> Result<User, PortError> {
        let row = self.users.get_by_id(*id.as_uuid()).await?;
        user_from_row(row)
    }

    async fn append_decision(&self, decision: &Decision) -> Result<(), PortError> {
        self.claims
            .insert_decision(&decision_to_row(decision))
            .await?;
        Ok(())
    }

    async fn list_decisions(&self, claim_id: ClaimId) -> Result<Vec<Decision>, PortError> {
        let rows = self.claims.find_decisions(*claim_id.as_uuid()).await?;
        rows.into_iter().map(decision_from_row).collect()
    }

    async fn insert_investigation(&self, investigation: &Investigation) -> Result<(), PortError> {
        self.claims
            .insert_investigation(&investigation_to_row(investigation))
            .await?;
        Ok(())
    }

    async fn get_investigation(&self, id: InvestigationId) -> Result<Investigation, PortError> {
        let row = self.claims.get_investigation(*id.as_uuid()).await?;
        investigation_from_row(row)
    }

    async fn update_investigation(&self, investigation: &Investigation) -> Result<(), PortError> {
        self.claims
            .update_investigation(&investigation_to_row(investigation))
            .await?;
        Ok(())
    }

    async fn list_investigations(
        &self,
        claim_id: ClaimId,
    ) -> Result<Vec<Investigation>, PortError> {
        let rows = self.claims.find_investigations(*claim_id.as_uuid()).await?;
        rows.into_iter().map(investigation_from_row).collect()
    }

    async fn insert_legal_case(&self, case: &LegalCase) -> Result<(), PortError> {
        self.claims
            .insert_legal_case(&legal_case_to_row(case))
            .await?;
        Ok(())
    }

    async fn get_legal_case(&self, id: LegalCaseId) -> Result<LegalCase, PortError> {
        let row = self.claims.get_legal_case(*id.as_uuid()).await?;
        legal_case_from_row(row)
    }

    async fn update_legal_case(&self, case: &LegalCase) -> Result<(), PortError> {
        self.claims
            .update_legal_case(&legal_case_to_row(case))
            .await?;
        Ok(())
    }

    async fn list_legal_cases(&self, claim_id: ClaimId) -> Result<Vec<LegalCase>, PortError> {
        let rows = self.claims.find_legal_cases(*claim_id.as_uuid()).await?;
        rows.into_iter().map(legal_case_from_row).collect()
    }
}

// -- row translation ------------------------------------------------------

fn claim_to_row(claim: &Claim) -> Result<ClaimRow, PortError> {
    let fraud_flags = serde_json::to_value(&claim.fraud_flags)
        .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;
    Ok(ClaimRow {
        claim_id: *claim.id.as_uuid(),
        claim_number: claim.claim_number.clone(),
        policy_id: *claim.policy_id.as_uuid(),
        claimant_id: *claim.claimant_id.as_uuid(),
        adjuster_id: claim.adjuster_id.map(|id| *id.as_uuid()),
        status: claim.status.as_str().to_string(),
        incident_date: claim.incident_date,
        incident_location: claim.incident_location.clone(),
        description: claim.description.clone(),
        transcript_text: claim.transcript_text.clone(),
        estimated_amount: claim.estimated_amount,
        fraud_flags,
        risk_score: claim.risk_score as i16,
        version: claim.version as i32,
        created_at: claim.created_at,
        updated_at: claim.updated_at,
    })
}

fn claim_from_rows(
    row: ClaimRow,
    documents: Vec<DocumentRow>,
    notes: Vec<NoteRow>,
) -> Result<Claim, PortError> {
    let fraud_flags: Vec<FlagObservation> = serde_json::from_value(row.fraud_flags)
        .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;
    let status = ClaimStatus::parse(&row.status).map_err(|e| PortError::internal(e.to_string()))?;

    Ok(Claim {
        id: ClaimId::from_uuid(row.claim_id),
        claim_number: row.claim_number,
        policy_id: PolicyId::from_uuid(row.policy_id),
        claimant_id: UserId::from_uuid(row.claimant_id),
        adjuster_id: row.adjuster_id.map(UserId::from_uuid),
        status,
        incident_date: row.incident_date,
        incident_location: row.incident_location,
        description: row.description,
        transcript_text: row.transcript_text,
        estimated_amount: row.estimated_amount,
        fraud_flags,
        risk_score: row.risk_score as u8,
        documents: documents
            .into_iter()
            .map(document_from_row)
            .collect::<Result<_, _>>()?,
        notes: notes.into_iter().map(note_from_row).collect(),
        version: row.version as u32,
        events: Vec::new(),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn document_to_row(doc: &Document) -> DocumentRow {
    DocumentRow {
        document_id: *doc.id.as_uuid(),
        claim_id: *doc.claim_id.as_uuid(),
        kind: doc.kind.as_str().to_string(),
        file_path: doc.file_path.clone(),
        file_name: doc.file_name.clone(),
        file_size: doc.file_size as i64,
        uploaded_by: *doc.uploaded_by.as_uuid(),
        content_hash: doc.content_hash.clone(),
        uploaded_at: doc.uploaded_at,
    }
}

fn document_from_row(row: DocumentRow) -> Result<Document, PortError> {
    let kind = DocumentKind::parse(&row.kind).map_err(|e| PortError::internal(e.to_string()))?;
    Ok(Document {
        id: core_kernel::DocumentId::from_uuid(row.document_id),
        claim_id: ClaimId::from_uuid(row.claim_id),
        kind,
        file_path: row.file_path,
        file_name: row.file_name,
        file_size: row.file_size as u64,
        uploaded_by: UserId::from_uuid(row.uploaded_by),
        content_hash: row.content_hash,
        uploaded_at: row.uploaded_at,
    })
}

fn note_to_row(note: &ClaimNote) -> NoteRow {
    NoteRow {
        note_id: *note.id.as_uuid(),
        claim_id: *note.claim_id.as_uuid(),
        author_id: *note.author_id.as_uuid(),
        note_text: note.text.clone(),
        created_at: note.created_at,
    }
}

fn note_from_row(row: NoteRow) -> ClaimNote {
    ClaimNote {
        id: core_kernel::NoteId::from_uuid(row.note_id),
        claim_id: ClaimId::from_uuid(row.claim_id),
        author_id: UserId::from_uuid(row.author_id),
        text: row.note_text,
        created_at: row.created_at,
    }
}

fn decision_to_row(decision: &Decision) -> DecisionRow {
    DecisionRow {
        decision_id: *decision.id.as_uuid(),
        claim_id: *decision.claim_id.as_uuid(),
        kind: decision.kind.as_str().to_string(),
        decided_by: *decision.decided_by.as_uuid(),
        reason: decision.reason.clone(),
        risk_score_at_decision: decision.risk_score_at_decision as i16,
        decided_at: decision.decided_at,
    }
}

fn decision_from_row(row: DecisionRow) -> Result<Decision, PortError> {
    let kind = DecisionKind::parse(&row.kind).map_err(|e| PortError::internal(e.to_string()))?;
    Ok(Decision {
        id: core_kernel::DecisionId::from_uuid(row.decision_id),
        claim_id: ClaimId::from_uuid(row.claim_id),
        kind,
        decided_by: UserId::from_uuid(row.decided_by),
        reason: row.reason,
        risk_score_at_decision: row.risk_score_at_decision as u8,
        decided_at: row.decided_at,
    })
}

fn investigation_to_row(investigation: &Investigation) -> InvestigationRow {
    InvestigationRow {
        investigation_id: *investigation.id.as_uuid(),
        claim_id: *investigation.claim_id.as_uuid(),
        investigator_id: *investigation.investigator_id.as_uuid(),
        assigned_by: *investigation.assigned_by.as_uuid(),
        status: investigation.status.as_str().to_string(),
        findings: investigation.findings.clone(),
        report_id: investigation.report_id.map(|id| *id.as_uuid()),
        opened_at: investigation.opened_at,
        closed_at: investigation.closed_at,
    }
}

fn investigation_from_row(row: InvestigationRow) -> Result<Investigation, PortError> {
    let status =
        InvestigationStatus::parse(&row.status).map_err(|e| PortError::internal(e.to_string()))?;
    Ok(Investigation {
        id: InvestigationId::from_uuid(row.investigation_id),
        claim_id: ClaimId::from_uuid(row.claim_id),
        investigator_id: UserId::from_uuid(row.investigator_id),
        assigned_by: UserId::from_uuid(row.assigned_by),
        status,
        findings: row.findings,
        report_id: row.report_id.map(core_kernel::ReportId::from_uuid),
        opened_at: row.opened_at,
        closed_at: row.closed_at,
    })
}

fn legal_case_to_row(case: &LegalCase) -> LegalCaseRow {
    LegalCaseRow {
        legal_case_id: *case.id.as_uuid(),
        claim_id: *case.claim_id.as_uuid(),
        escalated_by: *case.escalated_by.as_uuid(),
        legal_officer_id: case.legal_officer_id.map(|id| *id.as_uuid()),
        status: case.status.as_str().to_string(),
        notes: case.notes.clone(),
        opened_at: case.opened_at,
        closed_at: case.closed_at,
    }
}

fn legal_case_from_row(row: LegalCaseRow) -> Result<LegalCase, PortError> {
    let status =
        LegalCaseStatus::parse(&row.status).map_err(|e| PortError::internal(e.to_string()))?;
    Ok(LegalCase {
        id: LegalCaseId::from_uuid(row.legal_case_id),
        claim_id: ClaimId::from_uuid(row.claim_id),
        escalated_by: UserId::from_uuid(row.escalated_by),
        legal_officer_id: row.legal_officer_id.map(UserId::from_uuid),
        status,
        notes: row.notes,
        opened_at: row.opened_at,
        closed_at: row.closed_at,
    })
}

fn policy_from_row(row: crate::repositories::PolicyRow) -> Result<Policy, PortError> {
    let period = CoveragePeriod::new(row.coverage_start, row.coverage_end)
        .map_err(|e| PortError::internal(e.to_string()))?;
    let status = PolicyStatus::parse(&row.status).map_err(|e| PortError::internal(e.to_string()))?;
    Ok(Policy {
        id: PolicyId::from_uuid(row.policy_id),
        policy_number: row.policy_number,
        holder_id: UserId::from_uuid(row.holder_id),
        insurer_id: UserId::from_uuid(row.insurer_id),
        period,
        status,
        details: row.details,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn user_from_row(row: crate::repositories::UserRow) -> Result<User, PortError> {
    let role = UserRole::parse(&row.role).map_err(|e| PortError::internal(e.to_string()))?;
    Ok(User {
        id: UserId::from_uuid(row.user_id),
        email: row.email,
        name: row.name,
        role,
        created_at: row.created_at,
    })
}
