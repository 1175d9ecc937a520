//! Claims DTOs
//!
//! The API speaks plain strings for every domain vocabulary (statuses,
//! document kinds, fraud flags); parsing happens at the handler boundary
//! so domain types never leak serde concerns for the wire format.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_claims::{
    Claim, ClaimNote, Decision, Document, FlagObservation, Investigation, LegalCase, RiskTier,
};

// -- requests --------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DraftClaimRequest {
    pub policy_id: Uuid,
    pub incident_date: Option<NaiveDate>,
    pub incident_location: Option<String>,
    pub description: Option<String>,
    pub transcript_text: Option<String>,
    pub estimated_amount: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct AttachDocumentRequest {
    pub kind: String,
    pub file_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub content_hash: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ReasonRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DenyRequest {
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct RequestInfoRequest {
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct FraudSignalRequest {
    pub flag: String,
    pub confidence: u8,
    pub source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FraudSignalsRequest {
    pub observations: Vec<FraudSignalRequest>,
}

#[derive(Debug, Deserialize)]
pub struct OpenInvestigationRequest {
    pub investigator_id: Uuid,
}

#[derive(Debug, Deserialize, Default)]
pub struct OpenLegalCaseRequest {
    pub legal_officer_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CloseInvestigationRequest {
    pub findings: String,
}

#[derive(Debug, Deserialize)]
pub struct CloseLegalCaseRequest {
    pub notes: String,
}

#[derive(Debug, Deserialize)]
pub struct ListClaimsQuery {
    pub policy_id: Option<Uuid>,
    pub status: Option<String>,
}

// -- responses -------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: Uuid,
    pub claim_number: String,
    pub policy_id: Uuid,
    pub claimant_id: Uuid,
    pub adjuster_id: Option<Uuid>,
    pub status: String,
    pub incident_date: Option<NaiveDate>,
    pub incident_location: Option<String>,
    pub description: Option<String>,
    pub estimated_amount: Option<Decimal>,
    pub risk_score: u8,
    pub fraud_flags: Vec<FlagObservationResponse>,
    pub documents: Vec<DocumentResponse>,
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        ClaimResponse {
            id: claim.id.into(),
            claim_number: claim.claim_number,
            policy_id: claim.policy_id.into(),
            claimant_id: claim.claimant_id.into(),
            adjuster_id: claim.adjuster_id.map(Into::into),
            status: claim.status.as_str().to_string(),
            incident_date: claim.incident_date,
            incident_location: claim.incident_location,
            description: claim.description,
            estimated_amount: claim.estimated_amount,
            risk_score: claim.risk_score,
            fraud_flags: claim.fraud_flags.into_iter().map(Into::into).collect(),
            documents: claim.documents.into_iter().map(Into::into).collect(),
            version: claim.version,
            created_at: claim.created_at,
            updated_at: claim.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FlagObservationResponse {
    pub flag: String,
    pub confidence: u8,
    pub source: Option<String>,
    pub observed_at: DateTime<Utc>,
}

impl From<FlagObservation> for FlagObservationResponse {
    fn from(obs: FlagObservation) -> Self {
        FlagObservationResponse {
            flag: obs.flag.as_str().to_string(),
            confidence: obs.confidence,
            source: obs.source,
            observed_at: obs.observed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub kind: String,
    pub file_name: String,
    pub file_size: u64,
    pub uploaded_by: Uuid,
    pub uploaded_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(doc: Document) -> Self {
        DocumentResponse {
            id: doc.id.into(),
            kind: doc.kind.as_str().to_string(),
            file_name: doc.file_name,
            file_size: doc.file_size,
            uploaded_by: doc.uploaded_by.into(),
            uploaded_at: doc.uploaded_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl From<ClaimNote> for NoteResponse {
    fn from(note: ClaimNote) -> Self {
        NoteResponse {
            id: note.id.into(),
            claim_id: note.claim_id.into(),
            author_id: note.author_id.into(),
            text: note.text,
            created_at: note.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub kind: String,
    pub decided_by: Uuid,
    pub reason: Option<String>,
    pub risk_score_at_decision: u8,
    pub decided_at: DateTime<Utc>,
}

impl From<Decision> for DecisionResponse {
    fn from(decision: Decision) -> Self {
        DecisionResponse {
            id: decision.id.into(),
            claim_id: decision.claim_id.into(),
            kind: decision.kind.as_str().to_string(),
            decided_by: decision.decided_by.into(),
            reason: decision.reason,
            risk_score_at_decision: decision.risk_score_at_decision,
            decided_at: decision.decided_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RiskResponse {
    pub risk_score: u8,
    pub tier: RiskTier,
    pub escalation_eligible: bool,
}

#[derive(Debug, Serialize)]
pub struct FraudSignalsResponse {
    pub claim: ClaimResponse,
    pub escalation_eligible: bool,
}

#[derive(Debug, Serialize)]
pub struct InvestigationResponse {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub investigator_id: Uuid,
    pub assigned_by: Uuid,
    pub status: String,
    pub findings: Option<String>,
    pub report_id: Option<Uuid>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl From<Investigation> for InvestigationResponse {
    fn from(inv: Investigation) -> Self {
        InvestigationResponse {
            id: inv.id.into(),
            claim_id: inv.claim_id.into(),
            investigator_id: inv.investigator_id.into(),
            assigned_by: inv.assigned_by.into(),
            status: inv.status.as_str().to_string(),
            findings: inv.findings,
            report_id: inv.report_id.map(Into::into),
            opened_at: inv.opened_at,
            closed_at: inv.closed_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LegalCaseResponse {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub escalated_by: Uuid,
    pub legal_officer_id: Option<Uuid>,
    pub status: String,
    pub notes: Option<String>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl From<LegalCase> for LegalCaseResponse {
    fn from(case: LegalCase) -> Self {
        LegalCaseResponse {
            id: case.id.into(),
            claim_id: case.claim_id.into(),
            escalated_by: case.escalated_by.into(),
            legal_officer_id: case.legal_officer_id.map(Into::into),
            status: case.status.as_str().to_string(),
            notes: case.notes,
            opened_at: case.opened_at,
            closed_at: case.closed_at,
        }
    }
}
