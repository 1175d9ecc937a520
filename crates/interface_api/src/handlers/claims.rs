//! Claims handlers
//!
//! Thin translation layer: parse the wire format, resolve the actor from
//! the token claims, call the engine, map the result back out.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;

use domain_claims::{
    ClaimStatus, DocumentKind, FlagObservation, FraudFlag, NewClaimDraft, NewDocument, RiskTier,
};

use crate::auth::{actor_from_claims, TokenClaims};
use crate::dto::claims::*;
use crate::error::ApiError;
use crate::AppState;

fn actor(token: &TokenClaims) -> Result<domain_claims::Actor, ApiError> {
    actor_from_claims(token).map_err(|_| ApiError::Unauthorized)
}

// -- drafting and submission ------------------------------------------------

/// Drafts a new claim against a policy
pub async fn draft_claim(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Json(request): Json<DraftClaimRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let actor = actor(&token)?;
    let fields = NewClaimDraft {
        incident_date: request.incident_date,
        incident_location: request.incident_location,
        description: request.description,
        transcript_text: request.transcript_text,
        estimated_amount: request.estimated_amount,
    };
    let claim = state
        .engine
        .draft_claim(actor, request.policy_id.into(), fields)
        .await?;
    Ok(Json(claim.into()))
}

/// Lists claims filtered by policy or status
pub async fn list_claims(
    State(state): State<AppState>,
    Query(query): Query<ListClaimsQuery>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = match (query.policy_id, query.status) {
        (Some(policy_id), _) => state.engine.list_claims_for_policy(policy_id.into()).await?,
        (None, Some(status)) => {
            let status = ClaimStatus::parse(&status)?;
            state.engine.list_claims_by_status(status).await?
        }
        (None, None) => {
            return Err(ApiError::BadRequest(
                "a policy_id or status filter is required".to_string(),
            ))
        }
    };
    Ok(Json(claims.into_iter().map(Into::into).collect()))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.engine.get_claim(id.into()).await?;
    Ok(Json(claim.into()))
}

/// Finalizes submission of a drafted claim
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let actor = actor(&token)?;
    let claim = state.engine.submit_claim(actor, id.into()).await?;
    Ok(Json(claim.into()))
}

/// Attaches a document to a claim
pub async fn attach_document(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
    Json(request): Json<AttachDocumentRequest>,
) -> Result<Json<DocumentResponse>, ApiError> {
    let actor = actor(&token)?;
    let new = NewDocument {
        kind: DocumentKind::parse(&request.kind)?,
        file_path: request.file_path,
        file_name: request.file_name,
        file_size: request.file_size,
        content_hash: request.content_hash,
    };
    let document = state.engine.attach_document(actor, id.into(), new).await?;
    Ok(Json(document.into()))
}

/// Adds an adjuster or claimant note
pub async fn add_note(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
    Json(request): Json<NoteRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let actor = actor(&token)?;
    if request.text.trim().is_empty() {
        return Err(ApiError::Validation("note text must not be empty".to_string()));
    }
    let claim = state.engine.add_note(actor, id.into(), request.text).await?;
    Ok(Json(claim.into()))
}

/// Lists the notes on a claim
pub async fn list_notes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<NoteResponse>>, ApiError> {
    let notes = state.engine.notes(id.into()).await?;
    Ok(Json(notes.into_iter().map(Into::into).collect()))
}

// -- review and decisions ---------------------------------------------------

/// Adjuster takes a submitted claim into review
pub async fn begin_review(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let actor = actor(&token)?;
    let claim = state.engine.begin_review(actor, id.into()).await?;
    Ok(Json(claim.into()))
}

/// Adjuster sends a claim back to the claimant for more information
pub async fn request_more_info(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
    Json(request): Json<RequestInfoRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let actor = actor(&token)?;
    let claim = state
        .engine
        .request_more_info(actor, id.into(), request.reason)
        .await?;
    Ok(Json(claim.into()))
}

/// Claimant resubmits after supplying requested information
pub async fn resubmit_claim(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let actor = actor(&token)?;
    let claim = state.engine.resubmit_claim(actor, id.into()).await?;
    Ok(Json(claim.into()))
}

/// Approves a claim
pub async fn approve_claim(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReasonRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let actor = actor(&token)?;
    let claim = state
        .engine
        .approve_claim(actor, id.into(), request.reason)
        .await?;
    Ok(Json(claim.into()))
}

/// Denies a claim; a rationale is mandatory
pub async fn deny_claim(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
    Json(request): Json<DenyRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let actor = actor(&token)?;
    let claim = state
        .engine
        .deny_claim(actor, id.into(), request.reason)
        .await?;
    Ok(Json(claim.into()))
}

/// Escalates a claim under review
pub async fn escalate_claim(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReasonRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let actor = actor(&token)?;
    let claim = state
        .engine
        .escalate_claim(actor, id.into(), request.reason)
        .await?;
    Ok(Json(claim.into()))
}

/// Full decision history for a claim, oldest first
pub async fn list_decisions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<DecisionResponse>>, ApiError> {
    let decisions = state.engine.decision_history(id.into()).await?;
    Ok(Json(decisions.into_iter().map(Into::into).collect()))
}

// -- risk -------------------------------------------------------------------

/// Records fraud detector output against a claim
pub async fn record_fraud_signals(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FraudSignalsRequest>,
) -> Result<Json<FraudSignalsResponse>, ApiError> {
    let mut observations = Vec::with_capacity(request.observations.len());
    for obs in request.observations {
        if obs.confidence > 100 {
            return Err(ApiError::Validation(
                "confidence must be between 0 and 100".to_string(),
            ));
        }
        let flag = FraudFlag::parse(&obs.flag)?;
        let mut observation = FlagObservation::new(flag, obs.confidence);
        if let Some(source) = obs.source {
            observation = observation.with_source(source);
        }
        observations.push(observation);
    }
    let (claim, escalation_eligible) = state
        .engine
        .record_fraud_signals(id.into(), observations)
        .await?;
    Ok(Json(FraudSignalsResponse {
        claim: claim.into(),
        escalation_eligible,
    }))
}

/// Current risk score and tier for a claim
pub async fn get_risk(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RiskResponse>, ApiError> {
    let claim = state.engine.get_claim(id.into()).await?;
    let escalation_eligible = claim.status == ClaimStatus::UnderReview
        && claim.risk_score >= state.engine.config().escalation_threshold;
    Ok(Json(RiskResponse {
        risk_score: claim.risk_score,
        tier: RiskTier::from_score(claim.risk_score),
        escalation_eligible,
    }))
}

// -- escalation work items --------------------------------------------------

/// Opens an investigation on an escalated claim
pub async fn open_investigation(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
    Json(request): Json<OpenInvestigationRequest>,
) -> Result<Json<InvestigationResponse>, ApiError> {
    let actor = actor(&token)?;
    let investigation = state
        .engine
        .open_investigation(actor, id.into(), request.investigator_id.into())
        .await?;
    Ok(Json(investigation.into()))
}

/// Lists a claim's investigations
pub async fn list_investigations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<InvestigationResponse>>, ApiError> {
    let investigations = state.engine.list_investigations(id.into()).await?;
    Ok(Json(investigations.into_iter().map(Into::into).collect()))
}

/// Closes an investigation with its findings
pub async fn close_investigation(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
    Json(request): Json<CloseInvestigationRequest>,
) -> Result<Json<InvestigationResponse>, ApiError> {
    let actor = actor(&token)?;
    let investigation = state
        .engine
        .close_investigation(actor, id.into(), request.findings)
        .await?;
    Ok(Json(investigation.into()))
}

/// Opens a legal case on an escalated claim
pub async fn open_legal_case(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
    Json(request): Json<OpenLegalCaseRequest>,
) -> Result<Json<LegalCaseResponse>, ApiError> {
    let actor = actor(&token)?;
    let case = state
        .engine
        .open_legal_case(actor, id.into(), request.legal_officer_id.map(Into::into))
        .await?;
    Ok(Json(case.into()))
}

/// Lists a claim's legal cases
pub async fn list_legal_cases(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LegalCaseResponse>>, ApiError> {
    let cases = state.engine.list_legal_cases(id.into()).await?;
    Ok(Json(cases.into_iter().map(Into::into).collect()))
}

/// Closes a legal case with its notes
pub async fn close_legal_case(
    State(state): State<AppState>,
    Extension(token): Extension<TokenClaims>,
    Path(id): Path<Uuid>,
    Json(request): Json<CloseLegalCaseRequest>,
) -> Result<Json<LegalCaseResponse>, ApiError> {
    let actor = actor(&token)?;
    let case = state
        .engine
        .close_legal_case(actor, id.into(), request.notes)
        .await?;
    Ok(Json(case.into()))
}
