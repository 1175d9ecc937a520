//! Claim aggregate
//!
//! The Claim is the consistency boundary for the lifecycle engine. All
//! status changes go through the state machine below; documents, notes,
//! and fraud observations are child records kept on the aggregate.
//!
//! # State Machine
//!
//! - draft -> submitted (claimant finalizes submission)
//! - submitted -> under_review (adjuster claims the case)
//! - under_review -> more_info_requested (adjuster flags missing info)
//! - more_info_requested -> under_review (claimant resubmits)
//! - under_review -> approved | denied (terminal decision)
//! - under_review -> escalated (risk above threshold or manual)
//! - escalated -> approved | denied (after investigation/legal review)

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::document::{Document, NewDocument};
use crate::error::ClaimError;
use crate::events::ClaimEvent;
use crate::risk::{aggregate_risk_score, FlagObservation, BASELINE_RISK_SCORE};
use core_kernel::{ClaimId, NoteId, PolicyId, UserId};
use domain_policy::Policy;

/// Claim lifecycle status
///
/// `Approved` and `Denied` are terminal; every other status is non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Being drafted by the claimant
    Draft,
    /// Finalized by the claimant, awaiting an adjuster
    Submitted,
    /// An adjuster is working the claim
    UnderReview,
    /// Returned to the claimant for more information
    MoreInfoRequested,
    /// Approved (terminal)
    Approved,
    /// Denied (terminal)
    Denied,
    /// Routed to investigation/legal review
    Escalated,
}

impl ClaimStatus {
    /// True for statuses that end the lifecycle
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Approved | ClaimStatus::Denied)
    }

    /// Stable string form used in events, logs, and the database
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "draft",
            ClaimStatus::Submitted => "submitted",
            ClaimStatus::UnderReview => "under_review",
            ClaimStatus::MoreInfoRequested => "more_info_requested",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Denied => "denied",
            ClaimStatus::Escalated => "escalated",
        }
    }

    /// Parses the stable string form back into a status
    pub fn parse(s: &str) -> Result<Self, ClaimError> {
        match s {
            "draft" => Ok(ClaimStatus::Draft),
            "submitted" => Ok(ClaimStatus::Submitted),
            "under_review" => Ok(ClaimStatus::UnderReview),
            "more_info_requested" => Ok(ClaimStatus::MoreInfoRequested),
            "approved" => Ok(ClaimStatus::Approved),
            "denied" => Ok(ClaimStatus::Denied),
            "escalated" => Ok(ClaimStatus::Escalated),
            other => Err(ClaimError::validation(format!(
                "unknown claim status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An adjuster or claimant note on a claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimNote {
    pub id: NoteId,
    pub claim_id: ClaimId,
    pub author_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied when drafting a claim
#[derive(Debug, Clone, Default)]
pub struct NewClaimDraft {
    pub incident_date: Option<NaiveDate>,
    pub incident_location: Option<String>,
    pub description: Option<String>,
    pub transcript_text: Option<String>,
    pub estimated_amount: Option<Decimal>,
}

/// A claim against a policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Human-readable claim number
    pub claim_number: String,
    /// Policy the claim is filed against
    pub policy_id: PolicyId,
    /// Filing claimant
    pub claimant_id: UserId,
    /// Adjuster working the claim, set when review begins
    pub adjuster_id: Option<UserId>,
    /// Lifecycle status
    pub status: ClaimStatus,
    /// Date of the incident
    pub incident_date: Option<NaiveDate>,
    /// Where the incident happened
    pub incident_location: Option<String>,
    /// Claimant's description of the incident
    pub description: Option<String>,
    /// FNOL voice transcript, if one was recorded
    pub transcript_text: Option<String>,
    /// Claimant's repair estimate
    pub estimated_amount: Option<Decimal>,
    /// Fraud flag observations accumulated from detectors
    pub fraud_flags: Vec<FlagObservation>,
    /// Derived risk score; never set directly by a user
    pub risk_score: u8,
    /// Attached documents
    pub documents: Vec<Document>,
    /// Notes
    pub notes: Vec<ClaimNote>,
    /// Optimistic concurrency token, bumped by storage on every update
    pub version: u32,
    /// Domain events to be dispatched; never persisted
    #[serde(skip)]
    pub events: Vec<ClaimEvent>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Claim {
    /// Creates a new draft claim
    pub fn draft(policy_id: PolicyId, claimant_id: UserId, fields: NewClaimDraft) -> Self {
        let now = Utc::now();
        Self {
            id: ClaimId::new_v7(),
            claim_number: generate_claim_number(),
            policy_id,
            claimant_id,
            adjuster_id: None,
            status: ClaimStatus::Draft,
            incident_date: fields.incident_date,
            incident_location: fields.incident_location,
            description: fields.description,
            transcript_text: fields.transcript_text,
            estimated_amount: fields.estimated_amount,
            fraud_flags: Vec::new(),
            risk_score: BASELINE_RISK_SCORE,
            documents: Vec::new(),
            notes: Vec::new(),
            version: 0,
            events: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns accumulated domain events and clears them
    pub fn take_events(&mut self) -> Vec<ClaimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Checks whether a transition is allowed by the state machine
    pub fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (self.status, target),
            (Draft, Submitted)
                | (Submitted, UnderReview)
                | (UnderReview, MoreInfoRequested)
                | (MoreInfoRequested, UnderReview)
                | (UnderReview, Approved)
                | (UnderReview, Denied)
                | (UnderReview, Escalated)
                | (Escalated, Approved)
                | (Escalated, Denied)
        )
    }

    /// Finalizes submission of a draft
    ///
    /// Requires an incident date inside the policy coverage period, a
    /// location, a description, and at least one required document.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the missing field, or `InvalidTransition`
    /// if the claim is not a draft.
    pub fn submit(&mut self, policy: &Policy) -> Result<(), ClaimError> {
        self.ensure_transition(ClaimStatus::Submitted)?;

        let incident_date = self
            .incident_date
            .ok_or_else(|| ClaimError::validation("incident date is required for submission"))?;
        if self
            .incident_location
            .as_deref()
            .map_or(true, |l| l.trim().is_empty())
        {
            return Err(ClaimError::validation(
                "incident location is required for submission",
            ));
        }
        if self
            .description
            .as_deref()
            .map_or(true, |d| d.trim().is_empty())
        {
            return Err(ClaimError::validation(
                "description is required for submission",
            ));
        }
        if !self.documents.iter().any(|d| d.kind.is_required_kind()) {
            return Err(ClaimError::validation(
                "at least one required document (police report, mechanic quote, or damage photo) must be attached",
            ));
        }
        if !policy.in_force_on(incident_date) {
            return Err(ClaimError::validation(format!(
                "policy {} was not in force on {}",
                policy.policy_number, incident_date
            )));
        }

        self.set_status(ClaimStatus::Submitted);
        self.events.push(ClaimEvent::ClaimSubmitted {
            claim_id: self.id,
            claim_number: self.claim_number.clone(),
            timestamp: self.updated_at,
        });
        Ok(())
    }

    /// An adjuster claims the case for review
    pub fn begin_review(&mut self, adjuster_id: UserId) -> Result<(), ClaimError> {
        self.ensure_transition(ClaimStatus::UnderReview)?;
        if self.status != ClaimStatus::Submitted {
            return Err(ClaimError::InvalidTransition {
                from: self.status,
                to: ClaimStatus::UnderReview,
            });
        }
        self.adjuster_id = Some(adjuster_id);
        self.transition_with_event(ClaimStatus::UnderReview);
        Ok(())
    }

    /// The adjuster sends the claim back to the claimant
    pub fn request_more_info(&mut self, reason: impl Into<String>) -> Result<(), ClaimError> {
        self.ensure_transition(ClaimStatus::MoreInfoRequested)?;
        self.set_status(ClaimStatus::MoreInfoRequested);
        self.events.push(ClaimEvent::MoreInfoRequested {
            claim_id: self.id,
            reason: reason.into(),
            timestamp: self.updated_at,
        });
        Ok(())
    }

    /// The claimant resubmits the requested information
    pub fn resubmit(&mut self) -> Result<(), ClaimError> {
        self.ensure_transition(ClaimStatus::UnderReview)?;
        if self.status != ClaimStatus::MoreInfoRequested {
            return Err(ClaimError::InvalidTransition {
                from: self.status,
                to: ClaimStatus::UnderReview,
            });
        }
        self.transition_with_event(ClaimStatus::UnderReview);
        Ok(())
    }

    /// Records a terminal approval
    pub fn approve(&mut self, decided_by: UserId) -> Result<(), ClaimError> {
        self.ensure_transition(ClaimStatus::Approved)?;
        self.set_status(ClaimStatus::Approved);
        self.events.push(ClaimEvent::ClaimApproved {
            claim_id: self.id,
            decided_by,
            timestamp: self.updated_at,
        });
        Ok(())
    }

    /// Records a terminal denial
    pub fn deny(&mut self, decided_by: UserId, reason: Option<String>) -> Result<(), ClaimError> {
        self.ensure_transition(ClaimStatus::Denied)?;
        self.set_status(ClaimStatus::Denied);
        self.events.push(ClaimEvent::ClaimDenied {
            claim_id: self.id,
            decided_by,
            reason,
            timestamp: self.updated_at,
        });
        Ok(())
    }

    /// Routes the claim to investigation/legal review
    pub fn escalate(&mut self) -> Result<(), ClaimError> {
        self.ensure_transition(ClaimStatus::Escalated)?;
        self.transition_with_event(ClaimStatus::Escalated);
        Ok(())
    }

    /// Attaches a document; rejected once the claim is resolved
    pub fn attach_document(
        &mut self,
        uploaded_by: UserId,
        new: NewDocument,
    ) -> Result<Document, ClaimError> {
        if self.status.is_terminal() {
            return Err(ClaimError::ClaimAlreadyResolved {
                status: self.status,
            });
        }
        let doc = Document::attach(self.id, uploaded_by, new);
        self.documents.push(doc.clone());
        self.updated_at = Utc::now();
        Ok(doc)
    }

    /// Adds a note
    pub fn add_note(&mut self, author_id: UserId, text: impl Into<String>) {
        self.notes.push(ClaimNote {
            id: NoteId::new_v7(),
            claim_id: self.id,
            author_id,
            text: text.into(),
            created_at: Utc::now(),
        });
        self.updated_at = Utc::now();
    }

    /// Merges detector observations and recomputes the risk score
    ///
    /// Aggregation keeps the best observation per flag kind, so replaying
    /// the same detector output is a no-op.
    pub fn record_observations(&mut self, observations: Vec<FlagObservation>) {
        for obs in observations {
            let duplicate = self
                .fraud_flags
                .iter()
                .any(|existing| existing.flag == obs.flag && existing.confidence >= obs.confidence);
            if !duplicate {
                self.fraud_flags.push(obs);
            }
        }
        self.recompute_risk();
    }

    /// Recomputes the derived risk score from stored observations
    pub fn recompute_risk(&mut self) -> u8 {
        let score = aggregate_risk_score(&self.fraud_flags);
        if score != self.risk_score {
            self.risk_score = score;
            self.updated_at = Utc::now();
        }
        score
    }

    fn ensure_transition(&self, target: ClaimStatus) -> Result<(), ClaimError> {
        if self.status.is_terminal() {
            return Err(ClaimError::ClaimAlreadyResolved {
                status: self.status,
            });
        }
        if !self.can_transition_to(target) {
            return Err(ClaimError::InvalidTransition {
                from: self.status,
                to: target,
            });
        }
        Ok(())
    }

    fn set_status(&mut self, status: ClaimStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    fn transition_with_event(&mut self, status: ClaimStatus) {
        let from = self.status;
        self.set_status(status);
        self.events.push(ClaimEvent::StatusUpdated {
            claim_id: self.id,
            from,
            to: status,
            timestamp: self.updated_at,
        });
    }
}

fn generate_claim_number() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("CLM-{}", duration.as_nanos() % 10_000_000_000)
}
