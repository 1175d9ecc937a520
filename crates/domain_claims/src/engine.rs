//! Claim lifecycle engine
//!
//! Orchestrates the full lifecycle: drafting, submission, review,
//! decisions, escalation, and resolution. Enforces role permissions,
//! records every adjudication in the append-only decision log, and
//! dispatches domain events after each successful write.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use core_kernel::{ClaimId, InvestigationId, LegalCaseId, PolicyId, PortError, UserId};
use domain_party::UserRole;

use crate::claim::{Claim, ClaimNote, ClaimStatus, NewClaimDraft};
use crate::decision::{Decision, DecisionKind};
use crate::document::{Document, NewDocument};
use crate::error::ClaimError;
use crate::investigation::{Investigation, LegalCase};
use crate::ports::{ClaimsPort, EventSink};
use crate::risk::{detect_duplicate_photos, FlagObservation, RiskTier};

/// The user performing an operation
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }
}

/// Engine tuning knobs
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Risk score at or above which a claim becomes eligible for escalation
    pub escalation_threshold: u8,
    /// Retry attempts for transient storage failures
    pub max_retry_attempts: u32,
    /// Initial retry delay, doubled on each attempt
    pub retry_base_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            escalation_threshold: 70,
            max_retry_attempts: 3,
            retry_base_delay: Duration::from_millis(50),
        }
    }
}

/// Orchestrates claim lifecycle operations over the storage port
pub struct ClaimEngine {
    store: Arc<dyn ClaimsPort>,
    events: Arc<dyn EventSink>,
    config: EngineConfig,
}

impl ClaimEngine {
    pub fn new(store: Arc<dyn ClaimsPort>, events: Arc<dyn EventSink>) -> Self {
        Self::with_config(store, events, EngineConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn ClaimsPort>,
        events: Arc<dyn EventSink>,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            events,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // -- drafting and submission ------------------------------------------

    /// Drafts a new claim against a policy
    #[instrument(skip(self, fields))]
    pub async fn draft_claim(
        &self,
        actor: Actor,
        policy_id: PolicyId,
        fields: NewClaimDraft,
    ) -> Result<Claim, ClaimError> {
        if !actor.role.can_submit_claims() {
            return Err(ClaimError::not_permitted(actor.role.as_str(), "draft claim"));
        }
        // Policy must exist before a claim can be filed against it.
        let _policy = self.store.get_policy(policy_id).await?;

        let claim = Claim::draft(policy_id, actor.user_id, fields);
        self.with_retry(|| self.store.insert_claim(&claim)).await?;
        info!(claim_id = %claim.id, claim_number = %claim.claim_number, "claim drafted");
        Ok(claim)
    }

    /// Finalizes submission of a draft claim
    #[instrument(skip(self))]
    pub async fn submit_claim(&self, actor: Actor, claim_id: ClaimId) -> Result<Claim, ClaimError> {
        if !actor.role.can_submit_claims() {
            return Err(ClaimError::not_permitted(actor.role.as_str(), "submit claim"));
        }
        let mut claim = self.store.get_claim(claim_id).await?;
        if claim.claimant_id != actor.user_id {
            return Err(ClaimError::not_permitted(actor.role.as_str(), "submit claim"));
        }
        let policy = self.store.get_policy(claim.policy_id).await?;
        claim.submit(&policy)?;
        self.persist_and_publish(claim).await
    }

    /// Attaches a document; runs duplicate-photo detection afterwards
    #[instrument(skip(self, new))]
    pub async fn attach_document(
        &self,
        actor: Actor,
        claim_id: ClaimId,
        new: NewDocument,
    ) -> Result<Document, ClaimError> {
        let mut claim = self.store.get_claim(claim_id).await?;
        Self::ensure_participant(actor, &claim, "attach document")?;
        let doc = claim.attach_document(actor.user_id, new)?;
        if let Some(observation) = detect_duplicate_photos(&claim.documents) {
            warn!(claim_id = %claim.id, "duplicate photo detected on upload");
            claim.record_observations(vec![observation]);
        }
        self.persist_and_publish(claim).await?;
        Ok(doc)
    }

    /// Adds a note to a claim
    pub async fn add_note(
        &self,
        actor: Actor,
        claim_id: ClaimId,
        text: String,
    ) -> Result<Claim, ClaimError> {
        let mut claim = self.store.get_claim(claim_id).await?;
        Self::ensure_participant(actor, &claim, "add note")?;
        claim.add_note(actor.user_id, text);
        self.persist_and_publish(claim).await
    }

    /// Documents and notes come from the claim's owner or from staff
    /// working the claim, never from an unrelated claimant.
    fn ensure_participant(actor: Actor, claim: &Claim, operation: &str) -> Result<(), ClaimError> {
        let permitted = claim.claimant_id == actor.user_id
            || actor.role.can_adjudicate()
            || actor.role.can_investigate()
            || actor.role.can_handle_legal();
        if permitted {
            Ok(())
        } else {
            Err(ClaimError::not_permitted(actor.role.as_str(), operation))
        }
    }

    // -- review and decisions ---------------------------------------------

    /// An adjuster takes a submitted claim into review
    #[instrument(skip(self))]
    pub async fn begin_review(&self, actor: Actor, claim_id: ClaimId) -> Result<Claim, ClaimError> {
        if !actor.role.can_adjudicate() {
            return Err(ClaimError::not_permitted(actor.role.as_str(), "begin review"));
        }
        let mut claim = self.store.get_claim(claim_id).await?;
        claim.begin_review(actor.user_id)?;
        self.persist_and_publish(claim).await
    }

    /// Adjuster sends the claim back to the claimant for more information
    #[instrument(skip(self, reason))]
    pub async fn request_more_info(
        &self,
        actor: Actor,
        claim_id: ClaimId,
        reason: String,
    ) -> Result<Claim, ClaimError> {
        if !actor.role.can_adjudicate() {
            return Err(ClaimError::not_permitted(actor.role.as_str(), "request more info"));
        }
        let mut claim = self.store.get_claim(claim_id).await?;
        claim.request_more_info(reason.clone())?;
        let decision = Decision::record(
            claim.id,
            DecisionKind::RequestInfo,
            actor.user_id,
            Some(reason),
            claim.risk_score,
        );
        self.persist_with_decision(claim, decision).await
    }

    /// Claimant resubmits a claim after supplying requested information
    #[instrument(skip(self))]
    pub async fn resubmit_claim(
        &self,
        actor: Actor,
        claim_id: ClaimId,
    ) -> Result<Claim, ClaimError> {
        if !actor.role.can_submit_claims() {
            return Err(ClaimError::not_permitted(actor.role.as_str(), "resubmit claim"));
        }
        let mut claim = self.store.get_claim(claim_id).await?;
        if claim.claimant_id != actor.user_id {
            return Err(ClaimError::not_permitted(actor.role.as_str(), "resubmit claim"));
        }
        claim.resubmit()?;
        self.persist_and_publish(claim).await
    }

    /// Approves a claim, recording the decision
    ///
    /// A claim under review approves directly; an escalated claim can only
    /// be approved once all its investigations and legal cases are closed.
    #[instrument(skip(self, reason))]
    pub async fn approve_claim(
        &self,
        actor: Actor,
        claim_id: ClaimId,
        reason: Option<String>,
    ) -> Result<Claim, ClaimError> {
        self.resolve(actor, claim_id, DecisionKind::Approve, reason)
            .await
    }

    /// Denies a claim, recording the decision with its rationale
    #[instrument(skip(self, reason))]
    pub async fn deny_claim(
        &self,
        actor: Actor,
        claim_id: ClaimId,
        reason: String,
    ) -> Result<Claim, ClaimError> {
        self.resolve(actor, claim_id, DecisionKind::Deny, Some(reason))
            .await
    }

    async fn resolve(
        &self,
        actor: Actor,
        claim_id: ClaimId,
        kind: DecisionKind,
        reason: Option<String>,
    ) -> Result<Claim, ClaimError> {
        if !actor.role.can_adjudicate() {
            return Err(ClaimError::not_permitted(actor.role.as_str(), "resolve claim"));
        }
        let mut claim = self.store.get_claim(claim_id).await?;
        if claim.status == ClaimStatus::Escalated {
            self.ensure_escalation_work_complete(claim_id).await?;
        }
        match kind {
            DecisionKind::Approve => claim.approve(actor.user_id)?,
            DecisionKind::Deny => claim.deny(actor.user_id, reason.clone())?,
            _ => {
                return Err(ClaimError::validation(
                    "resolution must be an approval or a denial",
                ))
            }
        }
        let decision =
            Decision::record(claim.id, kind, actor.user_id, reason, claim.risk_score);
        let claim = self.persist_with_decision(claim, decision).await?;
        info!(claim_id = %claim.id, decision = %kind, "claim resolved");
        Ok(claim)
    }

    /// Escalates a claim under review to investigation/legal handling
    #[instrument(skip(self, reason))]
    pub async fn escalate_claim(
        &self,
        actor: Actor,
        claim_id: ClaimId,
        reason: Option<String>,
    ) -> Result<Claim, ClaimError> {
        if !actor.role.can_adjudicate() {
            return Err(ClaimError::not_permitted(actor.role.as_str(), "escalate claim"));
        }
        let mut claim = self.store.get_claim(claim_id).await?;
        claim.escalate()?;
        let decision = Decision::record(
            claim.id,
            DecisionKind::Escalate,
            actor.user_id,
            reason,
            claim.risk_score,
        );
        warn!(claim_id = %claim.id, risk_score = claim.risk_score, "claim escalated");
        self.persist_with_decision(claim, decision).await
    }

    // -- risk --------------------------------------------------------------

    /// Records fraud detector output and recomputes the claim's risk score
    ///
    /// Returns the updated claim together with whether it is now eligible
    /// for escalation. Escalation itself remains an adjuster action.
    #[instrument(skip(self, observations))]
    pub async fn record_fraud_signals(
        &self,
        claim_id: ClaimId,
        observations: Vec<FlagObservation>,
    ) -> Result<(Claim, bool), ClaimError> {
        let mut claim = self.store.get_claim(claim_id).await?;
        if claim.status.is_terminal() {
            return Err(ClaimError::ClaimAlreadyResolved {
                status: claim.status,
            });
        }
        claim.record_observations(observations);
        let eligible = claim.status == ClaimStatus::UnderReview
            && claim.risk_score >= self.config.escalation_threshold;
        if eligible {
            warn!(
                claim_id = %claim.id,
                risk_score = claim.risk_score,
                threshold = self.config.escalation_threshold,
                "claim eligible for escalation"
            );
        }
        let claim = self.persist_and_publish(claim).await?;
        Ok((claim, eligible))
    }

    /// Risk tier for a claim's current score
    pub async fn risk_tier(&self, claim_id: ClaimId) -> Result<RiskTier, ClaimError> {
        let claim = self.store.get_claim(claim_id).await?;
        Ok(RiskTier::from_score(claim.risk_score))
    }

    // -- escalation work items --------------------------------------------

    /// Opens an investigation on an escalated claim
    #[instrument(skip(self))]
    pub async fn open_investigation(
        &self,
        actor: Actor,
        claim_id: ClaimId,
        investigator_id: UserId,
    ) -> Result<Investigation, ClaimError> {
        if !actor.role.can_investigate() {
            return Err(ClaimError::not_permitted(actor.role.as_str(), "open investigation"));
        }
        let claim = self.store.get_claim(claim_id).await?;
        if claim.status != ClaimStatus::Escalated {
            return Err(ClaimError::ClaimNotEscalated {
                status: claim.status,
            });
        }
        let investigation = Investigation::open(claim_id, investigator_id, actor.user_id);
        self.with_retry(|| self.store.insert_investigation(&investigation))
            .await?;
        info!(claim_id = %claim_id, investigation_id = %investigation.id, "investigation opened");
        Ok(investigation)
    }

    /// Closes an investigation with findings
    #[instrument(skip(self, findings))]
    pub async fn close_investigation(
        &self,
        actor: Actor,
        investigation_id: InvestigationId,
        findings: String,
    ) -> Result<Investigation, ClaimError> {
        if !actor.role.can_investigate() {
            return Err(ClaimError::not_permitted(actor.role.as_str(), "close investigation"));
        }
        let mut investigation = self.store.get_investigation(investigation_id).await?;
        investigation.close(findings)?;
        self.with_retry(|| self.store.update_investigation(&investigation))
            .await?;
        Ok(investigation)
    }

    /// Opens a legal case on an escalated claim
    ///
    /// At most one legal case may be open per claim at a time.
    #[instrument(skip(self))]
    pub async fn open_legal_case(
        &self,
        actor: Actor,
        claim_id: ClaimId,
        legal_officer_id: Option<UserId>,
    ) -> Result<LegalCase, ClaimError> {
        if !actor.role.can_handle_legal() {
            return Err(ClaimError::not_permitted(actor.role.as_str(), "open legal case"));
        }
        let claim = self.store.get_claim(claim_id).await?;
        if claim.status != ClaimStatus::Escalated {
            return Err(ClaimError::ClaimNotEscalated {
                status: claim.status,
            });
        }
        let existing = self.store.list_legal_cases(claim_id).await?;
        if existing.iter().any(|c| c.is_open()) {
            return Err(ClaimError::LegalCaseAlreadyOpen);
        }
        let case = LegalCase::open(claim_id, actor.user_id, legal_officer_id);
        self.with_retry(|| self.store.insert_legal_case(&case))
            .await?;
        info!(claim_id = %claim_id, legal_case_id = %case.id, "legal case opened");
        Ok(case)
    }

    /// Closes a legal case with its notes
    #[instrument(skip(self, notes))]
    pub async fn close_legal_case(
        &self,
        actor: Actor,
        case_id: LegalCaseId,
        notes: String,
    ) -> Result<LegalCase, ClaimError> {
        if !actor.role.can_handle_legal() {
            return Err(ClaimError::not_permitted(actor.role.as_str(), "close legal case"));
        }
        let mut case = self.store.get_legal_case(case_id).await?;
        case.close(notes)?;
        self.with_retry(|| self.store.update_legal_case(&case))
            .await?;
        Ok(case)
    }

    async fn ensure_escalation_work_complete(&self, claim_id: ClaimId) -> Result<(), ClaimError> {
        let investigations = self.store.list_investigations(claim_id).await?;
        let legal_cases = self.store.list_legal_cases(claim_id).await?;
        if investigations.is_empty() && legal_cases.is_empty() {
            return Err(ClaimError::validation(
                "escalated claim has no investigation or legal case on record",
            ));
        }
        if investigations.iter().any(|i| i.is_open()) {
            return Err(ClaimError::OpenInvestigationPending);
        }
        if legal_cases.iter().any(|c| c.is_open()) {
            return Err(ClaimError::OpenLegalCasePending);
        }
        Ok(())
    }

    // -- queries -----------------------------------------------------------

    pub async fn get_claim(&self, claim_id: ClaimId) -> Result<Claim, ClaimError> {
        Ok(self.store.get_claim(claim_id).await?)
    }

    pub async fn list_claims_for_policy(
        &self,
        policy_id: PolicyId,
    ) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.store.list_claims_for_policy(policy_id).await?)
    }

    pub async fn list_claims_by_status(
        &self,
        status: ClaimStatus,
    ) -> Result<Vec<Claim>, ClaimError> {
        Ok(self.store.list_claims_by_status(status).await?)
    }

    /// The claim's full decision history, oldest first
    pub async fn decision_history(&self, claim_id: ClaimId) -> Result<Vec<Decision>, ClaimError> {
        Ok(self.store.list_decisions(claim_id).await?)
    }

    pub async fn list_investigations(
        &self,
        claim_id: ClaimId,
    ) -> Result<Vec<Investigation>, ClaimError> {
        Ok(self.store.list_investigations(claim_id).await?)
    }

    pub async fn list_legal_cases(&self, claim_id: ClaimId) -> Result<Vec<LegalCase>, ClaimError> {
        Ok(self.store.list_legal_cases(claim_id).await?)
    }

    pub async fn notes(&self, claim_id: ClaimId) -> Result<Vec<ClaimNote>, ClaimError> {
        Ok(self.store.get_claim(claim_id).await?.notes)
    }

    // -- internals ---------------------------------------------------------

    /// Writes the claim with its version check, then publishes its events
    async fn persist_and_publish(&self, mut claim: Claim) -> Result<Claim, ClaimError> {
        self.persist(&mut claim).await?;
        self.publish(&mut claim).await;
        Ok(claim)
    }

    /// Like [`persist_and_publish`], but also appends a decision record
    ///
    /// The claim write goes first: if its version check loses a concurrent
    /// race, the append-only decision log stays untouched and replaying it
    /// still matches the claim's actual status.
    async fn persist_with_decision(
        &self,
        mut claim: Claim,
        decision: Decision,
    ) -> Result<Claim, ClaimError> {
        self.persist(&mut claim).await?;
        self.with_retry(|| self.store.append_decision(&decision))
            .await?;
        self.publish(&mut claim).await;
        Ok(claim)
    }

    async fn persist(&self, claim: &mut Claim) -> Result<(), ClaimError> {
        let expected = claim.version;
        let new_version = self
            .with_retry(|| self.store.update_claim(claim, expected))
            .await?;
        claim.version = new_version;
        Ok(())
    }

    async fn publish(&self, claim: &mut Claim) {
        for event in claim.take_events() {
            if let Err(err) = self.events.publish(&event).await {
                // Event delivery is best-effort; the state change stands.
                warn!(
                    claim_id = %event.claim_id(),
                    event_type = event.event_type(),
                    error = %err,
                    "event publish failed"
                );
            }
        }
    }

    /// Retries a storage call on transient failures with doubling delay
    async fn with_retry<T, F, Fut>(&self, mut operation: F) -> Result<T, PortError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, PortError>>,
    {
        let mut delay = self.config.retry_base_delay;
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.config.max_retry_attempts => {
                    warn!(attempt, error = %err, "transient storage error, retrying");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
