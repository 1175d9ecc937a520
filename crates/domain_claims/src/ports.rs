//! Storage and event ports for the claims domain
//!
//! Implementations live in `infra_db` (Postgres) and in this crate's
//! `adapters` module (in-memory, for tests and local development).

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, InvestigationId, LegalCaseId, PolicyId, PortError, UserId};
use domain_party::User;
use domain_policy::Policy;

use crate::claim::{Claim, ClaimStatus};
use crate::decision::Decision;
use crate::events::ClaimEvent;
use crate::investigation::{Investigation, LegalCase};

/// Storage operations for claims and their adjudication records
#[async_trait]
pub trait ClaimsPort: DomainPort {
    // -- claims -----------------------------------------------------------

    async fn insert_claim(&self, claim: &Claim) -> Result<(), PortError>;

    async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError>;

    /// Persists a modified claim, enforcing optimistic concurrency
    ///
    /// The write succeeds only if the stored version still equals
    /// `expected_version`; on success the stored version is bumped and
    /// the new version returned. A mismatch yields `PortError::Conflict`.
    async fn update_claim(&self, claim: &Claim, expected_version: u32) -> Result<u32, PortError>;

    async fn list_claims_for_policy(&self, policy_id: PolicyId) -> Result<Vec<Claim>, PortError>;

    async fn list_claims_by_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, PortError>;

    // -- reference data ---------------------------------------------------

    async fn get_policy(&self, id: PolicyId) -> Result<Policy, PortError>;

    async fn get_user(&self, id: UserId) -> Result<User, PortError>;

    // -- decision log -----------------------------------------------------

    async fn append_decision(&self, decision: &Decision) -> Result<(), PortError>;

    /// Decisions for a claim in the order they were recorded
    async fn list_decisions(&self, claim_id: ClaimId) -> Result<Vec<Decision>, PortError>;

    // -- investigations and legal cases -----------------------------------

    async fn insert_investigation(&self, investigation: &Investigation) -> Result<(), PortError>;

    async fn get_investigation(&self, id: InvestigationId) -> Result<Investigation, PortError>;

    async fn update_investigation(&self, investigation: &Investigation) -> Result<(), PortError>;

    async fn list_investigations(&self, claim_id: ClaimId) -> Result<Vec<Investigation>, PortError>;

    async fn insert_legal_case(&self, case: &LegalCase) -> Result<(), PortError>;

    async fn get_legal_case(&self, id: LegalCaseId) -> Result<LegalCase, PortError>;

    async fn update_legal_case(&self, case: &LegalCase) -> Result<(), PortError>;

    async fn list_legal_cases(&self, claim_id: ClaimId) -> Result<Vec<LegalCase>, PortError>;
}

/// Outbound dispatch for domain events
///
/// Dispatch happens after the claim write commits; a sink failure is
/// logged by the engine but never rolls back the state change.
#[async_trait]
pub trait EventSink: DomainPort {
    async fn publish(&self, event: &ClaimEvent) -> Result<(), PortError>;
}
