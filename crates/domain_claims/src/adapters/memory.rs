//! In-memory storage and event sink
//!
//! Backs unit tests and local development. Mirrors the Postgres adapter's
//! semantics, including the optimistic version check on claim updates.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{ClaimId, DomainPort, InvestigationId, LegalCaseId, PolicyId, PortError, UserId};
use domain_party::User;
use domain_policy::Policy;

use crate::claim::{Claim, ClaimStatus};
use crate::decision::Decision;
use crate::events::ClaimEvent;
use crate::investigation::{Investigation, LegalCase};
use crate::ports::{ClaimsPort, EventSink};

#[derive(Default)]
struct StoreInner {
    claims: HashMap<ClaimId, Claim>,
    policies: HashMap<PolicyId, Policy>,
    users: HashMap<UserId, User>,
    decisions: HashMap<ClaimId, Vec<Decision>>,
    investigations: HashMap<InvestigationId, Investigation>,
    legal_cases: HashMap<LegalCaseId, LegalCase>,
}

/// Hash-map backed implementation of [`ClaimsPort`]
#[derive(Default, Clone)]
pub struct InMemoryClaimsStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryClaimsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a policy for lookups
    pub async fn seed_policy(&self, policy: Policy) {
        self.inner.write().await.policies.insert(policy.id, policy);
    }

    /// Seeds a user for lookups
    pub async fn seed_user(&self, user: User) {
        self.inner.write().await.users.insert(user.id, user);
    }
}

impl DomainPort for InMemoryClaimsStore {}

#[async_trait]
impl ClaimsPort for InMemoryClaimsStore {
    async fn insert_claim(&self, claim: &Claim) -> Result<(), PortError> {
        let mut inner = self.inner.write().await;
        if inner.claims.contains_key(&claim.id) {
            return Err(PortError::conflict(format!(
                "claim {} already exists",
                claim.id
            )));
        }
        inner.claims.insert(claim.id, claim.clone());
        Ok(())
    }

    async fn get_claim(&self, id: ClaimId) -> Result<Claim, PortError> {
        self.inner
            .read()
            .await
            .claims
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Claim", id))
    }

    async fn update_claim(&self, claim: &Claim, expected_version: u32) -> Result<u32, PortError> {
        let mut inner = self.inner.write().await;
        let stored = inner
            .claims
            .get_mut(&claim.id)
            .ok_or_else(|| PortError::not_found("Claim", claim.id))?;
        if stored.version != expected_version {
            return Err(PortError::conflict(format!(
                "claim {} version mismatch: stored {}, expected {}",
                claim.id, stored.version, expected_version
            )));
        }
        let mut updated = claim.clone();
        updated.version = expected_version + 1;
        let new_version = updated.version;
        *stored = updated;
        Ok(new_version)
    }

    async fn list_claims_for_policy(&self, policy_id: PolicyId) -> Result<Vec<Claim>, PortError> {
        let inner = self.inner.read().await;
        let mut claims: Vec<Claim> = inner
            .claims
            .values()
            .filter(|c| c.policy_id == policy_id)
            .cloned()
            .collect();
        claims.sort_by_key(|c| c.created_at);
        Ok(claims)
    }

    async fn list_claims_by_status(&self, status: ClaimStatus) -> Result<Vec<Claim>, PortError> {
        let inner = self.inner.read().await;
        let mut claims: Vec<Claim> = inner
            .claims
            .values()
            .filter(|c| c.status == status)
            .cloned()
            .collect();
        claims.sort_by_key(|c| c.created_at);
        Ok(claims)
    }

    async fn get_policy(&self, id: PolicyId) -> Result<Policy, PortError> {
        self.inner
            .read()
            .await
            .policies
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Policy", id))
    }

    async fn get_user(&self, id: UserId) -> Result<User, PortError> {
        self.inner
            .read()
            .await
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("User", id))
    }

    async fn append_decision(&self, decision: &Decision) -> Result<(), PortError> {
        let mut inner = self.inner.write().await;
        let log = inner.decisions.entry(decision.claim_id).or_default();
        // A retried append after an ambiguous timeout must not duplicate.
        if log.iter().all(|d| d.id != decision.id) {
            log.push(decision.clone());
        }
        Ok(())
    }

    async fn list_decisions(&self, claim_id: ClaimId) -> Result<Vec<Decision>, PortError> {
        Ok(self
            .inner
            .read()
            .await
            .decisions
            .get(&claim_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert_investigation(&self, investigation: &Investigation) -> Result<(), PortError> {
        self.inner
            .write()
            .await
            .investigations
            .insert(investigation.id, investigation.clone());
        Ok(())
    }

    async fn get_investigation(&self, id: InvestigationId) -> Result<Investigation, PortError> {
        self.inner
            .read()
            .await
            .investigations
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Investigation", id))
    }

    async fn update_investigation(&self, investigation: &Investigation) -> Result<(), PortError> {
        let mut inner = self.inner.write().await;
        if !inner.investigations.contains_key(&investigation.id) {
            return Err(PortError::not_found("Investigation", investigation.id));
        }
        inner
            .investigations
            .insert(investigation.id, investigation.clone());
        Ok(())
    }

    async fn list_investigations(&self, claim_id: ClaimId) -> Result<Vec<Investigation>, PortError> {
        let inner = self.inner.read().await;
        let mut items: Vec<Investigation> = inner
            .investigations
            .values()
            .filter(|i| i.claim_id == claim_id)
            .cloned()
            .collect();
        items.sort_by_key(|i| i.opened_at);
        Ok(items)
    }

    async fn insert_legal_case(&self, case: &LegalCase) -> Result<(), PortError> {
        self.inner
            .write()
            .await
            .legal_cases
            .insert(case.id, case.clone());
        Ok(())
    }

    async fn get_legal_case(&self, id: LegalCaseId) -> Result<LegalCase, PortError> {
        self.inner
            .read()
            .await
            .legal_cases
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("LegalCase", id))
    }

    async fn update_legal_case(&self, case: &LegalCase) -> Result<(), PortError> {
        let mut inner = self.inner.write().await;
        if !inner.legal_cases.contains_key(&case.id) {
            return Err(PortError::not_found("LegalCase", case.id));
        }
        inner.legal_cases.insert(case.id, case.clone());
        Ok(())
    }

    async fn list_legal_cases(&self, claim_id: ClaimId) -> Result<Vec<LegalCase>, PortError> {
        let inner = self.inner.read().await;
        let mut items: Vec<LegalCase> = inner
            .legal_cases
            .values()
            .filter(|c| c.claim_id == claim_id)
            .cloned()
            .collect();
        items.sort_by_key(|c| c.opened_at);
        Ok(items)
    }
}

/// Event sink that records published events for inspection
#[derive(Default, Clone)]
pub struct InMemoryEventSink {
    published: Arc<RwLock<Vec<ClaimEvent>>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn published(&self) -> Vec<ClaimEvent> {
        self.published.read().await.clone()
    }
}

impl DomainPort for InMemoryEventSink {}

#[async_trait]
impl EventSink for InMemoryEventSink {
    async fn publish(&self, event: &ClaimEvent) -> Result<(), PortError> {
        self.published.write().await.push(event.clone());
        Ok(())
    }
}
