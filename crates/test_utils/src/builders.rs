//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant
//! fields while using defaults for everything else.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::UserId;
use domain_claims::{Claim, ClaimStatus, NewClaimDraft, NewDocument};
use domain_policy::Policy;

use crate::fixtures::{DocumentFixtures, PolicyFixtures, TemporalFixtures, UserFixtures};

/// Builder for claims in any lifecycle status
///
/// Drives the claim through real transitions rather than setting the
/// status field directly, so built claims always satisfy the state
/// machine's invariants. Returns the backing policy alongside the claim.
pub struct TestClaimBuilder {
    claimant_id: UserId,
    adjuster_id: UserId,
    policy: Option<Policy>,
    incident_date: NaiveDate,
    incident_location: String,
    description: String,
    estimated_amount: Decimal,
    documents: Vec<NewDocument>,
    target_status: ClaimStatus,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    pub fn new() -> Self {
        Self {
            claimant_id: UserFixtures::claimant().id,
            adjuster_id: UserFixtures::adjuster().id,
            policy: None,
            incident_date: TemporalFixtures::incident_date(),
            incident_location: "I-80 westbound, mile 42".to_string(),
            description: "Rear-end collision at low speed".to_string(),
            estimated_amount: dec!(3200.00),
            documents: vec![DocumentFixtures::police_report()],
            target_status: ClaimStatus::Draft,
        }
    }

    pub fn with_claimant(mut self, claimant_id: UserId) -> Self {
        self.claimant_id = claimant_id;
        self
    }

    pub fn with_adjuster(mut self, adjuster_id: UserId) -> Self {
        self.adjuster_id = adjuster_id;
        self
    }

    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_incident_date(mut self, date: NaiveDate) -> Self {
        self.incident_date = date;
        self
    }

    pub fn with_estimated_amount(mut self, amount: Decimal) -> Self {
        self.estimated_amount = amount;
        self
    }

    /// Replaces the default police report with the given documents
    pub fn with_documents(mut self, documents: Vec<NewDocument>) -> Self {
        self.documents = documents;
        self
    }

    /// Drives the claim to the given status before returning it
    pub fn in_status(mut self, status: ClaimStatus) -> Self {
        self.target_status = status;
        self
    }

    /// Builds the claim and the policy it is filed against
    ///
    /// # Panics
    ///
    /// Panics if any transition towards the target status is rejected.
    pub fn build(self) -> (Claim, Policy) {
        let policy = self.policy.unwrap_or_else(|| {
            PolicyFixtures::active_policy(self.claimant_id, UserFixtures::insurer().id)
        });

        let mut claim = Claim::draft(
            policy.id,
            self.claimant_id,
            NewClaimDraft {
                incident_date: Some(self.incident_date),
                incident_location: Some(self.incident_location),
                description: Some(self.description),
                transcript_text: None,
                estimated_amount: Some(self.estimated_amount),
            },
        );
        for doc in self.documents {
            claim.attach_document(self.claimant_id, doc).unwrap();
        }

        match self.target_status {
            ClaimStatus::Draft => {}
            ClaimStatus::Submitted => {
                claim.submit(&policy).unwrap();
            }
            ClaimStatus::UnderReview => {
                claim.submit(&policy).unwrap();
                claim.begin_review(self.adjuster_id).unwrap();
            }
            ClaimStatus::MoreInfoRequested => {
                claim.submit(&policy).unwrap();
                claim.begin_review(self.adjuster_id).unwrap();
                claim.request_more_info("builder: info requested").unwrap();
            }
            ClaimStatus::Escalated => {
                claim.submit(&policy).unwrap();
                claim.begin_review(self.adjuster_id).unwrap();
                claim.escalate().unwrap();
            }
            ClaimStatus::Approved => {
                claim.submit(&policy).unwrap();
                claim.begin_review(self.adjuster_id).unwrap();
                claim.approve(self.adjuster_id).unwrap();
            }
            ClaimStatus::Denied => {
                claim.submit(&policy).unwrap();
                claim.begin_review(self.adjuster_id).unwrap();
                claim
                    .deny(self.adjuster_id, Some("builder: denied".to_string()))
                    .unwrap();
            }
        }
        claim.take_events();
        (claim, policy)
    }
}
