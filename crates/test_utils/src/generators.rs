//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use proptest::prelude::*;

use domain_claims::{ClaimStatus, DecisionKind, DocumentKind, FlagObservation, FraudFlag};

/// Strategy for generating fraud flag kinds
pub fn fraud_flag_strategy() -> impl Strategy<Value = FraudFlag> {
    prop_oneof![
        Just(FraudFlag::PriceAnomaly),
        Just(FraudFlag::DocMismatch),
        Just(FraudFlag::PhotoDuplicate),
    ]
}

/// Strategy for generating detector confidence values (0-100)
pub fn confidence_strategy() -> impl Strategy<Value = u8> {
    0u8..=100u8
}

/// Strategy for generating a single flag observation
pub fn observation_strategy() -> impl Strategy<Value = FlagObservation> {
    (fraud_flag_strategy(), confidence_strategy())
        .prop_map(|(flag, confidence)| FlagObservation::new(flag, confidence))
}

/// Strategy for generating a batch of flag observations
pub fn observations_strategy() -> impl Strategy<Value = Vec<FlagObservation>> {
    prop::collection::vec(observation_strategy(), 0..12)
}

/// Strategy for generating document kinds
pub fn document_kind_strategy() -> impl Strategy<Value = DocumentKind> {
    prop_oneof![
        Just(DocumentKind::PoliceReport),
        Just(DocumentKind::MechanicQuote),
        Just(DocumentKind::DamagePhoto),
        Just(DocumentKind::ScenePhoto),
        Just(DocumentKind::AudioTranscript),
        Just(DocumentKind::Other),
    ]
}

/// Strategy for generating decision kinds
pub fn decision_kind_strategy() -> impl Strategy<Value = DecisionKind> {
    prop_oneof![
        Just(DecisionKind::Approve),
        Just(DecisionKind::Deny),
        Just(DecisionKind::RequestInfo),
        Just(DecisionKind::Escalate),
    ]
}

/// Strategy for generating decision logs of arbitrary length
pub fn decision_log_strategy() -> impl Strategy<Value = Vec<DecisionKind>> {
    prop::collection::vec(decision_kind_strategy(), 0..10)
}

/// A single lifecycle operation, for driving random walks over a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOp {
    Submit,
    BeginReview,
    RequestInfo,
    Resubmit,
    Approve,
    Deny,
    Escalate,
}

impl LifecycleOp {
    /// The status this operation tries to move the claim into
    pub fn target(self) -> ClaimStatus {
        match self {
            LifecycleOp::Submit => ClaimStatus::Submitted,
            LifecycleOp::BeginReview | LifecycleOp::Resubmit => ClaimStatus::UnderReview,
            LifecycleOp::RequestInfo => ClaimStatus::MoreInfoRequested,
            LifecycleOp::Approve => ClaimStatus::Approved,
            LifecycleOp::Deny => ClaimStatus::Denied,
            LifecycleOp::Escalate => ClaimStatus::Escalated,
        }
    }

    /// Whether this operation is a defined edge out of `from`
    ///
    /// Stricter than comparing statuses alone: `BeginReview` and `Resubmit`
    /// both land on `UnderReview` but each departs from a different status.
    pub fn applies_from(self, from: ClaimStatus) -> bool {
        matches!(
            (self, from),
            (LifecycleOp::Submit, ClaimStatus::Draft)
                | (LifecycleOp::BeginReview, ClaimStatus::Submitted)
                | (LifecycleOp::RequestInfo, ClaimStatus::UnderReview)
                | (LifecycleOp::Resubmit, ClaimStatus::MoreInfoRequested)
                | (
                    LifecycleOp::Approve | LifecycleOp::Deny,
                    ClaimStatus::UnderReview | ClaimStatus::Escalated,
                )
                | (LifecycleOp::Escalate, ClaimStatus::UnderReview)
        )
    }
}

/// Strategy for generating a single lifecycle operation
pub fn lifecycle_op_strategy() -> impl Strategy<Value = LifecycleOp> {
    prop_oneof![
        Just(LifecycleOp::Submit),
        Just(LifecycleOp::BeginReview),
        Just(LifecycleOp::RequestInfo),
        Just(LifecycleOp::Resubmit),
        Just(LifecycleOp::Approve),
        Just(LifecycleOp::Deny),
        Just(LifecycleOp::Escalate),
    ]
}

/// Strategy for generating random operation walks over a claim
pub fn lifecycle_walk_strategy() -> impl Strategy<Value = Vec<LifecycleOp>> {
    prop::collection::vec(lifecycle_op_strategy(), 1..24)
}
