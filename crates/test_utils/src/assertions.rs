//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use domain_claims::{Claim, ClaimError, ClaimStatus, RiskTier};

/// Asserts that a claim is in the expected status
pub fn assert_claim_status(claim: &Claim, expected: ClaimStatus) {
    assert_eq!(
        claim.status, expected,
        "Claim {} in status {}, expected {}",
        claim.claim_number, claim.status, expected
    );
}

/// Asserts that a result failed with `InvalidTransition` for the given pair
pub fn assert_transition_rejected<T: std::fmt::Debug>(
    result: Result<T, ClaimError>,
    from: ClaimStatus,
    to: ClaimStatus,
) {
    match result {
        Err(ClaimError::InvalidTransition {
            from: actual_from,
            to: actual_to,
        }) => {
            assert_eq!(actual_from, from, "rejected transition had wrong source");
            assert_eq!(actual_to, to, "rejected transition had wrong target");
        }
        other => panic!("expected InvalidTransition {from} -> {to}, got {other:?}"),
    }
}

/// Asserts that a result failed with a validation error
pub fn assert_validation_error<T: std::fmt::Debug>(result: Result<T, ClaimError>) {
    match result {
        Err(ClaimError::Validation(_)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }
}

/// Asserts that a claim's risk score maps to the expected tier
pub fn assert_risk_tier(claim: &Claim, expected: RiskTier) {
    let actual = RiskTier::from_score(claim.risk_score);
    assert_eq!(
        actual, expected,
        "Claim {} with score {} in tier {:?}, expected {:?}",
        claim.claim_number, claim.risk_score, actual, expected
    );
}
