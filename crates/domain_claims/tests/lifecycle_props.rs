//! Property-based tests for risk aggregation and the decision log

use proptest::prelude::*;

use core_kernel::{ClaimId, UserId};
use domain_claims::{
    aggregate_risk_score, replay_final_status, ClaimError, ClaimStatus, Decision, FlagObservation,
    RiskTier, BASELINE_RISK_SCORE,
};
use test_utils::{
    decision_log_strategy, lifecycle_walk_strategy, observation_strategy, observations_strategy,
    LifecycleOp, TestClaimBuilder, UserFixtures,
};

proptest! {
    #[test]
    fn risk_score_is_always_bounded(observations in observations_strategy()) {
        let score = aggregate_risk_score(&observations);
        prop_assert!(score <= 100);
        if observations.is_empty() {
            prop_assert_eq!(score, BASELINE_RISK_SCORE);
        }
    }

    #[test]
    fn adding_an_observation_never_lowers_the_score(
        mut observations in prop::collection::vec(observation_strategy(), 1..10),
        extra in observation_strategy(),
    ) {
        let before = aggregate_risk_score(&observations);
        observations.push(extra);
        let after = aggregate_risk_score(&observations);
        prop_assert!(after >= before);
    }

    #[test]
    fn observation_order_does_not_matter(observations in observations_strategy()) {
        let mut reversed: Vec<FlagObservation> = observations.clone();
        reversed.reverse();
        prop_assert_eq!(
            aggregate_risk_score(&observations),
            aggregate_risk_score(&reversed)
        );
    }

    #[test]
    fn every_score_maps_to_exactly_one_tier(score in 0u8..=100u8) {
        let tier = RiskTier::from_score(score);
        match score {
            0..=29 => prop_assert_eq!(tier, RiskTier::Low),
            30..=70 => prop_assert_eq!(tier, RiskTier::Medium),
            _ => prop_assert_eq!(tier, RiskTier::High),
        }
    }

    #[test]
    fn random_walks_stay_inside_the_state_machine(ops in lifecycle_walk_strategy()) {
        let adjuster = UserFixtures::adjuster();
        let (mut claim, policy) = TestClaimBuilder::new().build();

        for op in ops {
            let before = claim.clone();
            let result = match op {
                LifecycleOp::Submit => claim.submit(&policy),
                LifecycleOp::BeginReview => claim.begin_review(adjuster.id),
                LifecycleOp::RequestInfo => claim.request_more_info("need repair photos"),
                LifecycleOp::Resubmit => claim.resubmit(),
                LifecycleOp::Approve => claim.approve(adjuster.id),
                LifecycleOp::Deny => claim.deny(adjuster.id, None),
                LifecycleOp::Escalate => claim.escalate(),
            };
            match result {
                Ok(()) => {
                    prop_assert!(op.applies_from(before.status));
                    prop_assert_eq!(claim.status, op.target());
                    prop_assert!(before.can_transition_to(claim.status));
                }
                Err(ClaimError::ClaimAlreadyResolved { status }) => {
                    prop_assert!(before.status.is_terminal());
                    prop_assert_eq!(status, before.status);
                    prop_assert_eq!(claim.status, before.status);
                }
                Err(ClaimError::InvalidTransition { from, to }) => {
                    prop_assert_eq!(from, before.status);
                    prop_assert_eq!(to, op.target());
                    prop_assert!(!op.applies_from(before.status));
                    prop_assert_eq!(claim.status, before.status);
                }
                Err(other) => prop_assert!(false, "unexpected rejection: {other}"),
            }
        }
    }

    #[test]
    fn replay_never_yields_an_intermediate_request(kinds in decision_log_strategy()) {
        let claim_id = ClaimId::new();
        let decider = UserId::new();
        let log: Vec<Decision> = kinds
            .iter()
            .map(|kind| Decision::record(claim_id, *kind, decider, None, BASELINE_RISK_SCORE))
            .collect();

        let status = replay_final_status(&log);
        // Replay lands on a reviewable or terminal status, never mid-request.
        prop_assert_ne!(status, ClaimStatus::MoreInfoRequested);
        prop_assert_ne!(status, ClaimStatus::Draft);
        prop_assert_ne!(status, ClaimStatus::Submitted);
    }

    #[test]
    fn replay_is_a_prefix_fold(kinds in decision_log_strategy()) {
        let claim_id = ClaimId::new();
        let decider = UserId::new();
        let log: Vec<Decision> = kinds
            .iter()
            .map(|kind| Decision::record(claim_id, *kind, decider, None, BASELINE_RISK_SCORE))
            .collect();

        // Once a prefix replays to a terminal status, the full log agrees.
        for split in 0..=log.len() {
            let prefix_status = replay_final_status(&log[..split]);
            if prefix_status.is_terminal() {
                prop_assert_eq!(replay_final_status(&log), prefix_status);
                break;
            }
        }
    }
}
