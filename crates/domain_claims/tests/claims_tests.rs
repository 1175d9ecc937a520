//! Comprehensive tests for domain_claims

use chrono::NaiveDate;

use domain_claims::claim::{Claim, ClaimStatus, NewClaimDraft};
use domain_claims::decision::{replay_final_status, Decision, DecisionKind};
use domain_claims::document::DocumentKind;
use domain_claims::error::ClaimError;
use domain_claims::events::ClaimEvent;
use domain_claims::investigation::{Investigation, InvestigationStatus, LegalCase};
use domain_claims::risk::RiskTier;

use test_utils::{
    assert_claim_status, assert_risk_tier, assert_transition_rejected, assert_validation_error,
    DocumentFixtures, PolicyFixtures, RiskFixtures, TestClaimBuilder, UserFixtures,
};

// ============================================================================
// State Machine Tests
// ============================================================================

mod state_machine_tests {
    use super::*;

    #[test]
    fn test_happy_path_to_approval() {
        let claimant = UserFixtures::claimant();
        let adjuster = UserFixtures::adjuster();
        let (mut claim, policy) = TestClaimBuilder::new().with_claimant(claimant.id).build();

        assert_claim_status(&claim, ClaimStatus::Draft);
        claim.submit(&policy).unwrap();
        assert_claim_status(&claim, ClaimStatus::Submitted);
        claim.begin_review(adjuster.id).unwrap();
        assert_claim_status(&claim, ClaimStatus::UnderReview);
        assert_eq!(claim.adjuster_id, Some(adjuster.id));
        claim.approve(adjuster.id).unwrap();
        assert_claim_status(&claim, ClaimStatus::Approved);
    }

    #[test]
    fn test_more_info_round_trip() {
        let (mut claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::UnderReview)
            .build();

        claim.request_more_info("need the mechanic quote").unwrap();
        assert_claim_status(&claim, ClaimStatus::MoreInfoRequested);
        claim.resubmit().unwrap();
        assert_claim_status(&claim, ClaimStatus::UnderReview);
    }

    #[test]
    fn test_draft_cannot_skip_to_review() {
        let (mut claim, _) = TestClaimBuilder::new().build();
        let adjuster = UserFixtures::adjuster();

        assert_transition_rejected(
            claim.begin_review(adjuster.id),
            ClaimStatus::Draft,
            ClaimStatus::UnderReview,
        );
    }

    #[test]
    fn test_submitted_cannot_be_approved_directly() {
        let (mut claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::Submitted)
            .build();
        let adjuster = UserFixtures::adjuster();

        assert_transition_rejected(
            claim.approve(adjuster.id),
            ClaimStatus::Submitted,
            ClaimStatus::Approved,
        );
    }

    #[test]
    fn test_terminal_claim_rejects_all_transitions() {
        let (mut claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::Approved)
            .build();
        let adjuster = UserFixtures::adjuster();

        let result = claim.deny(adjuster.id, None);
        assert!(matches!(
            result,
            Err(ClaimError::ClaimAlreadyResolved {
                status: ClaimStatus::Approved
            })
        ));
        assert!(matches!(
            claim.escalate(),
            Err(ClaimError::ClaimAlreadyResolved { .. })
        ));
    }

    #[test]
    fn test_escalated_resolves_to_either_terminal() {
        let adjuster = UserFixtures::adjuster();

        let (mut approved, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::Escalated)
            .build();
        approved.approve(adjuster.id).unwrap();
        assert_claim_status(&approved, ClaimStatus::Approved);

        let (mut denied, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::Escalated)
            .build();
        denied
            .deny(adjuster.id, Some("fraud confirmed".to_string()))
            .unwrap();
        assert_claim_status(&denied, ClaimStatus::Denied);
    }

    #[test]
    fn test_escalated_cannot_go_back_to_review() {
        let (claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::Escalated)
            .build();
        assert!(!claim.can_transition_to(ClaimStatus::UnderReview));
        assert!(!claim.can_transition_to(ClaimStatus::MoreInfoRequested));
    }
}

// ============================================================================
// Submission Validation Tests
// ============================================================================

mod submission_tests {
    use super::*;

    #[test]
    fn test_submit_requires_incident_date() {
        let claimant = UserFixtures::claimant();
        let insurer = UserFixtures::insurer();
        let policy = PolicyFixtures::active_policy(claimant.id, insurer.id);
        let mut claim = Claim::draft(
            policy.id,
            claimant.id,
            NewClaimDraft {
                incident_date: None,
                incident_location: Some("Main St".to_string()),
                description: Some("fender bender".to_string()),
                ..Default::default()
            },
        );
        claim
            .attach_document(claimant.id, DocumentFixtures::police_report())
            .unwrap();

        assert_validation_error(claim.submit(&policy));
        assert_claim_status(&claim, ClaimStatus::Draft);
    }

    #[test]
    fn test_submit_requires_required_document() {
        let (mut claim, policy) = TestClaimBuilder::new().with_documents(vec![]).build();
        assert_validation_error(claim.submit(&policy));

        // A transcript alone does not satisfy the requirement.
        let (mut claim, policy) = TestClaimBuilder::new()
            .with_documents(vec![domain_claims::NewDocument {
                kind: DocumentKind::AudioTranscript,
                file_path: "uploads/fnol.mp3".into(),
                file_name: "fnol.mp3".into(),
                file_size: 2_048,
                content_hash: None,
            }])
            .build();
        assert_validation_error(claim.submit(&policy));
    }

    #[test]
    fn test_submit_rejects_incident_outside_coverage() {
        let (mut claim, policy) = TestClaimBuilder::new()
            .with_incident_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
            .build();
        assert_validation_error(claim.submit(&policy));
    }

    #[test]
    fn test_submit_rejects_cancelled_policy() {
        let claimant = UserFixtures::claimant();
        let insurer = UserFixtures::insurer();
        let mut policy = PolicyFixtures::active_policy(claimant.id, insurer.id);
        policy
            .cancel(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
            .unwrap();

        let (mut claim, _) = TestClaimBuilder::new()
            .with_claimant(claimant.id)
            .with_policy(policy.clone())
            .build();
        assert_validation_error(claim.submit(&policy));
    }
}

// ============================================================================
// Document and Note Tests
// ============================================================================

mod document_tests {
    use super::*;

    #[test]
    fn test_attach_document_rejected_after_resolution() {
        let (mut claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::Denied)
            .build();
        let result = claim.attach_document(claim.claimant_id, DocumentFixtures::mechanic_quote());
        assert!(matches!(
            result,
            Err(ClaimError::ClaimAlreadyResolved { .. })
        ));
    }

    #[test]
    fn test_notes_accumulate() {
        let (mut claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::UnderReview)
            .build();
        let adjuster = UserFixtures::adjuster();

        claim.add_note(adjuster.id, "called the claimant");
        claim.add_note(adjuster.id, "quote looks inflated");

        assert_eq!(claim.notes.len(), 2);
        assert_eq!(claim.notes[0].text, "called the claimant");
        assert_eq!(claim.notes[1].author_id, adjuster.id);
    }
}

// ============================================================================
// Risk Aggregation Tests
// ============================================================================

mod risk_tests {
    use super::*;

    #[test]
    fn test_new_claim_carries_baseline_risk() {
        let (claim, _) = TestClaimBuilder::new().build();
        assert_eq!(claim.risk_score, 15);
        assert_risk_tier(&claim, RiskTier::Low);
    }

    #[test]
    fn test_observations_raise_risk_score() {
        let (mut claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::UnderReview)
            .build();

        claim.record_observations(vec![RiskFixtures::price_anomaly(85)]);
        // 85 * 0.40 = 34
        assert_eq!(claim.risk_score, 34);
        assert_risk_tier(&claim, RiskTier::Medium);
    }

    #[test]
    fn test_replayed_observations_are_idempotent() {
        let (mut claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::UnderReview)
            .build();

        claim.record_observations(vec![RiskFixtures::doc_mismatch(60)]);
        let first = claim.risk_score;
        claim.record_observations(vec![RiskFixtures::doc_mismatch(60)]);
        assert_eq!(claim.risk_score, first);
        assert_eq!(claim.fraud_flags.len(), 1);
    }

    #[test]
    fn test_all_flags_at_full_confidence_cap_at_high_tier() {
        let (mut claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::UnderReview)
            .build();
        claim.record_observations(RiskFixtures::high_risk_observations());
        assert_eq!(claim.risk_score, 100);
        assert_risk_tier(&claim, RiskTier::High);
    }
}

// ============================================================================
// Event Tests
// ============================================================================

mod event_tests {
    use super::*;

    #[test]
    fn test_submission_emits_claim_submitted() {
        let (mut claim, policy) = TestClaimBuilder::new().build();
        claim.submit(&policy).unwrap();

        let events = claim.take_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            ClaimEvent::ClaimSubmitted {
                claim_id,
                claim_number,
                ..
            } => {
                assert_eq!(*claim_id, claim.id);
                assert_eq!(*claim_number, claim.claim_number);
            }
            other => panic!("expected ClaimSubmitted, got {other:?}"),
        }
        // Draining leaves the buffer empty.
        assert!(claim.take_events().is_empty());
    }

    #[test]
    fn test_denial_emits_claim_denied_with_reason() {
        let (mut claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::UnderReview)
            .build();
        let adjuster = UserFixtures::adjuster();
        claim
            .deny(adjuster.id, Some("not covered".to_string()))
            .unwrap();

        let events = claim.take_events();
        assert!(matches!(
            events.last(),
            Some(ClaimEvent::ClaimDenied { reason: Some(r), .. }) if r == "not covered"
        ));
    }

    #[test]
    fn test_review_transitions_emit_status_updates() {
        let (mut claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::Submitted)
            .build();
        let adjuster = UserFixtures::adjuster();
        claim.begin_review(adjuster.id).unwrap();

        let events = claim.take_events();
        assert!(matches!(
            events.as_slice(),
            [ClaimEvent::StatusUpdated {
                from: ClaimStatus::Submitted,
                to: ClaimStatus::UnderReview,
                ..
            }]
        ));
    }
}

// ============================================================================
// Decision Log Tests
// ============================================================================

mod decision_tests {
    use super::*;

    #[test]
    fn test_decision_records_risk_at_decision_time() {
        let (claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::UnderReview)
            .build();
        let adjuster = UserFixtures::adjuster();

        let decision = Decision::record(
            claim.id,
            DecisionKind::Deny,
            adjuster.id,
            Some("estimate inconsistent with photos".to_string()),
            claim.risk_score,
        );
        assert_eq!(decision.risk_score_at_decision, claim.risk_score);
        assert!(decision.kind.is_terminal());
    }

    #[test]
    fn test_replay_matches_lifecycle_outcome() {
        let adjuster = UserFixtures::adjuster();
        let (mut claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::UnderReview)
            .build();

        let mut log = Vec::new();
        claim.request_more_info("need photos").unwrap();
        log.push(Decision::record(
            claim.id,
            DecisionKind::RequestInfo,
            adjuster.id,
            None,
            claim.risk_score,
        ));
        claim.resubmit().unwrap();
        claim.escalate().unwrap();
        log.push(Decision::record(
            claim.id,
            DecisionKind::Escalate,
            adjuster.id,
            None,
            claim.risk_score,
        ));
        claim.deny(adjuster.id, Some("fraud".to_string())).unwrap();
        log.push(Decision::record(
            claim.id,
            DecisionKind::Deny,
            adjuster.id,
            Some("fraud".to_string()),
            claim.risk_score,
        ));

        assert_eq!(replay_final_status(&log), claim.status);
    }
}

// ============================================================================
// Investigation and Legal Case Tests
// ============================================================================

mod escalation_tests {
    use super::*;

    #[test]
    fn test_investigation_close_records_findings() {
        let (claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::Escalated)
            .build();
        let investigator = UserFixtures::investigator();
        let adjuster = UserFixtures::adjuster();

        let mut investigation = Investigation::open(claim.id, investigator.id, adjuster.id);
        assert_eq!(investigation.status, InvestigationStatus::Assigned);
        assert!(investigation.is_open());

        investigation.begin_work().unwrap();
        assert_eq!(investigation.status, InvestigationStatus::InProgress);
        assert!(investigation.is_open());

        investigation.close("claimant statement consistent").unwrap();
        assert_eq!(investigation.status, InvestigationStatus::Completed);
        assert!(investigation.closed_at.is_some());
        assert!(matches!(
            investigation.close("again"),
            Err(ClaimError::InvestigationClosed)
        ));
    }

    #[test]
    fn test_legal_case_close_is_one_shot() {
        let (claim, _) = TestClaimBuilder::new()
            .in_status(ClaimStatus::Escalated)
            .build();
        let officer = UserFixtures::legal_officer();
        let adjuster = UserFixtures::adjuster();

        let mut case = LegalCase::open(claim.id, adjuster.id, Some(officer.id));
        case.close("settled").unwrap();
        assert!(matches!(
            case.close("again"),
            Err(ClaimError::LegalCaseClosed)
        ));
    }
}
