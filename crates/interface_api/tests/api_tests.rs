//! HTTP API integration tests
//!
//! Runs the full router against the in-memory store with real JWT auth.

use std::sync::Arc;

use axum_test::TestServer;
use axum::http::StatusCode;
use serde_json::{json, Value};
use uuid::Uuid;

use domain_claims::adapters::{InMemoryClaimsStore, InMemoryEventSink};
use domain_claims::ClaimEngine;
use domain_party::UserRole;
use interface_api::auth::create_token;
use interface_api::config::ApiConfig;
use interface_api::{create_router, AppState};
use test_utils::{PolicyFixtures, UserFixtures};

const TEST_SECRET: &str = "test-secret";

struct ApiHarness {
    server: TestServer,
    claimant_token: String,
    adjuster_token: String,
    investigator_token: String,
    legal_token: String,
    policy_id: Uuid,
}

impl ApiHarness {
    async fn new() -> Self {
        let store = InMemoryClaimsStore::new();
        let claimant = UserFixtures::claimant();
        let adjuster = UserFixtures::adjuster();
        let insurer = UserFixtures::insurer();
        let investigator = UserFixtures::investigator();
        let legal = UserFixtures::legal_officer();
        let policy = PolicyFixtures::active_policy(claimant.id, insurer.id);
        let policy_id = Uuid::from(policy.id);

        for user in [&claimant, &adjuster, &insurer, &investigator, &legal] {
            store.seed_user(user.clone()).await;
        }
        store.seed_policy(policy).await;

        let engine = Arc::new(ClaimEngine::new(
            Arc::new(store.clone()),
            Arc::new(InMemoryEventSink::new()),
        ));
        let config = ApiConfig {
            jwt_secret: TEST_SECRET.to_string(),
            ..ApiConfig::default()
        };
        let state = AppState {
            engine,
            pool: None,
            config,
        };
        let server = TestServer::new(create_router(state)).unwrap();

        let token = |user_id: String, role: UserRole| {
            create_token(&user_id, role, TEST_SECRET, 3600).unwrap()
        };

        ApiHarness {
            server,
            claimant_token: token(claimant.id.to_string(), UserRole::Claimant),
            adjuster_token: token(adjuster.id.to_string(), UserRole::Adjuster),
            investigator_token: token(investigator.id.to_string(), UserRole::Investigator),
            legal_token: token(legal.id.to_string(), UserRole::LegalOfficer),
            policy_id,
        }
    }

    /// Drafts a claim with valid submission fields and a required document
    async fn draft_claim(&self) -> Uuid {
        let response = self
            .server
            .post("/api/v1/claims")
            .authorization_bearer(&self.claimant_token)
            .json(&json!({
                "policy_id": self.policy_id,
                "incident_date": "2024-06-15",
                "incident_location": "Main St & 5th Ave",
                "description": "Rear-end collision at a stop light",
                "estimated_amount": "2500.00",
            }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        let claim_id = body["id"].as_str().unwrap().parse().unwrap();

        let doc = self
            .server
            .post(&format!("/api/v1/claims/{claim_id}/documents"))
            .authorization_bearer(&self.claimant_token)
            .json(&json!({
                "kind": "police_report",
                "file_path": "/uploads/report.pdf",
                "file_name": "report.pdf",
                "file_size": 52411,
            }))
            .await;
        doc.assert_status_ok();

        claim_id
    }

    /// Drafts, submits, and pulls a claim into review
    async fn claim_under_review(&self) -> Uuid {
        let claim_id = self.draft_claim().await;
        self.post_as(&self.claimant_token, &format!("/api/v1/claims/{claim_id}/submit"))
            .await
            .assert_status_ok();
        self.post_as(&self.adjuster_token, &format!("/api/v1/claims/{claim_id}/review"))
            .await
            .assert_status_ok();
        claim_id
    }

    /// Escalated claim, ready for work items
    async fn escalated_claim(&self) -> Uuid {
        let claim_id = self.claim_under_review().await;
        self.server
            .post(&format!("/api/v1/claims/{claim_id}/escalate"))
            .authorization_bearer(&self.adjuster_token)
            .json(&json!({ "reason": "suspected fraud" }))
            .await
            .assert_status_ok();
        claim_id
    }

    fn post_as(&self, token: &str, path: &str) -> axum_test::TestRequest {
        self.server
            .post(path)
            .authorization_bearer(token)
            .json(&json!({}))
    }
}

#[tokio::test]
async fn health_endpoints_are_public() {
    let h = ApiHarness::new().await;

    let health = h.server.get("/health").await;
    health.assert_status_ok();
    let body: Value = health.json();
    assert_eq!(body["status"], "healthy");

    // No database configured: readiness still reports ready
    h.server.get("/health/ready").await.assert_status_ok();
}

#[tokio::test]
async fn api_routes_require_a_bearer_token() {
    let h = ApiHarness::new().await;

    let response = h
        .server
        .get(&format!("/api/v1/claims/{}", Uuid::new_v4()))
        .await;
    response.assert_status_unauthorized();

    let response = h
        .server
        .get(&format!("/api/v1/claims/{}", Uuid::new_v4()))
        .authorization_bearer("not-a-real-token")
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn full_lifecycle_over_http() {
    let h = ApiHarness::new().await;
    let claim_id = h.draft_claim().await;

    let get = |path: String| h.server.get(&path).authorization_bearer(&h.claimant_token);

    let body: Value = get(format!("/api/v1/claims/{claim_id}")).await.json();
    assert_eq!(body["status"], "draft");

    h.post_as(&h.claimant_token, &format!("/api/v1/claims/{claim_id}/submit"))
        .await
        .assert_status_ok();
    h.post_as(&h.adjuster_token, &format!("/api/v1/claims/{claim_id}/review"))
        .await
        .assert_status_ok();

    let approve = h
        .server
        .post(&format!("/api/v1/claims/{claim_id}/approve"))
        .authorization_bearer(&h.adjuster_token)
        .json(&json!({ "reason": "covered loss, documentation complete" }))
        .await;
    approve.assert_status_ok();
    let body: Value = approve.json();
    assert_eq!(body["status"], "approved");
    // the document upload, submit, review, and approve each bump the
    // version once
    assert_eq!(body["version"], 4);

    let decisions: Value = get(format!("/api/v1/claims/{claim_id}/decisions"))
        .await
        .json();
    let kinds: Vec<&str> = decisions
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["approve"]);
}

#[tokio::test]
async fn claimants_may_not_adjudicate() {
    let h = ApiHarness::new().await;
    let claim_id = h.draft_claim().await;
    h.post_as(&h.claimant_token, &format!("/api/v1/claims/{claim_id}/submit"))
        .await
        .assert_status_ok();

    let response = h
        .server
        .post(&format!("/api/v1/claims/{claim_id}/approve"))
        .authorization_bearer(&h.claimant_token)
        .json(&json!({}))
        .await;
    response.assert_status_forbidden();
}

#[tokio::test]
async fn invalid_transitions_return_conflict() {
    let h = ApiHarness::new().await;
    let claim_id = h.draft_claim().await;
    h.post_as(&h.claimant_token, &format!("/api/v1/claims/{claim_id}/submit"))
        .await
        .assert_status_ok();

    // Submitted claims must go through review before approval
    let response = h
        .server
        .post(&format!("/api/v1/claims/{claim_id}/approve"))
        .authorization_bearer(&h.adjuster_token)
        .json(&json!({}))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_claims_return_not_found() {
    let h = ApiHarness::new().await;

    let response = h
        .server
        .get(&format!("/api/v1/claims/{}", Uuid::new_v4()))
        .authorization_bearer(&h.claimant_token)
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn submission_rule_violations_return_unprocessable() {
    let h = ApiHarness::new().await;

    // Draft without incident details or documents
    let response = h
        .server
        .post("/api/v1/claims")
        .authorization_bearer(&h.claimant_token)
        .json(&json!({ "policy_id": h.policy_id }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let claim_id = body["id"].as_str().unwrap();

    let submit = h
        .post_as(&h.claimant_token, &format!("/api/v1/claims/{claim_id}/submit"))
        .await;
    submit.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn fraud_signals_drive_risk_and_escalation_eligibility() {
    let h = ApiHarness::new().await;
    let claim_id = h.claim_under_review().await;

    let risk: Value = h
        .server
        .get(&format!("/api/v1/claims/{claim_id}/risk"))
        .authorization_bearer(&h.adjuster_token)
        .await
        .json();
    assert_eq!(risk["risk_score"], 15);
    assert_eq!(risk["tier"], "low");
    assert_eq!(risk["escalation_eligible"], false);

    let response = h
        .server
        .post(&format!("/api/v1/claims/{claim_id}/fraud-signals"))
        .authorization_bearer(&h.adjuster_token)
        .json(&json!({
            "observations": [
                { "flag": "price_anomaly", "confidence": 95, "source": "pricing-model" },
                { "flag": "doc_mismatch", "confidence": 90 },
                { "flag": "photo_duplicate", "confidence": 100 },
            ]
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["escalation_eligible"], true);
    assert!(body["claim"]["risk_score"].as_u64().unwrap() >= 70);

    let risk: Value = h
        .server
        .get(&format!("/api/v1/claims/{claim_id}/risk"))
        .authorization_bearer(&h.adjuster_token)
        .await
        .json();
    assert_eq!(risk["tier"], "high");
    assert_eq!(risk["escalation_eligible"], true);
}

#[tokio::test]
async fn unknown_fraud_flags_are_rejected() {
    let h = ApiHarness::new().await;
    let claim_id = h.claim_under_review().await;

    let response = h
        .server
        .post(&format!("/api/v1/claims/{claim_id}/fraud-signals"))
        .authorization_bearer(&h.adjuster_token)
        .json(&json!({
            "observations": [{ "flag": "gut_feeling", "confidence": 99 }]
        }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn escalation_work_items_gate_resolution() {
    let h = ApiHarness::new().await;
    let claim_id = h.escalated_claim().await;

    // Nothing on record yet: resolution is a rule violation
    let deny = h
        .server
        .post(&format!("/api/v1/claims/{claim_id}/deny"))
        .authorization_bearer(&h.adjuster_token)
        .json(&json!({ "reason": "fraud" }))
        .await;
    deny.assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let investigator_id = Uuid::new_v4();
    let opened = h
        .server
        .post(&format!("/api/v1/claims/{claim_id}/investigations"))
        .authorization_bearer(&h.investigator_token)
        .json(&json!({ "investigator_id": investigator_id }))
        .await;
    opened.assert_status_ok();
    let investigation: Value = opened.json();
    let investigation_id = investigation["id"].as_str().unwrap();

    // Open investigation blocks the denial
    let deny = h
        .server
        .post(&format!("/api/v1/claims/{claim_id}/deny"))
        .authorization_bearer(&h.adjuster_token)
        .json(&json!({ "reason": "fraud" }))
        .await;
    deny.assert_status(StatusCode::CONFLICT);

    let closed = h
        .server
        .post(&format!("/api/v1/investigations/{investigation_id}/close"))
        .authorization_bearer(&h.investigator_token)
        .json(&json!({ "findings": "staged collision confirmed" }))
        .await;
    closed.assert_status_ok();

    let deny = h
        .server
        .post(&format!("/api/v1/claims/{claim_id}/deny"))
        .authorization_bearer(&h.adjuster_token)
        .json(&json!({ "reason": "staged collision" }))
        .await;
    deny.assert_status_ok();
    let body: Value = deny.json();
    assert_eq!(body["status"], "denied");
}

#[tokio::test]
async fn only_one_open_legal_case_per_claim() {
    let h = ApiHarness::new().await;
    let claim_id = h.escalated_claim().await;

    let open_case = || {
        h.server
            .post(&format!("/api/v1/claims/{claim_id}/legal-cases"))
            .authorization_bearer(&h.legal_token)
            .json(&json!({}))
    };

    open_case().await.assert_status_ok();
    open_case().await.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn listing_claims_requires_a_filter() {
    let h = ApiHarness::new().await;
    let claim_id = h.draft_claim().await;

    let listed: Value = h
        .server
        .get(&format!("/api/v1/claims?policy_id={}", h.policy_id))
        .authorization_bearer(&h.claimant_token)
        .await
        .json();
    let ids: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&claim_id.to_string().as_str()));

    h.server
        .get("/api/v1/claims")
        .authorization_bearer(&h.claimant_token)
        .await
        .assert_status_bad_request();
}
