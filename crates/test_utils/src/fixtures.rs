//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the claim
//! lifecycle system. These fixtures are designed to be consistent and
//! predictable for unit tests.

use chrono::NaiveDate;
use core_kernel::{ClaimId, CoveragePeriod, PolicyId, UserId};
use domain_claims::{DocumentKind, FlagObservation, FraudFlag, NewDocument};
use domain_party::{User, UserRole};
use domain_policy::Policy;
use serde_json::json;

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    pub fn claim_id() -> ClaimId {
        ClaimId::new_v7()
    }

    pub fn policy_id() -> PolicyId {
        PolicyId::new_v7()
    }

    pub fn user_id() -> UserId {
        UserId::new_v7()
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard coverage start (Jan 1, 2024)
    pub fn coverage_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    /// Standard coverage end (Dec 31, 2024)
    pub fn coverage_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }

    /// Mid-coverage incident date
    pub fn incident_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    /// A date before coverage starts
    pub fn before_coverage() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
    }

    /// A date after coverage ends
    pub fn after_coverage() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    /// One-year coverage period over 2024
    pub fn coverage_period() -> CoveragePeriod {
        CoveragePeriod::bounded(Self::coverage_start(), Self::coverage_end()).unwrap()
    }
}

/// Fixture for user test data
pub struct UserFixtures;

impl UserFixtures {
    pub fn claimant() -> User {
        User::register("claimant@example.com", "Casey Claimant", UserRole::Claimant).unwrap()
    }

    pub fn adjuster() -> User {
        User::register("adjuster@example.com", "Alex Adjuster", UserRole::Adjuster).unwrap()
    }

    pub fn insurer() -> User {
        User::register("insurer@example.com", "Acme Mutual", UserRole::Insurer).unwrap()
    }

    pub fn investigator() -> User {
        User::register(
            "investigator@example.com",
            "Iris Investigator",
            UserRole::Investigator,
        )
        .unwrap()
    }

    pub fn legal_officer() -> User {
        User::register("legal@example.com", "Lee Legal", UserRole::LegalOfficer).unwrap()
    }
}

/// Fixture for policy test data
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// Active one-year auto policy held by `holder_id`
    pub fn active_policy(holder_id: UserId, insurer_id: UserId) -> Policy {
        Policy::new(
            holder_id,
            insurer_id,
            TemporalFixtures::coverage_period(),
            json!({ "product": "auto_comprehensive", "deductible": 500 }),
        )
    }
}

/// Fixture for document test data
pub struct DocumentFixtures;

impl DocumentFixtures {
    pub fn police_report() -> NewDocument {
        NewDocument {
            kind: DocumentKind::PoliceReport,
            file_path: "uploads/claims/report-2024-0615.pdf".into(),
            file_name: "police-report.pdf".into(),
            file_size: 84_211,
            content_hash: Some("sha256:2f9a61".into()),
        }
    }

    pub fn mechanic_quote() -> NewDocument {
        NewDocument {
            kind: DocumentKind::MechanicQuote,
            file_path: "uploads/claims/quote-2024-0615.pdf".into(),
            file_name: "repair-quote.pdf".into(),
            file_size: 40_960,
            content_hash: Some("sha256:77bd04".into()),
        }
    }

    /// Damage photo with a caller-chosen content hash, for duplicate tests
    pub fn damage_photo(hash: &str) -> NewDocument {
        NewDocument {
            kind: DocumentKind::DamagePhoto,
            file_path: format!("uploads/claims/photo-{hash}.jpg"),
            file_name: "damage.jpg".into(),
            file_size: 1_305_772,
            content_hash: Some(hash.to_string()),
        }
    }
}

/// Fixture for fraud observation test data
pub struct RiskFixtures;

impl RiskFixtures {
    pub fn price_anomaly(confidence: u8) -> FlagObservation {
        FlagObservation::new(FraudFlag::PriceAnomaly, confidence).with_source("pricing_model")
    }

    pub fn doc_mismatch(confidence: u8) -> FlagObservation {
        FlagObservation::new(FraudFlag::DocMismatch, confidence).with_source("doc_checker")
    }

    pub fn photo_duplicate(confidence: u8) -> FlagObservation {
        FlagObservation::new(FraudFlag::PhotoDuplicate, confidence).with_source("photo_hash")
    }

    /// Observations that aggregate above the default escalation threshold
    pub fn high_risk_observations() -> Vec<FlagObservation> {
        vec![
            Self::price_anomaly(100),
            Self::doc_mismatch(100),
            Self::photo_duplicate(100),
        ]
    }
}
