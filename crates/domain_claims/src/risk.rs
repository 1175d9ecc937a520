//! Fraud-risk aggregation
//!
//! Detector output (flags plus confidence scores) is combined into a single
//! risk score in [0, 100]. Aggregation is a pure function so it can be
//! re-run whenever documents are added or a flag's confidence changes, and
//! re-running with the same inputs always yields the same score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Document;

/// Score assigned when no fraud flags are present; residual risk is never zero
pub const BASELINE_RISK_SCORE: u8 = 15;

/// A discrete fraud signal from the detection service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudFlag {
    /// Claimed amount is out of line with comparable repairs
    PriceAnomaly,
    /// Documents contradict each other or the claim narrative
    DocMismatch,
    /// The same photo appears more than once, or in another claim
    PhotoDuplicate,
}

impl FraudFlag {
    /// Weight of this flag in the aggregate score
    pub fn weight(&self) -> f64 {
        match self {
            FraudFlag::PriceAnomaly => 0.40,
            FraudFlag::DocMismatch => 0.35,
            FraudFlag::PhotoDuplicate => 0.25,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FraudFlag::PriceAnomaly => "price_anomaly",
            FraudFlag::DocMismatch => "doc_mismatch",
            FraudFlag::PhotoDuplicate => "photo_duplicate",
        }
    }

    pub fn parse(s: &str) -> Result<Self, crate::error::ClaimError> {
        match s {
            "price_anomaly" => Ok(FraudFlag::PriceAnomaly),
            "doc_mismatch" => Ok(FraudFlag::DocMismatch),
            "photo_duplicate" => Ok(FraudFlag::PhotoDuplicate),
            other => Err(crate::error::ClaimError::Validation(format!(
                "unknown fraud flag: {other}"
            ))),
        }
    }
}

/// A fraud flag together with the detector's certainty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagObservation {
    /// The flag raised
    pub flag: FraudFlag,
    /// Detector certainty, 0-100
    pub confidence: u8,
    /// Which detector produced it
    pub source: Option<String>,
    /// When it was observed
    pub observed_at: DateTime<Utc>,
}

impl FlagObservation {
    /// Creates an observation, clamping confidence to 100
    pub fn new(flag: FraudFlag, confidence: u8) -> Self {
        Self {
            flag,
            confidence: confidence.min(100),
            source: None,
            observed_at: Utc::now(),
        }
    }

    /// Attaches the detector name
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Combines flag observations into a risk score in [0, 100]
///
/// The highest-confidence observation per flag kind is used, so re-delivery
/// of detector output neither inflates nor reorders the result. With no
/// observations the baseline applies.
pub fn aggregate_risk_score(observations: &[FlagObservation]) -> u8 {
    if observations.is_empty() {
        return BASELINE_RISK_SCORE;
    }

    let mut best: [Option<u8>; 3] = [None; 3];
    for obs in observations {
        let slot = match obs.flag {
            FraudFlag::PriceAnomaly => &mut best[0],
            FraudFlag::DocMismatch => &mut best[1],
            FraudFlag::PhotoDuplicate => &mut best[2],
        };
        *slot = Some(slot.map_or(obs.confidence, |c| c.max(obs.confidence)));
    }

    let weighted: f64 = [
        (FraudFlag::PriceAnomaly, best[0]),
        (FraudFlag::DocMismatch, best[1]),
        (FraudFlag::PhotoDuplicate, best[2]),
    ]
    .iter()
    .filter_map(|(flag, conf)| conf.map(|c| flag.weight() * f64::from(c.min(100))))
    .sum();

    weighted.round().min(100.0) as u8
}

/// Risk tier used for decision support
///
/// The tier, not the raw score, drives default escalation thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Tier boundaries: low < 30, medium 30-70, high > 70
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=29 => RiskTier::Low,
            30..=70 => RiskTier::Medium,
            _ => RiskTier::High,
        }
    }
}

/// Derives a photo-duplicate observation from document content hashes
///
/// Returns Some when two photos on the claim share a hash. Confidence is
/// fixed at 100: identical bytes are not a matter of detector judgement.
pub fn detect_duplicate_photos(documents: &[Document]) -> Option<FlagObservation> {
    let mut seen = std::collections::HashSet::new();
    for doc in documents {
        if !doc.kind.is_photo() {
            continue;
        }
        if let Some(hash) = &doc.content_hash {
            if !seen.insert(hash.as_str()) {
                return Some(
                    FlagObservation::new(FraudFlag::PhotoDuplicate, 100).with_source("photo_hash"),
                );
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_price_anomaly_at_85() {
        let obs = vec![FlagObservation::new(FraudFlag::PriceAnomaly, 85)];
        // round(85 * 0.4) = 34
        assert_eq!(aggregate_risk_score(&obs), 34);
        assert_eq!(RiskTier::from_score(34), RiskTier::Medium);
    }

    #[test]
    fn test_no_flags_yields_baseline() {
        assert_eq!(aggregate_risk_score(&[]), BASELINE_RISK_SCORE);
        assert_eq!(RiskTier::from_score(BASELINE_RISK_SCORE), RiskTier::Low);
    }

    #[test]
    fn test_all_flags_at_full_confidence() {
        let obs = vec![
            FlagObservation::new(FraudFlag::PriceAnomaly, 100),
            FlagObservation::new(FraudFlag::DocMismatch, 100),
            FlagObservation::new(FraudFlag::PhotoDuplicate, 100),
        ];
        // 40 + 35 + 25 = 100
        assert_eq!(aggregate_risk_score(&obs), 100);
    }

    #[test]
    fn test_repeated_flag_takes_highest_confidence() {
        let obs = vec![
            FlagObservation::new(FraudFlag::PriceAnomaly, 50),
            FlagObservation::new(FraudFlag::PriceAnomaly, 85),
            FlagObservation::new(FraudFlag::PriceAnomaly, 70),
        ];
        assert_eq!(aggregate_risk_score(&obs), 34);
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let obs = vec![
            FlagObservation::new(FraudFlag::DocMismatch, 90),
            FlagObservation::new(FraudFlag::PhotoDuplicate, 60),
        ];
        let first = aggregate_risk_score(&obs);
        let second = aggregate_risk_score(&obs);
        assert_eq!(first, second);
    }

    #[test]
    fn test_confidence_clamped_to_100() {
        let obs = FlagObservation::new(FraudFlag::PriceAnomaly, 255);
        assert_eq!(obs.confidence, 100);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(RiskTier::from_score(0), RiskTier::Low);
        assert_eq!(RiskTier::from_score(29), RiskTier::Low);
        assert_eq!(RiskTier::from_score(30), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(70), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(71), RiskTier::High);
        assert_eq!(RiskTier::from_score(100), RiskTier::High);
    }
}
