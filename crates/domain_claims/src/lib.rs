//! Claim Lifecycle Domain
//!
//! This crate implements the claim lifecycle from draft through review,
//! escalation, and resolution, together with the fraud-risk aggregation
//! and the append-only decision trail.
//!
//! # Claim Lifecycle
//!
//! ```text
//! draft -> submitted -> under_review -> approved/denied
//!                          |   ^
//!                          v   |
//!               more_info_requested
//!                          |
//!                     (under_review) -> escalated -> approved/denied
//! ```
//!
//! Escalated claims resolve only after their investigations and legal
//! cases are closed.

pub mod claim;
pub mod document;
pub mod risk;
pub mod decision;
pub mod investigation;
pub mod events;
pub mod ports;
pub mod adapters;
pub mod engine;
pub mod error;

pub use claim::{Claim, ClaimNote, ClaimStatus, NewClaimDraft};
pub use document::{Document, DocumentKind, NewDocument};
pub use risk::{
    aggregate_risk_score, detect_duplicate_photos, FlagObservation, FraudFlag, RiskTier,
    BASELINE_RISK_SCORE,
};
pub use decision::{replay_final_status, Decision, DecisionKind};
pub use investigation::{Investigation, InvestigationStatus, LegalCase, LegalCaseStatus};
pub use events::ClaimEvent;
pub use ports::{ClaimsPort, EventSink};
pub use engine::{Actor, ClaimEngine, EngineConfig};
pub use error::ClaimError;
