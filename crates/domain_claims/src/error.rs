//! Claim domain errors
//!
//! Every rejected transition reports the current state and the attempted
//! action so a client can render an actionable message.

use thiserror::Error;

use crate::claim::ClaimStatus;
use core_kernel::PortError;

/// Errors that can occur in the claim lifecycle
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Invalid transition from {from} to {to}")]
    InvalidTransition { from: ClaimStatus, to: ClaimStatus },

    #[error("Claim already resolved (status: {status})")]
    ClaimAlreadyResolved { status: ClaimStatus },

    #[error("Claim is not escalated (status: {status})")]
    ClaimNotEscalated { status: ClaimStatus },

    #[error("An open legal case already exists for this claim")]
    LegalCaseAlreadyOpen,

    #[error("Claim has open investigations pending")]
    OpenInvestigationPending,

    #[error("Claim has open legal cases pending")]
    OpenLegalCasePending,

    #[error("Investigation is already completed")]
    InvestigationClosed,

    #[error("Legal case is already closed")]
    LegalCaseClosed,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Role {role} may not perform {operation}")]
    NotPermitted { role: String, operation: String },

    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

impl ClaimError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ClaimError::NotFound(message.into())
    }

    pub fn not_permitted(role: impl Into<String>, operation: impl Into<String>) -> Self {
        ClaimError::NotPermitted {
            role: role.into(),
            operation: operation.into(),
        }
    }

    /// True for rule violations the caller must fix; these are never retried
    pub fn is_business_rule(&self) -> bool {
        !matches!(self, ClaimError::Storage(_))
    }
}
