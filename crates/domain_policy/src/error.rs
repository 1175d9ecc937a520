//! Policy domain errors

use thiserror::Error;

use core_kernel::TemporalError;

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Policy not found: {0}")]
    PolicyNotFound(String),

    #[error("Policy is not active (status: {status})")]
    NotActive { status: String },

    #[error("Open-ended policies cannot expire")]
    OpenEnded,

    #[error("Unknown policy status '{0}'")]
    UnknownStatus(String),

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),
}
