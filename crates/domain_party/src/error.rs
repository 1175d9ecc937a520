//! Party domain errors

use thiserror::Error;

/// Errors that can occur in the party domain
#[derive(Debug, Error)]
pub enum PartyError {
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Name must not be empty")]
    InvalidName,

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("User not found: {0}")]
    UserNotFound(String),
}
