//! Platform users and role capabilities
//!
//! The engine trusts the authenticated role supplied by the identity
//! provider, but every operation still checks that the caller's role is
//! allowed to perform it. The capability predicates here are the single
//! source of truth for those checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PartyError;
use core_kernel::UserId;

/// Role assigned to a user at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Files and resubmits claims
    Claimant,
    /// Reviews claims and records decisions
    Adjuster,
    /// Issues policies; read-only on claims
    Insurer,
    /// Works investigations on escalated claims
    Investigator,
    /// Works legal cases on escalated claims
    LegalOfficer,
}

impl UserRole {
    /// True for roles allowed to create, submit, and resubmit claims
    pub fn can_submit_claims(&self) -> bool {
        matches!(self, UserRole::Claimant)
    }

    /// True for roles allowed to record decisions and take review actions
    pub fn can_adjudicate(&self) -> bool {
        matches!(self, UserRole::Adjuster)
    }

    /// True for roles allowed to work investigations
    pub fn can_investigate(&self) -> bool {
        matches!(self, UserRole::Investigator)
    }

    /// True for roles allowed to work legal cases
    pub fn can_handle_legal(&self) -> bool {
        matches!(self, UserRole::LegalOfficer)
    }

    /// Stable string form used in tokens, logs, and the database
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Claimant => "claimant",
            UserRole::Adjuster => "adjuster",
            UserRole::Insurer => "insurer",
            UserRole::Investigator => "investigator",
            UserRole::LegalOfficer => "legal_officer",
        }
    }

    /// Parses the stable string form
    pub fn parse(s: &str) -> Result<Self, PartyError> {
        match s {
            "claimant" => Ok(UserRole::Claimant),
            "adjuster" => Ok(UserRole::Adjuster),
            "insurer" => Ok(UserRole::Insurer),
            "investigator" => Ok(UserRole::Investigator),
            "legal_officer" => Ok(UserRole::LegalOfficer),
            other => Err(PartyError::UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user of the claims platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Contact email, unique per user
    pub email: String,
    /// Display name
    pub name: String,
    /// Role, immutable after registration
    pub role: UserRole,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Registers a new user
    ///
    /// # Errors
    ///
    /// Returns error if the email is malformed or the name is empty
    pub fn register(
        email: impl Into<String>,
        name: impl Into<String>,
        role: UserRole,
    ) -> Result<Self, PartyError> {
        let email = email.into();
        let name = name.into();

        validate_email(&email)?;
        if name.trim().is_empty() {
            return Err(PartyError::InvalidName);
        }

        Ok(Self {
            id: UserId::new_v7(),
            email,
            name,
            role,
            created_at: Utc::now(),
        })
    }
}

fn validate_email(email: &str) -> Result<(), PartyError> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || !domain.contains('.') || email.contains(' ') {
        return Err(PartyError::InvalidEmail(email.to_string()));
    }
    Ok(())
}
