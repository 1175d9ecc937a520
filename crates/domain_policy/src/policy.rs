//! Policy entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PolicyError;
use core_kernel::{CoveragePeriod, PolicyId, UserId};

/// Policy lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyStatus {
    /// Coverage is active
    Active,
    /// Coverage period has ended
    Expired,
    /// Cancelled before the period ended
    Cancelled,
}

impl PolicyStatus {
    /// Stable string form used in the database and API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "active",
            PolicyStatus::Expired => "expired",
            PolicyStatus::Cancelled => "cancelled",
        }
    }

    /// Parses the stable string form back into a status
    pub fn parse(s: &str) -> Result<Self, PolicyError> {
        match s {
            "active" => Ok(PolicyStatus::Active),
            "expired" => Ok(PolicyStatus::Expired),
            "cancelled" => Ok(PolicyStatus::Cancelled),
            other => Err(PolicyError::UnknownStatus(other.to_string())),
        }
    }
}

/// An insurance policy that claims are filed against
///
/// One holder, one insurer; a policy may have many claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier
    pub id: PolicyId,
    /// Human-readable policy number
    pub policy_number: String,
    /// Policyholder
    pub holder_id: UserId,
    /// Underwriting insurer
    pub insurer_id: UserId,
    /// Coverage window
    pub period: CoveragePeriod,
    /// Lifecycle status
    pub status: PolicyStatus,
    /// Product-specific details (coverage limits, deductibles, vehicle data)
    pub details: serde_json::Value,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Policy {
    /// Creates a new active policy
    pub fn new(
        holder_id: UserId,
        insurer_id: UserId,
        period: CoveragePeriod,
        details: serde_json::Value,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PolicyId::new_v7(),
            policy_number: generate_policy_number(),
            holder_id,
            insurer_id,
            period,
            status: PolicyStatus::Active,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the policy provided coverage on the given date
    ///
    /// Cancelled and expired policies provide no coverage for new claims
    /// regardless of the date window.
    pub fn in_force_on(&self, date: NaiveDate) -> bool {
        self.status == PolicyStatus::Active && self.period.contains(date)
    }

    /// Cancels the policy
    ///
    /// # Errors
    ///
    /// Returns error if the policy is not active
    pub fn cancel(&mut self, effective: NaiveDate) -> Result<(), PolicyError> {
        if self.status != PolicyStatus::Active {
            return Err(PolicyError::NotActive {
                status: format!("{:?}", self.status),
            });
        }
        self.period.close_at(effective)?;
        self.status = PolicyStatus::Cancelled;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Marks the policy expired once its coverage window has passed
    pub fn expire(&mut self) -> Result<(), PolicyError> {
        if self.status != PolicyStatus::Active {
            return Err(PolicyError::NotActive {
                status: format!("{:?}", self.status),
            });
        }
        if self.period.is_open_ended() {
            return Err(PolicyError::OpenEnded);
        }
        self.status = PolicyStatus::Expired;
        self.updated_at = Utc::now();
        Ok(())
    }
}

fn generate_policy_number() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("POL-{}", duration.as_millis() % 10_000_000_000)
}
