//! Domain events emitted by the claim lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::claim::ClaimStatus;
use core_kernel::{ClaimId, UserId};

/// Events raised by the claim aggregate and dispatched after persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum ClaimEvent {
    ClaimSubmitted {
        claim_id: ClaimId,
        claim_number: String,
        timestamp: DateTime<Utc>,
    },
    StatusUpdated {
        claim_id: ClaimId,
        from: ClaimStatus,
        to: ClaimStatus,
        timestamp: DateTime<Utc>,
    },
    MoreInfoRequested {
        claim_id: ClaimId,
        reason: String,
        timestamp: DateTime<Utc>,
    },
    ClaimApproved {
        claim_id: ClaimId,
        decided_by: UserId,
        timestamp: DateTime<Utc>,
    },
    ClaimDenied {
        claim_id: ClaimId,
        decided_by: UserId,
        reason: Option<String>,
        timestamp: DateTime<Utc>,
    },
}

impl ClaimEvent {
    pub fn claim_id(&self) -> ClaimId {
        match self {
            ClaimEvent::ClaimSubmitted { claim_id, .. }
            | ClaimEvent::StatusUpdated { claim_id, .. }
            | ClaimEvent::MoreInfoRequested { claim_id, .. }
            | ClaimEvent::ClaimApproved { claim_id, .. }
            | ClaimEvent::ClaimDenied { claim_id, .. } => *claim_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            ClaimEvent::ClaimSubmitted { timestamp, .. }
            | ClaimEvent::StatusUpdated { timestamp, .. }
            | ClaimEvent::MoreInfoRequested { timestamp, .. }
            | ClaimEvent::ClaimApproved { timestamp, .. }
            | ClaimEvent::ClaimDenied { timestamp, .. } => *timestamp,
        }
    }

    /// Stable event name for logging and outbound payloads
    pub fn event_type(&self) -> &'static str {
        match self {
            ClaimEvent::ClaimSubmitted { .. } => "claim_submitted",
            ClaimEvent::StatusUpdated { .. } => "status_updated",
            ClaimEvent::MoreInfoRequested { .. } => "more_info_requested",
            ClaimEvent::ClaimApproved { .. } => "claim_approved",
            ClaimEvent::ClaimDenied { .. } => "claim_denied",
        }
    }
}
