//! Append-only decision log
//!
//! Every adjudication action on a claim is recorded as a `Decision`.
//! Decisions are never updated or deleted; the log is the audit trail
//! and can be replayed to recover the claim's final status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::claim::ClaimStatus;
use core_kernel::{ClaimId, DecisionId, UserId};

/// The kind of adjudication action taken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    Approve,
    Deny,
    RequestInfo,
    Escalate,
}

impl DecisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionKind::Approve => "approve",
            DecisionKind::Deny => "deny",
            DecisionKind::RequestInfo => "request_info",
            DecisionKind::Escalate => "escalate",
        }
    }

    /// True for kinds that end the claim lifecycle
    pub fn is_terminal(&self) -> bool {
        matches!(self, DecisionKind::Approve | DecisionKind::Deny)
    }

    /// Parses the stable string form back into a kind
    pub fn parse(s: &str) -> Result<Self, crate::error::ClaimError> {
        match s {
            "approve" => Ok(DecisionKind::Approve),
            "deny" => Ok(DecisionKind::Deny),
            "request_info" => Ok(DecisionKind::RequestInfo),
            "escalate" => Ok(DecisionKind::Escalate),
            other => Err(crate::error::ClaimError::validation(format!(
                "unknown decision kind '{other}'"
            ))),
        }
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry in a claim's decision log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    pub claim_id: ClaimId,
    pub kind: DecisionKind,
    /// Adjuster or automated actor that took the action
    pub decided_by: UserId,
    /// Free-text rationale; required for `Deny`
    pub reason: Option<String>,
    /// Risk score at decision time
    pub risk_score_at_decision: u8,
    pub decided_at: DateTime<Utc>,
}

impl Decision {
    pub fn record(
        claim_id: ClaimId,
        kind: DecisionKind,
        decided_by: UserId,
        reason: Option<String>,
        risk_score: u8,
    ) -> Self {
        Self {
            id: DecisionId::new_v7(),
            claim_id,
            kind,
            decided_by,
            reason,
            risk_score_at_decision: risk_score,
            decided_at: Utc::now(),
        }
    }
}

/// Replays a decision log to the status it implies
///
/// Starts from `under_review` (the first decision can only ever be taken
/// on a claim under review) and folds each decision in order. Decisions
/// recorded after a terminal one are ignored, matching the append-only
/// guarantee that the engine never writes past a terminal status.
pub fn replay_final_status(decisions: &[Decision]) -> ClaimStatus {
    let mut status = ClaimStatus::UnderReview;
    for decision in decisions {
        if status.is_terminal() {
            break;
        }
        status = match decision.kind {
            DecisionKind::Approve => ClaimStatus::Approved,
            DecisionKind::Deny => ClaimStatus::Denied,
            DecisionKind::RequestInfo => ClaimStatus::MoreInfoRequested,
            DecisionKind::Escalate => ClaimStatus::Escalated,
        };
        // A request for info is always followed by a resubmission before
        // the next decision can be taken.
        if status == ClaimStatus::MoreInfoRequested {
            status = ClaimStatus::UnderReview;
        }
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(kind: DecisionKind) -> Decision {
        Decision::record(ClaimId::new(), kind, UserId::new(), None, 15)
    }

    #[test]
    fn empty_log_replays_to_under_review() {
        assert_eq!(replay_final_status(&[]), ClaimStatus::UnderReview);
    }

    #[test]
    fn replay_follows_escalation_then_denial() {
        let log = vec![
            decision(DecisionKind::RequestInfo),
            decision(DecisionKind::Escalate),
            decision(DecisionKind::Deny),
        ];
        assert_eq!(replay_final_status(&log), ClaimStatus::Denied);
    }

    #[test]
    fn replay_stops_at_first_terminal_decision() {
        let log = vec![
            decision(DecisionKind::Approve),
            decision(DecisionKind::Deny),
        ];
        assert_eq!(replay_final_status(&log), ClaimStatus::Approved);
    }
}
