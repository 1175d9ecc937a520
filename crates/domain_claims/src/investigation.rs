//! Investigation and legal case work items
//!
//! Escalated claims are worked through investigations and legal cases.
//! A claim can carry any number of investigations but at most one open
//! legal case at a time; all work items must be closed before the
//! escalated claim can be resolved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{ClaimId, InvestigationId, LegalCaseId, ReportId, UserId};

use crate::error::ClaimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestigationStatus {
    Assigned,
    InProgress,
    Completed,
}

impl InvestigationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestigationStatus::Assigned => "assigned",
            InvestigationStatus::InProgress => "in_progress",
            InvestigationStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ClaimError> {
        match s {
            "assigned" => Ok(InvestigationStatus::Assigned),
            "in_progress" => Ok(InvestigationStatus::InProgress),
            "completed" => Ok(InvestigationStatus::Completed),
            other => Err(ClaimError::validation(format!(
                "unknown investigation status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for InvestigationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fraud investigation on an escalated claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Investigation {
    pub id: InvestigationId,
    pub claim_id: ClaimId,
    /// Investigator working the case
    pub investigator_id: UserId,
    /// Who assigned the investigation
    pub assigned_by: UserId,
    pub status: InvestigationStatus,
    /// Investigator's findings, recorded on completion
    pub findings: Option<String>,
    /// Final report, when one is filed
    pub report_id: Option<ReportId>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Investigation {
    pub fn open(claim_id: ClaimId, investigator_id: UserId, assigned_by: UserId) -> Self {
        Self {
            id: InvestigationId::new_v7(),
            claim_id,
            investigator_id,
            assigned_by,
            status: InvestigationStatus::Assigned,
            findings: None,
            report_id: None,
            opened_at: Utc::now(),
            closed_at: None,
        }
    }

    /// True until the investigation is completed
    pub fn is_open(&self) -> bool {
        self.status != InvestigationStatus::Completed
    }

    /// Marks field work as started
    ///
    /// # Errors
    ///
    /// Returns `InvestigationClosed` if already completed.
    pub fn begin_work(&mut self) -> Result<(), ClaimError> {
        if !self.is_open() {
            return Err(ClaimError::InvestigationClosed);
        }
        self.status = InvestigationStatus::InProgress;
        Ok(())
    }

    /// Completes the investigation; findings become immutable
    ///
    /// # Errors
    ///
    /// Returns `InvestigationClosed` if already completed.
    pub fn close(&mut self, findings: impl Into<String>) -> Result<(), ClaimError> {
        if !self.is_open() {
            return Err(ClaimError::InvestigationClosed);
        }
        self.status = InvestigationStatus::Completed;
        self.findings = Some(findings.into());
        self.closed_at = Some(Utc::now());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalCaseStatus {
    Open,
    Closed,
}

impl LegalCaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LegalCaseStatus::Open => "open",
            LegalCaseStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ClaimError> {
        match s {
            "open" => Ok(LegalCaseStatus::Open),
            "closed" => Ok(LegalCaseStatus::Closed),
            other => Err(ClaimError::validation(format!(
                "unknown legal case status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for LegalCaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A legal review case on an escalated claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalCase {
    pub id: LegalCaseId,
    pub claim_id: ClaimId,
    /// Who escalated the claim into legal review
    pub escalated_by: UserId,
    /// Legal officer handling the case, once assigned
    pub legal_officer_id: Option<UserId>,
    pub status: LegalCaseStatus,
    /// Case notes, recorded on close
    pub notes: Option<String>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl LegalCase {
    pub fn open(claim_id: ClaimId, escalated_by: UserId, legal_officer_id: Option<UserId>) -> Self {
        Self {
            id: LegalCaseId::new_v7(),
            claim_id,
            escalated_by,
            legal_officer_id,
            status: LegalCaseStatus::Open,
            notes: None,
            opened_at: Utc::now(),
            closed_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == LegalCaseStatus::Open
    }

    /// Closes the case with its notes
    ///
    /// # Errors
    ///
    /// Returns `LegalCaseClosed` if already closed.
    pub fn close(&mut self, notes: impl Into<String>) -> Result<(), ClaimError> {
        if !self.is_open() {
            return Err(ClaimError::LegalCaseClosed);
        }
        self.status = LegalCaseStatus::Closed;
        self.notes = Some(notes.into());
        self.closed_at = Some(Utc::now());
        Ok(())
    }
}
