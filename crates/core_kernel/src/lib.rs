//! Core Kernel - Foundational types and utilities for the claim lifecycle core
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers and value objects
//! - Coverage period handling for policy in-force checks
//! - Port infrastructure shared by storage adapters

pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use temporal::{CoveragePeriod, TemporalError};
pub use identifiers::{
    ClaimId, PolicyId, UserId, DocumentId, DecisionId,
    InvestigationId, LegalCaseId, ReportId, NoteId,
};
pub use ports::{PortError, DomainPort};
