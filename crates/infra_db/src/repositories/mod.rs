//! Repository implementations
//!
//! Repositories own the SQL and the row types for each table group.
//! They return raw rows; the adapters translate rows into domain models.

pub mod claims;
pub mod policies;
pub mod users;

pub use claims::{
    ClaimRow, ClaimsRepository, DecisionRow, DocumentRow, InvestigationRow, LegalCaseRow, NoteRow,
};
pub use policies::{PolicyRepository, PolicyRow};
pub use users::{UserRepository, UserRow};
