//! Party Domain
//!
//! This crate models the people who interact with the claims platform:
//! claimants filing claims, adjusters working them, insurers issuing
//! policies, and the investigators and legal officers that escalated
//! claims are routed to.
//!
//! Roles are fixed at registration; there is no role-change flow.

pub mod user;
pub mod error;

pub use user::{User, UserRole};
pub use error::PartyError;
