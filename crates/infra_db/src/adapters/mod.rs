//! Port adapter implementations
//!
//! Adapters implement the domain port traits on top of the repositories,
//! translating between database rows and domain models and between
//! database errors and port errors.

mod claims;

pub use claims::PostgresClaimsAdapter;
