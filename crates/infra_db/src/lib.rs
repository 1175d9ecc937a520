//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL persistence layer for the claim
//! lifecycle core, built on SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: repositories own the SQL and
//! row types, adapters implement the domain ports on top of them and
//! translate rows back into domain models.
//!
//! Queries are built at runtime rather than through the SQLx macros so
//! the crate compiles without a live database.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PostgresClaimsAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/claims")).await?;
//! let adapter = PostgresClaimsAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{create_pool, create_pool_from_url, run_migrations, DatabaseConfig, DatabasePool};
pub use error::DatabaseError;
pub use adapters::PostgresClaimsAdapter;
