//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim lifecycle test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built test data for common entities
//! - `builders`: Builder patterns for test data construction
//! - `assertions`: Custom assertion helpers for domain types
//! - `generators`: Property-based test data generators
//! - `telemetry`: Tracing setup for tests

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod telemetry;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use telemetry::*;
