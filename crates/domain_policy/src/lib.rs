//! Policy Domain
//!
//! A claim always references exactly one policy. The claims engine only
//! needs to know who holds the policy, who underwrites it, and whether it
//! was in force on the incident date - everything else lives in the
//! free-form details document.

pub mod policy;
pub mod error;

pub use policy::{Policy, PolicyStatus};
pub use error::PolicyError;
