//! In-process adapter implementations of the claims ports

mod log;
mod memory;

pub use log::TracingEventSink;
pub use memory::{InMemoryClaimsStore, InMemoryEventSink};
