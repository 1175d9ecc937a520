//! Structured-log event sink
//!
//! Default production sink: emits each domain event as a structured log
//! line. Deployments that feed events into a queue swap this for their
//! own [`EventSink`] implementation.

use async_trait::async_trait;
use tracing::info;

use core_kernel::{DomainPort, PortError};

use crate::events::ClaimEvent;
use crate::ports::EventSink;

#[derive(Debug, Default, Clone)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl DomainPort for TracingEventSink {}

#[async_trait]
impl EventSink for TracingEventSink {
    async fn publish(&self, event: &ClaimEvent) -> Result<(), PortError> {
        info!(
            claim_id = %event.claim_id(),
            event_type = event.event_type(),
            timestamp = %event.timestamp(),
            "domain event"
        );
        Ok(())
    }
}
