//! Trigger entry point.
//!
//! The hosting platform invokes [`handle_invocation`] with the raw trigger
//! event and an execution context. Returning `Err` signals failure so the
//! platform can redeliver the batch.

use std::time::Instant;

use log::{info, warn};
use serde_json::Value;

use crate::delivery::{DeliveryReport, Forwarder};
use crate::envelope::{Envelope, decode_trigger};
use crate::error::{DeliveryError, HandlerError};
use crate::event::LogBatch;

/// Execution metadata supplied by the hosting platform.
///
/// Carried for diagnostics only; the deadline is never consulted and an
/// in-flight backoff sleep is not shortened to meet it.
#[derive(Clone, Debug, Default)]
pub struct InvocationContext {
    pub request_id: String,
    pub function_name: String,
    pub deadline: Option<Instant>,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            ..Self::default()
        }
    }
}

/// How an invocation completed.
#[derive(Debug)]
pub enum Invocation {
    /// The event carried no log data; nothing was sent.
    Unsupported,
    Processed(DeliveryReport),
}

impl Forwarder {
    /// Decode `event` and deliver the batch it carries.
    pub fn handle(
        &self,
        event: &Value,
        context: &InvocationContext,
    ) -> Result<Invocation, DeliveryError> {
        match decode_trigger(event)? {
            Envelope::Unsupported => Ok(unsupported(event, context)),
            Envelope::Batch(batch) => self.process(&batch, context),
        }
    }

    fn process(
        &self,
        batch: &LogBatch,
        context: &InvocationContext,
    ) -> Result<Invocation, DeliveryError> {
        info!(
            "[{}] forwarding {} log events from {}",
            context.request_id,
            batch.log_events.len(),
            batch.log_group
        );
        let report = self.deliver(batch)?;
        info!(
            "[{}] batch complete: {} delivered, {} not delivered",
            context.request_id,
            report.delivered(),
            report.failed()
        );
        Ok(Invocation::Processed(report))
    }
}

fn unsupported(event: &Value, context: &InvocationContext) -> Invocation {
    warn!("[{}] unsupported trigger payload: {event}", context.request_id);
    Invocation::Unsupported
}

/// Handle `event` with a [`Forwarder`] configured from process environment.
///
/// The event is decoded first; payloads without log data complete
/// successfully without reading any configuration.
pub fn handle_invocation(
    event: &Value,
    context: &InvocationContext,
) -> Result<Invocation, HandlerError> {
    let batch = match decode_trigger(event).map_err(DeliveryError::from)? {
        Envelope::Unsupported => return Ok(unsupported(event, context)),
        Envelope::Batch(batch) => batch,
    };
    let forwarder = Forwarder::from_env()?;
    Ok(forwarder.process(&batch, context)?)
}
