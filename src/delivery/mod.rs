//! Delivery orchestrator.
//!
//! [`Forwarder`] walks a [`LogBatch`](crate::event::LogBatch) in order and
//! delivers each record as its own collector request through the
//! [`RetryEngine`](crate::retry::RetryEngine). Records are processed one at
//! a time on the calling thread.
//!
//! # Failure containment
//!
//! - Rejections, throttling, codec and credential failures are logged and
//!   recorded in the [`DeliveryReport`]; the next record still runs.
//! - Retry exhaustion aborts the batch with
//!   [`DeliveryError::RetryExhausted`](crate::error::DeliveryError::RetryExhausted)
//!   so the trigger can redeliver it.

mod forwarder;


pub use forwarder::Forwarder;

use crate::error::RecordError;
use crate::retry::Outcome;

/// What happened to one record.
#[derive(Debug)]
pub struct RecordReport {
    pub record_id: String,
    pub result: Result<Outcome, RecordError>,
}

impl RecordReport {
    pub fn is_delivered(&self) -> bool {
        matches!(self.result, Ok(Outcome::Delivered { .. }))
    }
}

/// Per-record results of a batch that ran to completion, in record order.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    pub records: Vec<RecordReport>,
}

impl DeliveryReport {
    pub fn delivered(&self) -> usize {
        self.records.iter().filter(|r| r.is_delivered()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.delivered()
    }
}
