//! Inbound batch model and the outbound collector event derived from it.

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::timestamp::{TimestampZone, epoch_seconds, format_timestamp};

/// Default `eventType` attached to every outbound event.
pub const DEFAULT_EVENT_TYPE: &str = "CustomEventCloudWatchLog";

/// `messageType` of the health probes the log service sends to new
/// subscriptions.
pub const CONTROL_MESSAGE_TYPE: &str = "CONTROL_MESSAGE";

/// One trigger invocation's worth of log records.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LogBatch {
    pub owner: String,
    pub log_group: String,
    #[serde(default)]
    pub message_type: Option<String>,
    #[serde(default)]
    pub log_events: Vec<LogRecord>,
}

impl LogBatch {
    /// Whether the batch is a subscription health probe rather than data.
    pub fn is_control_message(&self) -> bool {
        self.message_type.as_deref() == Some(CONTROL_MESSAGE_TYPE)
    }
}

/// A single raw log line.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LogRecord {
    pub id: String,
    /// Epoch timestamp; only the first ten digits are significant.
    pub timestamp: u64,
    pub message: String,
}

/// Normalised event posted to the collector.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OutboundEvent {
    pub event_type: String,
    pub owner: String,
    pub log_group: String,
    pub log_id: String,
    /// `YYYYMMDDHHMMSS`.
    pub log_created_timestamp: String,
    pub message: String,
}

impl OutboundEvent {
    /// Derive the event for `record` within `batch`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidTimestamp`] if the record's seconds cannot
    /// be represented as a calendar time.
    pub fn from_record(
        batch: &LogBatch,
        record: &LogRecord,
        event_type: &str,
        zone: TimestampZone,
    ) -> Result<Self, RecordError> {
        let log_created_timestamp = format_timestamp(epoch_seconds(record.timestamp), zone)
            .ok_or(RecordError::InvalidTimestamp(record.timestamp))?;
        Ok(Self {
            event_type: event_type.to_owned(),
            owner: batch.owner.clone(),
            log_group: batch.log_group.clone(),
            log_id: record.id.clone(),
            log_created_timestamp,
            message: record.message.clone(),
        })
    }
}
