use std::fmt;

use log::{debug, error, info, warn};

use crate::codec;
use crate::collector::Transport;
use crate::config::{ForwarderBuilder, ForwarderConfig};
use crate::credential::{SecretResolver, resolve_header_value};
use crate::error::{ConfigError, DeliveryError, RecordError};
use crate::event::{LogBatch, LogRecord, OutboundEvent};
use crate::retry::{Outcome, RetryEngine};

use super::{DeliveryReport, RecordReport};

/// Forwards log batches to the collector one record at a time.
pub struct Forwarder {
    config: ForwarderConfig,
    engine: RetryEngine,
    transport: Box<dyn Transport>,
    resolver: Box<dyn SecretResolver>,
}

impl fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forwarder")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Forwarder {
    pub(crate) fn from_parts(
        config: ForwarderConfig,
        engine: RetryEngine,
        transport: Box<dyn Transport>,
        resolver: Box<dyn SecretResolver>,
    ) -> Self {
        Self {
            config,
            engine,
            transport,
            resolver,
        }
    }

    pub fn builder() -> ForwarderBuilder {
        ForwarderBuilder::new()
    }

    /// Build a forwarder from process environment with the default
    /// collaborators.
    pub fn from_env() -> Result<Self, ConfigError> {
        ForwarderBuilder::from_config(ForwarderConfig::from_env()?).build()
    }

    pub fn config(&self) -> &ForwarderConfig {
        &self.config
    }

    /// Deliver every record of `batch` in order.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::RetryExhausted`] as soon as one record
    /// exhausts its attempts; later records are not attempted.
    pub fn deliver(&self, batch: &LogBatch) -> Result<DeliveryReport, DeliveryError> {
        if batch.is_control_message() {
            info!(
                "skipping control message for log group {:?}",
                batch.log_group
            );
            return Ok(DeliveryReport::default());
        }

        let mut report = DeliveryReport {
            records: Vec::with_capacity(batch.log_events.len()),
        };
        for record in &batch.log_events {
            let result = self.deliver_record(batch, record);
            match &result {
                Ok(Outcome::Delivered { status }) => {
                    info!("log entry {} sent. Response code: {status}", record.id);
                }
                Ok(Outcome::Rejected(rejection)) => {
                    warn!("log entry {} rejected: {rejection}", record.id);
                }
                Ok(Outcome::Throttled { status, reason }) => {
                    warn!(
                        "log entry {} throttled by collector (HTTP {status}): {reason}",
                        record.id
                    );
                }
                Ok(Outcome::Exhausted { attempts }) => {
                    let err = DeliveryError::RetryExhausted {
                        record_id: record.id.clone(),
                        attempts: *attempts,
                    };
                    error!("{err}");
                    return Err(err);
                }
                Err(err) => warn!("log entry {} not sent: {err}", record.id),
            }
            report.records.push(RecordReport {
                record_id: record.id.clone(),
                result,
            });
        }
        Ok(report)
    }

    fn deliver_record(&self, batch: &LogBatch, record: &LogRecord) -> Result<Outcome, RecordError> {
        let event = OutboundEvent::from_record(
            batch,
            record,
            &self.config.event_type,
            self.config.timestamp_zone,
        )?;
        debug!("forwarding {event:?}");
        let body = codec::encode(&event)?;
        let insert_key = resolve_header_value(self.resolver.as_ref())?;
        Ok(self
            .engine
            .execute(|| self.transport.post(&body, &insert_key)))
    }
}
