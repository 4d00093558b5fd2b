//! Forwarder configuration.
//!
//! [`ForwarderConfig`] is a plain value populated either from process
//! environment ([`ForwarderConfig::from_env`]) or programmatically through
//! [`ForwarderBuilder`], which validates it and wires the collaborators into
//! a ready [`Forwarder`](crate::Forwarder).

mod builder;
mod env;

use std::fmt;
use std::time::Duration;

use crate::collector::{
    DEFAULT_COLLECTOR_BASE, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT, collector_url,
};
use crate::error::ConfigError;
use crate::event::DEFAULT_EVENT_TYPE;
use crate::retry::RetryPolicy;
use crate::timestamp::TimestampZone;

pub use builder::ForwarderBuilder;
pub use env::{
    ACCOUNT_ID_VAR, BACKOFF_MULTIPLIER_VAR, COLLECTOR_URL_VAR, CONNECT_TIMEOUT_MS_VAR,
    EVENT_TYPE_VAR, INITIAL_BACKOFF_MS_VAR, INSERT_KEY_VAR, MAX_RETRIES_VAR,
    REQUEST_TIMEOUT_MS_VAR, TIMESTAMP_TIMEZONE_VAR,
};

/// Settings describing where and how events are forwarded.
#[derive(Clone, PartialEq, Eq)]
pub struct ForwarderConfig {
    /// Collector account the events are recorded under.
    pub account_id: String,
    /// Base64 ciphertext of the insert key.
    pub insert_key: String,
    /// Scheme and host of the collector; the account path is appended.
    pub collector_base: String,
    /// `eventType` attached to every outbound event.
    pub event_type: String,
    pub retry: RetryPolicy,
    pub timestamp_zone: TimestampZone,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            insert_key: String::new(),
            collector_base: DEFAULT_COLLECTOR_BASE.to_owned(),
            event_type: DEFAULT_EVENT_TYPE.to_owned(),
            retry: RetryPolicy::default(),
            timestamp_zone: TimestampZone::default(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl fmt::Debug for ForwarderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwarderConfig")
            .field("account_id", &self.account_id)
            .field("insert_key", &"<redacted>")
            .field("collector_base", &self.collector_base)
            .field("event_type", &self.event_type)
            .field("retry", &self.retry)
            .field("timestamp_zone", &self.timestamp_zone)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl ForwarderConfig {
    /// Full events endpoint for the configured account.
    pub fn collector_url(&self) -> String {
        collector_url(&self.collector_base, &self.account_id)
    }

    /// Check the settings needed by every forwarder, independent of how the
    /// insert key is resolved.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.account_id, "account_id")?;
        require_non_empty(&self.collector_base, "collector URL")?;
        require_non_empty(&self.event_type, "event_type")?;
        require_positive(self.connect_timeout, "connect_timeout")?;
        require_positive(self.request_timeout, "request_timeout")?;
        self.retry.validate()
    }
}

fn require_positive(timeout: Duration, field: &str) -> Result<(), ConfigError> {
    if timeout.is_zero() {
        Err(ConfigError::InvalidConfig(format!("{field} must be greater than zero")))
    } else {
        Ok(())
    }
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::InvalidConfig(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}
