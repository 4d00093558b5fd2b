//! Builder for [`Forwarder`].
//!
//! Exposes account and collector settings, retry tuning, timeouts, and the
//! collaborator seams (transport, secret resolution, sleeping) so tests and
//! embedders can substitute their own implementations.

use std::time::Duration;

use crate::collector::{CollectorClient, Transport};
use crate::credential::{Decryptor, EncryptedSecretResolver, PassthroughDecryptor, SecretResolver};
use crate::delivery::Forwarder;
use crate::error::ConfigError;
use crate::retry::{RetryEngine, RetryPolicy, Sleeper, ThreadSleeper};
use crate::timestamp::TimestampZone;

use super::ForwarderConfig;

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Builder for constructing [`Forwarder`] instances.
#[derive(Default)]
pub struct ForwarderBuilder {
    account_id: Option<String>,
    insert_key: Option<String>,
    collector_base: Option<String>,
    event_type: Option<String>,
    retry: Option<RetryPolicy>,
    timestamp_zone: Option<TimestampZone>,
    connect_timeout_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
    transport: Option<Box<dyn Transport>>,
    resolver: Option<Box<dyn SecretResolver>>,
    decryptor: Option<Box<dyn Decryptor>>,
    sleeper: Option<Box<dyn Sleeper>>,
}

impl ForwarderBuilder {
    /// Create a new builder with no account configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed every setting from an existing configuration.
    pub fn from_config(config: ForwarderConfig) -> Self {
        Self {
            account_id: Some(config.account_id),
            insert_key: Some(config.insert_key),
            collector_base: Some(config.collector_base),
            event_type: Some(config.event_type),
            retry: Some(config.retry),
            timestamp_zone: Some(config.timestamp_zone),
            connect_timeout_ms: Some(duration_ms(config.connect_timeout)),
            request_timeout_ms: Some(duration_ms(config.request_timeout)),
            ..Self::default()
        }
    }

    /// Set the collector account (required).
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Set the base64 ciphertext of the insert key.
    ///
    /// Required unless a resolver is supplied via
    /// [`with_secret_resolver`](Self::with_secret_resolver).
    pub fn with_insert_key(mut self, encoded: impl Into<String>) -> Self {
        self.insert_key = Some(encoded.into());
        self
    }

    /// Override the collector scheme and host.
    pub fn with_collector_base(mut self, base: impl Into<String>) -> Self {
        self.collector_base = Some(base.into());
        self
    }

    /// Override the `eventType` attached to events.
    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = Some(event_type.into());
        self
    }

    option_setter!(
        #[doc = "Override the retry policy."]
        with_retry_policy,
        retry,
        RetryPolicy
    );
    option_setter!(
        #[doc = "Render event timestamps in local time or UTC."]
        with_timestamp_zone,
        timestamp_zone,
        TimestampZone
    );
    option_setter!(
        #[doc = "Set the connect timeout in milliseconds."]
        with_connect_timeout_ms,
        connect_timeout_ms,
        u64
    );
    option_setter!(
        #[doc = "Set the overall request timeout in milliseconds."]
        with_request_timeout_ms,
        request_timeout_ms,
        u64
    );

    /// Replace the HTTP transport used for collector requests.
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace secret resolution entirely.
    pub fn with_secret_resolver(mut self, resolver: Box<dyn SecretResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Decrypt the configured insert key with `decryptor`.
    pub fn with_decryptor(mut self, decryptor: Box<dyn Decryptor>) -> Self {
        self.decryptor = Some(decryptor);
        self
    }

    /// Replace the suspension used between retry attempts.
    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = Some(sleeper);
        self
    }

    fn validate_credentials(&self) -> Result<(), ConfigError> {
        if self.resolver.is_some() {
            return Ok(());
        }
        match &self.insert_key {
            None => Err(ConfigError::InvalidConfig(
                "forwarder requires an insert key or a secret resolver".into(),
            )),
            Some(key) if key.trim().is_empty() => Err(ConfigError::InvalidConfig(
                "insert key must not be empty".into(),
            )),
            _ => Ok(()),
        }
    }

    fn build_config(&self) -> Result<ForwarderConfig, ConfigError> {
        self.validate_credentials()?;

        let defaults = ForwarderConfig::default();
        let config = ForwarderConfig {
            account_id: self.account_id.clone().unwrap_or_default(),
            insert_key: self.insert_key.clone().unwrap_or_default(),
            collector_base: self
                .collector_base
                .clone()
                .unwrap_or(defaults.collector_base),
            event_type: self.event_type.clone().unwrap_or(defaults.event_type),
            retry: self.retry.clone().unwrap_or(defaults.retry),
            timestamp_zone: self.timestamp_zone.unwrap_or(defaults.timestamp_zone),
            connect_timeout: self
                .connect_timeout_ms
                .map_or(defaults.connect_timeout, Duration::from_millis),
            request_timeout: self
                .request_timeout_ms
                .map_or(defaults.request_timeout, Duration::from_millis),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the settings and assemble the forwarder.
    pub fn build(self) -> Result<Forwarder, ConfigError> {
        let config = self.build_config()?;

        let transport: Box<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Box::new(CollectorClient::new(
                config.collector_url(),
                config.connect_timeout,
                config.request_timeout,
            )),
        };
        let resolver: Box<dyn SecretResolver> = match self.resolver {
            Some(resolver) => resolver,
            None => {
                let decryptor: Box<dyn Decryptor> = match self.decryptor {
                    Some(decryptor) => decryptor,
                    None => Box::new(PassthroughDecryptor),
                };
                Box::new(EncryptedSecretResolver::new(
                    config.insert_key.clone(),
                    decryptor,
                ))
            }
        };
        let sleeper: Box<dyn Sleeper> = match self.sleeper {
            Some(sleeper) => sleeper,
            None => Box::new(ThreadSleeper),
        };
        let engine = RetryEngine::with_sleeper(config.retry.clone(), sleeper);

        Ok(Forwarder::from_parts(config, engine, transport, resolver))
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
