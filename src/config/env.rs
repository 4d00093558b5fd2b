//! Environment variable loading for [`ForwarderConfig`].

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::timestamp::TimestampZone;

use super::ForwarderConfig;

pub const ACCOUNT_ID_VAR: &str = "ACCOUNT_ID";
pub const INSERT_KEY_VAR: &str = "INSERT_KEY";
pub const EVENT_TYPE_VAR: &str = "EVENT_TYPE";
pub const COLLECTOR_URL_VAR: &str = "COLLECTOR_URL";
pub const MAX_RETRIES_VAR: &str = "MAX_RETRIES";
pub const INITIAL_BACKOFF_MS_VAR: &str = "INITIAL_BACKOFF_MS";
pub const BACKOFF_MULTIPLIER_VAR: &str = "BACKOFF_MULTIPLIER";
pub const TIMESTAMP_TIMEZONE_VAR: &str = "TIMESTAMP_TIMEZONE";
pub const CONNECT_TIMEOUT_MS_VAR: &str = "CONNECT_TIMEOUT_MS";
pub const REQUEST_TIMEOUT_MS_VAR: &str = "REQUEST_TIMEOUT_MS";

impl ForwarderConfig {
    /// Load settings from the process environment.
    ///
    /// `ACCOUNT_ID` and `INSERT_KEY` are required; every other variable
    /// falls back to its default when unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self {
            account_id: get(ACCOUNT_ID_VAR).ok_or(ConfigError::Missing(ACCOUNT_ID_VAR))?,
            insert_key: get(INSERT_KEY_VAR).ok_or(ConfigError::Missing(INSERT_KEY_VAR))?,
            ..Self::default()
        };

        if let Some(event_type) = get(EVENT_TYPE_VAR) {
            config.event_type = event_type;
        }
        if let Some(base) = get(COLLECTOR_URL_VAR) {
            config.collector_base = base;
        }
        if let Some(attempts) = parse_var(get(MAX_RETRIES_VAR), MAX_RETRIES_VAR)? {
            config.retry.max_attempts = attempts;
        }
        if let Some(ms) = parse_var(get(INITIAL_BACKOFF_MS_VAR), INITIAL_BACKOFF_MS_VAR)? {
            config.retry.initial_backoff = Duration::from_millis(ms);
        }
        if let Some(multiplier) = parse_var(get(BACKOFF_MULTIPLIER_VAR), BACKOFF_MULTIPLIER_VAR)? {
            config.retry.multiplier = multiplier;
        }
        if let Some(zone) = get(TIMESTAMP_TIMEZONE_VAR) {
            let parsed = zone.parse::<TimestampZone>();
            config.timestamp_zone = parsed.map_err(|()| ConfigError::InvalidVar {
                name: TIMESTAMP_TIMEZONE_VAR,
                reason: format!("expected `local` or `utc`, got `{zone}`"),
            })?;
        }
        if let Some(ms) = parse_var(get(CONNECT_TIMEOUT_MS_VAR), CONNECT_TIMEOUT_MS_VAR)? {
            config.connect_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_var(get(REQUEST_TIMEOUT_MS_VAR), REQUEST_TIMEOUT_MS_VAR)? {
            config.request_timeout = Duration::from_millis(ms);
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T>(raw: Option<String>, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.map(|value| {
        value.trim().parse().map_err(|err: T::Err| ConfigError::InvalidVar {
            name,
            reason: err.to_string(),
        })
    })
    .transpose()
}
