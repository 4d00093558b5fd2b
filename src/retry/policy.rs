//! Immutable retry configuration handed to [`RetryEngine`](super::RetryEngine).

use std::time::Duration;

use crate::error::ConfigError;

/// Default number of attempts made for a single record.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default delay inserted before the second attempt.
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(1);
/// Default factor applied to the delay after each failed attempt.
pub const DEFAULT_BACKOFF_MULTIPLIER: u32 = 2;

/// Exponential backoff policy for collector requests.
///
/// Raising these numbers keeps an invocation alive for longer during
/// collector outages; lowering them makes retry exhaustion (and a redelivery
/// of the whole batch by the trigger) more likely.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Upper bound on attempts, the first one included.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_backoff: Duration,
    /// Geometric growth factor between successive delays.
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
            multiplier: DEFAULT_BACKOFF_MULTIPLIER,
        }
    }
}

impl RetryPolicy {
    /// Reject policies that could never make an attempt or never grow.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidConfig(
                "max_attempts must be greater than zero".into(),
            ));
        }
        if self.multiplier == 0 {
            return Err(ConfigError::InvalidConfig(
                "backoff multiplier must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Delay preceding the 1-based `attempt`, or `None` for the first one.
    ///
    /// [`RetryEngine`](super::RetryEngine) sleeps for this long before each
    /// attempt.
    ///
    /// Attempt `k >= 2` waits `initial_backoff * multiplier^(k - 2)`,
    /// saturating at [`Duration::MAX`].
    pub fn backoff_before(&self, attempt: u32) -> Option<Duration> {
        if attempt < 2 {
            return None;
        }
        let mut delay = self.initial_backoff;
        for _ in 2..attempt {
            delay = delay.saturating_mul(self.multiplier);
        }
        Some(delay)
    }
}
