use std::fmt;

/// Terminal result of one record's attempt sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The collector accepted the event.
    Delivered { status: u16 },
    /// The collector refused the event; retrying would not help.
    Rejected(Rejection),
    /// The collector signalled rate limiting (HTTP 429).
    ///
    /// Kept apart from [`Outcome::Rejected`] so callers can slow down
    /// subsequent records; the engine itself never retries it.
    Throttled { status: u16, reason: String },
    /// Every attempt failed transiently.
    Exhausted { attempts: u32 },
}

/// Non-retryable client errors reported by the collector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// HTTP 400.
    UnexpectedPayload,
    /// HTTP 403: the insert key was refused.
    InvalidCredential,
    /// HTTP 404: the account or region endpoint does not exist.
    InvalidEndpoint,
    /// Any other 4xx except 429.
    Other { status: u16, reason: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedPayload => f.write_str("HTTP 400: unexpected payload"),
            Self::InvalidCredential => {
                f.write_str("HTTP 403: invalid credential, review the insert key")
            }
            Self::InvalidEndpoint => {
                f.write_str("HTTP 404: invalid endpoint, review the account and region")
            }
            Self::Other { status, reason } => write!(f, "HTTP {status}: {reason}"),
        }
    }
}
