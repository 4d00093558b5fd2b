//! Outbound requests to the event collector.
//!
//! [`Transport`] is the seam the retry engine drives: one call performs
//! exactly one request. [`CollectorClient`] is the production implementation
//! built on a `ureq` agent; it reports every HTTP status as an
//! [`HttpResponse`] and reserves `Err` for failures where no response was
//! received at all (DNS, refused or reset connections, timeouts).

mod client;

#[cfg(test)]
mod tests;

use thiserror::Error;

pub use client::{CollectorClient, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};

/// Default collector host; the account path is appended by [`collector_url`].
pub const DEFAULT_COLLECTOR_BASE: &str = "https://insights-collector.newrelic.com";

/// Status line and body of a collector response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: String::new(),
        }
    }
}

/// A request that produced no HTTP response.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("transport failure: {0}")]
pub struct TransportFailure(pub String);

/// Performs a single POST of an encoded event.
pub trait Transport {
    /// Send `body` authenticated with `insert_key`.
    fn post(&self, body: &[u8], insert_key: &str) -> Result<HttpResponse, TransportFailure>;
}

/// Build the per-account events endpoint under `base`.
pub fn collector_url(base: &str, account_id: &str) -> String {
    format!(
        "{}/v1/accounts/{}/events",
        base.trim_end_matches('/'),
        account_id
    )
}
