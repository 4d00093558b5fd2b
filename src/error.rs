//! Error types shared across the forwarder.

use std::io;

use thiserror::Error;

/// Errors raised while assembling a [`Forwarder`](crate::Forwarder).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required setting {0}")]
    Missing(&'static str),
    /// An environment variable could not be parsed.
    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
    /// Invalid user supplied configuration.
    #[error("invalid forwarder configuration: {0}")]
    InvalidConfig(String),
}

/// Failures obtaining the collector insert key.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("insert key is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("failed to decrypt insert key: {0}")]
    Decrypt(String),
    #[error("insert key is not valid UTF-8")]
    NotUtf8,
}

/// Failures serialising or compressing an outbound event.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to serialise event: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to compress event: {0}")]
    Io(#[from] io::Error),
}

/// Malformed trigger payloads.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("log envelope has no data field")]
    MissingData,
    #[error("log envelope data field is not a string")]
    InvalidData,
    #[error("log data is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("log data is not a gzip stream: {0}")]
    Decompress(#[source] io::Error),
    #[error("log data is not a valid batch: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures local to one record; the rest of the batch still runs.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record timestamp {0} is out of range")]
    InvalidTimestamp(u64),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Failures that abort a whole invocation.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
    /// The only per-record condition that fails the batch, so the trigger can
    /// redeliver it.
    #[error("retry limit reached after {attempts} attempts; failed to send log entry {record_id}")]
    RetryExhausted { record_id: String, attempts: u32 },
}

/// Errors surfaced by [`handle_invocation`](crate::handle_invocation).
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
