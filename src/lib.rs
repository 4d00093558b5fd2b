//! Forwards log subscription batches to an HTTP event collector.
//!
//! Each record of an inbound batch becomes one gzip-compressed JSON event
//! posted to the collector. Requests are wrapped in a [`RetryEngine`] that
//! retries transient failures with exponential backoff and classifies client
//! errors as terminal. Exhausting the retries for any record fails the whole
//! invocation so the trigger can redeliver the batch.
//!
//! The crate logs through the [`log`] facade and never installs a logger of
//! its own.

pub mod codec;
pub mod collector;
pub mod config;
pub mod credential;
pub mod delivery;
pub mod envelope;
pub mod error;
pub mod event;
pub mod handler;
pub mod retry;
pub mod timestamp;

#[cfg(any(test, feature = "test-util"))]
pub mod test_utils;

pub use collector::{CollectorClient, HttpResponse, Transport, TransportFailure};
pub use config::{ForwarderBuilder, ForwarderConfig};
pub use credential::{Decryptor, EncryptedSecretResolver, SecretResolver, StaticSecret};
pub use delivery::{DeliveryReport, Forwarder, RecordReport};
pub use envelope::{Envelope, decode_trigger};
pub use error::{
    CodecError, ConfigError, CredentialError, DeliveryError, EnvelopeError, HandlerError,
    RecordError,
};
pub use event::{LogBatch, LogRecord, OutboundEvent};
pub use handler::{Invocation, InvocationContext, handle_invocation};
pub use retry::{Outcome, Rejection, RetryEngine, RetryPolicy};
pub use timestamp::TimestampZone;
