//! Decoding of the trigger payload into a [`LogBatch`].
//!
//! Log subscriptions deliver `{"awslogs": {"data": "<base64>"}}` where the
//! base64 text wraps a gzip stream of the batch JSON. Any other payload shape
//! is reported as [`Envelope::Unsupported`] rather than an error.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serde_json::Value;

use crate::codec::gunzip_to_string;
use crate::error::EnvelopeError;
use crate::event::LogBatch;

const ENVELOPE_KEY: &str = "awslogs";
const DATA_KEY: &str = "data";

/// Result of inspecting a trigger payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Envelope {
    Batch(LogBatch),
    Unsupported,
}

/// Decode `event` into a batch, or classify it as unsupported.
///
/// # Errors
///
/// Fails when the envelope key is present but its contents are malformed:
/// missing or non-string `data`, invalid base64, a corrupt gzip stream, or a document that
/// is not a batch.
pub fn decode_trigger(event: &Value) -> Result<Envelope, EnvelopeError> {
    let Some(envelope) = event.get(ENVELOPE_KEY) else {
        return Ok(Envelope::Unsupported);
    };
    let data = envelope.get(DATA_KEY).ok_or(EnvelopeError::MissingData)?;
    let data = data.as_str().ok_or(EnvelopeError::InvalidData)?;
    decode_data(data).map(Envelope::Batch)
}

/// Decode the base64 gzip JSON carried in `awslogs.data`.
pub fn decode_data(data: &str) -> Result<LogBatch, EnvelopeError> {
    let compressed = BASE64_STANDARD.decode(data.trim())?;
    let json = gunzip_to_string(&compressed).map_err(EnvelopeError::Decompress)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::awslogs_event;
    use rstest::rstest;
    use serde_json::json;

    const BATCH: &str = r#"{
        "owner": "123456789012",
        "logGroup": "/aws/lambda/orders",
        "logEvents": [
            {"id": "a", "timestamp": 1514808000000, "message": "one"},
            {"id": "b", "timestamp": 1514808001000, "message": "two"}
        ]
    }"#;

    #[rstest]
    fn decodes_subscription_payload() {
        let event = awslogs_event(BATCH);
        let Envelope::Batch(batch) = decode_trigger(&event).expect("decode") else {
            panic!("expected a batch");
        };
        assert_eq!(batch.owner, "123456789012");
        let ids: Vec<_> = batch.log_events.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[rstest]
    #[case(json!({"Records": []}))]
    #[case(json!({}))]
    #[case(json!("plain string"))]
    fn other_shapes_are_unsupported(#[case] event: Value) {
        let envelope = decode_trigger(&event).expect("decode");
        assert_eq!(envelope, Envelope::Unsupported);
    }

    #[rstest]
    fn missing_data_is_an_error() {
        let err = decode_trigger(&json!({"awslogs": {}})).expect_err("no data");
        assert!(matches!(err, EnvelopeError::MissingData));
    }

    #[rstest]
    #[case(json!(7))]
    #[case(json!(null))]
    #[case(json!({"nested": "value"}))]
    fn non_string_data_is_an_error(#[case] data: Value) {
        let event = json!({"awslogs": {"data": data}});
        let err = decode_trigger(&event).expect_err("not a string");
        assert!(matches!(err, EnvelopeError::InvalidData));
        assert_eq!(err.to_string(), "log envelope data field is not a string");
    }

    #[rstest]
    fn invalid_base64_is_an_error() {
        let event = json!({"awslogs": {"data": "%%%"}});
        let err = decode_trigger(&event).expect_err("bad base64");
        assert!(matches!(err, EnvelopeError::Base64(_)));
    }

    #[rstest]
    fn uncompressed_data_is_an_error() {
        let data = BASE64_STANDARD.encode(BATCH);
        let event = json!({"awslogs": {"data": data}});
        let err = decode_trigger(&event).expect_err("not gzip");
        assert!(matches!(err, EnvelopeError::Decompress(_)));
    }

    #[rstest]
    fn non_batch_document_is_an_error() {
        let event = awslogs_event(r#"{"hello": "world"}"#);
        let err = decode_trigger(&event).expect_err("not a batch");
        assert!(matches!(err, EnvelopeError::Json(_)));
    }
}
