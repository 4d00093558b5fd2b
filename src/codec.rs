//! Payload codec: JSON serialisation followed by gzip compression.

use std::io::{Read, Write};

use flate2::{Compression, read::GzDecoder, write::GzEncoder};

use crate::error::CodecError;
use crate::event::OutboundEvent;

/// Serialise `event` to JSON and gzip it for the request body.
pub fn encode(event: &OutboundEvent) -> Result<Vec<u8>, CodecError> {
    let json = serde_json::to_vec(event)?;
    gzip(&json)
}

/// Gzip `bytes` with the default compression level.
pub fn gzip(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut encoder = GzEncoder::new(
        Vec::with_capacity(bytes.len() / 2 + 32),
        Compression::default(),
    );
    encoder.write_all(bytes)?;
    Ok(encoder.finish()?)
}

/// Inflate a gzip stream into UTF-8 text.
pub fn gunzip_to_string(bytes: &[u8]) -> std::io::Result<String> {
    let mut text = String::new();
    GzDecoder::new(bytes).read_to_string(&mut text)?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn encoded_event_inflates_to_json() {
        let event = OutboundEvent {
            event_type: "Custom".into(),
            owner: "owner".into(),
            log_group: "group".into(),
            log_id: "id-1".into(),
            log_created_timestamp: "20180101120000".into(),
            message: "hello".into(),
        };
        let body = encode(&event).expect("encode");
        assert_eq!(&body[..2], &[0x1f, 0x8b], "gzip magic");

        let json = gunzip_to_string(&body).expect("inflate");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed["logId"], "id-1");
        assert_eq!(parsed["message"], "hello");
    }

    #[rstest]
    fn gunzip_rejects_plain_bytes() {
        assert!(gunzip_to_string(b"not gzip").is_err());
    }
}
