//! Test doubles shared by unit and integration tests.
//!
//! Compiled for unit tests and, behind the `test-util` feature, for the
//! integration suites under `tests/`.

pub mod mock_collector;

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serde_json::{Value, json};

use crate::codec::{gunzip_to_string, gzip};
use crate::collector::{HttpResponse, Transport, TransportFailure};
use crate::retry::Sleeper;

/// Reason phrase for the statuses used in tests.
pub fn status_text(code: u16) -> &'static str {
    match code {
        200 => "OK",
        202 => "Accepted",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        413 => "Payload Too Large",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// A bodiless response with the standard reason phrase.
pub fn response(status: u16) -> HttpResponse {
    HttpResponse::new(status, status_text(status))
}

/// Records requested sleeps instead of blocking.
#[derive(Clone, Debug, Default)]
pub struct RecordingSleeper {
    sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
    }
}

type Script = VecDeque<Result<HttpResponse, TransportFailure>>;

/// Transport answering per record from scripted results.
///
/// The record is identified by inflating the request body and reading its
/// `logId`. Records without a script (or whose script has run out) receive
/// `200 OK`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTransport {
    scripts: Rc<RefCell<HashMap<String, Script>>>,
    calls: Rc<RefCell<Vec<String>>>,
    keys: Rc<RefCell<Vec<String>>>,
}

impl ScriptedTransport {
    /// Queue `results` for the record with `log_id`.
    pub fn script(
        self,
        log_id: &str,
        results: impl IntoIterator<Item = Result<HttpResponse, TransportFailure>>,
    ) -> Self {
        self.scripts
            .borrow_mut()
            .entry(log_id.to_owned())
            .or_default()
            .extend(results);
        self
    }

    /// Convenience for a record that always fails at the transport level.
    pub fn unreachable_for(self, log_id: &str, attempts: usize) -> Self {
        let failures = (0..attempts).map(|_| Err(TransportFailure("connection reset".into())));
        self.script(log_id, failures)
    }

    /// `logId` of every request, in the order they were made.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Insert key sent with every request.
    pub fn insert_keys(&self) -> Vec<String> {
        self.keys.borrow().clone()
    }
}

impl Transport for ScriptedTransport {
    fn post(&self, body: &[u8], insert_key: &str) -> Result<HttpResponse, TransportFailure> {
        let json = gunzip_to_string(body).expect("request body is gzip");
        let event: Value = serde_json::from_str(&json).expect("request body is JSON");
        let log_id = event["logId"].as_str().expect("event has logId").to_owned();

        self.calls.borrow_mut().push(log_id.clone());
        self.keys.borrow_mut().push(insert_key.to_owned());
        self.scripts
            .borrow_mut()
            .get_mut(&log_id)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(response(200)))
    }
}

/// Batch JSON with one record per id, timestamps one second apart.
pub fn batch_json(ids: &[&str]) -> String {
    let events: Vec<Value> = ids
        .iter()
        .enumerate()
        .map(|(offset, id)| {
            json!({
                "id": id,
                "timestamp": 1_514_808_000_000u64 + offset as u64 * 1_000,
                "message": format!("message {id}"),
            })
        })
        .collect();
    json!({
        "messageType": "DATA_MESSAGE",
        "owner": "123456789012",
        "logGroup": "/aws/lambda/orders",
        "logStream": "2018/01/01/[$LATEST]0123",
        "subscriptionFilters": ["forwarder"],
        "logEvents": events,
    })
    .to_string()
}

/// Wrap batch JSON the way a log subscription trigger delivers it.
pub fn awslogs_event(batch_json: &str) -> Value {
    let compressed = gzip(batch_json.as_bytes()).expect("gzip batch");
    json!({ "awslogs": { "data": BASE64_STANDARD.encode(compressed) } })
}
