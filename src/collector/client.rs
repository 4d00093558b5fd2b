//! `ureq`-backed collector transport.

use std::time::Duration;

use ureq::{Agent, AgentBuilder};

use super::{HttpResponse, Transport, TransportFailure};

/// Default connection timeout applied when establishing HTTP connections.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default overall timeout applied to a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const INSERT_KEY_HEADER: &str = "X-Insert-Key";

/// Posts gzip-compressed JSON events to a fixed collector URL.
///
/// The agent keeps a connection pool between calls; nothing else is carried
/// across requests.
#[derive(Clone, Debug)]
pub struct CollectorClient {
    url: String,
    agent: Agent,
}

impl CollectorClient {
    pub fn new(url: impl Into<String>, connect_timeout: Duration, timeout: Duration) -> Self {
        let agent = AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout(timeout)
            .build();
        Self {
            url: url.into(),
            agent,
        }
    }
}

impl Transport for CollectorClient {
    fn post(&self, body: &[u8], insert_key: &str) -> Result<HttpResponse, TransportFailure> {
        let result = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .set("Content-Encoding", "gzip")
            .set(INSERT_KEY_HEADER, insert_key)
            .send_bytes(body);

        match result {
            Ok(response) => Ok(into_response(response)),
            Err(ureq::Error::Status(_, response)) => Ok(into_response(response)),
            Err(ureq::Error::Transport(transport)) => Err(TransportFailure(transport.to_string())),
        }
    }
}

fn into_response(response: ureq::Response) -> HttpResponse {
    let status = response.status();
    let status_text = response.status_text().to_owned();
    // A body that cannot be read does not change the status classification.
    let body = response.into_string().unwrap_or_default();
    HttpResponse {
        status,
        status_text,
        body,
    }
}
