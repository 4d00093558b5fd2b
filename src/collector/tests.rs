//! Tests for the collector transport against a mock HTTP server.

use std::net::TcpListener;
use std::time::Duration;

use rstest::{fixture, rstest};

use crate::test_utils::mock_collector::{gunzip, spawn_collector};

use super::{CollectorClient, Transport, collector_url};

#[fixture]
fn tcp_listener() -> TcpListener {
    TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener")
}

fn client_for(url: String) -> CollectorClient {
    CollectorClient::new(url, Duration::from_secs(5), Duration::from_secs(5))
}

#[rstest]
fn posts_gzip_json_with_insert_key(tcp_listener: TcpListener) {
    let (addr, rx) = spawn_collector(tcp_listener, vec![200]);
    let client = client_for(collector_url(&format!("http://{addr}"), "12345"));

    let body = crate::codec::gzip(br#"{"eventType":"Test"}"#).expect("gzip");
    let response = client.post(&body, "secret-key").expect("response");
    assert_eq!(response.status, 200);

    let captured = rx.recv_timeout(Duration::from_secs(5)).expect("request");
    assert_eq!(captured.method, "POST");
    assert_eq!(captured.path, "/v1/accounts/12345/events");
    assert_eq!(captured.header("content-type"), Some("application/json"));
    assert_eq!(captured.header("content-encoding"), Some("gzip"));
    assert_eq!(captured.header("x-insert-key"), Some("secret-key"));
    assert_eq!(gunzip(&captured.body), r#"{"eventType":"Test"}"#);
}

#[rstest]
#[case(404, "Not Found")]
#[case(429, "Too Many Requests")]
#[case(503, "Service Unavailable")]
fn error_statuses_are_responses_not_failures(
    tcp_listener: TcpListener,
    #[case] status: u16,
    #[case] text: &str,
) {
    let (addr, _rx) = spawn_collector(tcp_listener, vec![status]);
    let client = client_for(format!("http://{addr}/events"));

    let response = client.post(b"{}", "key").expect("status is a response");
    assert_eq!(response.status, status);
    assert_eq!(response.status_text, text);
}

#[rstest]
fn refused_connection_is_a_transport_failure(tcp_listener: TcpListener) {
    let addr = tcp_listener.local_addr().expect("listener has address");
    drop(tcp_listener);
    let client = client_for(format!("http://{addr}/events"));

    let err = client.post(b"{}", "key").expect_err("nothing is listening");
    assert!(err.to_string().starts_with("transport failure"));
}

#[rstest]
#[case("https://collector.example", "42", "https://collector.example/v1/accounts/42/events")]
#[case("https://collector.example/", "42", "https://collector.example/v1/accounts/42/events")]
fn builds_account_endpoint(#[case] base: &str, #[case] account: &str, #[case] expected: &str) {
    assert_eq!(collector_url(base, account), expected);
}
