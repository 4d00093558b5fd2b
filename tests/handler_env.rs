//! `handle_invocation` configured from the process environment.

use std::env;
use std::net::TcpListener;
use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use serial_test::serial;

use logship::config::{ACCOUNT_ID_VAR, COLLECTOR_URL_VAR, INSERT_KEY_VAR, TIMESTAMP_TIMEZONE_VAR};
use logship::test_utils::mock_collector::{gunzip, spawn_collector};
use logship::test_utils::{awslogs_event, batch_json};
use logship::{
    ConfigError, DeliveryError, EnvelopeError, HandlerError, Invocation, InvocationContext,
    handle_invocation,
};

struct EnvVarGuard {
    keys: Vec<&'static str>,
}

impl EnvVarGuard {
    fn set(vars: &[(&'static str, String)]) -> Self {
        for (key, value) in vars {
            // SAFETY: tests touching the environment are serialised.
            unsafe { env::set_var(key, value) };
        }
        Self {
            keys: vars.iter().map(|(key, _)| *key).collect(),
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            // SAFETY: tests touching the environment are serialised.
            unsafe { env::remove_var(key) };
        }
    }
}

#[test]
#[serial]
fn forwards_batch_with_environment_settings() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener");
    let (addr, rx) = spawn_collector(listener, vec![200, 200]);
    let _guard = EnvVarGuard::set(&[
        (ACCOUNT_ID_VAR, "7654321".to_owned()),
        (INSERT_KEY_VAR, BASE64_STANDARD.encode("env-key")),
        (COLLECTOR_URL_VAR, format!("http://{addr}")),
        (TIMESTAMP_TIMEZONE_VAR, "utc".to_owned()),
    ]);

    let event = awslogs_event(&batch_json(&["first", "second"]));
    let invocation =
        handle_invocation(&event, &InvocationContext::new("req-env")).expect("invocation");
    let Invocation::Processed(report) = invocation else {
        panic!("expected a processed batch");
    };
    assert_eq!(report.delivered(), 2);

    let first = rx.recv_timeout(Duration::from_secs(5)).expect("request");
    assert_eq!(first.path, "/v1/accounts/7654321/events");
    assert_eq!(first.header("x-insert-key"), Some("env-key"));
    let body: serde_json::Value = serde_json::from_str(&gunzip(&first.body)).expect("JSON");
    assert_eq!(body["logId"], "first");
    assert_eq!(body["logCreatedTimestamp"], "20180101120000");
}

fn clear_credentials() {
    for key in [ACCOUNT_ID_VAR, INSERT_KEY_VAR] {
        // SAFETY: tests touching the environment are serialised.
        unsafe { env::remove_var(key) };
    }
}

#[test]
#[serial]
fn missing_account_fails_a_subscription_batch() {
    let _guard = EnvVarGuard::set(&[(INSERT_KEY_VAR, BASE64_STANDARD.encode("env-key"))]);
    // SAFETY: tests touching the environment are serialised.
    unsafe { env::remove_var(ACCOUNT_ID_VAR) };

    let event = awslogs_event(&batch_json(&["a"]));
    let err = handle_invocation(&event, &InvocationContext::default())
        .expect_err("configuration is incomplete");
    assert!(matches!(
        err,
        HandlerError::Config(ConfigError::Missing(ACCOUNT_ID_VAR))
    ));
}

#[test]
#[serial]
fn unsupported_event_needs_no_configuration() {
    clear_credentials();

    let invocation = handle_invocation(
        &serde_json::json!({"source": "aws.events"}),
        &InvocationContext::default(),
    )
    .expect("unsupported events complete");
    assert!(matches!(invocation, Invocation::Unsupported));
}

#[test]
#[serial]
fn malformed_envelope_fails_without_configuration() {
    clear_credentials();

    let err = handle_invocation(
        &serde_json::json!({"awslogs": {"data": "%%%"}}),
        &InvocationContext::default(),
    )
    .expect_err("malformed envelope");
    assert!(matches!(
        err,
        HandlerError::Delivery(DeliveryError::Envelope(EnvelopeError::Base64(_)))
    ));
}
