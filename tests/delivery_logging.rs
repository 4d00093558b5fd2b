//! Diagnostic output emitted while forwarding.

use logtest::Logger;
use serial_test::serial;

use logship::test_utils::{RecordingSleeper, ScriptedTransport, awslogs_event, batch_json, response};
use logship::{Forwarder, HttpResponse, InvocationContext, StaticSecret, TimestampZone};

fn forwarder(transport: &ScriptedTransport) -> Forwarder {
    Forwarder::builder()
        .with_account_id("1234567")
        .with_secret_resolver(Box::new(StaticSecret::new("insert-key")))
        .with_timestamp_zone(TimestampZone::Utc)
        .with_transport(Box::new(transport.clone()))
        .with_sleeper(Box::new(RecordingSleeper::default()))
        .build()
        .expect("build forwarder")
}

/// Drain everything captured so far as `(level, message)` pairs.
fn drain(logger: &mut Logger) -> Vec<(log::Level, String)> {
    std::iter::from_fn(|| logger.pop())
        .map(|record| (record.level(), record.args().to_owned()))
        .collect()
}

#[test]
#[serial]
fn logs_outcomes_retries_and_failures() {
    let mut logger = Logger::start();
    drain(&mut logger);

    let refused = HttpResponse {
        body: r#"{"error":"invalid insert key"}"#.to_owned(),
        ..response(403)
    };
    let transport = ScriptedTransport::default()
        .script("a", [Ok(response(503)), Ok(response(200))])
        .script("b", [Ok(refused)])
        .unreachable_for("c", 3);
    let forwarder = forwarder(&transport);

    forwarder
        .handle(
            &awslogs_event(&batch_json(&["a", "b"])),
            &InvocationContext::new("req-log"),
        )
        .expect("batch completes");
    forwarder
        .handle(
            &serde_json::json!({"detail-type": "Scheduled Event"}),
            &InvocationContext::new("req-unsupported"),
        )
        .expect("unsupported is not an error");
    forwarder
        .handle(
            &awslogs_event(&batch_json(&["c"])),
            &InvocationContext::new("req-exhaust"),
        )
        .expect_err("retries exhausted");

    let logs = drain(&mut logger);
    let has = |level: log::Level, fragment: &str| {
        logs.iter().any(|(l, msg)| *l == level && msg.contains(fragment))
    };
    assert!(has(log::Level::Warn, "unclassified status 503"));
    assert!(has(log::Level::Info, "retrying collector request in"));
    assert!(has(log::Level::Info, "log entry a sent. Response code: 200"));
    assert!(has(log::Level::Warn, "log entry b rejected: HTTP 403"));
    assert!(has(
        log::Level::Warn,
        r#"collector response (HTTP 403): {"error":"invalid insert key"}"#
    ));
    assert!(has(log::Level::Warn, "unsupported trigger payload"));
    assert!(has(log::Level::Warn, "Scheduled Event"));
    assert!(has(log::Level::Error, "retry limit reached after 3 attempts"));
}
