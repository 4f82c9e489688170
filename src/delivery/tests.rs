//! Tests for synchronous and scheduled delivery against a local server.

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use rstest::rstest;
use serde_json::json;
use serial_test::serial;
use tokio::runtime::Handle;

use super::*;
use crate::message::{AttachmentDraft, Message, PayloadError};
use crate::test_utils::mock_server::{bind, spawn_mock_server};

fn local_message(addr: std::net::SocketAddr) -> Message {
    let mut message = Message::with_webhook_prefix("http://127.0.0.1");
    message
        .set_webhook_url(format!("http://{addr}/services/T000/B000"))
        .expect("local webhook accepted");
    message.set_header("Deploy finished");
    message.attach(AttachmentDraft::new().title("build").text("ok").color("#BBDBD1"));
    message
}

fn recording_scheduler(scheduler: Scheduler) -> (Scheduler, Arc<Mutex<Vec<String>>>) {
    let failures = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&failures);
    let scheduler =
        scheduler.with_exception_handler(move |failure| sink.lock().push(failure.to_string()));
    (scheduler, failures)
}

async fn exploding_request() -> Result<String, DeliveryError> {
    panic!("boom")
}

#[test]
fn synchronous_send_posts_json_payload() {
    let (addr, rx) = spawn_mock_server(bind(), vec![200], "ok");
    let message = local_message(addr);

    let response = Notifier::synchronous()
        .send_sync(&message)
        .expect("delivery succeeds");
    assert_eq!(response.status(), 200);

    let request = rx.recv().expect("request captured");
    assert_eq!(request.method, "POST");
    assert_eq!(request.path, "/services/T000/B000");
    assert_eq!(request.header("content-type"), Some("application/json"));
    let body = request.json();
    assert_eq!(body["text"], json!("Deploy finished"));
    assert_eq!(body["attachments"][0]["title"], json!("build"));
    assert_eq!(body["attachments"][0]["mrkdwn"], json!(true));
}

#[rstest]
#[case(400)]
#[case(500)]
fn synchronous_send_surfaces_http_status(#[case] status: u16) {
    let (addr, _rx) = spawn_mock_server(bind(), vec![status], "no");
    let err = Notifier::synchronous()
        .send_sync(&local_message(addr))
        .expect_err("non-2xx fails");
    assert!(matches!(err, DeliveryError::Http(_)));
    assert_eq!(err.status(), Some(status));
}

#[test]
fn invalid_message_fails_before_network() {
    let message = Message::new();
    let err = Notifier::synchronous()
        .send(&message)
        .expect_err("no webhook set");
    assert!(matches!(
        err,
        DeliveryError::Payload(PayloadError::MissingWebhookUrl)
    ));
}

#[test]
fn send_dispatches_on_mode() {
    let (addr, _rx) = spawn_mock_server(bind(), vec![200], "ok");
    let sent = Notifier::default()
        .send(&local_message(addr))
        .expect("delivery succeeds");
    assert!(matches!(sent, Sent::Response(_)));
}

#[test]
fn synchronous_notifier_rejects_async_send() {
    let notifier = Notifier::synchronous();
    assert!(!notifier.is_asynchronous());
    assert!(notifier.scheduler().is_none());
    let err = notifier
        .send_async(&Message::new())
        .expect_err("no scheduler");
    assert!(matches!(err, DeliveryError::NotAsynchronous));
}

#[test]
fn prepared_request_captures_url_and_body() {
    let (addr, _rx) = spawn_mock_server(bind(), vec![], "");
    let message = local_message(addr);
    let request = PreparedRequest::prepare(&message).expect("valid message");
    assert_eq!(request.url(), format!("http://{addr}/services/T000/B000"));
    assert_eq!(request.body()["text"], json!("Deploy finished"));
}

#[tokio::test]
async fn scheduled_send_resolves_to_response_body() {
    let (addr, rx) = spawn_mock_server(bind(), vec![200], "ok");
    let (scheduler, failures) = recording_scheduler(Scheduler::new(Handle::current()));
    let notifier = Notifier::asynchronous(scheduler);
    assert!(notifier.is_asynchronous());

    let handle = notifier
        .send_async(&local_message(addr))
        .expect("message is valid");
    assert_eq!(handle.await.as_deref(), Some("ok"));

    let request = rx.recv().expect("request captured");
    assert_eq!(request.json()["attachments"][0]["text"], json!("ok"));
    assert!(failures.lock().is_empty());
}

#[tokio::test]
async fn scheduled_failures_reach_exception_handler() {
    let (addr, _rx) = spawn_mock_server(bind(), vec![500], "boom");
    let (scheduler, failures) =
        recording_scheduler(Scheduler::process_default().expect("ambient runtime"));
    let notifier = Notifier::asynchronous(scheduler);

    let handle = notifier
        .send_async(&local_message(addr))
        .expect("message is valid");
    assert_eq!(handle.await, None);

    let failures = failures.lock();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].starts_with("scheduled delivery failed"));
}

#[tokio::test]
#[serial(log_capture)]
async fn default_exception_handler_logs_failures() {
    let mut capture = crate::start_log_capture();
    let (addr, _rx) = spawn_mock_server(bind(), vec![500], "boom");
    let notifier = Notifier::asynchronous(Scheduler::new(Handle::current()));

    let handle = notifier
        .send_async(&local_message(addr))
        .expect("message is valid");
    assert_eq!(handle.await, None);

    let logged = std::iter::from_fn(|| capture.pop()).any(|record| {
        record.level() == log::Level::Error
            && record.args().contains("webhook delivery task failed: scheduled delivery failed")
    });
    assert!(logged, "task failure was not logged");
}

#[tokio::test]
async fn panicking_task_is_reported() {
    let (scheduler, failures) = recording_scheduler(Scheduler::new(Handle::current()));

    assert_eq!(scheduler.spawn(exploding_request()).await, None);
    assert_eq!(
        failures.lock().as_slice(),
        ["scheduled delivery panicked: boom".to_owned()]
    );
}

#[tokio::test]
async fn awaited_post_propagates_errors() {
    let (addr, _rx) = spawn_mock_server(bind(), vec![404, 200], "ok");
    let notifier = Notifier::synchronous();
    let message = local_message(addr);

    let err = notifier.post(&message).await.expect_err("404 fails");
    assert!(matches!(err, DeliveryError::Client(_)));
    assert_eq!(err.status(), Some(404));

    assert_eq!(notifier.post(&message).await.expect("second succeeds"), "ok");
}

#[test]
fn process_default_reuses_one_runtime_outside_async_context() {
    let thread_name = |scheduler: &Scheduler| {
        scheduler.block_on(async {
            tokio::spawn(async { thread::current().name().map(str::to_owned) })
                .await
                .expect("task joins")
        })
    };
    let first = Scheduler::process_default().expect("default runtime");
    let second = Scheduler::process_default().expect("default runtime");
    assert_eq!(thread_name(&first).as_deref(), Some("webhook-delivery"));
    assert_eq!(thread_name(&second).as_deref(), Some("webhook-delivery"));

    let (addr, _rx) = spawn_mock_server(bind(), vec![200], "ok");
    let handle = Notifier::asynchronous(second)
        .send_async(&local_message(addr))
        .expect("message is valid");
    assert_eq!(first.block_on(handle).as_deref(), Some("ok"));
}
