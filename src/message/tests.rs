//! Unit tests for the message model.

use std::fmt;
use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::notifiable::Notifiable;

const WEBHOOK: &str = "https://hooks.slack.com/services/some-channel-id";

#[fixture]
fn attachments() -> Value {
    json!([
        {"pretext": "Some pretext", "title": "Some title", "text": "Some text", "color": null},
        {"pretext": "Other pretext", "title": "Other title", "text": "Other text", "color": "#33EE33"},
    ])
}

fn expected(pretext: &str, title: &str, text: &str, color: Option<&str>) -> Attachment {
    Attachment {
        mrkdwn: true,
        color: color.map(str::to_owned),
        pretext: Some(pretext.to_owned()),
        title: Some(title.to_owned()),
        title_link: None,
        text: Some(text.to_owned()),
        footer: None,
        footer_icon: Some(DEFAULT_FOOTER_ICON.to_owned()),
        ts: 0.0,
    }
}

#[derive(Debug)]
struct KeyError(&'static str);

impl fmt::Display for KeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for KeyError {}
impl Notifiable for KeyError {}

#[test]
fn header_only_message_has_empty_attachments() {
    let mut message = Message::new();
    message.set_webhook_url(WEBHOOK).expect("valid url");
    message.set_header("This is a test message");

    let payload = serde_json::to_value(message.build_payload().expect("payload")).expect("json");
    assert_eq!(
        payload,
        json!({"text": "This is a test message", "attachments": []})
    );
}

#[test]
fn empty_message_has_no_payload() {
    let message = Message::new();
    assert_eq!(
        message.build_payload().err(),
        Some(PayloadError::MissingContent)
    );
    assert!(!message.is_valid());
}

#[test]
fn unset_webhook_url_fails_on_read() {
    let message = Message::new();
    assert_eq!(message.webhook_url(), Err(PayloadError::MissingWebhookUrl));
}

#[rstest]
#[case("")]
#[case("invalid-webhook-url")]
#[case("http://hooks.slack.com/services/x")]
fn invalid_webhook_urls_are_rejected(#[case] url: &str) {
    let mut message = Message::new();
    assert!(message.set_webhook_url(url).is_err());
    assert!(message.webhook_url().is_err());
}

#[test]
fn custom_prefix_is_enforced() {
    let mut message = Message::with_webhook_prefix("http://127.0.0.1");
    assert!(message.set_webhook_url(WEBHOOK).is_err());
    message
        .set_webhook_url("http://127.0.0.1:9000/hook")
        .expect("local url");
    assert_eq!(message.webhook_url(), Ok("http://127.0.0.1:9000/hook"));
}

#[test]
fn attachments_keep_insertion_order() {
    let mut message = Message::new();
    message.set_header("Some header");
    message.attach(
        AttachmentDraft::new()
            .pretext("Some pretext")
            .title("Some title")
            .text("Some text"),
    );
    message.attach(
        AttachmentDraft::new()
            .pretext("Other pretext")
            .title("Other title")
            .text("Other text")
            .color("#33EE33"),
    );

    let payload = message.build_payload().expect("payload");
    assert_eq!(
        payload.attachments,
        [
            expected("Some pretext", "Some title", "Some text", None),
            expected("Other pretext", "Other title", "Other text", Some("#33EE33")),
        ]
    );
}

#[test]
fn attachment_json_has_wire_field_names() {
    let mut message = Message::new();
    message.attach(AttachmentDraft::new().title("t").title_link("https://example.com"));
    let payload = serde_json::to_value(message.build_payload().expect("payload")).expect("json");
    let attachment = &payload["attachments"][0];
    assert_eq!(attachment["mrkdwn"], json!(true));
    assert_eq!(attachment["title_link"], json!("https://example.com"));
    assert_eq!(attachment["footer_icon"], json!(DEFAULT_FOOTER_ICON));
    assert!(attachment["ts"].as_f64().is_some_and(|ts| ts > 0.0));
    assert_eq!(payload["text"], Value::Null);
}

#[test]
fn footer_is_snapshotted_at_attach_time() {
    let mut message = Message::new();
    message.set_footer(Some("first".into()));
    message.attach(AttachmentDraft::new().title("a"));
    message.set_footer(Some("second".into()));
    message.set_footer_icon(Some("https://example.com/icon.png".into()));
    message.attach(AttachmentDraft::new().title("b"));

    let attachments = message.attachments();
    assert_eq!(attachments[0].footer.as_deref(), Some("first"));
    assert_eq!(attachments[0].footer_icon.as_deref(), Some(DEFAULT_FOOTER_ICON));
    assert_eq!(attachments[1].footer.as_deref(), Some("second"));
    assert_eq!(
        attachments[1].footer_icon.as_deref(),
        Some("https://example.com/icon.png")
    );
}

#[test]
fn error_text_is_prefixed_with_class_name() {
    let mut message = Message::new();
    let err: Arc<dyn Notifiable> = Arc::new(KeyError("some key error"));
    message.attach(AttachmentDraft::new().text(err));
    message.attach(AttachmentDraft::new().text(json!({"count": 2})));
    assert_eq!(
        message.attachments()[0].text.as_deref(),
        Some("KeyError: some key error")
    );
    assert_eq!(message.attachments()[1].text.as_deref(), Some(r#"{"count":2}"#));
}

#[rstest]
fn round_trips_from_structured_data(attachments: Value) {
    let message = Message::from_structured(json!({
        "webhook_url": WEBHOOK,
        "header": "Some header",
        "attachments": attachments,
    }))
    .expect("valid data");

    let payload = message.build_payload().expect("payload");
    assert_eq!(payload.text, Some("Some header"));
    assert_eq!(
        payload.attachments,
        [
            expected("Some pretext", "Some title", "Some text", None),
            expected("Other pretext", "Other title", "Other text", Some("#33EE33")),
        ]
    );
    assert!(message.is_valid());
}

#[test]
fn empty_structured_header_is_kept_when_attachments_exist() {
    let message = Message::from_structured(json!({
        "webhook_url": WEBHOOK,
        "header": "",
        "attachments": [{"title": "a"}],
    }))
    .expect("valid data");

    let payload = message.build_payload().expect("payload");
    assert_eq!(payload.text, Some(""));
    let body = serde_json::to_value(&payload).expect("serialisable");
    assert_eq!(body["text"], json!(""));
}

#[test]
fn structured_footer_applies_to_every_attachment() {
    let message = Message::from_structured(json!({
        "webhook_url": WEBHOOK,
        "footer": "Some footer",
        "footer_url": "https://cataas.com/cat",
        "attachments": [{"title": "a"}, {"title": "b"}],
    }))
    .expect("valid data");

    for attachment in message.attachments() {
        assert_eq!(attachment.footer.as_deref(), Some("Some footer"));
        assert_eq!(attachment.footer_icon.as_deref(), Some("https://cataas.com/cat"));
    }
}

#[rstest]
#[case(json!({"webhook_url": WEBHOOK, "invalid": "dict"}))]
#[case(json!({"webhook_url": WEBHOOK, "header": "h", "invalid": "dict"}))]
#[case(json!({"webhook_url": WEBHOOK, "attachments": [{"title": "t", "colour": "#fff"}]}))]
#[case(json!({"webhook_url": WEBHOOK, "header": 3}))]
#[case(json!("just a string"))]
fn malformed_structured_data_is_rejected(#[case] data: Value) {
    assert!(matches!(
        Message::from_structured(data),
        Err(PayloadError::Malformed(_))
    ));
}

#[rstest]
#[case(json!({"header": "h"}), PayloadError::MissingWebhookUrl)]
#[case(json!({"webhook_url": "", "header": "h"}), PayloadError::MissingWebhookUrl)]
#[case(json!({"webhook_url": WEBHOOK}), PayloadError::MissingContent)]
#[case(json!({"webhook_url": WEBHOOK, "header": "", "attachments": []}), PayloadError::MissingContent)]
fn incomplete_structured_data_is_rejected(#[case] data: Value, #[case] expected: PayloadError) {
    assert_eq!(Message::from_structured(data).err(), Some(expected));
}

#[test]
fn structured_data_with_foreign_webhook_is_rejected() {
    let result = Message::from_structured(json!({
        "webhook_url": "https://example.com/hook",
        "header": "h",
    }));
    assert!(matches!(
        result,
        Err(PayloadError::InvalidWebhookUrl { .. })
    ));
}
