//! Formatter producing webhook message data from log records.

use std::sync::Arc;

use serde_json::Value;

use super::RecordFormatter;
use super::config::{FooterRule, FormatterConfig, HeaderRule, PretextRule};
use crate::level::{NotifyLevel, color_for_levelno};
use crate::log_record::{LogRecord, RecordMessage};
use crate::message::{StructuredAttachment, StructuredMessage};
use crate::notifiable::Notifiable;

/// Applies a [`FormatterConfig`] to records destined for one webhook.
#[derive(Clone, Debug)]
pub struct WebhookFormatter {
    webhook_url: String,
    config: FormatterConfig,
}

impl WebhookFormatter {
    pub fn new(webhook_url: impl Into<String>, config: FormatterConfig) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            config,
        }
    }

    pub fn webhook_url(&self) -> &str {
        &self.webhook_url
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Main text of the message.
    ///
    /// `ExceptionClass` yields nothing for plain-text messages and
    /// `Attribute` yields nothing when the record lacks the attribute.
    pub fn derive_header(&self, record: &LogRecord) -> Option<String> {
        match self.config.header() {
            HeaderRule::ExceptionClass => record.message.class_name().map(str::to_owned),
            HeaderRule::ExceptionMessage => Some(record.message.message_field()),
            HeaderRule::Literal(text) => Some(text.clone()),
            HeaderRule::Attribute(name) => record.attribute(name),
            HeaderRule::RawMessage => Some(record.message.render()),
        }
    }

    pub fn derive_footer(&self, record: &LogRecord) -> Option<String> {
        match self.config.footer()? {
            FooterRule::ExceptionClass => record.message.class_name().map(str::to_owned),
            FooterRule::ExceptionMessage => Some(record.message.message_field()),
            FooterRule::Literal(text) => Some(text.clone()),
        }
    }

    pub fn derive_footer_icon_url(&self) -> Option<String> {
        self.config.footer_icon_url().map(str::to_owned)
    }

    /// Pretext of the single attachment built from the record itself.
    pub fn derive_pretext(&self, record: &LogRecord) -> Option<String> {
        match self.config.pretext() {
            PretextRule::LevelName => Some(record.levelname.clone()),
            PretextRule::Suppressed => None,
            PretextRule::Attribute(name) => record.attribute(name),
        }
    }

    /// One attachment per sub-payload when the message offers them,
    /// otherwise a single attachment describing the record.
    pub fn derive_attachments(&self, record: &LogRecord) -> Vec<StructuredAttachment> {
        let payloads = record
            .message
            .as_notifiable()
            .and_then(|err| err.attachment_payloads());
        match payloads {
            Some(payloads) => payloads.iter().map(sub_payload_attachment).collect(),
            None => vec![self.record_attachment(record)],
        }
    }

    fn record_attachment(&self, record: &LogRecord) -> StructuredAttachment {
        let rendered = record.message.render();
        let text = match &record.message {
            RecordMessage::Notifiable(err) => err.notify_text().unwrap_or_else(|| rendered.clone()),
            RecordMessage::Text(_) => rendered.clone(),
        };
        StructuredAttachment {
            pretext: self.derive_pretext(record),
            title: Some(rendered),
            text: Some(Value::String(text)),
            title_link: None,
            color: Some(color_for_levelno(record.levelno).to_owned()),
        }
    }
}

/// Sub-payloads are coloured by their own level, defaulting to `ERROR`
/// rather than the parent record's level.
fn sub_payload_attachment(sub: &Arc<dyn Notifiable>) -> StructuredAttachment {
    let levelno = sub
        .notify_level()
        .unwrap_or_else(|| NotifyLevel::Error.levelno());
    StructuredAttachment {
        pretext: sub.notify_pretext(),
        title: Some(sub.message_field().unwrap_or_else(|| sub.to_string())),
        text: Some(Value::String(
            sub.notify_text().unwrap_or_else(|| sub.to_string()),
        )),
        title_link: None,
        color: Some(color_for_levelno(levelno).to_owned()),
    }
}

impl RecordFormatter for WebhookFormatter {
    fn format(&self, record: &LogRecord) -> StructuredMessage {
        StructuredMessage {
            webhook_url: Some(self.webhook_url.clone()),
            header: self.derive_header(record),
            footer: self.derive_footer(record),
            footer_icon: None,
            footer_url: self.derive_footer_icon_url(),
            attachments: self.derive_attachments(record),
        }
    }
}
