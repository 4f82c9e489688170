//! Notification messages and their wire payload.
//!
//! A [`Message`] holds a webhook URL, an optional header, an optional footer
//! and an ordered list of [`Attachment`]s. Validation is lazy: the webhook
//! URL is checked when set *and* when read, and content is checked when the
//! payload is built, so an incomplete message fails before any network
//! activity.

mod attachment;
mod error;
mod structured;

#[cfg(test)]
mod tests;

use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

pub use attachment::{Attachment, AttachmentDraft, AttachmentText};
pub use error::PayloadError;
pub use structured::{StructuredAttachment, StructuredMessage};

/// Host prefix every webhook URL must start with unless overridden.
pub const DEFAULT_WEBHOOK_PREFIX: &str = "https://hooks.slack.com";
/// Icon shown next to attachment footers unless overridden.
pub const DEFAULT_FOOTER_ICON: &str =
    "https://platform.slack-edge.com/img/default_application_icon.png";

/// Body posted to the webhook.
#[derive(Debug, Serialize)]
pub struct Payload<'a> {
    pub text: Option<&'a str>,
    pub attachments: &'a [Attachment],
}

#[derive(Clone, Debug)]
pub struct Message {
    webhook_prefix: String,
    webhook_url: Option<String>,
    header: Option<String>,
    footer: Option<String>,
    footer_icon: Option<String>,
    attachments: Vec<Attachment>,
}

impl Default for Message {
    fn default() -> Self {
        Self::with_webhook_prefix(DEFAULT_WEBHOOK_PREFIX)
    }
}

impl Message {
    /// Create an empty message accepting webhooks under
    /// [`DEFAULT_WEBHOOK_PREFIX`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty message accepting webhooks under `prefix`.
    pub fn with_webhook_prefix(prefix: impl Into<String>) -> Self {
        Self {
            webhook_prefix: prefix.into(),
            webhook_url: None,
            header: None,
            footer: None,
            footer_icon: Some(DEFAULT_FOOTER_ICON.to_owned()),
            attachments: Vec::new(),
        }
    }

    /// Rebuild a message from generic structured data.
    ///
    /// # Errors
    ///
    /// [`PayloadError::Malformed`] for unknown keys or wrongly typed values,
    /// [`PayloadError::MissingWebhookUrl`] when no URL is given and
    /// [`PayloadError::MissingContent`] when header and attachments are
    /// both empty. An invalid URL fails as in [`Message::set_webhook_url`].
    pub fn from_structured(data: Value) -> Result<Self, PayloadError> {
        Self::from_structured_parts(StructuredMessage::from_value(data)?, None)
    }

    /// As [`Message::from_structured`], validating the URL against `prefix`.
    pub fn from_structured_with_prefix(data: Value, prefix: &str) -> Result<Self, PayloadError> {
        Self::from_structured_parts(StructuredMessage::from_value(data)?, Some(prefix))
    }

    pub(crate) fn from_structured_parts(
        data: StructuredMessage,
        prefix: Option<&str>,
    ) -> Result<Self, PayloadError> {
        let webhook_url = data
            .webhook_url
            .filter(|url| !url.is_empty())
            .ok_or(PayloadError::MissingWebhookUrl)?;
        let header = data.header;
        let has_header = header.as_deref().is_some_and(|h| !h.is_empty());
        if !has_header && data.attachments.is_empty() {
            return Err(PayloadError::MissingContent);
        }

        let mut message = match prefix {
            Some(prefix) => Self::with_webhook_prefix(prefix),
            None => Self::new(),
        };
        message.set_webhook_url(webhook_url)?;
        message.header = header;
        message.footer = data.footer;
        if let Some(icon) = data.footer_url.or(data.footer_icon) {
            message.footer_icon = Some(icon);
        }
        for attachment in data.attachments {
            message.attach(attachment.into());
        }
        Ok(message)
    }

    /// Set the webhook URL.
    ///
    /// # Errors
    ///
    /// Fails when `url` is empty or does not start with the configured
    /// webhook prefix.
    pub fn set_webhook_url(&mut self, url: impl Into<String>) -> Result<(), PayloadError> {
        let url = url.into();
        if url.is_empty() {
            return Err(PayloadError::EmptyWebhookUrl);
        }
        if !url.starts_with(&self.webhook_prefix) {
            return Err(PayloadError::InvalidWebhookUrl {
                url,
                prefix: self.webhook_prefix.clone(),
            });
        }
        self.webhook_url = Some(url);
        Ok(())
    }

    /// The webhook URL.
    ///
    /// # Errors
    ///
    /// [`PayloadError::MissingWebhookUrl`] if no URL has been set.
    pub fn webhook_url(&self) -> Result<&str, PayloadError> {
        self.webhook_url
            .as_deref()
            .ok_or(PayloadError::MissingWebhookUrl)
    }

    pub fn webhook_prefix(&self) -> &str {
        &self.webhook_prefix
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Set the main text.
    pub fn set_header(&mut self, header: impl Into<String>) {
        self.header = Some(header.into());
    }

    pub fn footer(&self) -> Option<&str> {
        self.footer.as_deref()
    }

    /// Set the footer shown under attachments added from now on.
    pub fn set_footer(&mut self, footer: Option<String>) {
        self.footer = footer;
    }

    pub fn footer_icon(&self) -> Option<&str> {
        self.footer_icon.as_deref()
    }

    /// Set the footer icon used by attachments added from now on.
    pub fn set_footer_icon(&mut self, icon: Option<String>) {
        self.footer_icon = icon;
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Append an attachment, snapshotting the current footer and icon.
    pub fn attach(&mut self, draft: AttachmentDraft) -> &Attachment {
        let ts = Utc::now().timestamp_micros() as f64 / 1_000_000.0;
        let attachment =
            Attachment::from_draft(draft, self.footer.clone(), self.footer_icon.clone(), ts);
        self.attachments.push(attachment);
        &self.attachments[self.attachments.len() - 1]
    }

    fn has_content(&self) -> bool {
        self.header.as_deref().is_some_and(|h| !h.is_empty()) || !self.attachments.is_empty()
    }

    /// Build the body posted to the webhook.
    ///
    /// # Errors
    ///
    /// [`PayloadError::MissingContent`] if there is neither a header nor an
    /// attachment.
    pub fn build_payload(&self) -> Result<Payload<'_>, PayloadError> {
        if !self.has_content() {
            return Err(PayloadError::MissingContent);
        }
        Ok(Payload {
            text: self.header.as_deref(),
            attachments: &self.attachments,
        })
    }

    /// Whether the message has a webhook URL and some content.
    pub fn is_valid(&self) -> bool {
        self.webhook_url.is_some() && self.has_content()
    }
}
