//! Plain key/value form of a message.
//!
//! The formatter produces a [`StructuredMessage`]; [`Message`] rebuilds a
//! validated message from it. Unknown keys are rejected at every level.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{AttachmentDraft, Message, PayloadError};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructuredAttachment {
    #[serde(default)]
    pub pretext: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl From<StructuredAttachment> for AttachmentDraft {
    fn from(value: StructuredAttachment) -> Self {
        AttachmentDraft::new()
            .with_pretext(value.pretext)
            .with_title(value.title)
            .text(value.text.unwrap_or(Value::Null))
            .with_title_link(value.title_link)
            .with_color(value.color)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StructuredMessage {
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    /// Footer icon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_icon: Option<String>,
    /// Footer icon URL as emitted by the formatter; wins over `footer_icon`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_url: Option<String>,
    #[serde(default)]
    pub attachments: Vec<StructuredAttachment>,
}

impl StructuredMessage {
    /// Parse a generic JSON value, rejecting unknown keys.
    pub fn from_value(data: Value) -> Result<Self, PayloadError> {
        serde_json::from_value(data).map_err(|err| PayloadError::Malformed(err.to_string()))
    }
}

impl TryFrom<StructuredMessage> for Message {
    type Error = PayloadError;

    fn try_from(data: StructuredMessage) -> Result<Self, Self::Error> {
        Message::from_structured_parts(data, None)
    }
}
