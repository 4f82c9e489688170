//! Attachment blocks rendered beneath a message's main text.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::log_record::render_value;
use crate::notifiable::{Notifiable, describe};

/// Attachment content as handed to [`Message::attach`](super::Message::attach).
///
/// Errors render as `"<ClassName>: <message>"`, JSON values other than
/// strings render as their JSON text.
#[derive(Clone, Default)]
pub enum AttachmentText {
    #[default]
    Absent,
    Plain(String),
    Notifiable(Arc<dyn Notifiable>),
    Value(Value),
}

impl AttachmentText {
    pub(crate) fn normalise(self) -> Option<String> {
        match self {
            Self::Absent | Self::Value(Value::Null) => None,
            Self::Plain(text) => Some(text),
            Self::Notifiable(err) => Some(describe(err.as_ref())),
            Self::Value(value) => Some(render_value(&value)),
        }
    }
}

impl fmt::Debug for AttachmentText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("Absent"),
            Self::Plain(text) => f.debug_tuple("Plain").field(text).finish(),
            Self::Notifiable(err) => f
                .debug_tuple("Notifiable")
                .field(&describe(err.as_ref()))
                .finish(),
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
        }
    }
}

impl From<&str> for AttachmentText {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_owned())
    }
}

impl From<String> for AttachmentText {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

impl From<Option<String>> for AttachmentText {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Absent, Self::Plain)
    }
}

impl From<Arc<dyn Notifiable>> for AttachmentText {
    fn from(value: Arc<dyn Notifiable>) -> Self {
        Self::Notifiable(value)
    }
}

impl From<Value> for AttachmentText {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Caller-supplied attachment fields, consumed by
/// [`Message::attach`](super::Message::attach).
#[derive(Clone, Debug, Default)]
pub struct AttachmentDraft {
    pub(crate) pretext: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) text: AttachmentText,
    pub(crate) title_link: Option<String>,
    pub(crate) color: Option<String>,
}

impl AttachmentDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretext(mut self, pretext: impl Into<String>) -> Self {
        self.pretext = Some(pretext.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Body text; may be Markdown.
    pub fn text(mut self, text: impl Into<AttachmentText>) -> Self {
        self.text = text.into();
        self
    }

    /// URL that turns the title into a link.
    pub fn title_link(mut self, link: impl Into<String>) -> Self {
        self.title_link = Some(link.into());
        self
    }

    /// Hex colour code such as `#33EE33`.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub(crate) fn with_pretext(mut self, pretext: Option<String>) -> Self {
        self.pretext = pretext;
        self
    }

    pub(crate) fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub(crate) fn with_title_link(mut self, link: Option<String>) -> Self {
        self.title_link = link;
        self
    }

    pub(crate) fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }
}

/// Attachment as it appears on the wire.
///
/// Equality ignores `ts`, which records wall-clock time at attach time.
#[derive(Clone, Debug, Serialize)]
pub struct Attachment {
    pub mrkdwn: bool,
    pub color: Option<String>,
    pub pretext: Option<String>,
    pub title: Option<String>,
    pub title_link: Option<String>,
    pub text: Option<String>,
    pub footer: Option<String>,
    pub footer_icon: Option<String>,
    pub ts: f64,
}

impl Attachment {
    pub(crate) fn from_draft(
        draft: AttachmentDraft,
        footer: Option<String>,
        footer_icon: Option<String>,
        ts: f64,
    ) -> Self {
        Self {
            mrkdwn: true,
            color: draft.color,
            pretext: draft.pretext,
            title: draft.title,
            title_link: draft.title_link,
            text: draft.text.normalise(),
            footer,
            footer_icon,
            ts,
        }
    }
}

impl PartialEq for Attachment {
    fn eq(&self, other: &Self) -> bool {
        self.mrkdwn == other.mrkdwn
            && self.color == other.color
            && self.pretext == other.pretext
            && self.title == other.title
            && self.title_link == other.title_link
            && self.text == other.text
            && self.footer == other.footer
            && self.footer_icon == other.footer_icon
    }
}
