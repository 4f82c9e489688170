//! Log record representation consumed by handlers and formatters.
//!
//! A [`LogRecord`] carries the message object (plain text or a
//! [`Notifiable`] error), the numeric and named severity, and arbitrary
//! extra attributes that formatter rules can look up by name.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::level::{NotifyLevel, level_name};
use crate::notifiable::Notifiable;

/// Message object carried by a record.
#[derive(Clone)]
pub enum RecordMessage {
    Text(String),
    Notifiable(Arc<dyn Notifiable>),
}

impl RecordMessage {
    /// Wrap an error value.
    pub fn error<E: Notifiable>(err: E) -> Self {
        Self::Notifiable(Arc::new(err))
    }

    /// String form of the message (the `Display` output for errors).
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Notifiable(err) => err.to_string(),
        }
    }

    /// The error object, if the message is not plain text.
    pub fn as_notifiable(&self) -> Option<&Arc<dyn Notifiable>> {
        match self {
            Self::Text(_) => None,
            Self::Notifiable(err) => Some(err),
        }
    }

    /// Short type name of the error; plain text has none.
    pub fn class_name(&self) -> Option<&'static str> {
        self.as_notifiable().map(|err| err.class_name())
    }

    /// The error's embedded message, falling back to the string form.
    pub fn message_field(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Notifiable(err) => err.message_field().unwrap_or_else(|| err.to_string()),
        }
    }
}

impl fmt::Debug for RecordMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Notifiable(err) => f
                .debug_tuple("Notifiable")
                .field(&err.class_name())
                .field(&err.to_string())
                .finish(),
        }
    }
}

impl From<&str> for RecordMessage {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for RecordMessage {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Arc<dyn Notifiable>> for RecordMessage {
    fn from(value: Arc<dyn Notifiable>) -> Self {
        Self::Notifiable(value)
    }
}

#[derive(Clone, Debug)]
pub struct LogRecord {
    /// Name of the logger that created this record.
    pub logger: String,
    /// Numeric severity.
    pub levelno: u32,
    /// Severity name, e.g. `"WARNING"`.
    pub levelname: String,
    /// The message object.
    pub message: RecordMessage,
    /// Time the record was created.
    pub created: DateTime<Utc>,
    /// Additional named attributes.
    pub extra: BTreeMap<String, Value>,
}

impl LogRecord {
    /// Construct a record at one of the named levels.
    pub fn new(logger: &str, level: NotifyLevel, message: impl Into<RecordMessage>) -> Self {
        Self::with_levelno(logger, level.levelno(), message)
    }

    /// Construct a record with an arbitrary numeric level.
    pub fn with_levelno(logger: &str, levelno: u32, message: impl Into<RecordMessage>) -> Self {
        Self {
            logger: logger.to_owned(),
            levelno,
            levelname: level_name(levelno),
            message: message.into(),
            created: Utc::now(),
            extra: BTreeMap::new(),
        }
    }

    /// Attach an extra attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// Look up an attribute by name and render it as text.
    ///
    /// Built-in attributes (`name`, `msg`, `message`, `levelname`,
    /// `levelno`, `created`) take precedence over extra attributes.
    pub fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.logger.clone()),
            "msg" | "message" => Some(self.message.render()),
            "levelname" => Some(self.levelname.clone()),
            "levelno" => Some(self.levelno.to_string()),
            "created" => Some(self.created.to_rfc3339()),
            other => self.extra.get(other).map(render_value),
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.levelname, self.message.render())
    }
}

/// Strings render verbatim; other JSON values use their JSON text.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
