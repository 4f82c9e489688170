//! Formatters turning log records into structured messages.
//!
//! Provides the core [`RecordFormatter`] trait and the
//! [`WebhookFormatter`] that applies a [`FormatterConfig`] to each record.

use std::sync::Arc;

use crate::log_record::LogRecord;
use crate::message::StructuredMessage;

mod config;
mod webhook;


pub use config::{
    ConfigError, EXCEPTION_CLASS_RULE, EXCEPTION_MESSAGE_RULE, FooterRule, FormatterConfig,
    HeaderRule, PretextRule,
};
pub use webhook::WebhookFormatter;

/// Trait for formatting log records into message data.
///
/// Implementors must be thread-safe (`Send + Sync`) so formatters can be
/// shared between handlers.
pub trait RecordFormatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> StructuredMessage;
}

impl RecordFormatter for Arc<dyn RecordFormatter> {
    fn format(&self, record: &LogRecord) -> StructuredMessage {
        (**self).format(record)
    }
}

impl RecordFormatter for Box<dyn RecordFormatter> {
    fn format(&self, record: &LogRecord) -> StructuredMessage {
        (**self).format(record)
    }
}
