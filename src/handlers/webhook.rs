//! Handler turning records into webhook notifications.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::delivery::Deliver;
use crate::filters::RecordFilter;
use crate::formatter::{RecordFormatter, WebhookFormatter};
use crate::handler::{HandlerError, RecordHandler};
use crate::log_record::LogRecord;
use crate::message::{Message, PayloadError};

/// Formats each accepted record and delivers it straight away.
///
/// The handler keeps its own threshold and filters, separate from those of
/// the logger it is attached to. Build one with
/// [`WebhookHandlerBuilder`](super::WebhookHandlerBuilder).
pub struct WebhookHandler {
    pub(super) formatter: WebhookFormatter,
    pub(super) webhook_prefix: String,
    pub(super) level: u32,
    pub(super) filters: Vec<Arc<dyn RecordFilter>>,
    pub(super) sink: Arc<dyn Deliver>,
}

impl fmt::Debug for WebhookHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookHandler")
            .field("formatter", &self.formatter)
            .field("webhook_prefix", &self.webhook_prefix)
            .field("level", &self.level)
            .field("filters", &self.filters.len())
            .finish_non_exhaustive()
    }
}

impl WebhookHandler {
    pub fn formatter(&self) -> &WebhookFormatter {
        &self.formatter
    }

    pub fn webhook_prefix(&self) -> &str {
        &self.webhook_prefix
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Whether `record` clears the handler's threshold and filters.
    pub fn accepts(&self, record: &LogRecord) -> bool {
        record.levelno >= self.level && self.filters.iter().all(|f| f.should_log(record))
    }

    /// Format `record` into a validated [`Message`].
    ///
    /// # Errors
    ///
    /// Returns a [`PayloadError`] if the formatted data does not make a
    /// deliverable message.
    pub fn build_message(&self, record: &LogRecord) -> Result<Message, PayloadError> {
        Message::from_structured_parts(self.formatter.format(record), Some(&self.webhook_prefix))
    }
}

impl RecordHandler for WebhookHandler {
    fn handle(&self, record: &LogRecord) -> Result<(), HandlerError> {
        if !self.accepts(record) {
            return Ok(());
        }
        let message = self.build_message(record)?;
        self.sink.deliver(&message)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
