//! Turn log records and errors into chat webhook notifications.
//!
//! Records flow from a [`Logger`] through a [`WebhookHandler`], which uses a
//! [`WebhookFormatter`] to derive a [`Message`] and delivers it with a
//! [`Notifier`]. [`register_handler`] wires all of this up in one call.

pub mod delivery;
pub mod filters;
pub mod formatter;
pub mod handler;
pub mod handlers;
pub mod level;
pub mod log_record;
pub mod logger;
pub mod manager;
pub mod message;
pub mod notifiable;
pub mod registration;

#[cfg(any(test, feature = "test-util"))]
pub mod test_utils;

pub use delivery::{
    Deliver, DeliveryError, DeliveryHandle, Notifier, PreparedRequest, Scheduler, SchedulerError,
    Sent, TaskFailure, send_blocking,
};
pub use filters::{NotifyOnlyFilter, RecordFilter};
pub use formatter::{
    ConfigError, FooterRule, FormatterConfig, HeaderRule, PretextRule, RecordFormatter,
    WebhookFormatter,
};
pub use handler::{HandlerError, RecordHandler};
pub use handlers::{HandlerBuildError, HandlerBuilderTrait, WebhookHandler, WebhookHandlerBuilder};
pub use level::{NotifyLevel, ParseLevelError, color_for_levelno, level_name};
pub use log_record::{LogRecord, RecordMessage};
pub use logger::Logger;
pub use manager::{ManagerError, get_logger, reset_manager};
pub use message::{
    Attachment, AttachmentDraft, AttachmentText, DEFAULT_FOOTER_ICON, DEFAULT_WEBHOOK_PREFIX,
    Message, Payload, PayloadError, StructuredAttachment, StructuredMessage,
};
pub use notifiable::Notifiable;
pub use registration::{LOGGER_NAME, Registration, register_builder, register_handler, register_on};

/// `logtest::Logger::start` installs the global logger and panics on a second
/// call, so unit tests share a single installation.
#[cfg(test)]
pub(crate) fn start_log_capture() -> logtest::Logger {
    static START: std::sync::Once = std::sync::Once::new();
    START.call_once(|| {
        let _ = logtest::Logger::start();
    });
    logtest::Logger
}
