//! Core handler trait and errors.

use std::any::Any;

use thiserror::Error;

use crate::delivery::DeliveryError;
use crate::log_record::LogRecord;
use crate::message::PayloadError;

/// Errors a handler reports back to its logger.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The formatted record did not make a valid message.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// Delivery to the webhook failed.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Trait implemented by all record handlers.
///
/// Handlers are `Send + Sync` so loggers can share them across threads.
pub trait RecordHandler: Send + Sync {
    /// Process one record that passed the logger's level and filters.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] when the record could not be delivered.
    /// Loggers report the error and carry on with the next handler.
    fn handle(&self, record: &LogRecord) -> Result<(), HandlerError>;

    /// Allow downcasting to the concrete handler type.
    fn as_any(&self) -> &dyn Any;
}
