//! Attaching webhook handlers to loggers.
//!
//! [`register_handler`] is the one-call setup: it builds a
//! [`WebhookHandler`](crate::handlers::WebhookHandler) and attaches it to
//! the `webhook_notifier` logger. The returned [`Registration`] is the only
//! way to detach that handler again. Registering twice attaches two
//! handlers and each posts every record.

use std::sync::Arc;

use crate::filters::NotifyOnlyFilter;
use crate::formatter::FormatterConfig;
use crate::handler::RecordHandler;
use crate::handlers::{HandlerBuildError, HandlerBuilderTrait, WebhookHandlerBuilder};
use crate::logger::Logger;
use crate::manager;

/// Logger that [`register_handler`] attaches to.
pub const LOGGER_NAME: &str = "webhook_notifier";

/// Handle to an attached handler.
#[derive(Clone)]
#[must_use = "the registration is needed to detach the handler"]
pub struct Registration {
    logger: Arc<Logger>,
    handler: Arc<dyn RecordHandler>,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("logger", &self.logger.name())
            .finish_non_exhaustive()
    }
}

impl Registration {
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn handler(&self) -> &Arc<dyn RecordHandler> {
        &self.handler
    }

    /// Remove the handler from its logger.
    ///
    /// Returns `false` if it had already been removed by other means.
    pub fn detach(self) -> bool {
        self.logger.remove_handler(&self.handler)
    }
}

/// Attach a webhook handler to the [`LOGGER_NAME`] logger.
///
/// The handler notifies at the logger's current threshold. `notify_only`
/// restricts notifications to the admitted error types and `config`
/// replaces the default formatter configuration.
///
/// # Errors
///
/// Fails when `webhook_url` is empty.
pub fn register_handler(
    webhook_url: &str,
    notify_only: Option<NotifyOnlyFilter>,
    config: Option<FormatterConfig>,
) -> Result<Registration, HandlerBuildError> {
    let mut builder = WebhookHandlerBuilder::new().with_webhook_url(webhook_url);
    if let Some(filter) = notify_only {
        builder = builder.with_notify_only(filter);
    }
    if let Some(config) = config {
        builder = builder.with_config(config);
    }
    register_builder(builder)
}

/// Attach the handler `builder` produces to the [`LOGGER_NAME`] logger.
pub fn register_builder(builder: WebhookHandlerBuilder) -> Result<Registration, HandlerBuildError> {
    register_on(manager::get_logger(LOGGER_NAME)?, builder)
}

/// Attach the handler `builder` produces to `logger`.
///
/// The handler threshold is taken from the logger at the time of the call.
pub fn register_on(
    logger: Arc<Logger>,
    builder: WebhookHandlerBuilder,
) -> Result<Registration, HandlerBuildError> {
    let handler = builder.with_levelno(logger.level()).build()?;
    logger.add_handler(Arc::clone(&handler));
    Ok(Registration { logger, handler })
}
