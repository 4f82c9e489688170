//! Builder for [`WebhookHandler`].
//!
//! Collects the webhook URL, formatter configuration, handler threshold and
//! the optional notify-only filter. Delivery defaults to a synchronous
//! [`Notifier`]; tests and hosts may substitute any [`Deliver`].

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::delivery::{Deliver, Notifier};
use crate::filters::{NotifyOnlyFilter, RecordFilter};
use crate::formatter::{FormatterConfig, WebhookFormatter};
use crate::level::{NOTSET, NotifyLevel};
use crate::message::DEFAULT_WEBHOOK_PREFIX;

use super::{HandlerBuildError, HandlerBuilderTrait, WebhookHandler};

#[derive(Clone, Default)]
pub struct WebhookHandlerBuilder {
    webhook_url: Option<String>,
    webhook_prefix: Option<String>,
    config: FormatterConfig,
    raw_config: Option<Map<String, Value>>,
    level: Option<u32>,
    notify_only: Option<NotifyOnlyFilter>,
    sink: Option<Arc<dyn Deliver>>,
}

impl fmt::Debug for WebhookHandlerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookHandlerBuilder")
            .field("webhook_url", &self.webhook_url)
            .field("webhook_prefix", &self.webhook_prefix)
            .field("config", &self.config)
            .field("raw_config", &self.raw_config)
            .field("level", &self.level)
            .field("notify_only", &self.notify_only)
            .field("custom_sink", &self.sink.is_some())
            .finish()
    }
}

impl WebhookHandlerBuilder {
    /// Create a new builder with no webhook configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the webhook URL notifications are posted to (required).
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Accept webhook URLs under `prefix` instead of the default host.
    pub fn with_webhook_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.webhook_prefix = Some(prefix.into());
        self
    }

    /// Use a typed formatter configuration.
    pub fn with_config(mut self, config: FormatterConfig) -> Self {
        self.config = config;
        self.raw_config = None;
        self
    }

    /// Use an untyped option mapping, parsed when the handler is built.
    pub fn with_config_mapping(mut self, options: Map<String, Value>) -> Self {
        self.raw_config = Some(options);
        self
    }

    /// Only notify for records at or above `level`.
    pub fn with_level(mut self, level: NotifyLevel) -> Self {
        self.level = Some(level.levelno());
        self
    }

    pub fn with_levelno(mut self, levelno: u32) -> Self {
        self.level = Some(levelno);
        self
    }

    /// Only notify for errors of the types admitted by `filter`.
    pub fn with_notify_only(mut self, filter: NotifyOnlyFilter) -> Self {
        self.notify_only = Some(filter);
        self
    }

    /// Deliver through `sink` rather than a synchronous [`Notifier`].
    pub fn with_sink(mut self, sink: Arc<dyn Deliver>) -> Self {
        self.sink = Some(sink);
        self
    }

    fn validate(&self) -> Result<&str, HandlerBuildError> {
        match self.webhook_url.as_deref() {
            None => Err(HandlerBuildError::InvalidConfig(
                "webhook URL is required".into(),
            )),
            Some("") => Err(HandlerBuildError::InvalidConfig(
                "webhook URL must not be empty".into(),
            )),
            Some(url) => Ok(url),
        }
    }

    fn build_config(&self) -> Result<FormatterConfig, HandlerBuildError> {
        match &self.raw_config {
            Some(options) => Ok(FormatterConfig::from_mapping(options)?),
            None => Ok(self.config.clone()),
        }
    }
}

impl HandlerBuilderTrait for WebhookHandlerBuilder {
    type Handler = WebhookHandler;

    fn build_inner(&self) -> Result<Self::Handler, HandlerBuildError> {
        let url = self.validate()?;
        let config = self.build_config()?;
        let filters = self
            .notify_only
            .clone()
            .map(|f| Arc::new(f) as Arc<dyn RecordFilter>)
            .into_iter()
            .collect();
        Ok(WebhookHandler {
            formatter: WebhookFormatter::new(url, config),
            webhook_prefix: self
                .webhook_prefix
                .clone()
                .unwrap_or_else(|| DEFAULT_WEBHOOK_PREFIX.to_owned()),
            level: self.level.unwrap_or(NOTSET),
            filters,
            sink: self
                .sink
                .clone()
                .unwrap_or_else(|| Arc::new(Notifier::synchronous())),
        })
    }
}

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;
