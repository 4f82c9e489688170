//! Handler builders and associated traits.
//!
//! Provides a minimal builder API for constructing handlers in a
//! type‑safe manner. Each builder implements [`HandlerBuilderTrait`]
//! which returns a shared [`RecordHandler`] ready for registration
//! with a logger.

use std::sync::Arc;

use thiserror::Error;

use crate::formatter::ConfigError;
use crate::handler::RecordHandler;
use crate::manager::ManagerError;

pub mod webhook;
pub mod webhook_builder;

pub use webhook::WebhookHandler;
pub use webhook_builder::WebhookHandlerBuilder;

/// Errors that may occur while building a handler.
#[derive(Debug, Error)]
pub enum HandlerBuildError {
    /// Invalid user supplied configuration.
    #[error("invalid handler configuration: {0}")]
    InvalidConfig(String),
    /// The formatter configuration mapping was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The target logger could not be obtained.
    #[error(transparent)]
    Logger(#[from] ManagerError),
}

/// Trait implemented by all handler builders.
pub trait HandlerBuilderTrait: Send + Sync {
    type Handler: RecordHandler + 'static;

    fn build_inner(&self) -> Result<Self::Handler, HandlerBuildError>;

    /// Build the handler behind a shared pointer the caller can register
    /// without knowing the concrete type.
    fn build(&self) -> Result<Arc<dyn RecordHandler>, HandlerBuildError> {
        Ok(Arc::new(self.build_inner()?))
    }
}
