//! Errors raised while delivering a message.

use thiserror::Error;

use crate::message::PayloadError;

#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The message could not produce a payload.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// Blocking request failed at the transport layer or with a non-2xx status.
    #[error("webhook request failed: {0}")]
    Http(#[from] Box<ureq::Error>),
    /// Asynchronous request failed at the transport layer or with a non-2xx status.
    #[error("webhook request failed: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to serialise payload: {0}")]
    Serialise(#[from] serde_json::Error),
    /// Asynchronous delivery was requested from a synchronous notifier.
    #[error("notifier has no scheduler for asynchronous delivery")]
    NotAsynchronous,
}

impl DeliveryError {
    /// HTTP status returned by the webhook, when the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(err) => match err.as_ref() {
                ureq::Error::Status(code, _) => Some(*code),
                ureq::Error::Transport(_) => None,
            },
            Self::Client(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
