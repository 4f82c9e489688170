use thiserror::Error;

/// A message that cannot be delivered as it stands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// An empty string was given as the webhook URL.
    #[error("webhook URL must be a non-empty string")]
    EmptyWebhookUrl,
    /// The webhook URL does not point at the expected host.
    #[error("invalid webhook URL {url:?}: expected prefix {prefix:?}")]
    InvalidWebhookUrl { url: String, prefix: String },
    /// The webhook URL was read before being set.
    #[error("no webhook URL is set")]
    MissingWebhookUrl,
    /// Neither a header nor any attachment is present.
    #[error("header or attachments are required")]
    MissingContent,
    /// Structured input could not be interpreted as a message.
    #[error("malformed message data: {0}")]
    Malformed(String),
}
