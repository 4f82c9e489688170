//! Non-blocking delivery via `reqwest`.

use log::debug;
use serde_json::Value;

use super::DeliveryError;
use crate::message::Message;

/// Validated URL and body captured from a [`Message`].
///
/// Preparing eagerly means an invalid message fails at the call site rather
/// than inside a scheduled task, and the request no longer borrows the
/// message once it is in flight.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedRequest {
    url: String,
    body: Value,
}

impl PreparedRequest {
    /// # Errors
    ///
    /// [`DeliveryError::Payload`] when the URL is unset or invalid or the
    /// message has no content.
    pub fn prepare(message: &Message) -> Result<Self, DeliveryError> {
        let url = message.webhook_url()?.to_owned();
        let body = serde_json::to_value(message.build_payload()?)?;
        Ok(Self { url, body })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Perform the POST, returning the response body.
    ///
    /// A fresh client is used for every send.
    pub async fn send(self) -> Result<String, DeliveryError> {
        let client = reqwest::Client::new();
        let response = client
            .post(&self.url)
            .json(&self.body)
            .send()
            .await?
            .error_for_status()?;
        let status = response.status();
        let body = response.text().await?;
        debug!("webhook delivered with status {}", status.as_u16());
        Ok(body)
    }
}
