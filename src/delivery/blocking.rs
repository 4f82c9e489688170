//! Blocking delivery on the calling thread.

use log::debug;
use ureq::AgentBuilder;

use super::DeliveryError;
use crate::message::Message;

/// POST the message payload as JSON and wait for the response.
///
/// Each call builds its own agent so no connection outlives the send.
///
/// # Errors
///
/// [`DeliveryError::Payload`] when the message is invalid (no request is
/// made) and [`DeliveryError::Http`] for transport failures and non-2xx
/// responses.
pub fn send_blocking(message: &Message) -> Result<ureq::Response, DeliveryError> {
    let url = message.webhook_url()?;
    let payload = message.build_payload()?;
    let agent = AgentBuilder::new().build();
    let response = agent.post(url).send_json(&payload).map_err(Box::new)?;
    debug!("webhook delivered with status {}", response.status());
    Ok(response)
}
