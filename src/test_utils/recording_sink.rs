//! [`Deliver`] implementation that records payloads instead of posting them.

use parking_lot::Mutex;
use serde_json::Value;

use crate::delivery::{Deliver, DeliveryError};
use crate::message::Message;

#[derive(Debug)]
pub struct Delivered {
    pub webhook_url: String,
    pub payload: Value,
}

#[derive(Debug, Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<Delivered>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.delivered.lock().len()
    }

    pub fn payloads(&self) -> Vec<Value> {
        self.delivered.lock().iter().map(|d| d.payload.clone()).collect()
    }

    pub fn urls(&self) -> Vec<String> {
        self.delivered
            .lock()
            .iter()
            .map(|d| d.webhook_url.clone())
            .collect()
    }
}

impl Deliver for RecordingSink {
    fn deliver(&self, message: &Message) -> Result<(), DeliveryError> {
        let webhook_url = message.webhook_url()?.to_owned();
        let payload = serde_json::to_value(message.build_payload()?)?;
        self.delivered.lock().push(Delivered {
            webhook_url,
            payload,
        });
        Ok(())
    }
}
