//! Delivery front end with a mode fixed at construction.

use super::asynchronous::PreparedRequest;
use super::blocking::send_blocking;
use super::scheduler::{DeliveryHandle, Scheduler, SchedulerError};
use super::DeliveryError;
use crate::message::Message;

/// Anything able to hand a message to its webhook.
///
/// Handlers deliver through this trait so tests can substitute a recorder
/// for the network.
pub trait Deliver: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] if the message is invalid or, for
    /// synchronous delivery, if the request fails.
    fn deliver(&self, message: &Message) -> Result<(), DeliveryError>;
}

/// Outcome of [`Notifier::send`].
#[derive(Debug)]
pub enum Sent {
    /// Synchronous mode: the webhook's response.
    Response(ureq::Response),
    /// Asynchronous mode: a handle to the scheduled send.
    Scheduled(DeliveryHandle),
}

#[derive(Clone, Debug)]
enum Mode {
    Synchronous,
    Asynchronous(Scheduler),
}

#[derive(Clone, Debug)]
pub struct Notifier {
    mode: Mode,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::synchronous()
    }
}

impl Notifier {
    pub fn synchronous() -> Self {
        Self {
            mode: Mode::Synchronous,
        }
    }

    pub fn asynchronous(scheduler: Scheduler) -> Self {
        Self {
            mode: Mode::Asynchronous(scheduler),
        }
    }

    /// Asynchronous notifier on [`Scheduler::process_default`].
    ///
    /// # Errors
    ///
    /// Fails if the default runtime cannot be started.
    pub fn asynchronous_default() -> Result<Self, SchedulerError> {
        Ok(Self::asynchronous(Scheduler::process_default()?))
    }

    pub fn is_asynchronous(&self) -> bool {
        matches!(self.mode, Mode::Asynchronous(_))
    }

    pub fn scheduler(&self) -> Option<&Scheduler> {
        match &self.mode {
            Mode::Synchronous => None,
            Mode::Asynchronous(scheduler) => Some(scheduler),
        }
    }

    /// Blocking POST regardless of mode.
    ///
    /// # Errors
    ///
    /// See [`send_blocking`].
    pub fn send_sync(&self, message: &Message) -> Result<ureq::Response, DeliveryError> {
        send_blocking(message)
    }

    /// Schedule a POST on this notifier's scheduler.
    ///
    /// The message is validated before anything is scheduled; request
    /// failures are reported to the scheduler's exception handler.
    ///
    /// # Errors
    ///
    /// [`DeliveryError::NotAsynchronous`] for synchronous notifiers and
    /// [`DeliveryError::Payload`] for invalid messages.
    pub fn send_async(&self, message: &Message) -> Result<DeliveryHandle, DeliveryError> {
        let Mode::Asynchronous(scheduler) = &self.mode else {
            return Err(DeliveryError::NotAsynchronous);
        };
        let request = PreparedRequest::prepare(message)?;
        Ok(scheduler.spawn(request.send()))
    }

    /// Await a POST in the caller's own task.
    ///
    /// Unlike [`Notifier::send_async`], failures are returned to the caller.
    pub async fn post(&self, message: &Message) -> Result<String, DeliveryError> {
        PreparedRequest::prepare(message)?.send().await
    }

    /// Send according to the mode chosen at construction.
    pub fn send(&self, message: &Message) -> Result<Sent, DeliveryError> {
        match &self.mode {
            Mode::Synchronous => self.send_sync(message).map(Sent::Response),
            Mode::Asynchronous(_) => self.send_async(message).map(Sent::Scheduled),
        }
    }
}

impl Deliver for Notifier {
    fn deliver(&self, message: &Message) -> Result<(), DeliveryError> {
        self.send(message).map(drop)
    }
}
