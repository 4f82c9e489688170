//! Posting built messages to their webhook.
//!
//! [`Notifier`] sends either synchronously on the calling thread (`ureq`) or
//! by scheduling a task on a [`Scheduler`] backed by a tokio runtime
//! (`reqwest`). Both paths validate the message before any network activity.

mod asynchronous;
mod blocking;
mod error;
mod notifier;
mod scheduler;

#[cfg(test)]
mod tests;

pub use asynchronous::PreparedRequest;
pub use blocking::send_blocking;
pub use error::DeliveryError;
pub use notifier::{Deliver, Notifier, Sent};
pub use scheduler::{
    DeliveryHandle, ExceptionHandler, Scheduler, SchedulerError, TaskFailure, log_task_failure,
};
