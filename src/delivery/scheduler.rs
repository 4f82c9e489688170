//! Scheduler for asynchronous deliveries.
//!
//! A [`Scheduler`] wraps a tokio runtime [`Handle`] together with the
//! exception handler that receives failures from scheduled sends. Failures
//! never propagate out of a scheduled task: they are reported once, to the
//! handler, and the task resolves to `None`.
//!
//! [`Scheduler::process_default`] reuses the ambient runtime when called
//! from within one and otherwise lazily starts a single process-wide
//! runtime with one worker thread, so scheduled sends interleave but never
//! run in parallel.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use log::error;
use once_cell::sync::OnceCell;
use thiserror::Error;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::{JoinError, JoinHandle};

use super::DeliveryError;

/// Callback receiving failures raised inside scheduled sends.
pub type ExceptionHandler = Arc<dyn Fn(&TaskFailure) + Send + Sync>;

static PROCESS_RUNTIME: OnceCell<Runtime> = OnceCell::new();

/// Why a scheduled send produced no response body.
#[derive(Debug, Error)]
pub enum TaskFailure {
    #[error("scheduled delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
    #[error("scheduled delivery panicked: {0}")]
    Panicked(String),
    #[error("scheduled delivery was cancelled")]
    Cancelled,
}

impl TaskFailure {
    fn from_join_error(err: JoinError) -> Self {
        if err.is_panic() {
            Self::Panicked(panic_message(err.into_panic()))
        } else {
            Self::Cancelled
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned())
}

/// Errors raised while obtaining the process-default runtime.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("failed to start delivery runtime: {0}")]
    Runtime(#[from] io::Error),
}

/// Default exception handler: log the failure and carry on.
pub fn log_task_failure(failure: &TaskFailure) {
    error!("webhook delivery task failed: {failure}");
}

#[derive(Clone)]
pub struct Scheduler {
    handle: Handle,
    exception_handler: ExceptionHandler,
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("handle", &self.handle)
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    /// Schedule onto an explicitly supplied runtime.
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            exception_handler: Arc::new(log_task_failure),
        }
    }

    /// Get the ambient runtime, or create the process-wide default one.
    ///
    /// Repeated calls outside a runtime share the same default runtime.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Runtime`] if the default runtime cannot be
    /// started.
    pub fn process_default() -> Result<Self, SchedulerError> {
        if let Ok(handle) = Handle::try_current() {
            return Ok(Self::new(handle));
        }
        let runtime = PROCESS_RUNTIME.get_or_try_init(build_runtime)?;
        Ok(Self::new(runtime.handle().clone()))
    }

    /// Replace the handler receiving failures from scheduled sends.
    pub fn with_exception_handler(
        mut self,
        handler: impl Fn(&TaskFailure) + Send + Sync + 'static,
    ) -> Self {
        self.exception_handler = Arc::new(handler);
        self
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Spawn a send, reporting any failure to the exception handler.
    ///
    /// The returned handle resolves to the response body, or `None` if the
    /// send failed. Dropping the handle does not cancel the send.
    pub fn spawn<F>(&self, request: F) -> DeliveryHandle
    where
        F: Future<Output = Result<String, DeliveryError>> + Send + 'static,
    {
        let task = self.handle.spawn(request);
        let handler = Arc::clone(&self.exception_handler);
        let supervisor = self.handle.spawn(async move {
            let failure = match task.await {
                Ok(Ok(body)) => return Some(body),
                Ok(Err(err)) => TaskFailure::Delivery(err),
                Err(err) => TaskFailure::from_join_error(err),
            };
            handler(&failure);
            None
        });
        DeliveryHandle { inner: supervisor }
    }

    /// Drive `future` to completion on this scheduler's runtime.
    ///
    /// Must not be called from within an asynchronous context.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.handle.block_on(future)
    }
}

fn build_runtime() -> io::Result<Runtime> {
    Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("webhook-delivery")
        .enable_all()
        .build()
}

/// Handle to a scheduled send.
#[derive(Debug)]
pub struct DeliveryHandle {
    inner: JoinHandle<Option<String>>,
}

impl DeliveryHandle {
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

impl Future for DeliveryHandle {
    type Output = Option<String>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner)
            .poll(cx)
            .map(|joined| joined.ok().flatten())
    }
}
