//! Handlers that accumulate records in memory for test assertions.

use std::any::Any;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::handler::{HandlerError, RecordHandler};
use crate::log_record::LogRecord;
use crate::message::PayloadError;

/// Handler that stores every record it receives for later inspection.
#[derive(Clone, Default)]
pub struct CollectingHandler {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl CollectingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a snapshot of all records received so far.
    pub fn collected(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }
}

impl RecordHandler for CollectingHandler {
    fn handle(&self, record: &LogRecord) -> Result<(), HandlerError> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Handler that fails every record it is given.
#[derive(Debug, Default)]
pub struct FailingHandler;

impl RecordHandler for FailingHandler {
    fn handle(&self, _record: &LogRecord) -> Result<(), HandlerError> {
        Err(PayloadError::MissingContent.into())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
