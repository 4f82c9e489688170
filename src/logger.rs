//! Named logger dispatching records to handlers.
//!
//! A [`Logger`] checks each record against its level threshold and filters
//! and then hands it to every attached handler in order. Handler failures
//! are reported with `log::warn!` and never reach the emitting code.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use log::warn;
// parking_lot avoids poisoning and matches crate-wide locking strategy
use parking_lot::RwLock;

use crate::filters::RecordFilter;
use crate::handler::RecordHandler;
use crate::level::{NOTSET, NotifyLevel};
use crate::log_record::{LogRecord, RecordMessage};
use crate::notifiable::Notifiable;

pub struct Logger {
    name: String,
    level: AtomicU32,
    handlers: RwLock<Vec<Arc<dyn RecordHandler>>>,
    filters: RwLock<Vec<Arc<dyn RecordFilter>>>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("handlers", &self.handlers.read().len())
            .field("filters", &self.filters.read().len())
            .finish()
    }
}

impl Logger {
    /// Create a logger that accepts every level.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: AtomicU32::new(NOTSET),
            handlers: RwLock::new(Vec::new()),
            filters: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum numeric level a record needs to be dispatched.
    pub fn level(&self) -> u32 {
        self.level.load(Ordering::Relaxed)
    }

    pub fn set_level(&self, level: NotifyLevel) {
        self.set_levelno(level.levelno());
    }

    pub fn set_levelno(&self, levelno: u32) {
        self.level.store(levelno, Ordering::Relaxed);
    }

    pub fn is_enabled_for(&self, levelno: u32) -> bool {
        levelno >= self.level()
    }

    /// Dispatch an already-constructed record.
    ///
    /// Returns `true` if the record passed the threshold and filters.
    pub fn log_record(&self, record: &LogRecord) -> bool {
        if !self.is_enabled_for(record.levelno) || !self.passes_all_filters(record) {
            return false;
        }
        self.dispatch_to_handlers(record);
        true
    }

    /// Build a record at `level` and dispatch it.
    pub fn log(&self, level: NotifyLevel, message: impl Into<RecordMessage>) -> bool {
        self.log_record(&LogRecord::new(&self.name, level, message))
    }

    pub fn debug(&self, message: impl Into<RecordMessage>) -> bool {
        self.log(NotifyLevel::Debug, message)
    }

    pub fn info(&self, message: impl Into<RecordMessage>) -> bool {
        self.log(NotifyLevel::Info, message)
    }

    pub fn warning(&self, message: impl Into<RecordMessage>) -> bool {
        self.log(NotifyLevel::Warning, message)
    }

    pub fn error(&self, message: impl Into<RecordMessage>) -> bool {
        self.log(NotifyLevel::Error, message)
    }

    pub fn critical(&self, message: impl Into<RecordMessage>) -> bool {
        self.log(NotifyLevel::Critical, message)
    }

    /// Log an error object at `ERROR`.
    pub fn exception<E: Notifiable>(&self, err: E) -> bool {
        self.error(RecordMessage::error(err))
    }

    fn passes_all_filters(&self, record: &LogRecord) -> bool {
        self.filters.read().iter().all(|f| f.should_log(record))
    }

    fn dispatch_to_handlers(&self, record: &LogRecord) {
        // Snapshot so handlers may register or detach handlers while running.
        let handlers = self.handlers.read().clone();
        for handler in handlers {
            if let Err(err) = handler.handle(record) {
                warn!("Logger {}: handler failed: {err}", self.name);
            }
        }
    }

    /// Attach a handler to this logger.
    pub fn add_handler(&self, handler: Arc<dyn RecordHandler>) {
        self.handlers.write().push(handler);
    }

    /// Attach a filter to this logger.
    pub fn add_filter(&self, filter: Arc<dyn RecordFilter>) {
        self.filters.write().push(filter);
    }

    /// Detach a handler previously added to this logger.
    pub fn remove_handler(&self, handler: &Arc<dyn RecordHandler>) -> bool {
        let mut handlers = self.handlers.write();
        if let Some(pos) = handlers.iter().position(|h| Arc::ptr_eq(h, handler)) {
            handlers.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn clear_handlers(&self) {
        self.handlers.write().clear();
    }

    pub fn remove_filter(&self, filter: &Arc<dyn RecordFilter>) -> bool {
        let mut filters = self.filters.write();
        if let Some(pos) = filters.iter().position(|f| Arc::ptr_eq(f, filter)) {
            filters.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn clear_filters(&self) {
        self.filters.write().clear();
    }

    /// Handlers currently attached, in dispatch order.
    pub fn handlers(&self) -> Vec<Arc<dyn RecordHandler>> {
        self.handlers.read().clone()
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
