//! Filtering components for log records.
//!
//! Provides the [`RecordFilter`] trait along with [`NotifyOnlyFilter`], which
//! restricts notifications to chosen error types.

pub mod notify_only;

pub use notify_only::NotifyOnlyFilter;

use crate::log_record::LogRecord;

/// Trait implemented by all log filters.
///
/// Filters are `Send + Sync` so they can be shared across threads.
pub trait RecordFilter: Send + Sync {
    /// Return `true` if `record` should be processed.
    fn should_log(&self, record: &LogRecord) -> bool;
}
