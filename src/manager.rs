//! Global registry mapping logger names to instances.
//!
//! Access is guarded by a `parking_lot::RwLock`. Loggers are created on first
//! request and shared thereafter, so every caller asking for the same name
//! sees the same handlers and threshold.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use thiserror::Error;

use crate::logger::Logger;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManagerError {
    #[error("invalid logger name: {0:?}")]
    InvalidName(String),
}

#[derive(Default)]
struct Manager {
    loggers: HashMap<String, Arc<Logger>>,
}

static MANAGER: Lazy<RwLock<Manager>> = Lazy::new(|| RwLock::new(Manager::default()));

fn validate_name(name: &str) -> Result<(), ManagerError> {
    if name.is_empty() || name.split('.').any(str::is_empty) {
        return Err(ManagerError::InvalidName(name.to_owned()));
    }
    Ok(())
}

/// Retrieve an existing logger or create one.
///
/// # Errors
///
/// Names that are empty or contain an empty dotted segment are rejected.
pub fn get_logger(name: &str) -> Result<Arc<Logger>, ManagerError> {
    validate_name(name)?;
    if let Some(logger) = MANAGER.read().loggers.get(name) {
        return Ok(Arc::clone(logger));
    }
    let mut mgr = MANAGER.write();
    match mgr.loggers.entry(name.to_owned()) {
        Entry::Occupied(o) => Ok(Arc::clone(o.get())),
        Entry::Vacant(v) => Ok(Arc::clone(v.insert(Arc::new(Logger::new(name))))),
    }
}

/// Forget every registered logger.
///
/// Loggers already handed out keep working but are no longer returned by
/// [`get_logger`].
pub fn reset_manager() {
    MANAGER.write().loggers.clear();
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn same_name_returns_same_logger() {
        reset_manager();
        let first = get_logger("app.web").expect("valid name");
        let second = get_logger("app.web").expect("valid name");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "app.web");
    }

    #[test]
    #[serial]
    fn reset_forgets_loggers() {
        reset_manager();
        let before = get_logger("app").expect("valid name");
        reset_manager();
        let after = get_logger("app").expect("valid name");
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[rstest]
    #[case("")]
    #[case(".app")]
    #[case("app.")]
    #[case("app..web")]
    fn rejects_malformed_names(#[case] name: &str) {
        assert_eq!(
            get_logger(name).expect_err("malformed name"),
            ManagerError::InvalidName(name.to_owned())
        );
    }
}
