//! Unit tests for [`Logger`].

use std::sync::Arc;

use rstest::rstest;
use serial_test::serial;

use super::*;
use crate::filters::NotifyOnlyFilter;
use crate::test_utils::collecting_handler::{CollectingHandler, FailingHandler};
use crate::test_utils::errors::{KeyError, ValueError};

fn logger_with_collector() -> (Logger, CollectingHandler) {
    let logger = Logger::new("core");
    let handler = CollectingHandler::new();
    logger.add_handler(Arc::new(handler.clone()));
    (logger, handler)
}

#[test]
fn new_logger_accepts_every_level() {
    let (logger, handler) = logger_with_collector();
    assert_eq!(logger.level(), NOTSET);
    assert!(logger.debug("low"));
    assert!(logger.critical("high"));
    let collected = handler.collected();
    assert_eq!(collected.len(), 2);
    assert_eq!(collected[0].logger, "core");
    assert_eq!(collected[0].levelname, "DEBUG");
    assert_eq!(collected[1].levelname, "CRITICAL");
}

#[rstest]
#[case(NotifyLevel::Debug, false)]
#[case(NotifyLevel::Info, false)]
#[case(NotifyLevel::Warning, true)]
#[case(NotifyLevel::Error, true)]
fn threshold_drops_lower_levels(#[case] level: NotifyLevel, #[case] expected: bool) {
    let (logger, handler) = logger_with_collector();
    logger.set_level(NotifyLevel::Warning);
    assert_eq!(logger.log(level, "msg"), expected);
    assert_eq!(handler.collected().len(), usize::from(expected));
}

#[test]
fn records_reach_every_handler_in_order() {
    let (logger, first) = logger_with_collector();
    let second = CollectingHandler::new();
    logger.add_handler(Arc::new(second.clone()));

    logger.info("msg");

    assert_eq!(first.collected().len(), 1);
    assert_eq!(second.collected().len(), 1);
    assert_eq!(logger.handlers().len(), 2);
}

#[test]
fn failing_handler_does_not_stop_dispatch() {
    let logger = Logger::new("core");
    let collector = CollectingHandler::new();
    logger.add_handler(Arc::new(FailingHandler));
    logger.add_handler(Arc::new(collector.clone()));

    assert!(logger.error("boom"));
    assert_eq!(collector.collected().len(), 1);
}

#[test]
#[serial(log_capture)]
fn failing_handler_is_reported_as_warning() {
    let mut capture = crate::start_log_capture();
    let logger = Logger::new("warn.reporter");
    logger.add_handler(Arc::new(FailingHandler));

    assert!(logger.error("boom"));
    let warned = std::iter::from_fn(|| capture.pop()).any(|record| {
        record.level() == log::Level::Warn
            && record.args().contains("Logger warn.reporter: handler failed")
    });
    assert!(warned, "handler failure was not logged");
}

#[test]
fn logger_filters_apply_before_handlers() {
    let (logger, handler) = logger_with_collector();
    let filter: Arc<dyn RecordFilter> = Arc::new(NotifyOnlyFilter::new().allow::<ValueError>());
    logger.add_filter(Arc::clone(&filter));

    assert!(!logger.error("plain"));
    assert!(!logger.exception(KeyError::new("key")));
    assert!(logger.exception(ValueError::new("value")));
    assert_eq!(handler.collected().len(), 1);

    assert!(logger.remove_filter(&filter));
    assert!(!logger.remove_filter(&filter));
    assert!(logger.error("plain"));
}

#[test]
fn exception_logs_at_error_with_notifiable_message() {
    let (logger, handler) = logger_with_collector();
    logger.exception(ValueError::new("bad input"));
    let collected = handler.collected();
    assert_eq!(collected[0].levelno, NotifyLevel::Error.levelno());
    assert_eq!(collected[0].message.class_name(), Some("ValueError"));
    assert_eq!(collected[0].message.render(), "bad input");
}

#[test]
fn remove_handler_detaches_only_that_handler() {
    let logger = Logger::new("core");
    let first: Arc<dyn RecordHandler> = Arc::new(CollectingHandler::new());
    let second: Arc<dyn RecordHandler> = Arc::new(CollectingHandler::new());
    logger.add_handler(Arc::clone(&first));
    logger.add_handler(Arc::clone(&second));

    assert!(logger.remove_handler(&first));
    assert!(!logger.remove_handler(&first));
    let remaining = logger.handlers();
    assert_eq!(remaining.len(), 1);
    assert!(Arc::ptr_eq(&remaining[0], &second));

    logger.clear_handlers();
    assert!(logger.handlers().is_empty());
}

#[test]
fn log_record_respects_custom_levelno() {
    let (logger, handler) = logger_with_collector();
    logger.set_levelno(25);
    assert!(!logger.log_record(&LogRecord::with_levelno("core", 24, "below")));
    assert!(logger.log_record(&LogRecord::with_levelno("core", 25, "at")));
    assert_eq!(handler.collected()[0].levelname, "Level 25");
}
