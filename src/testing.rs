//! Loggers for use inside tests
//!
//! [`test_logger`] renders records like the console handler but sends each
//! line through the test harness, so output only shows up for failing tests
//! (or with `--nocapture`). Logging at Error or above fails the test.
//!
//! ```should_panic
//! use logkit::testing::test_logger;
//!
//! let logger = test_logger();
//! logger.debug("setting up", &[]);
//! logger.error("this fails the test", &[]);
//! ```

use crate::core::{
    Context, Field, Handler, Level, LevelVar, Logger, Output, Record, Result,
};
use crate::handlers::ConsoleHandler;
use std::sync::Arc;

/// The parts of a test harness the test logger needs.
pub trait TestingT: Send + Sync {
    /// Record one line of output without failing.
    fn log(&self, line: &str);

    /// Mark the test failed and stop it.
    fn fail_now(&self, message: &str) -> !;
}

/// The standard libtest harness: captured `println!` and `panic!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Libtest;

impl TestingT for Libtest {
    fn log(&self, line: &str) {
        println!("{}", line);
    }

    fn fail_now(&self, message: &str) -> ! {
        panic!("{}", message)
    }
}

/// Handler that writes console lines to a [`TestingT`] and fails on Error+.
///
/// Derived handlers keep failing on errors.
#[derive(Clone)]
pub struct TestHandler {
    console: ConsoleHandler,
    t: Arc<dyn TestingT>,
}

impl TestHandler {
    pub fn new(t: Arc<dyn TestingT>, level: LevelVar) -> Self {
        Self {
            console: ConsoleHandler::new(Output::new(std::io::sink()), level),
            t,
        }
    }
}

impl Handler for TestHandler {
    fn enabled(&self, ctx: &Context, level: Level) -> bool {
        self.console.enabled(ctx, level)
    }

    fn handle(&self, _ctx: &Context, record: &Record) -> Result<()> {
        let line = self.console.format_record(record);
        let line = line.trim_end_matches('\n');
        self.t.log(line);
        if record.level >= Level::Error {
            self.t.fail_now(line);
        }
        Ok(())
    }

    fn with_attrs(&self, fields: &[Field]) -> Arc<dyn Handler> {
        Arc::new(Self {
            console: self.console.derive_attrs(fields),
            t: Arc::clone(&self.t),
        })
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        Arc::new(Self {
            console: self.console.derive_group(name),
            t: Arc::clone(&self.t),
        })
    }
}

/// A Debug-level logger with caller info writing to the libtest harness.
pub fn test_logger() -> Logger {
    test_logger_with(Arc::new(Libtest))
}

/// Like [`test_logger`], for another harness.
pub fn test_logger_with(t: Arc<dyn TestingT>) -> Logger {
    let level = LevelVar::new(Level::Debug);
    let handler = Arc::new(TestHandler::new(t, level.clone()));
    Logger::from_handler(handler, level).with_caller_info(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::panic::{self, AssertUnwindSafe};

    #[derive(Default)]
    struct Recorder {
        lines: Mutex<Vec<String>>,
        failures: Mutex<Vec<String>>,
    }

    impl TestingT for Recorder {
        fn log(&self, line: &str) {
            self.lines.lock().push(line.to_string());
        }

        fn fail_now(&self, message: &str) -> ! {
            self.failures.lock().push(message.to_string());
            panic!("test failed: {}", message)
        }
    }

    #[test]
    fn test_lines_reach_harness_without_newline() {
        let recorder = Arc::new(Recorder::default());
        let logger = test_logger_with(recorder.clone());

        logger.debug("setting up", &[Field::new("fixture", "db")]);
        logger.trace("below threshold", &[]);

        let lines = recorder.lines.lock();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("DEBUG   setting up fixture=db"), "{}", lines[0]);
        assert!(lines[0].contains("testing.rs:"));
        assert!(recorder.failures.lock().is_empty());
    }

    #[test]
    fn test_error_fails_after_logging() {
        let recorder = Arc::new(Recorder::default());
        let logger = test_logger_with(recorder.clone());

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.error("unexpected state", &[]);
        }));

        assert!(result.is_err());
        assert_eq!(recorder.lines.lock().len(), 1);
        let failures = recorder.failures.lock();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].ends_with("ERROR   unexpected state"));
    }

    #[test]
    fn test_derived_loggers_still_fail() {
        let recorder = Arc::new(Recorder::default());
        let logger = test_logger_with(recorder.clone())
            .named("db")
            .with(&[Field::new("pool", 1)]);

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            logger.error("lost connection", &[]);
        }));

        assert!(result.is_err());
        assert!(recorder.failures.lock()[0].ends_with("lost connection db.pool=1"));
    }

    #[test]
    #[should_panic(expected = "broken invariant")]
    fn test_libtest_harness_panics_on_error() {
        test_logger().error("broken invariant", &[]);
    }
}
