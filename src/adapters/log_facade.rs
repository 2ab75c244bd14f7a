//! Bridge from the `log` crate facade

use crate::core::{Caller, Context, Field, Level, Logger, Record};
use std::borrow::Cow;

/// A `log::Log` implementation that forwards to a [`Logger`].
///
/// Each `log` record keeps its target as a `target` field, and its file and
/// line become the caller when the logger reports callers.
#[derive(Debug, Clone)]
pub struct LogFacade {
    logger: Logger,
}

impl LogFacade {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Register as the global `log` logger.
    ///
    /// The `log` max level is opened fully so that later
    /// [`set_level`](Logger::set_level) calls take effect.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

fn map_level(level: log::Level) -> Level {
    match level {
        log::Level::Error => Level::Error,
        log::Level::Warn => Level::Warn,
        log::Level::Info => Level::Info,
        log::Level::Debug => Level::Debug,
        log::Level::Trace => Level::Trace,
    }
}

fn caller(record: &log::Record<'_>) -> Option<Caller> {
    let line = record.line()?;
    let file = match record.file_static() {
        Some(file) => Cow::Borrowed(file),
        None => Cow::Owned(record.file()?.to_string()),
    };
    Some(Caller::new(file, line))
}

impl log::Log for LogFacade {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger.enabled(map_level(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = map_level(record.level());
        if !self.logger.enabled(level) {
            return;
        }

        let converted = Record::new(level, record.args().to_string())
            .with_fields(vec![Field::new("target", record.target())])
            .with_caller(caller(record));
        self.logger.log_record(&Context::background(), converted);
    }

    fn flush(&self) {}
}
