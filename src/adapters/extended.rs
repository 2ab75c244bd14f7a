//! printf-style logger for libraries that format their own messages

use crate::core::{Level, Logger};
use std::fmt;

/// Accepts pre-built format arguments, formatting them only when enabled.
///
/// ```
/// use logkit::adapters::ExtendedLogger;
/// use logkit::prelude::*;
///
/// let extended = ExtendedLogger::new(Logger::nop());
/// extended.warnf(format_args!("retry {} of {}", 1, 3));
/// ```
#[derive(Debug, Clone)]
pub struct ExtendedLogger {
    logger: Logger,
}

impl ExtendedLogger {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Debug, args);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Info, args);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Warn, args);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(Level::Error, args);
    }

    #[track_caller]
    fn logf(&self, level: Level, args: fmt::Arguments<'_>) {
        if !self.logger.enabled(level) {
            return;
        }
        self.logger.log(level, args.to_string(), &[]);
    }
}
