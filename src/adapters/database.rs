//! Logger for database drivers with their own trace levels

use crate::core::{Context, Field, FieldValue, Level, Logger};
use std::collections::BTreeMap;
use std::fmt;

/// Log levels used by database driver tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    /// Tracing switched off
    None,
}

impl TraceLevel {
    /// The core level a driver message is logged at; `None` for messages
    /// that must be dropped.
    pub fn to_level(self) -> Option<Level> {
        match self {
            TraceLevel::Trace | TraceLevel::Debug => Some(Level::Debug),
            TraceLevel::Info => Some(Level::Info),
            TraceLevel::Warn => Some(Level::Warn),
            TraceLevel::Error => Some(Level::Error),
            TraceLevel::None => None,
        }
    }

    /// The driver level matching a logger threshold.
    pub fn from_level(level: Level) -> Self {
        match level {
            Level::Trace => TraceLevel::Trace,
            Level::Debug => TraceLevel::Debug,
            Level::Info => TraceLevel::Info,
            Level::Warn => TraceLevel::Warn,
            Level::Error | Level::Fatal => TraceLevel::Error,
        }
    }
}

impl fmt::Display for TraceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraceLevel::Trace => "trace",
            TraceLevel::Debug => "debug",
            TraceLevel::Info => "info",
            TraceLevel::Warn => "warn",
            TraceLevel::Error => "error",
            TraceLevel::None => "none",
        };
        f.write_str(name)
    }
}

/// Accepts driver log calls and forwards them to a [`Logger`].
#[derive(Debug, Clone)]
pub struct DatabaseLogger {
    logger: Logger,
}

impl DatabaseLogger {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }

    /// Log a driver message with its data map, in key order.
    ///
    /// Messages at [`TraceLevel::None`] are dropped before any field is built.
    #[track_caller]
    pub fn log(
        &self,
        ctx: &Context,
        level: TraceLevel,
        message: &str,
        data: &BTreeMap<String, FieldValue>,
    ) {
        let Some(level) = level.to_level() else {
            return;
        };
        if !self.logger.enabled_context(ctx, level) {
            return;
        }

        let fields: Vec<Field> = data
            .iter()
            .map(|(key, value)| Field::new(key.as_str(), value.clone()))
            .collect();
        self.logger.log_context(ctx, level, message, &fields);
    }

    /// The minimum level the driver should bother reporting.
    pub fn level(&self) -> TraceLevel {
        TraceLevel::from_level(self.logger.level())
    }
}
