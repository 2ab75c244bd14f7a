//! Byte-stream sink that forwards each write as one log record

use super::context::Context;
use super::log_level::Level;
use super::logger::Logger;
use super::record::Record;
use std::io::{self, Write};

/// `io::Write` implementation bound to a logger and a fixed level.
///
/// Every non-empty `write` becomes exactly one record whose message is the
/// (lossily decoded) bytes. Writes never fail and never report a short
/// count, so the writer can be handed to anything expecting a plain sink.
///
/// # Example
///
/// ```
/// use logkit::prelude::*;
/// use std::io::Write;
///
/// let logger = Logger::nop();
/// let mut writer = logger.writer(Level::Info);
/// assert_eq!(writer.write(b"hello").unwrap(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct LogWriter {
    logger: Logger,
    level: Level,
}

impl LogWriter {
    pub fn new(logger: Logger, level: Level) -> Self {
        Self { logger, level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Logger {
    /// A writer emitting records at `level` through this logger.
    ///
    /// Bound to [`Level::Fatal`], every write runs the exit hook after the
    /// record is emitted.
    pub fn writer(&self, level: Level) -> LogWriter {
        LogWriter::new(self.clone(), level)
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let message = String::from_utf8_lossy(buf).into_owned();
        self.logger
            .log_record(&Context::background(), Record::new(self.level, message));

        if self.level == Level::Fatal {
            self.logger.terminate();
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
