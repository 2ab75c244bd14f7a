//! Panic boundary that reports a panic as a fatal record

use super::field::Field;
use super::log_level::Level;
use super::logger::Logger;
use std::any::Any;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};

impl Logger {
    /// Run `f`, turning a panic into a fatal `Panic` record.
    ///
    /// The record carries the panic payload as an `info` field, or as an
    /// `error` field when the payload is a boxed error. The exit hook runs
    /// afterwards, even if Fatal records are disabled. `None` is only ever
    /// returned when the exit hook returns.
    ///
    /// # Example
    ///
    /// ```
    /// use logkit::prelude::*;
    ///
    /// let logger = Logger::nop();
    /// assert_eq!(logger.recover_panics(|| 2 + 2), Some(4));
    /// ```
    #[track_caller]
    pub fn recover_panics<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Some(value),
            Err(payload) => {
                self.log(Level::Fatal, "Panic", &[panic_field(payload.as_ref())]);
                self.terminate();
                None
            }
        }
    }
}

fn panic_field(payload: &(dyn Any + Send)) -> Field {
    if let Some(s) = payload.downcast_ref::<&str>() {
        Field::new("info", *s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        Field::new("info", s.as_str())
    } else if let Some(err) = payload.downcast_ref::<Box<dyn Error + Send + Sync>>() {
        Field::error(err.as_ref())
    } else {
        Field::new("info", "unknown panic payload")
    }
}
