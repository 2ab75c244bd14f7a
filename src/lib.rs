//! # logkit
//!
//! A leveled, structured logging core for services.
//!
//! ## Features
//!
//! - **Leveled**: six levels from Trace to Fatal, with a process-wide default
//!   and a shared, atomically updatable threshold per logger family
//! - **Structured**: typed key/value fields, groups, and lazily computed values
//! - **Pluggable handlers**: human-readable console lines, JSON lines, fan-out
//!   to several handlers, or any custom [`Handler`]
//! - **Adapters**: database driver, printf-style, key/value and `log` facade
//!   front ends over the same logger
//! - **Test friendly**: an injectable exit hook for Fatal and a test logger
//!   that fails the test on errors
//!
//! ## Example
//!
//! ```
//! use logkit::prelude::*;
//!
//! let logger = Logger::with_config(
//!     Config::new()
//!         .level(Level::Info)
//!         .output(Output::stderr())
//!         .time_format("-"),
//! )
//! .unwrap();
//!
//! let db = logger.named("db").with(&[Field::new("pool", "primary")]);
//! db.info("connected", &[Field::new("latency_ms", 12)]);
//! db.debug("not shown", &[]);
//! ```

pub mod adapters;
pub mod core;
pub mod handlers;
pub mod macros;
pub mod testing;

#[cfg(test)]
mod test_support;

pub mod prelude {
    pub use crate::core::{
        default_level, set_default_level, Config, Context, Environment, Field, FieldValue,
        Handler, Level, LevelVar, Logger, LoggerError, Output, Record, Result,
    };
    pub use crate::handlers::{ConsoleHandler, FanOutHandler, JsonHandler};
}

pub use crate::core::{
    default_level, set_default_level, Config, Context, Environment, Field, FieldValue, Handler,
    Level, LevelVar, LogWriter, Logger, LoggerError, Output, Record, Result,
};
pub use handlers::{ConsoleHandler, FanOutHandler, JsonHandler, NopHandler};
