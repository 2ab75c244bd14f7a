//! Core logger types and traits

pub mod closer;
pub mod config;
pub mod context;
pub mod error;
pub mod field;
pub mod handler;
pub mod level_var;
pub mod log_level;
pub mod logger;
pub mod output;
pub mod record;
pub mod recover;
pub mod timestamp;
pub mod writer;

pub use closer::{is_already_closed, AlreadyClosed, Close, CloseContext};
pub use config::{Config, Environment};
pub use context::Context;
pub use error::{LoggerError, Result};
pub use field::{Field, FieldValue, LazyValue};
pub use handler::Handler;
pub use level_var::LevelVar;
pub use log_level::{default_level, set_default_level, Level};
pub use logger::{default_exit_hook, ExitHook, Logger};
pub use output::Output;
pub use record::{Caller, Record};
pub use timestamp::{TimestampFormat, DEFAULT_TIME_FORMAT, TIME_DISABLED};
pub use writer::LogWriter;
