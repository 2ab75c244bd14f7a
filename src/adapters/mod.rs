//! Adapters exposing a [`Logger`](crate::core::Logger) under foreign calling conventions

pub mod database;
pub mod extended;
pub mod key_value;
#[cfg(feature = "log-facade")]
pub mod log_facade;

pub use database::{DatabaseLogger, TraceLevel};
pub use extended::ExtendedLogger;
pub use key_value::{key_values_to_fields, KeyValueLogger};
#[cfg(feature = "log-facade")]
pub use log_facade::LogFacade;
