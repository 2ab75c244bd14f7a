//! Handler implementations

pub mod console;
pub mod fanout;
pub mod json;
pub mod nop;

pub use console::ConsoleHandler;
pub use fanout::FanOutHandler;
pub use json::JsonHandler;
pub use nop::NopHandler;

pub use crate::core::Handler;
