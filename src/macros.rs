//! Logging macros for ergonomic log message formatting.
//!
//! The macros format like `format!` and accept trailing `key => value`
//! fields after a `;`. Neither the message nor the fields are evaluated when
//! the level is disabled.
//!
//! # Examples
//!
//! ```
//! use logkit::prelude::*;
//! use logkit::info;
//!
//! let logger = Logger::nop();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // With fields
//! let user_id = 42;
//! info!(logger, "User logged in"; "user_id" => user_id, "action" => "login");
//! ```

/// Log a message at an explicit level.
///
/// # Examples
///
/// ```
/// # use logkit::prelude::*;
/// # let logger = Logger::nop();
/// use logkit::log;
/// log!(logger, Level::Info, "Simple message");
/// log!(logger, Level::Error, "Error code: {}", 500);
/// log!(logger, Level::Warn, "Slow query"; "elapsed_ms" => 1200);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* $(; $($key:expr => $value:expr),+)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(
                level,
                format!($fmt $(, $arg)*),
                &[$($($crate::core::Field::new($key, $value)),+)?],
            );
        }
    }};
}

/// Log a trace-level message.
///
/// # Examples
///
/// ```
/// # use logkit::prelude::*;
/// # let logger = Logger::nop();
/// use logkit::trace;
/// trace!(logger, "Entering function: calculate()");
/// trace!(logger, "Variable value: {}", 42);
/// ```
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use logkit::prelude::*;
/// # let logger = Logger::nop();
/// use logkit::warn;
/// warn!(logger, "Low disk space");
/// warn!(logger, "Retry attempt {} of {}", 3, 5; "host" => "db-1");
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::Level::Error, $($arg)+)
    };
}

/// Log a fatal-level message, then run the logger's exit hook.
///
/// The exit hook runs even when Fatal is disabled; the message and fields
/// are then left unevaluated.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $fmt:literal $(, $arg:expr)* $(; $($key:expr => $value:expr),+)?) => {{
        let logger = &$logger;
        if logger.enabled($crate::core::Level::Fatal) {
            logger.fatal(
                format!($fmt $(, $arg)*),
                &[$($($crate::core::Field::new($key, $value)),+)?],
            );
        } else {
            logger.fatal(String::new(), &[]);
        }
    }};
}
