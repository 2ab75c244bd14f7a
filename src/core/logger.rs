//! Main logger implementation

use super::{
    config::{Config, Environment},
    context::Context,
    error::Result,
    field::Field,
    handler::Handler,
    level_var::LevelVar,
    log_level::{default_level, Level},
    record::{Caller, Record},
    timestamp::TimestampFormat,
};
use crate::handlers::{ConsoleHandler, JsonHandler, NopHandler};
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// Called after a fatal record has been handed to the handler.
///
/// The default terminates the process with status 1. Tests substitute a
/// hook that only records the call.
pub type ExitHook = Arc<dyn Fn() + Send + Sync>;

/// The hook used when none is configured: `std::process::exit(1)`.
pub fn default_exit_hook() -> ExitHook {
    Arc::new(|| std::process::exit(1))
}

/// Leveled, structured logger.
///
/// A `Logger` owns a [`Handler`] and a shared [`LevelVar`]. Children built
/// with [`named`](Logger::named) and [`with`](Logger::with) derive their
/// handler from the parent and share its level cell, so `set_level` on any
/// of them applies to the whole family. All methods are safe for concurrent
/// use; clones are cheap.
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    level: LevelVar,
    caller_info: bool,
    exit_hook: ExitHook,
}

impl Logger {
    /// Build a logger from the preset of the current default level.
    ///
    /// Debug (or lower) selects the development preset, anything else the
    /// production preset.
    pub fn new() -> Result<Self> {
        let environment = if default_level() <= Level::Debug {
            Environment::Development
        } else {
            Environment::Production
        };
        Self::with_config(Config::for_env(environment)?)
    }

    /// Build a logger from an explicit configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use logkit::prelude::*;
    ///
    /// let logger = Logger::with_config(Config::new().level(Level::Warn)).unwrap();
    /// assert!(!logger.enabled(Level::Info));
    /// assert!(logger.enabled(Level::Error));
    /// ```
    pub fn with_config(config: Config) -> Result<Self> {
        let level = LevelVar::new(config.level.unwrap_or_else(default_level));

        let handler: Arc<dyn Handler> = match config.handler {
            Some(handler) => handler,
            None => {
                let output = config.output.unwrap_or_default();
                if config.json_output {
                    let format =
                        TimestampFormat::from_config(&config.time_format, TimestampFormat::Rfc3339)?;
                    Arc::new(JsonHandler::new(output, level.clone()).with_timestamp_format(format))
                } else {
                    let format =
                        TimestampFormat::from_config(&config.time_format, TimestampFormat::default())?;
                    Arc::new(ConsoleHandler::new(output, level.clone()).with_timestamp_format(format))
                }
            }
        };

        Ok(Self {
            handler,
            level,
            caller_info: config.caller_info,
            exit_hook: config.exit_hook.unwrap_or_else(default_exit_hook),
        })
    }

    /// Wrap an existing handler.
    ///
    /// `level` should be the cell the handler gates on, so that
    /// [`set_level`](Logger::set_level) has an effect.
    pub fn from_handler(handler: Arc<dyn Handler>, level: LevelVar) -> Self {
        Self {
            handler,
            level,
            caller_info: false,
            exit_hook: default_exit_hook(),
        }
    }

    /// A logger that never writes anything.
    pub fn nop() -> Self {
        Self::from_handler(Arc::new(NopHandler), LevelVar::new(Level::Error))
    }

    #[must_use]
    pub fn with_caller_info(mut self, enabled: bool) -> Self {
        self.caller_info = enabled;
        self
    }

    #[must_use]
    pub fn with_exit_hook(mut self, hook: ExitHook) -> Self {
        self.exit_hook = hook;
        self
    }

    /// Child logger whose fields are qualified by the group `name`.
    pub fn named(&self, name: &str) -> Self {
        Self {
            handler: self.handler.with_group(name),
            ..self.clone()
        }
    }

    /// Child logger that adds `fields` to every record.
    ///
    /// Fields added to the child don't affect the parent, and vice versa.
    pub fn with(&self, fields: &[Field]) -> Self {
        Self {
            handler: self.handler.with_attrs(fields),
            ..self.clone()
        }
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Whether a record at `level` would be handled.
    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(&Context::background(), level)
    }

    pub fn enabled_context(&self, ctx: &Context, level: Level) -> bool {
        self.handler.enabled(ctx, level)
    }

    /// The minimum enabled level.
    pub fn level(&self) -> Level {
        self.level.get()
    }

    /// Change the level for this logger and every logger sharing its cell.
    pub fn set_level(&self, level: Level) {
        self.level.set(level);
    }

    pub fn level_var(&self) -> &LevelVar {
        &self.level
    }

    #[track_caller]
    pub fn log(&self, level: Level, message: impl Into<String>, fields: &[Field]) {
        self.log_context(&Context::background(), level, message, fields);
    }

    /// Emit one record, provided the handler accepts `level`.
    ///
    /// When disabled this returns before the message is converted or any
    /// field is copied.
    #[track_caller]
    pub fn log_context(
        &self,
        ctx: &Context,
        level: Level,
        message: impl Into<String>,
        fields: &[Field],
    ) {
        if !self.handler.enabled(ctx, level) {
            return;
        }
        let caller = self.caller();
        self.dispatch(
            ctx,
            Record::new(level, message)
                .with_fields(fields.to_vec())
                .with_caller(caller),
        );
    }

    /// Like [`log`](Logger::log), but fields are only built when enabled.
    #[track_caller]
    pub fn log_with<F>(&self, level: Level, message: impl Into<String>, fields: F)
    where
        F: FnOnce() -> Vec<Field>,
    {
        let ctx = Context::background();
        if !self.handler.enabled(&ctx, level) {
            return;
        }
        let caller = self.caller();
        self.dispatch(
            &ctx,
            Record::new(level, message)
                .with_fields(fields())
                .with_caller(caller),
        );
    }

    /// Emit a record built elsewhere, keeping its own caller location.
    pub fn log_record(&self, ctx: &Context, mut record: Record) {
        if !self.handler.enabled(ctx, record.level) {
            return;
        }
        if !self.caller_info {
            record.caller = None;
        }
        self.dispatch(ctx, record);
    }

    #[track_caller]
    fn caller(&self) -> Option<Caller> {
        self.caller_info.then(|| Caller::from(Location::caller()))
    }

    fn dispatch(&self, ctx: &Context, record: Record) {
        if let Err(e) = self.handler.handle(ctx, &record) {
            eprintln!("[LOGGER ERROR] Handler failed: {}", e);
        }
    }

    /// Run the exit hook.
    pub(crate) fn terminate(&self) {
        (self.exit_hook)();
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Level::Trace, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Level::Debug, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Level::Info, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Level::Warn, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Level::Error, message, fields);
    }

    /// Log at Fatal, then run the exit hook.
    ///
    /// The hook runs even if Fatal records are disabled.
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>, fields: &[Field]) {
        self.log(Level::Fatal, message, fields);
        self.terminate();
    }

    #[inline]
    #[track_caller]
    pub fn trace_context(&self, ctx: &Context, message: impl Into<String>, fields: &[Field]) {
        self.log_context(ctx, Level::Trace, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn debug_context(&self, ctx: &Context, message: impl Into<String>, fields: &[Field]) {
        self.log_context(ctx, Level::Debug, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn info_context(&self, ctx: &Context, message: impl Into<String>, fields: &[Field]) {
        self.log_context(ctx, Level::Info, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn warn_context(&self, ctx: &Context, message: impl Into<String>, fields: &[Field]) {
        self.log_context(ctx, Level::Warn, message, fields);
    }

    #[inline]
    #[track_caller]
    pub fn error_context(&self, ctx: &Context, message: impl Into<String>, fields: &[Field]) {
        self.log_context(ctx, Level::Error, message, fields);
    }

    #[track_caller]
    pub fn fatal_context(&self, ctx: &Context, message: impl Into<String>, fields: &[Field]) {
        self.log_context(ctx, Level::Fatal, message, fields);
        self.terminate();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("caller_info", &self.caller_info)
            .finish_non_exhaustive()
    }
}
