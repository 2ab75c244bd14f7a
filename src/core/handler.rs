//! Handler trait for record consumers

use super::{context::Context, error::Result, field::Field, log_level::Level, record::Record};
use std::sync::Arc;

/// A consumer of log records.
///
/// Handlers are immutable once built: `with_attrs` and `with_group` return
/// new handlers and leave the receiver untouched. Implementations must be
/// safe to call from many threads at once.
pub trait Handler: Send + Sync {
    /// Whether a record at `level` would be accepted.
    ///
    /// Called before the record is built, so it must be cheap.
    fn enabled(&self, ctx: &Context, level: Level) -> bool;

    /// Render or deliver one record.
    fn handle(&self, ctx: &Context, record: &Record) -> Result<()>;

    /// A handler that adds `fields` to every record it handles.
    fn with_attrs(&self, fields: &[Field]) -> Arc<dyn Handler>;

    /// A handler that qualifies all later fields with the group `name`.
    fn with_group(&self, name: &str) -> Arc<dyn Handler>;
}
