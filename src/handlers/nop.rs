//! Handler that discards everything

use crate::core::{Context, Field, Handler, Level, Record, Result};
use std::sync::Arc;

/// Never enabled, so loggers built on it do no work at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NopHandler;

impl Handler for NopHandler {
    fn enabled(&self, _ctx: &Context, _level: Level) -> bool {
        false
    }

    fn handle(&self, _ctx: &Context, _record: &Record) -> Result<()> {
        Ok(())
    }

    fn with_attrs(&self, _fields: &[Field]) -> Arc<dyn Handler> {
        Arc::new(NopHandler)
    }

    fn with_group(&self, _name: &str) -> Arc<dyn Handler> {
        Arc::new(NopHandler)
    }
}
