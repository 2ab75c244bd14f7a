//! Fan-out handler broadcasting records to several handlers

use crate::core::{Context, Field, Handler, Level, LoggerError, Record, Result};
use std::sync::Arc;

/// Forwards every record to each of its child handlers in order.
///
/// The child list never changes after construction; deriving with
/// `with_attrs`/`with_group` builds a new fan-out over derived children.
#[derive(Clone, Default)]
pub struct FanOutHandler {
    handlers: Vec<Arc<dyn Handler>>,
}

impl FanOutHandler {
    pub fn new(handlers: Vec<Arc<dyn Handler>>) -> Self {
        Self { handlers }
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Handler for FanOutHandler {
    /// True as soon as one child accepts `level`; false with no children.
    fn enabled(&self, ctx: &Context, level: Level) -> bool {
        self.handlers.iter().any(|handler| handler.enabled(ctx, level))
    }

    /// Every child sees the record, even after an earlier child failed.
    fn handle(&self, ctx: &Context, record: &Record) -> Result<()> {
        let errors: Vec<LoggerError> = self
            .handlers
            .iter()
            .filter_map(|handler| handler.handle(ctx, record).err())
            .collect();

        match LoggerError::join(errors) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn with_attrs(&self, fields: &[Field]) -> Arc<dyn Handler> {
        let handlers = self
            .handlers
            .iter()
            .map(|handler| handler.with_attrs(fields))
            .collect();
        Arc::new(FanOutHandler::new(handlers))
    }

    fn with_group(&self, name: &str) -> Arc<dyn Handler> {
        let handlers = self
            .handlers
            .iter()
            .map(|handler| handler.with_group(name))
            .collect();
        Arc::new(FanOutHandler::new(handlers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Records what it receives; optionally fails every `handle`.
    struct Recorder {
        min_level: Level,
        fail: bool,
        seen: Arc<Mutex<Vec<String>>>,
        prefix: String,
    }

    impl Recorder {
        fn new(min_level: Level, fail: bool) -> (Arc<dyn Handler>, Arc<Mutex<Vec<String>>>) {
            let seen = Arc::new(Mutex::new(Vec::new()));
            let recorder: Arc<dyn Handler> = Arc::new(Self {
                min_level,
                fail,
                seen: Arc::clone(&seen),
                prefix: String::new(),
            });
            (recorder, seen)
        }
    }

    impl Handler for Recorder {
        fn enabled(&self, _ctx: &Context, level: Level) -> bool {
            level >= self.min_level
        }

        fn handle(&self, _ctx: &Context, record: &Record) -> Result<()> {
            self.seen
                .lock()
                .push(format!("{}{}", self.prefix, record.message));
            if self.fail {
                return Err(LoggerError::writer(format!("{} failed", record.message)));
            }
            Ok(())
        }

        fn with_attrs(&self, fields: &[Field]) -> Arc<dyn Handler> {
            let keys: Vec<&str> = fields.iter().map(|f| f.key.as_str()).collect();
            Arc::new(Recorder {
                min_level: self.min_level,
                fail: self.fail,
                seen: Arc::clone(&self.seen),
                prefix: format!("{}[{}]", self.prefix, keys.join(",")),
            })
        }

        fn with_group(&self, name: &str) -> Arc<dyn Handler> {
            Arc::new(Recorder {
                min_level: self.min_level,
                fail: self.fail,
                seen: Arc::clone(&self.seen),
                prefix: format!("{}{}.", self.prefix, name),
            })
        }
    }

    #[test]
    fn test_empty_fanout_is_disabled() {
        let fanout = FanOutHandler::default();
        for level in Level::ALL {
            assert!(!fanout.enabled(&Context::background(), level));
        }
        assert!(fanout.handle(&Context::background(), &Record::new(Level::Info, "m")).is_ok());
    }

    #[test]
    fn test_enabled_is_any_child() {
        let (warn, _) = Recorder::new(Level::Warn, false);
        let (error, _) = Recorder::new(Level::Error, false);
        let fanout = FanOutHandler::new(vec![warn, error]);
        let ctx = Context::background();

        assert!(!fanout.enabled(&ctx, Level::Info));
        assert!(fanout.enabled(&ctx, Level::Warn));
        assert!(fanout.enabled(&ctx, Level::Fatal));
    }

    #[test]
    fn test_partial_failure_reaches_all_children() {
        let (first, first_seen) = Recorder::new(Level::Trace, true);
        let (second, second_seen) = Recorder::new(Level::Trace, false);
        let (third, third_seen) = Recorder::new(Level::Trace, true);
        let fanout = FanOutHandler::new(vec![first, second, third]);

        let err = fanout
            .handle(&Context::background(), &Record::new(Level::Info, "event"))
            .unwrap_err();

        assert!(matches!(err, LoggerError::Joined(ref errs) if errs.len() == 2));
        assert_eq!(*first_seen.lock(), ["event"]);
        assert_eq!(*second_seen.lock(), ["event"]);
        assert_eq!(*third_seen.lock(), ["event"]);
    }

    #[test]
    fn test_single_failure_is_not_wrapped() {
        let (ok, _) = Recorder::new(Level::Trace, false);
        let (bad, _) = Recorder::new(Level::Trace, true);
        let fanout = FanOutHandler::new(vec![ok, bad]);

        let err = fanout
            .handle(&Context::background(), &Record::new(Level::Info, "event"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Writer error: event failed");
    }

    #[test]
    fn test_derivation_is_immutable() {
        let (child, seen) = Recorder::new(Level::Trace, false);
        let fanout = FanOutHandler::new(vec![child]);
        let ctx = Context::background();

        let derived = fanout
            .with_group("db")
            .with_attrs(&[Field::new("pool", 1)]);

        derived.handle(&ctx, &Record::new(Level::Info, "derived")).unwrap();
        fanout.handle(&ctx, &Record::new(Level::Info, "original")).unwrap();

        assert_eq!(*seen.lock(), ["db.[pool]derived", "original"]);
        assert_eq!(fanout.len(), 1);
    }
}
