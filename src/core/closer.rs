//! Log-on-error helpers for releasing resources

use super::context::Context;
use super::field::Field;
use super::logger::Logger;
use std::error::Error;
use std::io;

/// Returned by resources that were closed before.
///
/// The closer helpers treat this one condition as success. Wrap it in an
/// `io::Error` or return it as the source of another error; either form is
/// recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("resource already closed")]
pub struct AlreadyClosed;

/// A resource released with a plain close call.
pub trait Close {
    type Error: Error + 'static;

    fn close(&mut self) -> Result<(), Self::Error>;
}

/// A resource whose close call takes a [`Context`].
pub trait CloseContext {
    type Error: Error + 'static;

    fn close_context(&mut self, ctx: &Context) -> Result<(), Self::Error>;
}

/// Whether `err`, or anything in its source chain, is [`AlreadyClosed`].
pub fn is_already_closed(err: &(dyn Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if err.is::<AlreadyClosed>() {
            return true;
        }
        // io::Error hides a custom payload from `source()`
        if let Some(inner) = err.downcast_ref::<io::Error>().and_then(io::Error::get_ref) {
            if inner.is::<AlreadyClosed>() {
                return true;
            }
        }
        current = err.source();
    }
    false
}

impl Logger {
    /// Close `resource`, logging `message` at Error if that fails.
    ///
    /// An [`AlreadyClosed`] failure is ignored. Nothing is returned, which
    /// makes this convenient at the end of a scope.
    #[track_caller]
    pub fn closer<C>(&self, resource: &mut C, message: &str)
    where
        C: Close + ?Sized,
    {
        if let Err(err) = resource.close() {
            if !is_already_closed(&err) {
                self.error(message, &[Field::error(&err)]);
            }
        }
    }

    /// Like [`closer`](Logger::closer), for resources closed under a context.
    #[track_caller]
    pub fn closer_context<C>(&self, ctx: &Context, resource: &mut C, message: &str)
    where
        C: CloseContext + ?Sized,
    {
        if let Err(err) = resource.close_context(ctx) {
            if !is_already_closed(&err) {
                self.error_context(ctx, message, &[Field::error(&err)]);
            }
        }
    }
}
