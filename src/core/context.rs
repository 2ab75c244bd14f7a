//! Call context threaded through handlers
//!
//! A `Context` carries correlation values (request ids, trace ids) and a
//! cancellation flag from the call site into `Handler::enabled` and
//! `Handler::handle`. The built-in handlers ignore both; custom handlers may
//! use them for routing or gating.

use super::field::{Field, FieldValue};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Context {
    values: Arc<Vec<Field>>,
    cancelled: Arc<AtomicBool>,
}

impl Context {
    /// The empty context used by calls that do not supply one.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context carrying one more correlation value.
    ///
    /// The derived context shares the cancellation flag of its parent.
    #[must_use]
    pub fn with_value<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut values = Vec::with_capacity(self.values.len() + 1);
        values.extend(self.values.iter().cloned());
        values.push(Field::new(key, value));
        Self {
            values: Arc::new(values),
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    pub fn values(&self) -> &[Field] {
        &self.values
    }

    /// Latest value stored under `key`, if any.
    pub fn value(&self, key: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .rev()
            .find(|field| field.key == key)
            .map(|field| &field.value)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
