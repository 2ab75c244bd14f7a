//! Shared, atomically updatable level threshold

use super::log_level::Level;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// A level cell shared by a logger and every child derived from it.
///
/// Cloning a `LevelVar` yields another handle to the same cell, so a
/// `set` through any handle is observed by all of them.
#[derive(Clone)]
pub struct LevelVar {
    level: Arc<AtomicU8>,
}

impl LevelVar {
    pub fn new(level: Level) -> Self {
        Self {
            level: Arc::new(AtomicU8::new(level as u8)),
        }
    }

    #[inline]
    pub fn get(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Acquire))
    }

    #[inline]
    pub fn set(&self, level: Level) {
        self.level.store(level as u8, Ordering::Release);
    }

    /// Whether a record at `level` passes this threshold.
    #[inline]
    pub fn allows(&self, level: Level) -> bool {
        level >= self.get()
    }

    /// Whether both handles point at the same cell.
    pub fn shares_cell_with(&self, other: &LevelVar) -> bool {
        Arc::ptr_eq(&self.level, &other.level)
    }
}

impl Default for LevelVar {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

impl fmt::Debug for LevelVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LevelVar").field(&self.get()).finish()
    }
}
