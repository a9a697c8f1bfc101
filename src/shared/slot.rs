//! Latest-wins single-value slot

use parking_lot::RwLock;
use std::sync::Arc;

/// A single-item, overwritten-on-write handoff between a producer and its
/// consumers.
///
/// The lock guards only the `Arc` handle swap, so a reader either gets the
/// prior value or the new one in full, never a torn update, and the writer
/// never waits for readers still holding handles to an older value.
#[derive(Debug)]
pub struct Slot<T> {
    current: RwLock<Option<Arc<T>>>,
}

impl<T> Slot<T> {
    /// Create an empty slot
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Replace the stored value wholesale
    pub fn publish(&self, value: T) {
        *self.current.write() = Some(Arc::new(value));
    }

    /// Get a handle to the most recently published value, if any
    pub fn latest(&self) -> Option<Arc<T>> {
        self.current.read().clone()
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}
