//! Background scroll freeze for the overlay checkout form.
//!
//! `lock` remembers the offset once; `release` hands back exactly that offset
//! and forgets it. Both are idempotent, so repeated exit paths cannot restore
//! twice or restore a stale value.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollLock {
    saved_offset: Option<f64>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this call took the lock.
    pub fn lock(&mut self, offset: f64) -> bool {
        if self.saved_offset.is_some() {
            return false;
        }
        self.saved_offset = Some(offset);
        true
    }

    /// Offset to restore, or `None` if not locked.
    pub fn release(&mut self) -> Option<f64> {
        self.saved_offset.take()
    }

    pub fn is_locked(&self) -> bool {
        self.saved_offset.is_some()
    }
}
