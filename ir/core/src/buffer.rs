//! Fixed-capacity duration storage

use alloc::boxed::Box;
use alloc::vec;

use crate::Ticks;

/// Ordered sequence of recorded tick durations
///
/// Storage is allocated once at construction and never reallocated. Only the
/// first [`len`](Self::len) slots are meaningful; [`clear`](Self::clear) just
/// rewinds the length and leaves stale values behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationBuffer {
    slots: Box<[Ticks]>,
    len: usize,
}

impl DurationBuffer {
    /// Allocate a buffer holding `capacity` durations
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Append a duration, returning `false` if the buffer is already full
    pub fn push(&mut self, ticks: Ticks) -> bool {
        match self.slots.get_mut(self.len) {
            Some(slot) => {
                *slot = ticks;
                self.len += 1;
                true
            }
            None => false,
        }
    }

    /// Write into the slot just past the recorded data without advancing the
    /// length. Returns `false` if there is no such slot.
    pub fn write_past_end(&mut self, ticks: Ticks) -> bool {
        match self.slots.get_mut(self.len) {
            Some(slot) => {
                *slot = ticks;
                true
            }
            None => false,
        }
    }

    /// Forget all recorded durations
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Recorded durations
    pub fn as_slice(&self) -> &[Ticks] {
        &self.slots[..self.len]
    }

    /// Raw slot contents, including stale values past the length
    pub fn slots(&self) -> &[Ticks] {
        &self.slots
    }

    /// Number of recorded durations
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if nothing is recorded
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if every slot is recorded
    pub fn is_full(&self) -> bool {
        self.len >= self.slots.len()
    }

    /// Maximum number of durations
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
