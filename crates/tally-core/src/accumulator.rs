//! The state owned by the accumulation actor.
//!
//! [`Accumulator`] is deliberately plain: no interior mutability, no
//! synchronisation. It is moved into the actor thread and only ever
//! touched there, so the ordering of `append` and `snapshot` calls is
//! exactly the order the actor dequeued requests in.

use crate::snapshot::Snapshot;

/// Ordered, append-only collection of submitted values.
#[derive(Debug)]
pub struct Accumulator<T> {
    values: Vec<T>,
    /// Monotonic count of every append ever applied. Not reset by `clear`.
    appended: u64,
    peak_len: usize,
}

impl<T> Accumulator<T> {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            appended: 0,
            peak_len: 0,
        }
    }

    /// Append a value to the end of the sequence. Never fails.
    pub fn append(&mut self, value: T) {
        self.values.push(value);
        self.appended += 1;
        self.peak_len = self.peak_len.max(self.values.len());
    }

    /// Take an independent copy of the current contents.
    pub fn snapshot(&self) -> Snapshot<T>
    where
        T: Clone,
    {
        Snapshot::new(self.values.clone(), self.appended)
    }

    /// Drop every accumulated value, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.values.len();
        self.values.clear();
        removed
    }

    /// Number of values currently held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values are currently held.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total appends applied since construction.
    pub fn appended(&self) -> u64 {
        self.appended
    }

    /// Largest length the sequence has reached.
    pub fn peak_len(&self) -> usize {
        self.peak_len
    }
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}
