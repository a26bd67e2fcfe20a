//! Immutable point-in-time copies of the accumulated sequence.

use std::ops::Deref;

/// An owned, immutable copy of the accumulated sequence.
///
/// Produced by [`Accumulator::snapshot`](crate::Accumulator::snapshot).
/// The values are copied out of the actor's state, so later appends
/// never show up in a snapshot that has already been handed out.
///
/// `appended` records how many values the actor had processed when the
/// copy was taken. It keeps counting across clears, so it orders
/// snapshots within the actor's processing sequence even when the
/// visible contents have been reset.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot<T> {
    values: Vec<T>,
    appended: u64,
}

impl<T> Snapshot<T> {
    /// Build a snapshot from already-copied values.
    pub fn new(values: Vec<T>, appended: u64) -> Self {
        Self { values, appended }
    }

    /// Total appends the actor had processed when this copy was taken.
    pub fn appended(&self) -> u64 {
        self.appended
    }

    /// The values in actor processing order.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Consume the snapshot and take ownership of its values.
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            appended: 0,
        }
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.values
    }
}

impl<T> IntoIterator for Snapshot<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<T> From<Snapshot<T>> for Vec<T> {
    fn from(snapshot: Snapshot<T>) -> Self {
        snapshot.values
    }
}
