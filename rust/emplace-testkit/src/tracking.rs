//! Values that record how often they are dropped and cloned.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct Counts {
    drops: AtomicUsize,
    clones: AtomicUsize,
}

/// Shared drop/clone counters for a family of [`Tracked`] values.
///
/// Cloning a `DropCounter` shares the same counters.
#[derive(Clone, Default)]
pub struct DropCounter {
    counts: Arc<Counts>,
}

impl DropCounter {
    pub fn new() -> DropCounter {
        DropCounter::default()
    }

    /// Wraps `value` so that its drops and clones are counted here.
    pub fn track<T>(&self, value: T) -> Tracked<T> {
        Tracked {
            value,
            counts: self.counts.clone(),
        }
    }

    /// Number of tracked values dropped so far.
    pub fn drops(&self) -> usize {
        self.counts.drops.load(Ordering::SeqCst)
    }

    /// Number of tracked values cloned so far.
    pub fn clones(&self) -> usize {
        self.counts.clones.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for DropCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropCounter")
            .field("drops", &self.drops())
            .field("clones", &self.clones())
            .finish()
    }
}

/// A value whose drops and clones are recorded by a [`DropCounter`].
pub struct Tracked<T> {
    value: T,
    counts: Arc<Counts>,
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        self.counts.drops.fetch_add(1, Ordering::SeqCst);
    }
}

impl<T: Clone> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        self.counts.clones.fetch_add(1, Ordering::SeqCst);
        Tracked {
            value: self.value.clone(),
            counts: self.counts.clone(),
        }
    }
}

impl<T> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for Tracked<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tracked").field(&self.value).finish()
    }
}
