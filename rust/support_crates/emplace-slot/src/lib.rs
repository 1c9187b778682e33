//! An inline optional value with a caller-chosen alignment.
//!
//! [`Slot<T, A>`] pairs [`Aligned<T, A>`] with an occupancy flag, so the value
//! it hosts is dropped exactly once and never read while vacant. Unlike
//! `Option<T>`, the hosted value sits at an over-alignable address that stays
//! fixed for as long as the slot does not move.

use std::fmt;

use emplace_aligned::{Align, Aligned, Alignment};

/// An inline container holding zero or one `T` at an address aligned to
/// `Aligned::<T, A>::ALIGN`.
///
/// # Examples
///
/// ```
/// use emplace_aligned::Align;
/// use emplace_slot::Slot;
///
/// let mut slot = Slot::<String, Align<64>>::new();
/// assert!(slot.is_vacant());
///
/// slot.insert("first".to_string());
/// assert_eq!(slot.get().map(String::as_str), Some("first"));
///
/// let previous = slot.insert("second".to_string());
/// assert_eq!(previous.as_deref(), Some("first"));
/// assert_eq!(slot.take().as_deref(), Some("second"));
/// assert!(slot.is_vacant());
/// ```
pub struct Slot<T, A: Alignment = Align<1>> {
    storage: Aligned<T, A>,
    occupied: bool,
}

impl<T, A: Alignment> Slot<T, A> {
    /// Creates a vacant slot.
    #[inline]
    pub const fn new() -> Self {
        Slot {
            storage: Aligned::new(),
            occupied: false,
        }
    }

    /// Creates a slot holding `value`.
    pub fn from_value(value: T) -> Self {
        let mut slot = Self::new();
        slot.storage.write(value);
        slot.occupied = true;
        slot
    }

    #[inline]
    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    #[inline]
    pub fn is_vacant(&self) -> bool {
        !self.occupied
    }

    /// Stores `value`, returning the value it replaces, if any.
    pub fn insert(&mut self, value: T) -> Option<T> {
        let previous = self.take();
        self.storage.write(value);
        self.occupied = true;
        previous
    }

    /// Returns a reference to the hosted value, or `None` if the slot is vacant.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        if self.occupied {
            // SAFETY: `occupied` is set only while a value is present.
            Some(unsafe { self.storage.assume_init_ref() })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the hosted value, or `None` if the slot is vacant.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        if self.occupied {
            // SAFETY: `occupied` is set only while a value is present.
            Some(unsafe { self.storage.assume_init_mut() })
        } else {
            None
        }
    }

    /// Returns the hosted value, constructing it in place with `f` first if
    /// the slot is vacant.
    pub fn get_or_insert_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        if !self.occupied {
            self.storage.write(f());
            self.occupied = true;
        }
        // SAFETY: the slot is occupied at this point.
        unsafe { self.storage.assume_init_mut() }
    }

    /// Moves the hosted value out, leaving the slot vacant.
    pub fn take(&mut self) -> Option<T> {
        if self.occupied {
            self.occupied = false;
            // SAFETY: the value was present and the slot is now marked vacant,
            // so the bytes left behind are never read or dropped again.
            Some(unsafe { self.storage.assume_init_read() })
        } else {
            None
        }
    }

    /// Drops the hosted value, if any.
    pub fn clear(&mut self) {
        if self.occupied {
            // Vacant before the destructor runs, so a panic in it cannot lead to a second drop.
            self.occupied = false;
            // SAFETY: the value was present.
            unsafe { self.storage.assume_init_drop() }
        }
    }

    /// Returns the address where the value is (or would be) hosted.
    ///
    /// The pointer is only valid for reads while the slot is occupied.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }
}

impl<T, A: Alignment> Drop for Slot<T, A> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, A: Alignment> Default for Slot<T, A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Alignment> From<T> for Slot<T, A> {
    fn from(value: T) -> Self {
        Self::from_value(value)
    }
}

impl<T: Clone, A: Alignment> Clone for Slot<T, A> {
    fn clone(&self) -> Self {
        match self.get() {
            Some(value) => Self::from_value(value.clone()),
            None => Self::new(),
        }
    }
}

impl<T: fmt::Debug, A: Alignment> fmt::Debug for Slot<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("Slot").field(value).finish(),
            None => f.write_str("Slot(<vacant>)"),
        }
    }
}
