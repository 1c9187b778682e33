//! Inline, correctly aligned, uninitialized storage for a value that the caller
//! constructs and destroys in place.
//!
//! [`Aligned<T, A>`] is the building block for hand-rolled optional and slot
//! containers: it reserves `size_of::<T>()` bytes aligned to at least
//! `align_of::<T>()` (or to a stricter [`Align<N>`]) and hands out typed
//! pointers into them. It does not know whether a value is present; see the
//! `emplace-slot` crate for a container that does.

pub mod align;
pub mod alignment;

mod aligned;

pub use aligned::Aligned;
pub use alignment::{Align, Alignment, MAX_ALIGNMENT};

#[cfg(test)]
mod tests;
