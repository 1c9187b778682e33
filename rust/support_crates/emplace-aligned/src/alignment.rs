//! Type-level alignment requests.
//!
//! An alignment is selected with [`Align<N>`]. Only powers of two from `1` up to
//! [`MAX_ALIGNMENT`] implement [`Alignment`], so an unsupported request is a
//! compile error rather than a runtime failure:
//!
//! ```compile_fail
//! use emplace_aligned::{Align, Aligned};
//!
//! let storage = Aligned::<u32, Align<3>>::new();
//! ```
//!
//! ```compile_fail
//! use emplace_aligned::{Align, Aligned};
//!
//! let storage = Aligned::<u32, Align<0>>::new();
//! ```

/// The largest alignment the compiler accepts in `#[repr(align)]` (2^29).
pub const MAX_ALIGNMENT: usize = 1 << 29;

/// A zero-sized request for an alignment of `N` bytes.
///
/// `Align<N>` is never instantiated; it is only used as the `A` parameter of
/// [`Aligned`](crate::Aligned).
#[derive(Debug)]
pub struct Align<const N: usize>;

/// A supported alignment value.
///
/// This trait is sealed and implemented for [`Align<N>`] with `N` a power of
/// two no greater than [`MAX_ALIGNMENT`].
pub trait Alignment: sealed::Sealed {
    /// The requested alignment in bytes.
    const VALUE: usize;

    /// Zero-sized type whose `align_of` equals [`Self::VALUE`].
    type Marker: Copy + Send + Sync + Unpin;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! impl_alignments {
    ($($marker:ident as $n:literal),* $(,)?) => { $(
        #[doc(hidden)]
        #[derive(Clone, Copy, Debug)]
        #[repr(align($n))]
        pub struct $marker;

        impl sealed::Sealed for Align<$n> {}

        impl Alignment for Align<$n> {
            const VALUE: usize = $n;
            type Marker = $marker;
        }
    )* };
}

impl_alignments!(
    Align1 as 1,
    Align2 as 2,
    Align4 as 4,
    Align8 as 8,
    Align16 as 16,
    Align32 as 32,
    Align64 as 64,
    Align128 as 128,
    Align256 as 256,
    Align512 as 512,
    Align1024 as 1024,
    Align2048 as 2048,
    Align4096 as 4096,
    Align8192 as 8192,
    Align16384 as 16384,
    Align32768 as 32768,
    Align65536 as 65536,
    Align131072 as 131072,
    Align262144 as 262144,
    Align524288 as 524288,
    Align1048576 as 1048576,
    Align2097152 as 2097152,
    Align4194304 as 4194304,
    Align8388608 as 8388608,
    Align16777216 as 16777216,
    Align33554432 as 33554432,
    Align67108864 as 67108864,
    Align134217728 as 134217728,
    Align268435456 as 268435456,
    Align536870912 as 536870912,
);
