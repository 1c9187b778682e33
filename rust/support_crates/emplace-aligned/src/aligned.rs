use std::fmt;
use std::mem::{MaybeUninit, align_of, size_of};
use std::ptr;
use std::slice;

use emplace_common::{Error, Result, verify_arg};

use crate::align;
use crate::alignment::{Align, Alignment};

/// Inline storage for a `T` that is constructed, and destroyed, by the caller.
///
/// `Aligned` reserves `size_of::<T>()` bytes whose address is a multiple of
/// [`Self::ALIGN`]: the natural alignment of `T`, raised to `A::VALUE` when a
/// stricter [`Align<N>`] is requested. The storage lives inline and never runs
/// `T`'s destructor. Whether a value is currently present is tracked outside of
/// this type.
///
/// The alignment is never lowered below `align_of::<T>()`. The default
/// `Align<1>`, or any request weaker than `T`'s natural alignment, yields
/// `align_of::<T>()`, so `Aligned::<u64, Align<1>>::ALIGN` is 8 and a reference
/// to the hosted value is always well aligned.
///
/// # Examples
///
/// ```
/// use emplace_aligned::{Align, Aligned};
///
/// let mut storage = Aligned::<u32, Align<32>>::new();
/// assert!(storage.is_aligned_to(32));
///
/// storage.write(42);
/// // SAFETY: a `u32` was written just above.
/// assert_eq!(unsafe { *storage.assume_init_ref() }, 42);
/// ```
#[repr(C)]
pub struct Aligned<T, A: Alignment = Align<1>> {
    _align: [A::Marker; 0],
    storage: MaybeUninit<T>,
}

impl<T, A: Alignment> Aligned<T, A> {
    /// Number of bytes in the buffer, always `size_of::<T>()`.
    pub const LEN: usize = size_of::<T>();

    /// Alignment of the buffer's base address.
    pub const ALIGN: usize = if A::VALUE > align_of::<T>() {
        A::VALUE
    } else {
        align_of::<T>()
    };

    /// Size of the whole `Aligned` object, including the trailing padding an
    /// over-aligned request adds. Equal to [`Self::LEN`] for the default alignment.
    pub const SIZE: usize = align::align_up(Self::LEN, Self::ALIGN);

    /// Creates storage with unspecified content.
    #[inline]
    pub const fn new() -> Self {
        Aligned {
            _align: [],
            storage: MaybeUninit::uninit(),
        }
    }

    /// Creates storage with every byte set to zero.
    ///
    /// Whether the zeroed bytes form a valid `T` depends on `T`.
    #[inline]
    pub const fn zeroed() -> Self {
        Aligned {
            _align: [],
            storage: MaybeUninit::zeroed(),
        }
    }

    /// Returns a read-only pointer to the first byte of the buffer, typed as `T`.
    ///
    /// The pointer is valid for reads only once a `T` has been written.
    #[inline]
    pub const fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Returns a mutable pointer to the first byte of the buffer, typed as `T`.
    ///
    /// The address is identical to [`as_ptr`](Self::as_ptr). Writing a `T`
    /// through it is placement construction.
    #[inline]
    pub const fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// Returns a shared reference to the hosted value.
    ///
    /// # Safety
    ///
    /// A valid `T` must be present: written and not yet dropped or moved out.
    #[inline]
    pub unsafe fn assume_init_ref(&self) -> &T {
        // SAFETY: the caller guarantees the storage holds a valid `T`.
        unsafe { self.storage.assume_init_ref() }
    }

    /// Returns a mutable reference to the hosted value.
    ///
    /// # Safety
    ///
    /// A valid `T` must be present: written and not yet dropped or moved out.
    #[inline]
    pub unsafe fn assume_init_mut(&mut self) -> &mut T {
        // SAFETY: the caller guarantees the storage holds a valid `T`.
        unsafe { self.storage.assume_init_mut() }
    }

    /// Constructs `value` in place and returns a reference to it.
    ///
    /// A value already present is overwritten without being dropped.
    #[inline]
    pub fn write(&mut self, value: T) -> &mut T {
        self.storage.write(value)
    }

    /// Moves the hosted value out by a bitwise read.
    ///
    /// The buffer content is left as is, so unless `T: Copy` it must be treated
    /// as vacant afterwards.
    ///
    /// # Safety
    ///
    /// A valid `T` must be present.
    #[inline]
    pub unsafe fn assume_init_read(&self) -> T {
        // SAFETY: the caller guarantees the storage holds a valid `T`.
        unsafe { self.storage.assume_init_read() }
    }

    /// Drops the hosted value in place.
    ///
    /// # Safety
    ///
    /// A valid `T` must be present, and it must not be used again until a new
    /// value is written.
    #[inline]
    pub unsafe fn assume_init_drop(&mut self) {
        // SAFETY: the caller guarantees the storage holds a valid `T`.
        unsafe { self.storage.assume_init_drop() }
    }

    /// Returns the buffer as exactly [`Self::LEN`] possibly-uninitialized bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[MaybeUninit<u8>] {
        // SAFETY: the storage spans `LEN` bytes, and `MaybeUninit<u8>` is valid
        // for any content.
        unsafe { slice::from_raw_parts(self.as_ptr().cast::<MaybeUninit<u8>>(), Self::LEN) }
    }

    /// Returns the buffer as exactly [`Self::LEN`] mutable possibly-uninitialized bytes.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [MaybeUninit<u8>] {
        // SAFETY: as in `as_bytes`, and `&mut self` guarantees exclusive access.
        unsafe {
            slice::from_raw_parts_mut(self.as_mut_ptr().cast::<MaybeUninit<u8>>(), Self::LEN)
        }
    }

    /// Copies the raw bytes of `other` into this buffer.
    ///
    /// This is a plain memory copy: no `Clone` or `Drop` of `T` runs, and a
    /// value present in `self` is overwritten without being dropped. If `other`
    /// hosts a value that owns resources, both buffers now refer to them and
    /// at most one may be treated as holding a live `T`.
    #[inline]
    pub fn copy_bytes_from(&mut self, other: &Self) {
        self.as_bytes_mut().copy_from_slice(other.as_bytes());
    }

    /// Initializes every byte of the buffer from `src`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidArgument`](emplace_common::ErrorKind::InvalidArgument)
    /// if `src.len()` differs from [`Self::LEN`].
    pub fn copy_from_slice(&mut self, src: &[u8]) -> Result<()> {
        verify_arg!(src, src.len() == Self::LEN);
        // SAFETY: both regions span `LEN` bytes, and `&mut self` cannot overlap `src`.
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), self.as_mut_ptr().cast::<u8>(), Self::LEN);
        }
        Ok(())
    }

    /// Copies the buffer bytes into the front of `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DestBufferTooSmall`](emplace_common::ErrorKind::DestBufferTooSmall)
    /// if `dst` is shorter than [`Self::LEN`].
    ///
    /// # Safety
    ///
    /// Every byte of the buffer must be initialized, including any padding
    /// bytes of a hosted `T`.
    pub unsafe fn copy_to_slice(&self, dst: &mut [u8]) -> Result<()> {
        if dst.len() < Self::LEN {
            return Err(Error::dest_buffer_too_small(Self::LEN, dst.len()));
        }
        // SAFETY: `dst` holds at least `LEN` bytes, the caller guarantees the
        // source bytes are initialized, and `&self` cannot overlap `&mut dst`.
        unsafe {
            ptr::copy_nonoverlapping(self.as_ptr().cast::<u8>(), dst.as_mut_ptr(), Self::LEN);
        }
        Ok(())
    }

    /// Returns the base address of the buffer.
    #[inline]
    pub fn addr(&self) -> usize {
        self.as_ptr().addr()
    }

    /// Checks if the base address is a multiple of `alignment`.
    ///
    /// # Arguments
    ///
    /// * `alignment` - The alignment to check for. This must be a power of two.
    #[inline]
    pub fn is_aligned_to(&self, alignment: usize) -> bool {
        align::is_aligned(self.addr(), alignment)
    }
}

impl<T, A: Alignment> Default for Aligned<T, A> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: Alignment> fmt::Debug for Aligned<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aligned")
            .field("len", &Self::LEN)
            .field("align", &Self::ALIGN)
            .field("addr", &self.as_ptr())
            .finish()
    }
}
