/// Aligns a number up to the next multiple of the specified alignment.
///
/// This function rounds up the input number to the nearest multiple of the alignment
/// that is greater than or equal to the input. If the input is already aligned,
/// it returns the input unchanged.
///
/// # Arguments
///
/// * `n` - The number to align up
/// * `alignment` - The alignment boundary (must be a power of 2 and non-zero)
///
/// # Examples
///
/// ```
/// use emplace_aligned::align::align_up;
///
/// assert_eq!(align_up(0, 8), 0);
/// assert_eq!(align_up(1, 8), 8);
/// assert_eq!(align_up(7, 8), 8);
/// assert_eq!(align_up(8, 8), 8);
/// assert_eq!(align_up(9, 8), 16);
/// assert_eq!(align_up(4, 32), 32);
/// ```
///
/// # Panics
///
/// This function will panic in debug builds if `alignment` is not a power of 2.
#[inline]
pub const fn align_up(n: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    (n + alignment - 1) & !(alignment - 1)
}

/// Aligns a number down to the previous multiple of the specified alignment.
///
/// # Examples
///
/// ```
/// use emplace_aligned::align::align_down;
///
/// assert_eq!(align_down(0, 8), 0);
/// assert_eq!(align_down(7, 8), 0);
/// assert_eq!(align_down(8, 8), 8);
/// assert_eq!(align_down(15, 8), 8);
/// assert_eq!(align_down(16, 8), 16);
/// ```
///
/// # Panics
///
/// This function will panic in debug builds if `alignment` is not a power of 2.
#[inline]
pub const fn align_down(n: usize, alignment: usize) -> usize {
    debug_assert!(alignment.is_power_of_two());
    n & !(alignment - 1)
}

/// Checks if a number (typically an address) lies exactly on an alignment boundary.
///
/// # Examples
///
/// ```
/// use emplace_aligned::align::is_aligned;
///
/// assert!(is_aligned(0, 8));
/// assert!(!is_aligned(1, 8));
/// assert!(is_aligned(64, 32));
/// assert!(!is_aligned(36, 8));
/// ```
///
/// # Panics
///
/// This function will panic in debug builds if `alignment` is not a power of 2.
#[inline]
pub const fn is_aligned(n: usize, alignment: usize) -> bool {
    debug_assert!(alignment.is_power_of_two());
    (n & (alignment - 1)) == 0
}
