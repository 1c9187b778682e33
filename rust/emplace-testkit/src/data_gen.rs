//! Data generation utilities for testing.

/// Generates `len` random bytes.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    fastrand::fill(&mut bytes);
    bytes
}

/// Generates a random `u64`.
pub fn random_u64() -> u64 {
    fastrand::u64(..)
}

/// Generates a random index in `0..len`.
///
/// # Panics
///
/// Panics if `len` is zero.
pub fn random_index(len: usize) -> usize {
    assert_ne!(len, 0);
    fastrand::usize(0..len)
}
