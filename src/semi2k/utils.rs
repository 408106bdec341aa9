use crate::types::{int_ring::IntRing2k, tensor::low_mask_u128};

pub(crate) fn ceil_log2(x: usize) -> usize {
    let mut y = 0;
    let mut x = x - 1;
    while x > 0 {
        x >>= 1;
        y += 1;
    }
    y
}

/// A ring value with the low `n` bits set, `n <= K`.
pub(crate) fn low_mask<T: IntRing2k>(n: usize) -> T {
    debug_assert!(n <= T::K);
    T::from_u128(low_mask_u128(n))
}
