use crate::error::Error;
use bytes::{Buf, BufMut, BytesMut};
use num_traits::{One, WrappingAdd, WrappingMul, WrappingNeg, WrappingShl, WrappingShr, WrappingSub, Zero};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Debug, Display},
    mem::size_of,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not},
};

/// Unsigned integers viewed as the ring Z/2^K, with wrapping semantics and a
/// fixed-width byte codec for the wire.
pub trait IntRing2k:
    Sized
    + Send
    + Sync
    + Copy
    + PartialEq
    + Eq
    + Debug
    + WrappingAdd<Output = Self>
    + WrappingSub<Output = Self>
    + WrappingShl
    + WrappingShr
    + WrappingNeg
    + WrappingMul<Output = Self>
    + Not<Output = Self>
    + BitXor<Output = Self>
    + BitXorAssign
    + BitAnd<Output = Self>
    + BitAndAssign
    + BitOr<Output = Self>
    + BitOrAssign
    + Zero
    + One
    + From<bool>
    + Default
    + PartialOrd
    + Ord
    + Serialize
    + for<'a> Deserialize<'a>
    + Display
    + 'static
{
    /// The bit width of the ring.
    const K: usize;

    fn upgrade_to_128(self) -> u128;

    /// Truncates to the low K bits.
    fn from_u128(value: u128) -> Self;

    fn leading_zeros(self) -> u32;

    fn add_to_bytes(self, other: &mut BytesMut);
    fn take_from_bytes_mut(other: &mut BytesMut) -> Result<Self, Error>;

    /// a += b
    #[inline(always)]
    fn wrapping_add_assign(&mut self, rhs: &Self) {
        *self = self.wrapping_add(rhs);
    }

    /// a -= b
    #[inline(always)]
    fn wrapping_sub_assign(&mut self, rhs: &Self) {
        *self = self.wrapping_sub(rhs);
    }

    /// a <<= b
    #[inline(always)]
    fn wrapping_shl_assign(&mut self, rhs: u32) {
        *self = self.wrapping_shl(rhs);
    }

    /// a >>= b
    #[inline(always)]
    fn wrapping_shr_assign(&mut self, rhs: u32) {
        *self = self.wrapping_shr(rhs);
    }
}

macro_rules! int_ring_impl {
    ($($t:ty => ($put:ident, $get:ident)),* $(,)?) => {$(
        impl IntRing2k for $t {
            const K: usize = Self::BITS as usize;

            fn upgrade_to_128(self) -> u128 {
                self as u128
            }

            fn from_u128(value: u128) -> Self {
                value as Self
            }

            fn leading_zeros(self) -> u32 {
                <$t>::leading_zeros(self)
            }

            fn add_to_bytes(self, other: &mut BytesMut) {
                other.$put(self);
            }

            fn take_from_bytes_mut(other: &mut BytesMut) -> Result<Self, Error> {
                if other.remaining() < size_of::<Self>() {
                    return Err(Error::ConversionError);
                }
                Ok(other.$get())
            }
        }
    )*};
}

int_ring_impl!(
    u8 => (put_u8, get_u8),
    u16 => (put_u16, get_u16),
    u32 => (put_u32, get_u32),
    u64 => (put_u64, get_u64),
    u128 => (put_u128, get_u128),
);
