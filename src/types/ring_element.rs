use super::int_ring::IntRing2k;
use num_traits::{One, Zero};
use rand::{distributions::Standard, prelude::Distribution, Rng};
use serde::{Deserialize, Serialize};
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitXor, BitXorAssign, Mul, Neg, Shl, ShlAssign, Shr,
    ShrAssign, Sub, SubAssign,
};

/// One element of the ring Z/2^K. All arithmetic wraps.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize, Hash,
)]
#[serde(bound = "")]
#[repr(transparent)]
pub struct RingElement<T: IntRing2k>(pub T);

impl<T: IntRing2k> RingElement<T> {
    /// Arithmetic right shift: vacated high bits are filled with copies of
    /// the sign bit. The shift amount must be below K.
    pub(crate) fn arshift(self, shift: u32) -> Self {
        debug_assert!((shift as usize) < T::K);
        let shifted = self.0.wrapping_shr(shift);
        let sign = self.0.wrapping_shr(T::K as u32 - 1) & T::one();
        if sign == T::one() && shift > 0 {
            RingElement(shifted | (!T::zero()).wrapping_shl(T::K as u32 - shift))
        } else {
            RingElement(shifted)
        }
    }

    /// Number of bits needed to represent the value.
    pub(crate) fn bit_width(self) -> usize {
        T::K - self.0.leading_zeros() as usize
    }
}

/// Moves a value between ring widths, truncating to the target width.
pub(crate) fn recast<T: IntRing2k, U: IntRing2k>(x: RingElement<T>) -> RingElement<U> {
    RingElement(U::from_u128(x.0.upgrade_to_128()))
}

impl<T: IntRing2k> Add for RingElement<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        RingElement(self.0.wrapping_add(&rhs.0))
    }
}

impl<T: IntRing2k> Add<&Self> for RingElement<T> {
    type Output = Self;

    fn add(self, rhs: &Self) -> Self::Output {
        RingElement(self.0.wrapping_add(&rhs.0))
    }
}

impl<T: IntRing2k> AddAssign for RingElement<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.0.wrapping_add_assign(&rhs.0)
    }
}

impl<T: IntRing2k> Sub for RingElement<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        RingElement(self.0.wrapping_sub(&rhs.0))
    }
}

impl<T: IntRing2k> SubAssign for RingElement<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.0.wrapping_sub_assign(&rhs.0)
    }
}

impl<T: IntRing2k> Mul for RingElement<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        RingElement(self.0.wrapping_mul(&rhs.0))
    }
}

impl<T: IntRing2k> Neg for RingElement<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        RingElement(self.0.wrapping_neg())
    }
}

impl<T: IntRing2k> BitXor for RingElement<T> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        RingElement(self.0 ^ rhs.0)
    }
}

impl<T: IntRing2k> BitXor<&Self> for RingElement<T> {
    type Output = Self;

    fn bitxor(self, rhs: &Self) -> Self::Output {
        RingElement(self.0 ^ rhs.0)
    }
}

impl<T: IntRing2k> BitXorAssign for RingElement<T> {
    fn bitxor_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl<T: IntRing2k> BitAnd for RingElement<T> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        RingElement(self.0 & rhs.0)
    }
}

impl<T: IntRing2k> BitAnd<&Self> for RingElement<T> {
    type Output = Self;

    fn bitand(self, rhs: &Self) -> Self::Output {
        RingElement(self.0 & rhs.0)
    }
}

impl<T: IntRing2k> BitAndAssign for RingElement<T> {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl<T: IntRing2k> Shl<u32> for RingElement<T> {
    type Output = Self;

    fn shl(self, rhs: u32) -> Self::Output {
        RingElement(self.0.wrapping_shl(rhs))
    }
}

impl<T: IntRing2k> ShlAssign<u32> for RingElement<T> {
    fn shl_assign(&mut self, rhs: u32) {
        self.0.wrapping_shl_assign(rhs)
    }
}

impl<T: IntRing2k> Shr<u32> for RingElement<T> {
    type Output = Self;

    fn shr(self, rhs: u32) -> Self::Output {
        RingElement(self.0.wrapping_shr(rhs))
    }
}

impl<T: IntRing2k> ShrAssign<u32> for RingElement<T> {
    fn shr_assign(&mut self, rhs: u32) {
        self.0.wrapping_shr_assign(rhs)
    }
}

impl<T: IntRing2k> Zero for RingElement<T> {
    fn zero() -> Self {
        Self(T::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl<T: IntRing2k> One for RingElement<T> {
    fn one() -> Self {
        Self(T::one())
    }
}

impl<T: IntRing2k> Distribution<RingElement<T>> for Standard
where
    Standard: Distribution<T>,
{
    #[inline(always)]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RingElement<T> {
        RingElement(rng.gen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping_ops() {
        let a = RingElement(250u8);
        let b = RingElement(10u8);
        assert_eq!(a + b, RingElement(4));
        assert_eq!(b - a, RingElement(16));
        assert_eq!(-b, RingElement(246));
        assert_eq!(a * b, RingElement(196));
    }

    #[test]
    fn arshift_copies_sign() {
        assert_eq!(RingElement(0x80u8).arshift(3), RingElement(0xf0));
        assert_eq!(RingElement(0x40u8).arshift(3), RingElement(0x08));
        assert_eq!(RingElement(u64::MAX).arshift(17), RingElement(u64::MAX));
        assert_eq!(RingElement(0x80u8).arshift(0), RingElement(0x80));
    }

    #[test]
    fn bit_width() {
        assert_eq!(RingElement(0u32).bit_width(), 0);
        assert_eq!(RingElement(1u32).bit_width(), 1);
        assert_eq!(RingElement(5u32).bit_width(), 3);
        assert_eq!(RingElement(u128::MAX).bit_width(), 128);
    }

    #[test]
    fn recast_truncates() {
        let x = RingElement(0xabcdu16);
        assert_eq!(recast::<u16, u8>(x), RingElement(0xcdu8));
        assert_eq!(recast::<u8, u16>(recast::<u16, u8>(x)), RingElement(0xcd));
    }
}
