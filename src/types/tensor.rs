use super::{int_ring::IntRing2k, ring_element::RingElement};
use crate::error::Error;
use itertools::izip;
use num_traits::Zero;
use rand::{distributions::Standard, prelude::Distribution, Rng};
use serde::{Deserialize, Serialize};

/// A shaped, dense collection of ring elements. All elementwise operations
/// require both operands to have the same shape.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct RingTensor<T: IntRing2k> {
    shape: Vec<usize>,
    elems: Vec<RingElement<T>>,
}

impl<T: IntRing2k> RingTensor<T> {
    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            elems: vec![RingElement::zero(); shape.iter().product()],
        }
    }

    pub fn splat(shape: &[usize], value: T) -> Self {
        Self {
            shape: shape.to_vec(),
            elems: vec![RingElement(value); shape.iter().product()],
        }
    }

    pub fn from_elems(shape: &[usize], elems: Vec<RingElement<T>>) -> Result<Self, Error> {
        if elems.len() != shape.iter().product() {
            return Err(Error::InvalidSizeError);
        }
        Ok(Self {
            shape: shape.to_vec(),
            elems,
        })
    }

    pub fn from_vec(shape: &[usize], values: Vec<T>) -> Result<Self, Error> {
        Self::from_elems(shape, values.into_iter().map(RingElement).collect())
    }

    pub fn random<R: Rng>(shape: &[usize], rng: &mut R) -> Self
    where
        Standard: Distribution<T>,
    {
        let numel = shape.iter().product();
        Self {
            shape: shape.to_vec(),
            elems: (0..numel).map(|_| RingElement(rng.gen::<T>())).collect(),
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn numel(&self) -> usize {
        self.elems.len()
    }

    pub fn elems(&self) -> &[RingElement<T>] {
        &self.elems
    }

    pub fn into_elems(self) -> Vec<RingElement<T>> {
        self.elems
    }

    fn check_shape(&self, other: &Self) -> Result<(), Error> {
        if self.shape != other.shape {
            return Err(Error::ShapeMismatch(self.shape.clone(), other.shape.clone()));
        }
        Ok(())
    }

    pub fn xor(&self, other: &Self) -> Result<Self, Error> {
        self.check_shape(other)?;
        let elems = izip!(&self.elems, &other.elems)
            .map(|(a, b)| *a ^ b)
            .collect();
        Ok(Self {
            shape: self.shape.clone(),
            elems,
        })
    }

    pub fn and(&self, other: &Self) -> Result<Self, Error> {
        self.check_shape(other)?;
        let elems = izip!(&self.elems, &other.elems)
            .map(|(a, b)| *a & b)
            .collect();
        Ok(Self {
            shape: self.shape.clone(),
            elems,
        })
    }

    pub fn add(&self, other: &Self) -> Result<Self, Error> {
        self.check_shape(other)?;
        let elems = izip!(&self.elems, &other.elems)
            .map(|(a, b)| *a + b)
            .collect();
        Ok(Self {
            shape: self.shape.clone(),
            elems,
        })
    }

    pub fn neg(&self) -> Self {
        Self {
            shape: self.shape.clone(),
            elems: self.elems.iter().map(|a| -*a).collect(),
        }
    }

    fn map(&self, f: impl Fn(RingElement<T>) -> RingElement<T>) -> Self {
        Self {
            shape: self.shape.clone(),
            elems: self.elems.iter().map(|a| f(*a)).collect(),
        }
    }

    /// Logical left shift; the shift amount must be below K.
    pub fn lshift(&self, shift: u32) -> Self {
        debug_assert!((shift as usize) < T::K);
        self.map(|a| a << shift)
    }

    /// Logical right shift; the shift amount must be below K.
    pub fn rshift(&self, shift: u32) -> Self {
        debug_assert!((shift as usize) < T::K);
        self.map(|a| a >> shift)
    }

    /// Arithmetic right shift; the shift amount must be below K.
    pub fn arshift(&self, shift: u32) -> Self {
        self.map(|a| a.arshift(shift))
    }

    /// Reverses the bits in positions [start, end) of every element, leaving
    /// the bits outside the range untouched.
    pub fn bit_reverse(&self, start: usize, end: usize) -> Result<Self, Error> {
        if start > end || end > T::K {
            return Err(Error::InvalidBitWidth(end));
        }
        Ok(self.map(|a| {
            let v = a.0.upgrade_to_128();
            let mut out = v & !(low_mask_u128(end) ^ low_mask_u128(start));
            for i in start..end {
                let bit = (v >> i) & 1;
                out |= bit << (end - 1 - (i - start));
            }
            RingElement(T::from_u128(out))
        }))
    }

    /// Interleaves groups of 2^stride bits: the low half of the nbits window
    /// provides the even groups of the output, the high half the odd groups.
    /// `nbits` must be a power of two.
    pub fn bit_interleave(&self, stride: usize, nbits: usize) -> Result<Self, Error> {
        interleave_args_ok::<T>(stride, nbits)?;
        // a 1-bit window has no halves to swap
        if nbits < 2 {
            return Ok(self.clone());
        }
        Ok(self.map(|a| {
            let v = a.0.upgrade_to_128();
            let group = 1usize << stride;
            let half = nbits / 2;
            let mask = low_mask_u128(group);
            let mut out = v & !low_mask_u128(nbits);
            for k in 0..half / group {
                out |= ((v >> (k * group)) & mask) << (2 * k * group);
                out |= ((v >> (half + k * group)) & mask) << ((2 * k + 1) * group);
            }
            RingElement(T::from_u128(out))
        }))
    }

    /// Inverse of [`bit_interleave`](Self::bit_interleave): gathers the even
    /// groups into the low half and the odd groups into the high half.
    pub fn bit_deinterleave(&self, stride: usize, nbits: usize) -> Result<Self, Error> {
        interleave_args_ok::<T>(stride, nbits)?;
        if nbits < 2 {
            return Ok(self.clone());
        }
        Ok(self.map(|a| {
            let v = a.0.upgrade_to_128();
            let group = 1usize << stride;
            let half = nbits / 2;
            let mask = low_mask_u128(group);
            let mut out = v & !low_mask_u128(nbits);
            for k in 0..half / group {
                out |= ((v >> (2 * k * group)) & mask) << (k * group);
                out |= ((v >> ((2 * k + 1) * group)) & mask) << (half + k * group);
            }
            RingElement(T::from_u128(out))
        }))
    }

    /// The widest significant-bit count over all elements; 0 for empty or
    /// all-zero tensors.
    pub fn max_bit_width(&self) -> usize {
        self.elems
            .iter()
            .map(|a| a.bit_width())
            .max()
            .unwrap_or(0)
    }

    /// Flattens both tensors into a single rank-1 tensor, `a` first.
    pub(crate) fn concat(a: &Self, b: &Self) -> Self {
        let mut elems = Vec::with_capacity(a.elems.len() + b.elems.len());
        elems.extend_from_slice(&a.elems);
        elems.extend_from_slice(&b.elems);
        Self {
            shape: vec![elems.len()],
            elems,
        }
    }

    /// Splits off the first `n` elements into one rank-1 tensor, the rest
    /// into another.
    pub(crate) fn split_at(&self, n: usize) -> Result<(Self, Self), Error> {
        if n > self.elems.len() {
            return Err(Error::InvalidSizeError);
        }
        let (head, tail) = self.elems.split_at(n);
        Ok((
            Self {
                shape: vec![head.len()],
                elems: head.to_vec(),
            },
            Self {
                shape: vec![tail.len()],
                elems: tail.to_vec(),
            },
        ))
    }

    pub(crate) fn reshape(mut self, shape: &[usize]) -> Result<Self, Error> {
        if self.elems.len() != shape.iter().product() {
            return Err(Error::InvalidSizeError);
        }
        self.shape = shape.to_vec();
        Ok(self)
    }
}

fn interleave_args_ok<T: IntRing2k>(stride: usize, nbits: usize) -> Result<(), Error> {
    if !nbits.is_power_of_two() || nbits > T::K {
        return Err(Error::InvalidBitWidth(nbits));
    }
    if nbits > 1 && (1usize << stride) > nbits / 2 {
        return Err(Error::ValueError(format!(
            "stride {stride} too large for {nbits} bits"
        )));
    }
    Ok(())
}

/// A mask with the low `n` bits set; `n` may be up to 128.
pub(crate) fn low_mask_u128(n: usize) -> u128 {
    if n >= 128 {
        u128::MAX
    } else {
        (1u128 << n) - 1
    }
}
