use crate::{
    error::Error,
    types::{int_ring::IntRing2k, tensor::RingTensor},
};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// An XOR-shared tensor. `nbits` is an upper bound on the number of
/// significant low bits of the shared plaintext; bits at and above `nbits`
/// are zero in the plaintext (the shares themselves are full-width random).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct BoolShare<T: IntRing2k> {
    tensor: RingTensor<T>,
    nbits: usize,
}

impl<T: IntRing2k> BoolShare<T> {
    pub fn new(tensor: RingTensor<T>, nbits: usize) -> Result<Self, Error> {
        if nbits > T::K {
            return Err(Error::InvalidBitWidth(nbits));
        }
        Ok(Self { tensor, nbits })
    }

    /// For kernel-internal construction where `nbits <= K` holds by
    /// construction.
    pub(crate) fn from_parts(tensor: RingTensor<T>, nbits: usize) -> Self {
        debug_assert!(nbits <= T::K);
        Self { tensor, nbits }
    }

    pub fn nbits(&self) -> usize {
        self.nbits
    }

    pub fn tensor(&self) -> &RingTensor<T> {
        &self.tensor
    }

    pub fn into_tensor(self) -> RingTensor<T> {
        self.tensor
    }

    pub fn shape(&self) -> &[usize] {
        self.tensor.shape()
    }

    pub fn numel(&self) -> usize {
        self.tensor.numel()
    }

    pub fn share_type(&self) -> BShareType {
        BShareType {
            width: T::K,
            nbits: self.nbits,
        }
    }

    pub(crate) fn concat(a: &Self, b: &Self) -> Self {
        Self {
            tensor: RingTensor::concat(&a.tensor, &b.tensor),
            nbits: a.nbits.max(b.nbits),
        }
    }

    pub(crate) fn split_at(&self, n: usize) -> Result<(Self, Self), Error> {
        let (head, tail) = self.tensor.split_at(n)?;
        Ok((
            Self::from_parts(head, self.nbits),
            Self::from_parts(tail, self.nbits),
        ))
    }

    pub(crate) fn reshape(self, shape: &[usize]) -> Result<Self, Error> {
        Ok(Self {
            tensor: self.tensor.reshape(shape)?,
            nbits: self.nbits,
        })
    }
}

/// An additively shared tensor over the full ring.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ArithShare<T: IntRing2k> {
    tensor: RingTensor<T>,
}

impl<T: IntRing2k> ArithShare<T> {
    pub fn new(tensor: RingTensor<T>) -> Self {
        Self { tensor }
    }

    pub fn tensor(&self) -> &RingTensor<T> {
        &self.tensor
    }

    pub fn into_tensor(self) -> RingTensor<T> {
        self.tensor
    }

    pub fn shape(&self) -> &[usize] {
        self.tensor.shape()
    }

    pub fn numel(&self) -> usize {
        self.tensor.numel()
    }
}

/// Runtime descriptor of a boolean share: ring width plus significant bits.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BShareType {
    pub width: usize,
    pub nbits: usize,
}

impl Display for BShareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B<{}/{}>", self.nbits, self.width)
    }
}

/// The common type two boolean shares must agree on before a binary kernel.
/// Shares over the same ring always store the same width, so this only
/// reconciles `nbits` (to the safe upper bound).
pub fn common_type_b(lhs: BShareType, rhs: BShareType) -> Result<BShareType, Error> {
    if lhs.width != rhs.width {
        return Err(Error::TypeMismatch(lhs.to_string(), rhs.to_string()));
    }
    Ok(BShareType {
        width: lhs.width,
        nbits: lhs.nbits.max(rhs.nbits),
    })
}

/// Casts a boolean share to a descriptor produced by [`common_type_b`]. The
/// share data is untouched; only the `nbits` bound may widen.
pub fn cast_type_b<T: IntRing2k>(
    share: BoolShare<T>,
    to: BShareType,
) -> Result<BoolShare<T>, Error> {
    if to.width != T::K || to.nbits < share.nbits() {
        return Err(Error::TypeMismatch(
            share.share_type().to_string(),
            to.to_string(),
        ));
    }
    BoolShare::new(share.into_tensor(), to.nbits)
}
