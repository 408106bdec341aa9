use super::{protocol::Semi2k, share::BoolShare};
use crate::{
    error::Error,
    traits::{comm_trait::CommTrait, triple_trait::TripleSource},
    types::{
        int_ring::IntRing2k,
        ring_element::recast,
        tensor::RingTensor,
    },
};
use itertools::izip;
use rand::{distributions::Standard, prelude::Distribution};

/// Smallest unsigned storage width that holds a given number of bits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Backing {
    U8,
    U16,
    U32,
    U64,
    U128,
}

pub(crate) fn backing_for(nbits: usize) -> Result<Backing, Error> {
    match nbits {
        0..=8 => Ok(Backing::U8),
        9..=16 => Ok(Backing::U16),
        17..=32 => Ok(Backing::U32),
        33..=64 => Ok(Backing::U64),
        65..=128 => Ok(Backing::U128),
        _ => Err(Error::InvalidBitWidth(nbits)),
    }
}

/// Monomorphizes `$body` for the storage type behind a [`Backing`].
macro_rules! dispatch_backing {
    ($backing:expr, $v:ident, $body:block) => {
        match $backing {
            Backing::U8 => {
                type $v = u8;
                $body
            }
            Backing::U16 => {
                type $v = u16;
                $body
            }
            Backing::U32 => {
                type $v = u32;
                $body
            }
            Backing::U64 => {
                type $v = u64;
                $body
            }
            Backing::U128 => {
                type $v = u128;
                $body
            }
        }
    };
}

impl<N: CommTrait, S: TripleSource> Semi2k<N, S> {
    /// Opens a boolean share: one collective XOR over all parties.
    pub async fn b2p<T: IntRing2k>(&mut self, x: &BoolShare<T>) -> Result<RingTensor<T>, Error> {
        let opened = self.comm.all_reduce_xor(x.tensor().elems().to_vec()).await?;
        RingTensor::from_elems(x.shape(), opened)
    }

    /// Embeds a public tensor into a boolean sharing. Every party masks with
    /// a share of zero; the designated rank additionally folds in the value.
    pub fn p2b<T: IntRing2k>(&mut self, public: &RingTensor<T>) -> Result<BoolShare<T>, Error>
    where
        Standard: Distribution<T>,
    {
        let (prev, mine) = self.prg.correlated_pair::<T>(public.shape());
        let share = self.xor_public(prev.xor(&mine)?, public)?;
        Ok(BoolShare::from_parts(share, public.max_bit_width()))
    }

    /// Shared AND via one Beaver triple per element. Both masked operands
    /// travel in a single collective round, at the smallest storage width
    /// that holds the result bits.
    pub async fn and_bb<T: IntRing2k>(
        &mut self,
        lhs: &BoolShare<T>,
        rhs: &BoolShare<T>,
    ) -> Result<BoolShare<T>, Error> {
        if lhs.shape() != rhs.shape() {
            return Err(Error::ShapeMismatch(
                lhs.shape().to_vec(),
                rhs.shape().to_vec(),
            ));
        }
        let out_nbits = lhs.nbits().min(rhs.nbits());
        let numel = lhs.numel();
        dispatch_backing!(backing_for(out_nbits)?, V, {
            let triple = self.triples.and_triples::<V>(numel)?;
            if triple.len() < numel {
                return Err(Error::NotEnoughTriplesError);
            }
            let mut masked = Vec::with_capacity(2 * numel);
            for (x, a) in izip!(lhs.tensor().elems(), &triple.a) {
                masked.push(recast::<T, V>(*x) ^ a);
            }
            for (y, b) in izip!(rhs.tensor().elems(), &triple.b) {
                masked.push(recast::<T, V>(*y) ^ b);
            }
            let opened = self.comm.all_reduce_xor(masked).await?;
            let (xa, yb) = opened.split_at(numel);
            let designated = self.is_designated();
            let mut out = Vec::with_capacity(numel);
            for (xa, yb, a, b, c) in izip!(xa, yb, &triple.a, &triple.b, &triple.c) {
                let mut z = *c ^ (*xa & b) ^ (*yb & a);
                if designated {
                    z ^= *xa & yb;
                }
                out.push(recast::<V, T>(z));
            }
            Ok(BoolShare::from_parts(
                RingTensor::from_elems(lhs.shape(), out)?,
                out_nbits,
            ))
        })
    }

    /// AND with a public tensor: purely local.
    pub fn and_bp<T: IntRing2k>(
        &self,
        lhs: &BoolShare<T>,
        rhs: &RingTensor<T>,
    ) -> Result<BoolShare<T>, Error> {
        let nbits = lhs.nbits().min(rhs.max_bit_width());
        Ok(BoolShare::from_parts(lhs.tensor().and(rhs)?, nbits))
    }

    /// Shared XOR: purely local.
    pub fn xor_bb<T: IntRing2k>(
        &self,
        lhs: &BoolShare<T>,
        rhs: &BoolShare<T>,
    ) -> Result<BoolShare<T>, Error> {
        let nbits = lhs.nbits().max(rhs.nbits());
        Ok(BoolShare::from_parts(lhs.tensor().xor(rhs.tensor())?, nbits))
    }

    /// XOR with a public tensor: folded in on the designated rank only.
    pub fn xor_bp<T: IntRing2k>(
        &self,
        lhs: &BoolShare<T>,
        rhs: &RingTensor<T>,
    ) -> Result<BoolShare<T>, Error> {
        if lhs.shape() != rhs.shape() {
            return Err(Error::ShapeMismatch(
                lhs.shape().to_vec(),
                rhs.shape().to_vec(),
            ));
        }
        let nbits = lhs.nbits().max(rhs.max_bit_width());
        let tensor = self.xor_public(lhs.tensor().clone(), rhs)?;
        Ok(BoolShare::from_parts(tensor, nbits))
    }

    /// Logical left shift. Shift amounts reduce modulo the ring width.
    pub fn lshift_b<T: IntRing2k>(&self, x: &BoolShare<T>, shift: usize) -> BoolShare<T> {
        let shift = shift % T::K;
        let nbits = (x.nbits() + shift).min(T::K);
        BoolShare::from_parts(x.tensor().lshift(shift as u32), nbits)
    }

    /// Logical right shift. Shift amounts reduce modulo the ring width.
    pub fn rshift_b<T: IntRing2k>(&self, x: &BoolShare<T>, shift: usize) -> BoolShare<T> {
        let shift = shift % T::K;
        let nbits = x.nbits() - x.nbits().min(shift);
        BoolShare::from_parts(x.tensor().rshift(shift as u32), nbits)
    }

    /// Arithmetic right shift. The sign bit smears over the full width, so
    /// the result always carries `K` significant bits.
    pub fn arshift_b<T: IntRing2k>(&self, x: &BoolShare<T>, shift: usize) -> BoolShare<T> {
        let shift = shift % T::K;
        BoolShare::from_parts(x.tensor().arshift(shift as u32), T::K)
    }

    /// Reverses the bits in positions [start, end) of every element.
    pub fn bitrev_b<T: IntRing2k>(
        &self,
        x: &BoolShare<T>,
        start: usize,
        end: usize,
    ) -> Result<BoolShare<T>, Error> {
        let tensor = x.tensor().bit_reverse(start, end)?;
        Ok(BoolShare::from_parts(tensor, x.nbits().max(end)))
    }

    /// Interleaves bit groups of 2^stride within each element's significant
    /// window, which must be a power of two wide.
    pub fn bit_interleave_b<T: IntRing2k>(
        &self,
        x: &BoolShare<T>,
        stride: usize,
    ) -> Result<BoolShare<T>, Error> {
        let tensor = x.tensor().bit_interleave(stride, x.nbits())?;
        Ok(BoolShare::from_parts(tensor, x.nbits()))
    }

    /// Inverse of [`bit_interleave_b`](Self::bit_interleave_b).
    pub fn bit_deinterleave_b<T: IntRing2k>(
        &self,
        x: &BoolShare<T>,
        stride: usize,
    ) -> Result<BoolShare<T>, Error> {
        let tensor = x.tensor().bit_deinterleave(stride, x.nbits())?;
        Ok(BoolShare::from_parts(tensor, x.nbits()))
    }
}
