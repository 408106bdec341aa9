use super::{
    protocol::Semi2k,
    share::{ArithShare, BoolShare},
};
use crate::{
    error::Error,
    traits::{comm_trait::CommTrait, triple_trait::TripleSource},
    types::{int_ring::IntRing2k, ring_element::RingElement, tensor::RingTensor},
};
use num_traits::{One, Zero};
use rand::{distributions::Standard, prelude::Distribution};

impl<N: CommTrait, S: TripleSource> Semi2k<N, S> {
    /// Re-shares an additive sharing as boolean shares of every party's
    /// summand, to be added up with the binary adder.
    fn arith_to_bool_summands<T: IntRing2k>(
        &mut self,
        x: &ArithShare<T>,
    ) -> Result<Vec<BoolShare<T>>, Error>
    where
        Standard: Distribution<T>,
    {
        let mut summands = Vec::with_capacity(self.world_size());
        for rank in 0..self.world_size() {
            let (prev, mine) = self.prg.correlated_pair::<T>(x.shape());
            let mut share = prev.xor(&mine)?;
            if rank == self.rank() {
                share = share.xor(x.tensor())?;
            }
            summands.push(BoolShare::from_parts(share, T::K));
        }
        Ok(summands)
    }

    /// Additive to boolean conversion: every party contributes its summand
    /// under a fresh boolean sharing, and the summands are added with a
    /// balanced tree of binary adders.
    pub async fn a2b<T: IntRing2k>(&mut self, x: &ArithShare<T>) -> Result<BoolShare<T>, Error>
    where
        Standard: Distribution<T>,
    {
        let mut layer = self.arith_to_bool_summands(x)?;
        while layer.len() > 1 {
            let mut next = Vec::with_capacity(layer.len().div_ceil(2));
            let mut iter = layer.into_iter();
            while let Some(lhs) = iter.next() {
                match iter.next() {
                    Some(rhs) => next.push(self.add_bb(&lhs, &rhs).await?),
                    None => next.push(lhs),
                }
            }
            layer = next;
        }
        layer.into_iter().next().ok_or(Error::NumPartyError(0))
    }

    /// Boolean to additive conversion by masking: open `x + r` for a private
    /// random `r`, then the designated rank corrects with the opened value.
    pub async fn b2a<T: IntRing2k>(&mut self, x: &BoolShare<T>) -> Result<ArithShare<T>, Error>
    where
        Standard: Distribution<T>,
    {
        let r = ArithShare::new(self.prg.private_random::<T>(x.shape()));
        let r_bool = self.a2b(&r).await?;
        let masked = self.add_bb(x, &r_bool).await?;
        let opened = self.b2p(&masked).await?;
        let share = self.add_public(r.tensor().neg(), &opened)?;
        Ok(ArithShare::new(share))
    }

    /// Boolean to additive conversion from precomputed random bit shares:
    /// one collective round regardless of world size.
    ///
    /// Per significant bit i with random shared bit r_i and opened
    /// c_i = x_i ^ r_i, the additive sharing of x_i is
    /// c_i + (1 - 2 c_i) * r_i, with the public c_i term folded in on the
    /// designated rank.
    pub async fn b2a_randbit<T: IntRing2k>(
        &mut self,
        x: &BoolShare<T>,
    ) -> Result<ArithShare<T>, Error>
    where
        Standard: Distribution<T>,
    {
        let nbits = x.nbits();
        let numel = x.numel();
        if nbits == 0 {
            return Ok(ArithShare::new(RingTensor::zeros(x.shape())));
        }
        let randbits = self.triples.random_bits::<T>(numel * nbits)?;
        if randbits.len() < numel * nbits {
            return Err(Error::NotEnoughRandBitsError);
        }

        let one = RingElement::<T>::one();
        let two = one + one;

        let mut masked = Vec::with_capacity(numel);
        for (idx, x) in x.tensor().elems().iter().enumerate() {
            let mut mask = RingElement::zero();
            for bit in 0..nbits {
                mask += (randbits[idx * nbits + bit] & one) << (bit as u32);
            }
            masked.push(*x ^ mask);
        }
        let opened = self.comm.all_reduce_xor(masked).await?;

        let designated = self.is_designated();
        let mut out = Vec::with_capacity(numel);
        for (idx, c) in opened.into_iter().enumerate() {
            let mut acc = RingElement::zero();
            for bit in 0..nbits {
                let c_bit = (c >> (bit as u32)) & one;
                let r_bit = randbits[idx * nbits + bit];
                let mut term = (one - c_bit * two) * r_bit;
                if designated {
                    term += c_bit;
                }
                acc += term << (bit as u32);
            }
            out.push(acc);
        }
        Ok(ArithShare::new(RingTensor::from_elems(x.shape(), out)?))
    }

    /// The most significant bit of an additively shared value, as a 1-bit
    /// boolean share. Two parties only: the sign is the top bit of the sum
    /// of the two summands, recovered from their XOR and the carry into the
    /// top bit.
    pub async fn msb_a2b<T: IntRing2k>(&mut self, x: &ArithShare<T>) -> Result<BoolShare<T>, Error>
    where
        Standard: Distribution<T>,
    {
        if self.world_size() != 2 {
            return Err(Error::NumPartyError(self.world_size()));
        }
        let mut summands = self.arith_to_bool_summands(x)?.into_iter();
        let m = summands.next().ok_or(Error::NumPartyError(0))?;
        let n = summands.next().ok_or(Error::NumPartyError(1))?;

        let k = if x.numel() == 0 { 0 } else { T::K - 1 };
        let carry = self.carry_out(&m, &n, k).await?;
        let top = self.rshift_b(&self.xor_bb(&m, &n)?, k);
        self.xor_bb(&top, &carry)
    }
}
