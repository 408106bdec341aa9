use super::triple_trait::{AndTriple, TripleSource};
use crate::{
    error::Error,
    types::{int_ring::IntRing2k, ring_element::RingElement},
};
use num_traits::Zero;
use rand::{distributions::Standard, prelude::Distribution, Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Emulates the trusted offline phase for tests: every party constructs the
/// dealer from the same seed and replays the identical plaintext stream, but
/// keeps only the share belonging to its rank.
///
/// Shares come out of the dealer in lockstep, so all parties must request the
/// same amounts in the same order.
pub struct TrustedDealer {
    rank: usize,
    world_size: usize,
    rng: ChaCha12Rng,
}

impl TrustedDealer {
    pub fn new(seed: [u8; 32], rank: usize, world_size: usize) -> Result<Self, Error> {
        if world_size == 0 {
            return Err(Error::NumPartyError(world_size));
        }
        if rank >= world_size {
            return Err(Error::IdError(rank));
        }
        Ok(Self {
            rank,
            world_size,
            rng: ChaCha12Rng::from_seed(seed),
        })
    }

    /// XOR-shares `value` over all parties, returning this rank's share.
    fn xor_share<T: IntRing2k>(&mut self, value: RingElement<T>) -> RingElement<T>
    where
        Standard: Distribution<T>,
    {
        let mut mine = RingElement::zero();
        let mut last = value;
        for rank in 0..self.world_size - 1 {
            let share = RingElement(self.rng.gen::<T>());
            last ^= share;
            if rank == self.rank {
                mine = share;
            }
        }
        if self.rank == self.world_size - 1 {
            last
        } else {
            mine
        }
    }

    /// Additively shares `value` over all parties, returning this rank's
    /// share.
    fn additive_share<T: IntRing2k>(&mut self, value: RingElement<T>) -> RingElement<T>
    where
        Standard: Distribution<T>,
    {
        let mut mine = RingElement::zero();
        let mut last = value;
        for rank in 0..self.world_size - 1 {
            let share = RingElement(self.rng.gen::<T>());
            last -= share;
            if rank == self.rank {
                mine = share;
            }
        }
        if self.rank == self.world_size - 1 {
            last
        } else {
            mine
        }
    }
}

impl TripleSource for TrustedDealer {
    fn and_triples<T: IntRing2k>(&mut self, count: usize) -> Result<AndTriple<T>, Error>
    where
        Standard: Distribution<T>,
    {
        let mut a = Vec::with_capacity(count);
        let mut b = Vec::with_capacity(count);
        let mut c = Vec::with_capacity(count);
        for _ in 0..count {
            let x = RingElement(self.rng.gen::<T>());
            let y = RingElement(self.rng.gen::<T>());
            let z = x & y;
            a.push(self.xor_share(x));
            b.push(self.xor_share(y));
            c.push(self.xor_share(z));
        }
        Ok(AndTriple { a, b, c })
    }

    fn random_bits<T: IntRing2k>(&mut self, count: usize) -> Result<Vec<RingElement<T>>, Error>
    where
        Standard: Distribution<T>,
    {
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let bit = RingElement(T::from(self.rng.gen::<bool>()));
            out.push(self.additive_share(bit));
        }
        Ok(out)
    }
}
