use crate::types::{int_ring::IntRing2k, tensor::RingTensor};
use rand::{distributions::Standard, prelude::Distribution, Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

pub type PrgSeed = [u8; 32];

/// Per-party correlated randomness state.
///
/// Seeds form a ring: party i holds `my_seed`, shared with party i+1, and
/// `prev_seed`, shared with party i-1. Because every party draws from both
/// neighbouring streams in lockstep, XOR-summing all parties'
/// [`correlated_pair`](Self::correlated_pair) outputs gives zero. The streams
/// advance with every call and are never replayed, so identical call
/// sequences on all parties are required for the correlation to hold.
pub struct PrgState {
    my_prf: ChaCha12Rng,
    prev_prf: ChaCha12Rng,
    priv_prf: ChaCha12Rng,
}

impl PrgState {
    pub fn new(my_seed: PrgSeed, prev_seed: PrgSeed) -> Self {
        Self {
            my_prf: ChaCha12Rng::from_seed(my_seed),
            prev_prf: ChaCha12Rng::from_seed(prev_seed),
            priv_prf: ChaCha12Rng::from_entropy(),
        }
    }

    pub fn gen_seed() -> PrgSeed {
        let mut rng = ChaCha12Rng::from_entropy();
        rng.gen::<PrgSeed>()
    }

    /// One draw from the shared stream with the previous party and one from
    /// the shared stream with the next party. The XOR of the two is this
    /// party's share of zero.
    pub fn correlated_pair<T: IntRing2k>(
        &mut self,
        shape: &[usize],
    ) -> (RingTensor<T>, RingTensor<T>)
    where
        Standard: Distribution<T>,
    {
        let prev = RingTensor::random(shape, &mut self.prev_prf);
        let mine = RingTensor::random(shape, &mut self.my_prf);
        (prev, mine)
    }

    /// Randomness known only to this party.
    pub fn private_random<T: IntRing2k>(&mut self, shape: &[usize]) -> RingTensor<T>
    where
        Standard: Distribution<T>,
    {
        RingTensor::random(shape, &mut self.priv_prf)
    }
}
