mod boolean;

use crate::prelude::*;
use rand::{distributions::Standard, prelude::Distribution, Rng};
use num_traits::Zero;

pub(crate) type TestProtocol = Semi2k<TestComm, TrustedDealer>;

/// Seed for plaintext inputs, shared by all party tasks of a test.
pub(crate) const PLAIN_SEED: PrgSeed = [42u8; 32];

/// Wires up `world_size` protocol instances over an in-process mesh, with a
/// prss seed ring and a common dealer seed.
pub(crate) fn setup(world_size: usize) -> Vec<TestProtocol> {
    let comms = TestNetwork::new(world_size).into_parties();
    let seeds: Vec<PrgSeed> = (0..world_size).map(|_| PrgState::gen_seed()).collect();
    let dealer_seed = PrgState::gen_seed();
    comms
        .into_iter()
        .enumerate()
        .map(|(rank, comm)| {
            let prg = PrgState::new(seeds[rank], seeds[(rank + world_size - 1) % world_size]);
            let dealer = TrustedDealer::new(dealer_seed, rank, world_size).unwrap();
            Semi2k::new(comm, prg, dealer)
        })
        .collect()
}

/// Additively shares `plain` over `world_size` parties and returns the share
/// of `rank`. All parties must call this with identically seeded rngs.
pub(crate) fn share_additive<T: IntRing2k, R: Rng>(
    rng: &mut R,
    plain: &RingTensor<T>,
    rank: usize,
    world_size: usize,
) -> ArithShare<T>
where
    Standard: Distribution<T>,
{
    let mut elems = Vec::with_capacity(plain.numel());
    for value in plain.elems() {
        let mut mine = RingElement::zero();
        let mut last = *value;
        for r in 0..world_size - 1 {
            let share = RingElement(rng.gen::<T>());
            last -= share;
            if r == rank {
                mine = share;
            }
        }
        elems.push(if rank == world_size - 1 { last } else { mine });
    }
    ArithShare::new(RingTensor::from_elems(plain.shape(), elems).unwrap())
}

/// Reconstructs an additively shared tensor from all parties' shares.
pub(crate) fn reveal_additive<T: IntRing2k>(shares: Vec<ArithShare<T>>) -> RingTensor<T> {
    let mut iter = shares.into_iter();
    let mut acc = iter.next().unwrap().into_tensor();
    for share in iter {
        acc = acc.add(share.tensor()).unwrap();
    }
    acc
}

/// A supplier with nothing left to hand out.
pub(crate) struct StarvingSource;

impl TripleSource for StarvingSource {
    fn and_triples<T: IntRing2k>(&mut self, _count: usize) -> Result<AndTriple<T>, Error>
    where
        Standard: Distribution<T>,
    {
        Ok(AndTriple {
            a: Vec::new(),
            b: Vec::new(),
            c: Vec::new(),
        })
    }

    fn random_bits<T: IntRing2k>(&mut self, _count: usize) -> Result<Vec<RingElement<T>>, Error>
    where
        Standard: Distribution<T>,
    {
        Ok(Vec::new())
    }
}
