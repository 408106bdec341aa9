use super::prg::PrgState;
use crate::{
    error::Error,
    traits::{comm_trait::CommTrait, triple_trait::TripleSource},
    types::{int_ring::IntRing2k, tensor::RingTensor},
};

/// The one rank that folds public values into its share. All other parties
/// treat public inputs as zero so that the XOR/sum over the world comes out
/// right.
pub const DESIGNATED_RANK: usize = 0;

/// A semi-honest n-party protocol instance over Z/2^k: XOR shares for the
/// boolean kernels, additive shares for the arithmetic side, Beaver triples
/// for AND.
///
/// All parties must drive the same kernels in the same order; the only
/// suspension points are the collective calls on the communicator.
pub struct Semi2k<N: CommTrait, S: TripleSource> {
    pub(crate) comm: N,
    pub(crate) prg: PrgState,
    pub(crate) triples: S,
}

impl<N: CommTrait, S: TripleSource> Semi2k<N, S> {
    pub fn new(comm: N, prg: PrgState, triples: S) -> Self {
        Self { comm, prg, triples }
    }

    pub fn rank(&self) -> usize {
        self.comm.rank()
    }

    pub fn world_size(&self) -> usize {
        self.comm.world_size()
    }

    pub fn comm(&self) -> &N {
        &self.comm
    }

    pub(crate) fn is_designated(&self) -> bool {
        self.comm.rank() == DESIGNATED_RANK
    }

    /// XORs a public tensor into `share` on the designated rank only.
    pub(crate) fn xor_public<T: IntRing2k>(
        &self,
        share: RingTensor<T>,
        public: &RingTensor<T>,
    ) -> Result<RingTensor<T>, Error> {
        if self.is_designated() {
            share.xor(public)
        } else {
            Ok(share)
        }
    }

    /// Adds a public tensor into `share` on the designated rank only.
    pub(crate) fn add_public<T: IntRing2k>(
        &self,
        share: RingTensor<T>,
        public: &RingTensor<T>,
    ) -> Result<RingTensor<T>, Error> {
        if self.is_designated() {
            share.add(public)
        } else {
            Ok(share)
        }
    }
}
