use crate::{
    error::Error,
    types::{int_ring::IntRing2k, ring_element::RingElement},
};
use rand::{distributions::Standard, prelude::Distribution};

/// One batch of XOR-shared Beaver triples: `c = a & b` holds over the XOR of
/// all parties' shares, elementwise.
pub struct AndTriple<T: IntRing2k> {
    pub a: Vec<RingElement<T>>,
    pub b: Vec<RingElement<T>>,
    pub c: Vec<RingElement<T>>,
}

impl<T: IntRing2k> AndTriple<T> {
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

/// Supplier of precomputed correlated randomness (the offline phase).
///
/// The streams only move forward: material handed out is consumed, and a
/// supplier that cannot serve a request leaves the caller with a fatal error.
pub trait TripleSource {
    /// `count` AND triples at ring width `T`.
    fn and_triples<T: IntRing2k>(&mut self, count: usize) -> Result<AndTriple<T>, Error>
    where
        Standard: Distribution<T>;

    /// `count` additive shares of uniformly random bits, each embedded in the
    /// full ring (the shared value is 0 or 1).
    fn random_bits<T: IntRing2k>(&mut self, count: usize) -> Result<Vec<RingElement<T>>, Error>
    where
        Standard: Distribution<T>;
}
