use crate::{
    error::Error,
    types::{int_ring::IntRing2k, ring_element::RingElement},
};
use bytes::{Buf, Bytes, BytesMut};

/// Collective communication between the parties of one protocol execution.
///
/// Every party calls the same collectives in the same order; a party that
/// falls out of step deadlocks or errors, there is no recovery path.
#[allow(async_fn_in_trait)]
pub trait CommTrait {
    /// The id of the local party, in `0..world_size()`.
    fn rank(&self) -> usize;

    /// The number of parties.
    fn world_size(&self) -> usize;

    /// Sends `values` to every other party, receives their contributions and
    /// returns the elementwise XOR over all parties (own values included).
    /// Peers must contribute the same number of elements.
    async fn all_reduce_xor<T: IntRing2k>(
        &mut self,
        values: Vec<RingElement<T>>,
    ) -> Result<Vec<RingElement<T>>, Error>;
}

pub(crate) fn ring_slice_to_bytes<T: IntRing2k>(values: &[RingElement<T>]) -> Bytes {
    let size = T::K / 8 + ((T::K % 8) != 0) as usize;
    let mut out = BytesMut::with_capacity(size * values.len());
    for v in values {
        v.0.add_to_bytes(&mut out);
    }
    out.freeze()
}

pub(crate) fn ring_vec_from_bytes<T: IntRing2k>(
    mut bytes: BytesMut,
    n: usize,
) -> Result<Vec<RingElement<T>>, Error> {
    let mut res = Vec::with_capacity(n);
    for _ in 0..n {
        res.push(RingElement(T::take_from_bytes_mut(&mut bytes)?));
    }
    if bytes.remaining() != 0 {
        return Err(Error::ConversionError);
    }
    Ok(res)
}
