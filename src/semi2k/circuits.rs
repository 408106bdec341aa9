use super::{protocol::Semi2k, share::BoolShare, utils};
use crate::{
    error::Error,
    traits::{comm_trait::CommTrait, triple_trait::TripleSource},
    types::{int_ring::IntRing2k, tensor::RingTensor},
};

impl<N: CommTrait, S: TripleSource> Semi2k<N, S> {
    /// Two shared ANDs in one collective round, by concatenating the
    /// operands into a single batch.
    pub(crate) async fn and_bb_pair<T: IntRing2k>(
        &mut self,
        a1: &BoolShare<T>,
        b1: &BoolShare<T>,
        a2: &BoolShare<T>,
        b2: &BoolShare<T>,
    ) -> Result<(BoolShare<T>, BoolShare<T>), Error> {
        let lhs = BoolShare::concat(a1, a2);
        let rhs = BoolShare::concat(b1, b2);
        let out = self.and_bb(&lhs, &rhs).await?;
        let (first, second) = out.split_at(a1.numel())?;
        Ok((first.reshape(a1.shape())?, second.reshape(a2.shape())?))
    }

    /// Binary addition of two boolean shares with a Kogge-Stone
    /// parallel-prefix carry network: log2(K)+1 collective rounds.
    pub async fn add_bb<T: IntRing2k>(
        &mut self,
        x: &BoolShare<T>,
        y: &BoolShare<T>,
    ) -> Result<BoolShare<T>, Error> {
        if x.shape() != y.shape() {
            return Err(Error::ShapeMismatch(
                x.shape().to_vec(),
                y.shape().to_vec(),
            ));
        }
        let sum_no_carry = self.xor_bb(x, y)?;
        let mut g = self.and_bb(x, y).await?;
        let mut p = sum_no_carry.clone();
        for level in 0..utils::ceil_log2(T::K) {
            let shift = 1usize << level;
            let g_shifted = self.lshift_b(&g, shift);
            let p_shifted = self.lshift_b(&p, shift);
            // G = G ^ (P & (G << s)); P = P & (P << s)
            let (pg, pp) = self.and_bb_pair(&p, &g_shifted, &p, &p_shifted).await?;
            g = self.xor_bb(&g, &pg)?;
            p = pp;
        }
        let carries = self.lshift_b(&g, 1);
        self.xor_bb(&sum_no_carry, &carries)
    }

    /// The carry out of bit `k-1` when adding the low `k` bits of `x` and
    /// `y`, as a 1-bit boolean share.
    ///
    /// The low `k` bits are left-aligned to a power-of-two window first; the
    /// zero padding below can neither generate nor propagate a carry. The
    /// window is then folded in half per round, pairing adjacent bits via
    /// deinterleaving, for log2(k) shared-AND rounds after the initial one.
    pub async fn carry_out<T: IntRing2k>(
        &mut self,
        x: &BoolShare<T>,
        y: &BoolShare<T>,
        k: usize,
    ) -> Result<BoolShare<T>, Error> {
        if x.shape() != y.shape() {
            return Err(Error::ShapeMismatch(
                x.shape().to_vec(),
                y.shape().to_vec(),
            ));
        }
        if k > T::K {
            return Err(Error::InvalidBitWidth(k));
        }
        if k == 0 {
            return Ok(BoolShare::from_parts(RingTensor::zeros(x.shape()), 0));
        }

        let window = k.next_power_of_two();
        let mask = RingTensor::splat(x.shape(), utils::low_mask::<T>(window));
        let p = self.xor_bb(x, y)?;
        let g = self.and_bb(x, y).await?;
        let p = self.and_bp(&self.lshift_b(&p, window - k), &mask)?;
        let g = self.and_bp(&self.lshift_b(&g, window - k), &mask)?;
        let mut p = BoolShare::from_parts(p.into_tensor(), window);
        let mut g = BoolShare::from_parts(g.into_tensor(), window);

        let mut width = window;
        while width > 1 {
            let half = width / 2;
            // even bit pairs land in the low half, odd pairs in the high half
            let p_pairs = self.bit_deinterleave_b(&p, 0)?;
            let g_pairs = self.bit_deinterleave_b(&g, 0)?;
            let half_mask = RingTensor::splat(x.shape(), utils::low_mask::<T>(half));
            let p_even = self.and_bp(&p_pairs, &half_mask)?;
            let p_odd = self.rshift_b(&p_pairs, half);
            let g_even = self.and_bp(&g_pairs, &half_mask)?;
            let g_odd = self.rshift_b(&g_pairs, half);
            // P = P_odd & P_even; G = G_odd ^ (P_odd & G_even)
            let (pp, pg) = self.and_bb_pair(&p_odd, &p_even, &p_odd, &g_even).await?;
            p = pp;
            g = self.xor_bb(&g_odd, &pg)?;
            width = half;
        }
        Ok(g)
    }
}
