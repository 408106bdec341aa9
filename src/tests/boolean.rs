use super::*;
use crate::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

macro_rules! roundtrip_test {
    ($name:ident, $t:ty) => {
        #[tokio::test]
        async fn $name() {
            let parties = setup(3);
            let mut tasks = Vec::new();
            for mut p in parties {
                tasks.push(tokio::spawn(async move {
                    let mut rng = ChaCha12Rng::from_seed(PLAIN_SEED);
                    let plain = RingTensor::<$t>::random(&[8], &mut rng);
                    let share = p.p2b(&plain).unwrap();
                    assert_eq!(share.nbits(), plain.max_bit_width());
                    let opened = p.b2p(&share).await.unwrap();
                    assert_eq!(opened, plain);
                }));
            }
            for t in tasks {
                t.await.unwrap();
            }
        }
    };
}

roundtrip_test!(share_reveal_roundtrip_u8, u8);
roundtrip_test!(share_reveal_roundtrip_u16, u16);
roundtrip_test!(share_reveal_roundtrip_u32, u32);
roundtrip_test!(share_reveal_roundtrip_u64, u64);
roundtrip_test!(share_reveal_roundtrip_u128, u128);

#[tokio::test]
async fn two_party_64_bit_scenario() {
    let parties = setup(2);
    let mut tasks = Vec::new();
    for mut p in parties {
        tasks.push(tokio::spawn(async move {
            let x = RingTensor::from_vec(&[1], vec![5u64]).unwrap();
            let y = RingTensor::from_vec(&[1], vec![3u64]).unwrap();
            let xs = p.p2b(&x).unwrap();
            let ys = p.p2b(&y).unwrap();
            assert_eq!(xs.nbits(), 3);
            assert_eq!(ys.nbits(), 2);

            let rounds_before = p.comm().stats().rounds;
            let and = p.and_bb(&xs, &ys).await.unwrap();
            assert_eq!(p.comm().stats().rounds - rounds_before, 1);
            assert_eq!(and.nbits(), 2);

            let xor = p.xor_bb(&xs, &ys).unwrap();
            assert_eq!(xor.nbits(), 3);

            let shifted = p.lshift_b(&xs, 2);
            assert_eq!(shifted.nbits(), 5);

            assert_eq!(p.b2p(&and).await.unwrap().elems()[0], RingElement(1));
            assert_eq!(p.b2p(&xor).await.unwrap().elems()[0], RingElement(6));
            assert_eq!(p.b2p(&shifted).await.unwrap().elems()[0], RingElement(20));
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }
}

#[tokio::test]
async fn and_xor_random_three_parties() {
    let parties = setup(3);
    let mut tasks = Vec::new();
    for mut p in parties {
        tasks.push(tokio::spawn(async move {
            let mut rng = ChaCha12Rng::from_seed(PLAIN_SEED);
            let x = RingTensor::<u32>::random(&[4, 4], &mut rng);
            let y = RingTensor::<u32>::random(&[4, 4], &mut rng);
            let xs = p.p2b(&x).unwrap();
            let ys = p.p2b(&y).unwrap();

            let and = p.and_bb(&xs, &ys).await.unwrap();
            assert_eq!(and.nbits(), xs.nbits().min(ys.nbits()));
            assert_eq!(p.b2p(&and).await.unwrap(), x.and(&y).unwrap());

            let xor = p.xor_bb(&xs, &ys).unwrap();
            assert_eq!(xor.nbits(), xs.nbits().max(ys.nbits()));
            assert_eq!(p.b2p(&xor).await.unwrap(), x.xor(&y).unwrap());
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }
}

#[tokio::test]
async fn public_operand_kernels() {
    let parties = setup(2);
    let mut tasks = Vec::new();
    for mut p in parties {
        tasks.push(tokio::spawn(async move {
            let mut rng = ChaCha12Rng::from_seed(PLAIN_SEED);
            let x = RingTensor::<u64>::random(&[6], &mut rng);
            let m = RingTensor::<u64>::random(&[6], &mut rng);
            let xs = p.p2b(&x).unwrap();

            let and = p.and_bp(&xs, &m).unwrap();
            assert_eq!(and.nbits(), xs.nbits().min(m.max_bit_width()));
            assert_eq!(p.b2p(&and).await.unwrap(), x.and(&m).unwrap());

            let xor = p.xor_bp(&xs, &m).unwrap();
            assert_eq!(xor.nbits(), xs.nbits().max(m.max_bit_width()));
            assert_eq!(p.b2p(&xor).await.unwrap(), x.xor(&m).unwrap());
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }
}

#[tokio::test]
async fn shift_kernels() {
    let parties = setup(2);
    let mut tasks = Vec::new();
    for mut p in parties {
        tasks.push(tokio::spawn(async move {
            let mut rng = ChaCha12Rng::from_seed(PLAIN_SEED);
            let x = RingTensor::<u64>::random(&[5], &mut rng);
            let xs = p.p2b(&x).unwrap();
            let nbits = xs.nbits();

            let left = p.lshift_b(&xs, 13);
            assert_eq!(left.nbits(), (nbits + 13).min(64));
            assert_eq!(p.b2p(&left).await.unwrap(), x.lshift(13));

            // shift amounts reduce modulo the ring width
            let wrapped = p.lshift_b(&xs, 64 + 13);
            assert_eq!(p.b2p(&wrapped).await.unwrap(), x.lshift(13));

            let right = p.rshift_b(&xs, 13);
            assert_eq!(right.nbits(), nbits - nbits.min(13));
            assert_eq!(p.b2p(&right).await.unwrap(), x.rshift(13));

            let arith = p.arshift_b(&xs, 13);
            assert_eq!(arith.nbits(), 64);
            assert_eq!(p.b2p(&arith).await.unwrap(), x.arshift(13));
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }
}

#[tokio::test]
async fn bit_reverse_kernel() {
    let parties = setup(2);
    let mut tasks = Vec::new();
    for mut p in parties {
        tasks.push(tokio::spawn(async move {
            let mut rng = ChaCha12Rng::from_seed(PLAIN_SEED);
            let x = RingTensor::<u64>::random(&[4], &mut rng);
            let xs = p.p2b(&x).unwrap();

            let rev = p.bitrev_b(&xs, 8, 24).unwrap();
            assert_eq!(rev.nbits(), xs.nbits().max(24));
            assert_eq!(p.b2p(&rev).await.unwrap(), x.bit_reverse(8, 24).unwrap());
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }
}

#[tokio::test]
async fn bit_interleave_kernels() {
    let parties = setup(2);
    let mut tasks = Vec::new();
    for mut p in parties {
        tasks.push(tokio::spawn(async move {
            let mut rng = ChaCha12Rng::from_seed(PLAIN_SEED);
            // force the top bit so the significant window is the full width
            let values: Vec<u64> = (0..4).map(|_| rng.gen::<u64>() | (1 << 63)).collect();
            let x = RingTensor::from_vec(&[4], values).unwrap();
            let xs = p.p2b(&x).unwrap();
            assert_eq!(xs.nbits(), 64);

            for stride in [0usize, 2] {
                let il = p.bit_interleave_b(&xs, stride).unwrap();
                assert_eq!(il.nbits(), 64);
                assert_eq!(
                    p.b2p(&il).await.unwrap(),
                    x.bit_interleave(stride, 64).unwrap()
                );
                let back = p.bit_deinterleave_b(&il, stride).unwrap();
                assert_eq!(p.b2p(&back).await.unwrap(), x);
            }
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }
}

#[tokio::test]
async fn bit_interleave_one_bit_share() {
    // a 1-bit significant window (as produced by msb_a2b) must pass through
    let parties = setup(2);
    let mut tasks = Vec::new();
    for mut p in parties {
        tasks.push(tokio::spawn(async move {
            let x = RingTensor::from_vec(&[4], vec![1u64, 0, 1, 0]).unwrap();
            let xs = p.p2b(&x).unwrap();
            assert_eq!(xs.nbits(), 1);
            let il = p.bit_interleave_b(&xs, 0).unwrap();
            assert_eq!(p.b2p(&il).await.unwrap(), x);
            let back = p.bit_deinterleave_b(&il, 0).unwrap();
            assert_eq!(p.b2p(&back).await.unwrap(), x);
        }));
    }
    for t in tasks {
        t.await.unwrap();
    }
}

#[test]
fn local_kernel_preconditions() {
    let mut p = setup(1).remove(0);
    let x = RingTensor::from_vec(&[1], vec![5u64]).unwrap();
    let xs = p.p2b(&x).unwrap();
    // significant window of 3 bits is not a power of two
    assert!(matches!(
        p.bit_interleave_b(&xs, 0),
        Err(Error::InvalidBitWidth(3))
    ));
    assert!(p.bitrev_b(&xs, 6, 2).is_err());
    assert!(p.bitrev_b(&xs, 0, 65).is_err());
}

#[tokio::test]
async fn mismatched_shapes_are_fatal() {
    let mut p = setup(1).remove(0);
    let a = p.p2b(&RingTensor::<u32>::zeros(&[2, 3])).unwrap();
    let b = p.p2b(&RingTensor::<u32>::zeros(&[3, 2])).unwrap();
    assert!(matches!(
        p.and_bb(&a, &b).await,
        Err(Error::ShapeMismatch(_, _))
    ));
    assert!(p.xor_bb(&a, &b).is_err());
    assert!(p.add_bb(&a, &b).await.is_err());
}

#[tokio::test]
async fn starved_supplier_is_fatal() {
    let comm = TestNetwork::new(1).into_parties().remove(0);
    let prg = PrgState::new([1; 32], [1; 32]);
    let mut p = Semi2k::new(comm, prg, StarvingSource);

    let x = RingTensor::from_vec(&[2], vec![5u64, 3]).unwrap();
    let xs = p.p2b(&x).unwrap();
    assert!(matches!(
        p.and_bb(&xs, &xs).await,
        Err(Error::NotEnoughTriplesError)
    ));
    assert!(matches!(
        p.b2a_randbit(&xs).await,
        Err(Error::NotEnoughRandBitsError)
    ));
}
