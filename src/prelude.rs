pub use super::error::Error;
pub use super::semi2k::prg::{PrgSeed, PrgState};
pub use super::semi2k::protocol::{Semi2k, DESIGNATED_RANK};
pub use super::semi2k::share::{
    cast_type_b, common_type_b, ArithShare, BShareType, BoolShare,
};
pub use super::traits::comm_trait::CommTrait;
pub use super::traits::test_comm::{CommStats, TestComm, TestNetwork};
pub use super::traits::test_dealer::TrustedDealer;
pub use super::traits::triple_trait::{AndTriple, TripleSource};
pub use super::types::int_ring::IntRing2k;
pub use super::types::ring_element::RingElement;
pub use super::types::tensor::RingTensor;
