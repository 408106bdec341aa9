use super::comm_trait::{ring_slice_to_bytes, ring_vec_from_bytes, CommTrait};
use crate::{
    error::Error,
    types::{int_ring::IntRing2k, ring_element::RingElement},
};
use bytes::{Bytes, BytesMut};
use std::io::{Error as IOError, ErrorKind as IOErrorKind};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A full mesh of in-process channels connecting `world_size` parties.
/// Only used for tests and benchmarks.
pub struct TestNetwork {
    parties: Vec<TestComm>,
}

impl TestNetwork {
    pub fn new(world_size: usize) -> Self {
        let mut senders: Vec<Vec<Option<UnboundedSender<Bytes>>>> =
            (0..world_size).map(|_| (0..world_size).map(|_| None).collect()).collect();
        let mut receivers: Vec<Vec<Option<UnboundedReceiver<Bytes>>>> =
            (0..world_size).map(|_| (0..world_size).map(|_| None).collect()).collect();

        for sender in 0..world_size {
            for receiver in 0..world_size {
                if sender == receiver {
                    continue;
                }
                let (tx, rx) = mpsc::unbounded_channel();
                senders[sender][receiver] = Some(tx);
                receivers[receiver][sender] = Some(rx);
            }
        }

        let parties = senders
            .into_iter()
            .zip(receivers)
            .enumerate()
            .map(|(rank, (senders, receivers))| TestComm {
                rank,
                world_size,
                senders,
                receivers,
                stats: CommStats::default(),
            })
            .collect();

        Self { parties }
    }

    pub fn into_parties(self) -> Vec<TestComm> {
        self.parties
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CommStats {
    pub rounds: usize,
    pub bytes_sent: usize,
    pub bytes_received: usize,
}

/// One party's endpoint of a [`TestNetwork`].
pub struct TestComm {
    rank: usize,
    world_size: usize,
    senders: Vec<Option<UnboundedSender<Bytes>>>,
    receivers: Vec<Option<UnboundedReceiver<Bytes>>>,
    stats: CommStats,
}

impl TestComm {
    pub fn stats(&self) -> CommStats {
        self.stats
    }

    fn send(&mut self, to: usize, data: Bytes) -> Result<(), Error> {
        tracing::trace!("party {} sends {} bytes to {}", self.rank, data.len(), to);
        self.stats.bytes_sent += data.len();
        let sender = self.senders[to]
            .as_ref()
            .ok_or(Error::IdError(to))?;
        sender
            .send(data)
            .map_err(|_| IOError::new(IOErrorKind::BrokenPipe, "party hung up"))?;
        Ok(())
    }

    async fn receive(&mut self, from: usize) -> Result<BytesMut, Error> {
        let receiver = self.receivers[from]
            .as_mut()
            .ok_or(Error::IdError(from))?;
        let data = receiver
            .recv()
            .await
            .ok_or_else(|| IOError::new(IOErrorKind::UnexpectedEof, "party hung up"))?;
        tracing::trace!("party {} received {} bytes from {}", self.rank, data.len(), from);
        self.stats.bytes_received += data.len();
        Ok(BytesMut::from(data.as_ref()))
    }
}

impl CommTrait for TestComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn world_size(&self) -> usize {
        self.world_size
    }

    async fn all_reduce_xor<T: IntRing2k>(
        &mut self,
        values: Vec<RingElement<T>>,
    ) -> Result<Vec<RingElement<T>>, Error> {
        let len = values.len();
        let data = ring_slice_to_bytes(&values);
        for other in 0..self.world_size {
            if other != self.rank {
                self.send(other, data.clone())?;
            }
        }
        let mut acc = values;
        for other in 0..self.world_size {
            if other == self.rank {
                continue;
            }
            let response = self.receive(other).await?;
            let contribution = ring_vec_from_bytes::<T>(response, len)?;
            for (a, b) in acc.iter_mut().zip(contribution) {
                *a ^= b;
            }
        }
        self.stats.rounds += 1;
        Ok(acc)
    }
}
