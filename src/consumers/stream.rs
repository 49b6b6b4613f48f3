//! Consumer that hands packets to async code as a [`Stream`](futures::Stream).

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_stream::wrappers::ReceiverStream;
use tracing::trace;

use crate::Result;
use crate::consumer::Consumer;
use crate::protocol::Packet;

/// Stream of decoded packets fed by a [`StreamConsumer`].
///
/// Ends once the listener has finished and dropped its consumer.
pub type PacketStream = ReceiverStream<Packet>;

/// Forwards packets into a bounded channel.
///
/// Consumers are called synchronously, so when the stream's reader falls
/// behind and the channel is full the packet is dropped and counted rather
/// than blocking the listener.
#[derive(Debug)]
pub struct StreamConsumer {
    tx: mpsc::Sender<Packet>,
    dropped: u64,
}

impl StreamConsumer {
    /// Create a consumer and the stream it feeds.
    pub fn channel(capacity: usize) -> (Self, PacketStream) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx, dropped: 0 }, ReceiverStream::new(rx))
    }

    /// Packets dropped because the stream was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Consumer for StreamConsumer {
    fn consume(&mut self, packet: Packet) -> Result<()> {
        match self.tx.try_send(packet) {
            Ok(()) => {}
            Err(TrySendError::Full(packet)) => {
                self.dropped += 1;
                trace!("Stream full, dropping {} packet", packet.id());
            }
            // reader went away; nothing left to deliver to
            Err(TrySendError::Closed(_)) => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PacketId;
    use crate::test_utils::{car_damage_fixture, motion_fixture};
    use futures::StreamExt;

    #[tokio::test]
    async fn packets_arrive_in_order_and_overflow_is_counted() -> Result<()> {
        let (mut consumer, mut stream) = StreamConsumer::channel(2);
        consumer.consume(Packet::decode(&motion_fixture())?)?;
        consumer.consume(Packet::decode(&car_damage_fixture())?)?;
        consumer.consume(Packet::decode(&motion_fixture())?)?;
        assert_eq!(consumer.dropped(), 1);
        drop(consumer);

        let kinds: Vec<PacketId> = stream.by_ref().map(|packet| packet.id()).collect().await;
        assert_eq!(kinds, vec![PacketId::Motion, PacketId::CarDamage]);
        Ok(())
    }
}
