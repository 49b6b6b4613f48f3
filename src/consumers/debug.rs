//! Consumer that logs the kind of every packet.

use tracing::info;

use crate::Result;
use crate::consumer::Consumer;
use crate::protocol::Packet;

#[derive(Debug, Default)]
pub struct DebugConsumer {
    packets: u64,
}

impl DebugConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packets seen so far.
    pub fn packets(&self) -> u64 {
        self.packets
    }
}

impl Consumer for DebugConsumer {
    fn consume(&mut self, packet: Packet) -> Result<()> {
        self.packets += 1;
        let id = packet.id();
        info!("packet {} ({}), frame {}", id as u8, id, packet.header().frame_identifier);
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        info!("Debug consumer saw {} packets", self.packets);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::all_fixtures;

    #[test]
    fn counts_every_kind() -> Result<()> {
        let mut consumer = DebugConsumer::new();
        for (_, data) in all_fixtures() {
            consumer.consume(Packet::decode(&data)?)?;
        }
        consumer.cleanup()?;
        assert_eq!(consumer.packets(), 12);
        Ok(())
    }
}
