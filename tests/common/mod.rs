//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use pitlane::protocol::constants::{PACKET_HEADER_LENGTH, PACKET_ID_OFFSET};
use pitlane::{Consumer, EventCode, Packet, PacketId};

/// Zero-filled packet of `id` with a minimal header.
pub fn blank_packet(id: PacketId, frame: u32) -> Vec<u8> {
    let mut data = vec![0u8; id.wire_size()];
    data[..2].copy_from_slice(&2022u16.to_le_bytes());
    data[PACKET_ID_OFFSET] = id as u8;
    data[18..22].copy_from_slice(&frame.to_le_bytes());
    data
}

/// Event packet carrying `code`, with `payload` at the start of the event region.
pub fn event_packet(code: EventCode, payload: &[u8], frame: u32) -> Vec<u8> {
    let mut data = blank_packet(PacketId::Event, frame);
    let start = PACKET_HEADER_LENGTH;
    data[start..start + 4].copy_from_slice(code.as_bytes());
    data[start + 4..start + 4 + payload.len()].copy_from_slice(payload);
    data
}

/// Consumer that records packet kinds and frames into shared state.
#[derive(Clone, Default)]
pub struct Recorder {
    pub packets: Arc<Mutex<Vec<(PacketId, u32)>>>,
    pub cleanups: Arc<Mutex<u32>>,
}

impl Recorder {
    pub fn frames(&self) -> Vec<u32> {
        self.packets.lock().expect("lock").iter().map(|(_, frame)| *frame).collect()
    }

    pub fn cleanups(&self) -> u32 {
        *self.cleanups.lock().expect("lock")
    }
}

impl Consumer for Recorder {
    fn consume(&mut self, packet: Packet) -> pitlane::Result<()> {
        let frame = packet.header().frame_identifier;
        self.packets.lock().expect("lock").push((packet.id(), frame));
        Ok(())
    }

    fn cleanup(&mut self) -> pitlane::Result<()> {
        *self.cleanups.lock().expect("lock") += 1;
        Ok(())
    }
}
