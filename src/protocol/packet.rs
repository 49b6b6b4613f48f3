//! Packet dispatch: one datagram in, one typed packet out.

use tracing::trace;

use super::constants::PACKET_ID_OFFSET;
use super::{
    CarDamagePacket, CarSetupsPacket, CarStatusPacket, CarTelemetryPacket, EventPacket,
    FinalClassificationPacket, LapDataPacket, LobbyInfoPacket, MotionPacket, PacketHeader,
    PacketId, ParticipantsPacket, SessionHistoryPacket, SessionPacket,
};
use crate::DecodeError;
use crate::wire::{Cursor, Decode, Layout, Value};

/// A fully decoded datagram, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Motion(Box<MotionPacket>),
    Session(Box<SessionPacket>),
    LapData(Box<LapDataPacket>),
    Event(EventPacket),
    Participants(Box<ParticipantsPacket>),
    CarSetups(Box<CarSetupsPacket>),
    CarTelemetry(Box<CarTelemetryPacket>),
    CarStatus(Box<CarStatusPacket>),
    FinalClassification(Box<FinalClassificationPacket>),
    LobbyInfo(Box<LobbyInfoPacket>),
    CarDamage(Box<CarDamagePacket>),
    SessionHistory(Box<SessionHistoryPacket>),
}

/// Read the packet id byte without decoding anything else.
pub fn peek_packet_id(data: &[u8]) -> Result<PacketId, DecodeError> {
    let id = *data.get(PACKET_ID_OFFSET).ok_or(DecodeError::Truncated {
        offset: PACKET_ID_OFFSET,
        needed: 1,
        remaining: data.len().saturating_sub(PACKET_ID_OFFSET),
    })?;
    PacketId::try_from(id)
}

fn boxed<T: Decode>(cursor: &mut Cursor<'_>) -> Result<Box<T>, DecodeError> {
    T::decode(cursor).map(Box::new)
}

impl Packet {
    /// Decode one datagram.
    ///
    /// The id byte is checked before anything else is read. Bytes past the end
    /// of the packet's layout are ignored; a short datagram is an error.
    pub fn decode(data: &[u8]) -> Result<Self, DecodeError> {
        let id = peek_packet_id(data)?;
        trace!("decoding {} packet ({} bytes)", id, data.len());

        let mut cursor = Cursor::new(data);
        let cursor = &mut cursor;
        Ok(match id {
            PacketId::Motion => Packet::Motion(boxed(cursor)?),
            PacketId::Session => Packet::Session(boxed(cursor)?),
            PacketId::LapData => Packet::LapData(boxed(cursor)?),
            PacketId::Event => Packet::Event(EventPacket::decode(cursor)?),
            PacketId::Participants => Packet::Participants(boxed(cursor)?),
            PacketId::CarSetups => Packet::CarSetups(boxed(cursor)?),
            PacketId::CarTelemetry => Packet::CarTelemetry(boxed(cursor)?),
            PacketId::CarStatus => Packet::CarStatus(boxed(cursor)?),
            PacketId::FinalClassification => Packet::FinalClassification(boxed(cursor)?),
            PacketId::LobbyInfo => Packet::LobbyInfo(boxed(cursor)?),
            PacketId::CarDamage => Packet::CarDamage(boxed(cursor)?),
            PacketId::SessionHistory => Packet::SessionHistory(boxed(cursor)?),
        })
    }

    pub fn id(&self) -> PacketId {
        match self {
            Packet::Motion(_) => PacketId::Motion,
            Packet::Session(_) => PacketId::Session,
            Packet::LapData(_) => PacketId::LapData,
            Packet::Event(_) => PacketId::Event,
            Packet::Participants(_) => PacketId::Participants,
            Packet::CarSetups(_) => PacketId::CarSetups,
            Packet::CarTelemetry(_) => PacketId::CarTelemetry,
            Packet::CarStatus(_) => PacketId::CarStatus,
            Packet::FinalClassification(_) => PacketId::FinalClassification,
            Packet::LobbyInfo(_) => PacketId::LobbyInfo,
            Packet::CarDamage(_) => PacketId::CarDamage,
            Packet::SessionHistory(_) => PacketId::SessionHistory,
        }
    }

    pub fn header(&self) -> &PacketHeader {
        match self {
            Packet::Motion(p) => &p.header,
            Packet::Session(p) => &p.header,
            Packet::LapData(p) => &p.header,
            Packet::Event(p) => &p.header,
            Packet::Participants(p) => &p.header,
            Packet::CarSetups(p) => &p.header,
            Packet::CarTelemetry(p) => &p.header,
            Packet::CarStatus(p) => &p.header,
            Packet::FinalClassification(p) => &p.header,
            Packet::LobbyInfo(p) => &p.header,
            Packet::CarDamage(p) => &p.header,
            Packet::SessionHistory(p) => &p.header,
        }
    }

    /// Generic value tree of the whole packet.
    pub fn to_value(&self) -> Value {
        match self {
            Packet::Motion(p) => p.to_value(),
            Packet::Session(p) => p.to_value(),
            Packet::LapData(p) => p.to_value(),
            Packet::Event(p) => p.to_value(),
            Packet::Participants(p) => p.to_value(),
            Packet::CarSetups(p) => p.to_value(),
            Packet::CarTelemetry(p) => p.to_value(),
            Packet::CarStatus(p) => p.to_value(),
            Packet::FinalClassification(p) => p.to_value(),
            Packet::LobbyInfo(p) => p.to_value(),
            Packet::CarDamage(p) => p.to_value(),
            Packet::SessionHistory(p) => p.to_value(),
        }
    }
}

impl PacketId {
    /// Full wire layout of this packet kind, header included.
    pub fn layout(&self) -> Layout {
        match self {
            PacketId::Motion => MotionPacket::layout(),
            PacketId::Session => SessionPacket::layout(),
            PacketId::LapData => LapDataPacket::layout(),
            PacketId::Event => EventPacket::layout(),
            PacketId::Participants => ParticipantsPacket::layout(),
            PacketId::CarSetups => CarSetupsPacket::layout(),
            PacketId::CarTelemetry => CarTelemetryPacket::layout(),
            PacketId::CarStatus => CarStatusPacket::layout(),
            PacketId::FinalClassification => FinalClassificationPacket::layout(),
            PacketId::LobbyInfo => LobbyInfoPacket::layout(),
            PacketId::CarDamage => CarDamagePacket::layout(),
            PacketId::SessionHistory => SessionHistoryPacket::layout(),
        }
    }

    /// Bytes a packet of this kind occupies on the wire.
    pub fn wire_size(&self) -> usize {
        match self {
            PacketId::Motion => MotionPacket::WIRE_SIZE,
            PacketId::Session => SessionPacket::WIRE_SIZE,
            PacketId::LapData => LapDataPacket::WIRE_SIZE,
            PacketId::Event => EventPacket::WIRE_SIZE,
            PacketId::Participants => ParticipantsPacket::WIRE_SIZE,
            PacketId::CarSetups => CarSetupsPacket::WIRE_SIZE,
            PacketId::CarTelemetry => CarTelemetryPacket::WIRE_SIZE,
            PacketId::CarStatus => CarStatusPacket::WIRE_SIZE,
            PacketId::FinalClassification => FinalClassificationPacket::WIRE_SIZE,
            PacketId::LobbyInfo => LobbyInfoPacket::WIRE_SIZE,
            PacketId::CarDamage => CarDamagePacket::WIRE_SIZE,
            PacketId::SessionHistory => SessionHistoryPacket::WIRE_SIZE,
        }
    }
}

/// Decode one datagram by walking its layout instead of the typed records.
pub fn decode_value(data: &[u8]) -> Result<Value, DecodeError> {
    let id = peek_packet_id(data)?;
    id.layout().decode(&mut Cursor::new(data))
}
