//! Packet header and packet ids.

use std::fmt;

use crate::DecodeError;
use crate::wire::wire_record;

wire_record! {
    /// Header shared by every packet.
    pub struct PacketHeader {
        pub packet_format: u16,
        pub game_major_version: u8,
        pub game_minor_version: u8,
        pub packet_version: u8,
        pub packet_id: u8,
        pub session_uid: u64,
        pub session_time: f32,
        pub frame_identifier: u32,
        pub player_car_index: u8,
        /// 255 when there is no second player
        pub secondary_player_car_index: u8,
    }
}

impl PacketHeader {
    /// The packet kind named by [`Self::packet_id`].
    pub fn kind(&self) -> Result<PacketId, DecodeError> {
        PacketId::try_from(self.packet_id)
    }
}

/// Top-level packet kinds, by wire id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketId {
    Motion = 0,
    Session = 1,
    LapData = 2,
    Event = 3,
    Participants = 4,
    CarSetups = 5,
    CarTelemetry = 6,
    CarStatus = 7,
    FinalClassification = 8,
    LobbyInfo = 9,
    CarDamage = 10,
    SessionHistory = 11,
}

impl PacketId {
    pub const ALL: [PacketId; 12] = [
        PacketId::Motion,
        PacketId::Session,
        PacketId::LapData,
        PacketId::Event,
        PacketId::Participants,
        PacketId::CarSetups,
        PacketId::CarTelemetry,
        PacketId::CarStatus,
        PacketId::FinalClassification,
        PacketId::LobbyInfo,
        PacketId::CarDamage,
        PacketId::SessionHistory,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            PacketId::Motion => "Motion",
            PacketId::Session => "Session",
            PacketId::LapData => "LapData",
            PacketId::Event => "Event",
            PacketId::Participants => "Participants",
            PacketId::CarSetups => "CarSetups",
            PacketId::CarTelemetry => "CarTelemetry",
            PacketId::CarStatus => "CarStatus",
            PacketId::FinalClassification => "FinalClassification",
            PacketId::LobbyInfo => "LobbyInfo",
            PacketId::CarDamage => "CarDamage",
            PacketId::SessionHistory => "SessionHistory",
        }
    }
}

impl TryFrom<u8> for PacketId {
    type Error = DecodeError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        PacketId::ALL.get(usize::from(id)).copied().ok_or(DecodeError::UnknownPacketId { id })
    }
}

impl fmt::Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::constants::{PACKET_HEADER_LENGTH, PACKET_ID_OFFSET};
    use crate::wire::Decode;

    #[test]
    fn header_is_24_bytes() {
        assert_eq!(PacketHeader::WIRE_SIZE, PACKET_HEADER_LENGTH);
    }

    #[test]
    fn ids_map_in_wire_order() {
        for (index, id) in PacketId::ALL.iter().enumerate() {
            assert_eq!(*id as usize, index);
            assert_eq!(PacketId::try_from(index as u8), Ok(*id));
        }
        assert_eq!(PacketId::try_from(12), Err(DecodeError::UnknownPacketId { id: 12 }));
    }

    #[test]
    fn header_fields_decode_at_fixed_offsets() -> Result<(), DecodeError> {
        let mut data = Vec::new();
        data.extend_from_slice(&2022u16.to_le_bytes());
        data.extend_from_slice(&[1, 18, 1, 6]);
        data.extend_from_slice(&0xDEAD_BEEFu64.to_le_bytes());
        data.extend_from_slice(&12.5f32.to_le_bytes());
        data.extend_from_slice(&99u32.to_le_bytes());
        data.extend_from_slice(&[19, 255]);

        assert_eq!(data[PACKET_ID_OFFSET], 6);
        let header = PacketHeader::decode_bytes(&data)?;
        assert_eq!(header.packet_format, 2022);
        assert_eq!(header.packet_id, 6);
        assert_eq!(header.kind()?, PacketId::CarTelemetry);
        assert_eq!(header.session_uid, 0xDEAD_BEEF);
        assert_eq!(header.session_time, 12.5);
        assert_eq!(header.frame_identifier, 99);
        assert_eq!(header.player_car_index, 19);
        assert_eq!(header.secondary_player_car_index, 255);
        Ok(())
    }
}
