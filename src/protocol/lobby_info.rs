//! Lobby info packet (id 9): players waiting in a multiplayer lobby.

use super::PacketHeader;
use super::constants::{GRID_SIZE, NAME_SIZE};
use crate::text::FixedText;
use crate::wire::wire_record;

wire_record! {
    pub struct LobbyInfoData {
        pub ai_controlled: u8,
        /// 255 if no team selected
        pub team_id: u8,
        pub nationality: u8,
        pub name: FixedText<NAME_SIZE>,
        pub car_number: u8,
        /// 0 not ready, 1 ready, 2 spectating
        pub ready_status: u8,
    }
}

wire_record! {
    pub struct LobbyInfoPacket {
        pub header: PacketHeader,
        pub num_players: u8,
        pub lobby_players: [LobbyInfoData; GRID_SIZE],
    }
}
