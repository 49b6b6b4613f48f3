//! Participants packet (id 4): who is driving each car.

use super::PacketHeader;
use super::constants::{GRID_SIZE, NAME_SIZE};
use crate::names;
use crate::text::FixedText;
use crate::wire::wire_record;

wire_record! {
    pub struct ParticipantData {
        pub ai_controlled: u8,
        /// 255 if a network human
        pub driver_id: u8,
        pub network_id: u8,
        pub team_id: u8,
        pub my_team: u8,
        pub race_number: u8,
        pub nationality: u8,
        pub name: FixedText<NAME_SIZE>,
        /// 0 restricted, 1 public
        pub your_telemetry: u8,
    }
}

impl ParticipantData {
    /// Full name for known drivers, otherwise the name the game sent.
    pub fn display_name(&self) -> String {
        match names::driver_name(self.driver_id) {
            Some(name) => name.to_string(),
            None => self.name.to_string_lossy().into_owned(),
        }
    }
}

wire_record! {
    pub struct ParticipantsPacket {
        pub header: PacketHeader,
        pub num_active_cars: u8,
        pub participants: [ParticipantData; GRID_SIZE],
    }
}
