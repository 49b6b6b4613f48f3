//! Final classification packet (id 8), sent once at the end of a race.

use super::PacketHeader;
use super::constants::{GRID_SIZE, MAX_TYRE_STINTS};
use crate::wire::wire_record;

wire_record! {
    pub struct FinalClassificationData {
        pub position: u8,
        pub num_laps: u8,
        pub grid_position: u8,
        pub points: u8,
        pub num_pit_stops: u8,
        pub result_status: u8,
        pub best_lap_time_in_ms: u32,
        /// Seconds, without penalties
        pub total_race_time: f64,
        pub penalties_time: u8,
        pub num_penalties: u8,
        pub num_tyre_stints: u8,
        pub tyre_stints_actual: [u8; MAX_TYRE_STINTS],
        pub tyre_stints_visual: [u8; MAX_TYRE_STINTS],
        pub tyre_stints_end_laps: [u8; MAX_TYRE_STINTS],
    }
}

wire_record! {
    pub struct FinalClassificationPacket {
        pub header: PacketHeader,
        pub num_cars: u8,
        pub classification_data: [FinalClassificationData; GRID_SIZE],
    }
}

impl FinalClassificationPacket {
    pub fn classified(&self) -> &[FinalClassificationData] {
        let count = usize::from(self.num_cars).min(GRID_SIZE);
        &self.classification_data[..count]
    }
}
