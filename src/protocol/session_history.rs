//! Session history packet (id 11): lap and stint history for one car.

use super::PacketHeader;
use super::constants::{MAX_LAP_HISTORIES, MAX_TYRE_STINTS};
use crate::wire::wire_record;

wire_record! {
    pub struct LapHistoryData {
        pub lap_time_in_ms: u32,
        pub sector1_time_in_ms: u16,
        pub sector2_time_in_ms: u16,
        pub sector3_time_in_ms: u16,
        /// Bit 0 lap valid, bits 1-3 sectors 1-3 valid
        pub lap_valid_bit_flags: u8,
    }
}

impl LapHistoryData {
    pub fn lap_valid(&self) -> bool {
        self.lap_valid_bit_flags & 0x01 != 0
    }

    /// `sector` is 1-based.
    pub fn sector_valid(&self, sector: u8) -> bool {
        matches!(sector, 1..=3) && self.lap_valid_bit_flags & (1 << sector) != 0
    }
}

wire_record! {
    pub struct TyreStintHistoryData {
        /// 255 for the current stint
        pub end_lap: u8,
        pub tyre_actual_compound: u8,
        pub tyre_visual_compound: u8,
    }
}

wire_record! {
    pub struct SessionHistoryPacket {
        pub header: PacketHeader,
        pub car_idx: u8,
        pub num_laps: u8,
        pub num_tyre_stints: u8,
        pub best_lap_time_lap_num: u8,
        pub best_sector1_lap_num: u8,
        pub best_sector2_lap_num: u8,
        pub best_sector3_lap_num: u8,
        pub lap_history_data: [LapHistoryData; MAX_LAP_HISTORIES],
        pub tyre_stints_history_data: [TyreStintHistoryData; MAX_TYRE_STINTS],
    }
}

impl SessionHistoryPacket {
    pub fn laps(&self) -> &[LapHistoryData] {
        let count = usize::from(self.num_laps).min(MAX_LAP_HISTORIES);
        &self.lap_history_data[..count]
    }
}
