//! Lap data packet (id 2): timing for every car on track.

use super::PacketHeader;
use super::constants::GRID_SIZE;
use crate::wire::wire_record;

wire_record! {
    pub struct LapData {
        pub last_lap_time_in_ms: u32,
        pub current_lap_time_in_ms: u32,
        pub sector1_time_in_ms: u16,
        pub sector2_time_in_ms: u16,
        /// Metres around the current lap, negative before the line
        pub lap_distance: f32,
        pub total_distance: f32,
        /// Seconds
        pub safety_car_delta: f32,
        pub car_position: u8,
        pub current_lap_num: u8,
        pub pit_status: u8,
        pub num_pit_stops: u8,
        pub sector: u8,
        pub current_lap_invalid: u8,
        pub penalties: u8,
        pub warnings: u8,
        pub num_unserved_drive_through_pens: u8,
        pub num_unserved_stop_go_pens: u8,
        pub grid_position: u8,
        pub driver_status: u8,
        pub result_status: u8,
        pub pit_lane_timer_active: u8,
        pub pit_lane_time_in_lane_in_ms: u16,
        pub pit_stop_timer_in_ms: u16,
        pub pit_stop_should_serve_pen: u8,
    }
}

wire_record! {
    pub struct LapDataPacket {
        pub header: PacketHeader,
        pub lap_data: [LapData; GRID_SIZE],
        /// 255 if invalid
        pub time_trial_pb_car_idx: u8,
        pub time_trial_rival_car_idx: u8,
    }
}
