//! Car telemetry packet (id 6): driver inputs and temperatures.

use super::PacketHeader;
use super::constants::{GRID_SIZE, TYRE_COUNT};
use crate::wire::wire_record;

wire_record! {
    pub struct CarTelemetryData {
        /// km/h
        pub speed: u16,
        pub throttle: f32,
        /// -1.0 full left, 1.0 full right
        pub steer: f32,
        pub brake: f32,
        pub clutch: u8,
        /// -1 reverse, 0 neutral
        pub gear: i8,
        pub engine_rpm: u16,
        pub drs: u8,
        pub rev_lights_percent: u8,
        pub rev_lights_bit_value: u16,
        /// Celsius
        pub brakes_temperature: [u16; TYRE_COUNT],
        pub tyres_surface_temperature: [u8; TYRE_COUNT],
        pub tyres_inner_temperature: [u8; TYRE_COUNT],
        pub engine_temperature: u16,
        /// PSI
        pub tyres_pressure: [f32; TYRE_COUNT],
        pub surface_type: [u8; TYRE_COUNT],
    }
}

wire_record! {
    pub struct CarTelemetryPacket {
        pub header: PacketHeader,
        pub car_telemetry_data: [CarTelemetryData; GRID_SIZE],
        /// 255 when the MFD is closed
        pub mfd_panel_index: u8,
        pub mfd_panel_index_secondary_player: u8,
        /// 0 if no suggestion
        pub suggested_gear: i8,
    }
}
