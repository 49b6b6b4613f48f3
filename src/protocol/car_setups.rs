//! Car setups packet (id 5).

use super::PacketHeader;
use super::constants::GRID_SIZE;
use crate::wire::wire_record;

wire_record! {
    pub struct CarSetupData {
        pub front_wing: u8,
        pub rear_wing: u8,
        /// Differential adjustment on throttle, percent
        pub on_throttle: u8,
        pub off_throttle: u8,
        pub front_camber: f32,
        pub rear_camber: f32,
        pub front_toe: f32,
        pub rear_toe: f32,
        pub front_suspension: u8,
        pub rear_suspension: u8,
        pub front_anti_roll_bar: u8,
        pub rear_anti_roll_bar: u8,
        pub front_suspension_height: u8,
        pub rear_suspension_height: u8,
        pub brake_pressure: u8,
        pub brake_bias: u8,
        /// PSI
        pub rear_left_tyre_pressure: f32,
        pub rear_right_tyre_pressure: f32,
        pub front_left_tyre_pressure: f32,
        pub front_right_tyre_pressure: f32,
        pub ballast: u8,
        pub fuel_load: f32,
    }
}

wire_record! {
    pub struct CarSetupsPacket {
        pub header: PacketHeader,
        pub car_setups: [CarSetupData; GRID_SIZE],
    }
}
