//! Car damage packet (id 10). Damage and wear values are percentages.

use super::PacketHeader;
use super::constants::{GRID_SIZE, TYRE_COUNT};
use crate::wire::wire_record;

wire_record! {
    pub struct CarDamageData {
        pub tyres_wear: [f32; TYRE_COUNT],
        pub tyres_damage: [u8; TYRE_COUNT],
        pub brakes_damage: [u8; TYRE_COUNT],
        pub front_left_wing_damage: u8,
        pub front_right_wing_damage: u8,
        pub rear_wing_damage: u8,
        pub floor_damage: u8,
        pub diffuser_damage: u8,
        pub sidepod_damage: u8,
        /// 0 OK, 1 fault
        pub drs_fault: u8,
        pub ers_fault: u8,
        pub gear_box_damage: u8,
        pub engine_damage: u8,
        pub engine_mguh_wear: u8,
        pub engine_es_wear: u8,
        pub engine_ce_wear: u8,
        pub engine_ice_wear: u8,
        pub engine_mguk_wear: u8,
        pub engine_tc_wear: u8,
        pub engine_blown: u8,
        pub engine_seized: u8,
    }
}

wire_record! {
    pub struct CarDamagePacket {
        pub header: PacketHeader,
        pub car_damage_data: [CarDamageData; GRID_SIZE],
    }
}
