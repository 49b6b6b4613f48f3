//! Car status packet (id 7).

use super::PacketHeader;
use super::constants::GRID_SIZE;
use crate::wire::wire_record;

wire_record! {
    pub struct CarStatusData {
        pub traction_control: u8,
        pub anti_lock_brakes: u8,
        pub fuel_mix: u8,
        pub front_brake_bias: u8,
        pub pit_limiter_status: u8,
        pub fuel_in_tank: f32,
        pub fuel_capacity: f32,
        pub fuel_remaining_laps: f32,
        pub max_rpm: u16,
        pub idle_rpm: u16,
        pub max_gears: u8,
        pub drs_allowed: u8,
        /// Metres, 0 when DRS is not available
        pub drs_activation_distance: u16,
        pub actual_tyre_compound: u8,
        pub visual_tyre_compound: u8,
        pub tyres_age_laps: u8,
        /// -1 invalid, 0 none, 1 green, 2 blue, 3 yellow
        pub vehicle_fia_flags: i8,
        /// Joules
        pub ers_store_energy: f32,
        pub ers_deploy_mode: u8,
        pub ers_harvested_this_lap_mguk: f32,
        pub ers_harvested_this_lap_mguh: f32,
        pub ers_deployed_this_lap: f32,
        pub network_paused: u8,
    }
}

wire_record! {
    pub struct CarStatusPacket {
        pub header: PacketHeader,
        pub car_status_data: [CarStatusData; GRID_SIZE],
    }
}
