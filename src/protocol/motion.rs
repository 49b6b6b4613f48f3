//! Motion packet (id 0): physics state of every car plus extra detail for the
//! player's car.
//!
//! Per-corner arrays are ordered rear left, rear right, front left, front right.

use super::PacketHeader;
use super::constants::{GRID_SIZE, TYRE_COUNT};
use crate::wire::wire_record;

wire_record! {
    pub struct CarMotionData {
        pub world_position_x: f32,
        pub world_position_y: f32,
        pub world_position_z: f32,
        pub world_velocity_x: f32,
        pub world_velocity_y: f32,
        pub world_velocity_z: f32,
        /// Normalised direction vectors, scaled by 32767
        pub world_forward_dir_x: i16,
        pub world_forward_dir_y: i16,
        pub world_forward_dir_z: i16,
        pub world_right_dir_x: i16,
        pub world_right_dir_y: i16,
        pub world_right_dir_z: i16,
        pub g_force_lateral: f32,
        pub g_force_longitudinal: f32,
        pub g_force_vertical: f32,
        /// Radians
        pub yaw: f32,
        pub pitch: f32,
        pub roll: f32,
    }
}

wire_record! {
    pub struct MotionPacket {
        pub header: PacketHeader,
        pub car_motion_data: [CarMotionData; GRID_SIZE],
        pub suspension_position: [f32; TYRE_COUNT],
        pub suspension_velocity: [f32; TYRE_COUNT],
        pub suspension_acceleration: [f32; TYRE_COUNT],
        pub wheel_speed: [f32; TYRE_COUNT],
        pub wheel_slip: [f32; TYRE_COUNT],
        pub local_velocity_x: f32,
        pub local_velocity_y: f32,
        pub local_velocity_z: f32,
        pub angular_velocity_x: f32,
        pub angular_velocity_y: f32,
        pub angular_velocity_z: f32,
        pub angular_acceleration_x: f32,
        pub angular_acceleration_y: f32,
        pub angular_acceleration_z: f32,
        /// Radians
        pub front_wheels_angle: f32,
    }
}

impl MotionPacket {
    /// Motion data of the car the header names as the player's.
    pub fn player_car(&self) -> Option<&CarMotionData> {
        self.car_motion_data.get(usize::from(self.header.player_car_index))
    }
}
