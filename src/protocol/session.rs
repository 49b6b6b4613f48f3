//! Session packet (id 1): track, weather and rules of the running session.

use super::PacketHeader;
use super::constants::{MAX_MARSHAL_ZONES, MAX_WEATHER_SAMPLES};
use super::ids::{SessionType, Weather};
use crate::DecodeError;
use crate::names;
use crate::wire::wire_record;

wire_record! {
    pub struct MarshalZone {
        /// Fraction (0..1) of the way through the lap the zone starts
        pub zone_start: f32,
        /// -1 invalid/unknown, 0 none, 1 green, 2 blue, 3 yellow
        pub zone_flag: i8,
    }
}

wire_record! {
    pub struct WeatherForecastSample {
        pub session_type: u8,
        /// Minutes
        pub time_offset: u8,
        pub weather: u8,
        pub track_temperature: i8,
        pub track_temperature_change: i8,
        pub air_temperature: i8,
        pub air_temperature_change: i8,
        pub rain_percentage: u8,
    }
}

wire_record! {
    pub struct SessionPacket {
        pub header: PacketHeader,
        pub weather: u8,
        pub track_temperature: i8,
        pub air_temperature: i8,
        pub total_laps: u8,
        /// Metres
        pub track_length: u16,
        pub session_type: u8,
        /// -1 for unknown
        pub track_id: i8,
        pub formula: u8,
        /// Seconds
        pub session_time_left: u16,
        pub session_duration: u16,
        pub pit_speed_limit: u8,
        pub game_paused: u8,
        pub is_spectating: u8,
        pub spectator_car_index: u8,
        pub sli_pro_native_support: u8,
        pub num_marshal_zones: u8,
        pub marshal_zones: [MarshalZone; MAX_MARSHAL_ZONES],
        pub safety_car_status: u8,
        pub network_game: u8,
        pub num_weather_forecast_samples: u8,
        pub weather_forecast_samples: [WeatherForecastSample; MAX_WEATHER_SAMPLES],
        pub forecast_accuracy: u8,
        pub ai_difficulty: u8,
        pub season_link_identifier: u32,
        pub weekend_link_identifier: u32,
        pub session_link_identifier: u32,
        pub pit_stop_window_ideal_lap: u8,
        pub pit_stop_window_latest_lap: u8,
        pub pit_stop_rejoin_position: u8,
        pub steering_assist: u8,
        pub braking_assist: u8,
        pub gearbox_assist: u8,
        pub pit_assist: u8,
        pub pit_release_assist: u8,
        pub ers_assist: u8,
        pub drs_assist: u8,
        pub dynamic_racing_line: u8,
        pub dynamic_racing_line_type: u8,
        pub game_mode: u8,
        pub rule_set: u8,
        /// Minutes since midnight
        pub time_of_day: u32,
        pub session_length: u8,
    }
}

impl SessionPacket {
    pub fn weather_kind(&self) -> Result<Weather, DecodeError> {
        Weather::try_from(self.weather)
    }

    pub fn session_kind(&self) -> Result<SessionType, DecodeError> {
        SessionType::try_from(self.session_type)
    }

    /// Circuit name, or [`DecodeError::OutOfRange`] for ids the game does not publish.
    pub fn track_name(&self) -> Result<&'static str, DecodeError> {
        names::track_name(self.track_id).ok_or(DecodeError::out_of_range("track_id", self.track_id))
    }

    /// Marshal zones actually in use this session.
    pub fn active_marshal_zones(&self) -> &[MarshalZone] {
        let count = usize::from(self.num_marshal_zones).min(MAX_MARSHAL_ZONES);
        &self.marshal_zones[..count]
    }

    /// Forecast samples actually in use this session.
    pub fn active_forecast(&self) -> &[WeatherForecastSample] {
        let count = usize::from(self.num_weather_forecast_samples).min(MAX_WEATHER_SAMPLES);
        &self.weather_forecast_samples[..count]
    }
}
